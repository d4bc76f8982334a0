/*
** This file is a part of Saxscan (streaming SAX tokenizer for XML)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Saxscan is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod construct;
mod error;
mod events;
mod handler;
mod location;
mod matcher;
mod scanner;
mod tag;

use std::borrow::Cow;

use log::warn;

pub use error::ErrorKind;
pub use error::SaxError;
pub use error::SaxHandlerError;
pub use error::XmlError;
use error::description;
pub use events::EventCollector;
pub use events::SaxEvent;
pub use handler::Callbacks;
pub use handler::SaxHandler;
pub use location::Location;
pub use location::Span;
pub use tag::Attributes;
pub use tag::Doctype;
pub use tag::ExternalId;
pub use tag::Tag;
pub use tag::parse_tag;

use scanner::Scanner;

/// Options of a [SaxParser].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    /// Trim text and comment bodies, and drop text events which become empty.
    pub strip_whitespace: bool,
    /// Replace predefined entities and numeric character references in
    /// text, comments and attribute values.
    pub expand_entities: bool,
    /// Extract tag attributes. When disabled tags only carry their names.
    pub parse_attributes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            strip_whitespace: false,
            expand_entities: true,
            parse_attributes: true,
        }
    }
}

type ErrorCallback<'e> = Box<dyn FnMut(&XmlError) + 'e>;

/// SAX (Simple API for XML) based XML tokenizer.
///
/// The parser scans a fully buffered document once from left to right
/// and invokes the [SaxHandler] callbacks for each construct found.
/// Every event carries the [Span] of its source text.
///
/// Problems are passed to the error handler set with
/// [on_error()](SaxParser::on_error). Problems which leave the scan
/// without a position to continue from are fatal: they stop the scan and
/// are returned as [SaxError::BadXml]. Mismatched tags, attributes on end
/// tags, and misplaced or versionless declarations are only reported.
///
/// Each parse call starts with a fresh tag stack, so the instance can be
/// reused for any number of documents.
///
/// # Examples
///
/// ```
/// use saxscan::{ErrorKind, EventCollector, SaxParser};
///
/// let mut errors = Vec::new();
/// let mut parser = SaxParser::new()
///     .strip_whitespace(true)
///     .on_error(|err| errors.push(err.kind()));
///
/// let mut collector = EventCollector::new();
/// parser.parse(&mut collector, "<a>\n  <b>text</b>\n</a>").unwrap();
/// assert_eq!(collector.events().len(), 5);
///
/// parser.parse(&mut collector, "<a><b></a>").unwrap_err();
/// drop(parser);
/// assert_eq!(errors, [ErrorKind::UnmatchedTag, ErrorKind::IncompleteDocument]);
/// ```
pub struct SaxParser<'e> {
    options: ParseOptions,
    error_handler: Option<ErrorCallback<'e>>,
    location: Location,
}

impl<'e> SaxParser<'e> {
    /// Creates a new SAX parser instance with the default options.
    pub fn new() -> Self {
        SaxParser::with_options(ParseOptions::default())
    }

    pub fn with_options(options: ParseOptions) -> Self {
        SaxParser {
            options,
            error_handler: None,
            location: Location::new(),
        }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    pub fn strip_whitespace(mut self, enabled: bool) -> Self {
        self.options.strip_whitespace = enabled;
        self
    }

    pub fn expand_entities(mut self, enabled: bool) -> Self {
        self.options.expand_entities = enabled;
        self
    }

    pub fn parse_attributes(mut self, enabled: bool) -> Self {
        self.options.parse_attributes = enabled;
        self
    }

    /// Installs a function which receives every error found.
    ///
    /// Without an error handler the errors are logged as warnings.
    pub fn on_error(mut self, f: impl FnMut(&XmlError) + 'e) -> Self {
        self.error_handler = Some(Box::new(f));
        self
    }

    /// Parses the whole document.
    pub fn parse(
        &mut self,
        handler: &mut impl SaxHandler,
        document: &str,
    ) -> Result<(), SaxError> {
        self.parse_with(handler, document, true)
    }

    /// Parses the whole document, with attribute parsing enabled only if
    /// both the `parse_attributes` argument and the option are set.
    pub fn parse_with(
        &mut self,
        handler: &mut impl SaxHandler,
        document: &str,
        parse_attributes: bool,
    ) -> Result<(), SaxError> {
        let mut options = self.options;
        options.parse_attributes &= parse_attributes;

        let mut scanner = Scanner::new(
            document,
            options,
            handler,
            self.error_handler.as_deref_mut(),
        );
        let result = scanner.run();
        let pos = scanner.position();
        self.location = Location::of(document, pos);
        result
    }

    /// Parses a document given as bytes, which must be UTF-8.
    pub fn parse_bytes(
        &mut self,
        handler: &mut impl SaxHandler,
        bytes: &[u8],
    ) -> Result<(), SaxError> {
        match std::str::from_utf8(bytes) {
            Ok(document) => self.parse(handler, document),
            Err(e) => {
                let valid = e.valid_up_to();
                let prefix = std::str::from_utf8(&bytes[..valid]).unwrap_or_default();
                let err = XmlError::new(
                    ErrorKind::MalformedXml,
                    Some(Cow::Borrowed(description::INVALID_UTF8)),
                    prefix,
                    valid,
                );
                report(self.error_handler.as_deref_mut(), &err);
                self.location = err.location();
                Err(SaxError::BadXml(err))
            }
        }
    }

    /// Location where the last scan stopped.
    ///
    /// After a successful parse this is the end of the document, after an
    /// error it is the start of the offending construct.
    pub fn location(&self) -> Location {
        self.location
    }
}

impl Default for SaxParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn report(error_handler: Option<&mut (dyn FnMut(&XmlError) + '_)>, err: &XmlError) {
    match error_handler {
        Some(f) => f(err),
        None => warn!("{} ({})", err, err.location()),
    }
}

mod nocompile;
