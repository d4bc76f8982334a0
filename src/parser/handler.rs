/*
** This file is a part of Saxscan (streaming SAX tokenizer for XML)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Saxscan is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::Doctype;
use super::SaxHandlerError;
use super::Span;
use super::Tag;

/// Receiver of the parsed constructs.
///
/// Every callback has an empty default implementation, so a handler only
/// implements the events it cares about. Callbacks are invoked in document
/// order and may return [SaxHandlerError::Abort] to stop the parsing.
///
/// # Examples
///
/// ```
/// use saxscan::{SaxHandler, SaxHandlerError, SaxParser, Span, Tag};
///
/// struct Counter {
///     tags: usize,
/// }
///
/// impl SaxHandler for Counter {
///     fn start_tag(&mut self, _tag: &Tag, _span: Span) -> Result<(), SaxHandlerError> {
///         self.tags += 1;
///         Ok(())
///     }
/// }
///
/// let mut counter = Counter { tags: 0 };
/// SaxParser::new().parse(&mut counter, "<a><b/><c></c></a>").unwrap();
/// assert_eq!(counter.tags, 3);
/// ```
pub trait SaxHandler {
    /// Tells whether attributes are parsed in the current scan.
    ///
    /// Called once at the start of every parse call.
    fn set_parse_attributes(&mut self, _enabled: bool) {}

    fn text(&mut self, _text: &str, _span: Span) -> Result<(), SaxHandlerError> {
        Ok(())
    }

    fn start_tag(&mut self, _tag: &Tag, _span: Span) -> Result<(), SaxHandlerError> {
        Ok(())
    }

    /// Called for end tags, and right after [start_tag()](SaxHandler::start_tag)
    /// with the same tag for empty element tags.
    fn end_tag(&mut self, _tag: &Tag, _span: Span) -> Result<(), SaxHandlerError> {
        Ok(())
    }

    fn comment(&mut self, _text: &str, _span: Span) -> Result<(), SaxHandlerError> {
        Ok(())
    }

    /// Content of a CDATA section, never stripped or expanded.
    fn cdata(&mut self, _text: &str, _span: Span) -> Result<(), SaxHandlerError> {
        Ok(())
    }

    /// Processing instruction. The payload is under [Tag::PI_DATA].
    fn pi(&mut self, _pi: &Tag, _span: Span) -> Result<(), SaxHandlerError> {
        Ok(())
    }

    fn decl(&mut self, _decl: &Tag, _span: Span) -> Result<(), SaxHandlerError> {
        Ok(())
    }

    fn dtd(&mut self, _dtd: &Doctype, _span: Span) -> Result<(), SaxHandlerError> {
        Ok(())
    }
}

type TextCallback<'c> = Box<dyn FnMut(&str, Span) -> Result<(), SaxHandlerError> + 'c>;
type TagCallback<'c> = Box<dyn FnMut(&Tag, Span) -> Result<(), SaxHandlerError> + 'c>;
type DtdCallback<'c> = Box<dyn FnMut(&Doctype, Span) -> Result<(), SaxHandlerError> + 'c>;

/// A handler assembled from optional closures.
///
/// Events without a registered closure are skipped.
///
/// ```
/// use saxscan::{Callbacks, SaxParser};
///
/// let mut names = Vec::new();
/// let mut handler = Callbacks::new().on_start_tag(|tag, _span| {
///     names.push(tag.name.to_string());
///     Ok(())
/// });
/// SaxParser::new().parse(&mut handler, "<a><b/></a>").unwrap();
/// drop(handler);
/// assert_eq!(names, ["a", "b"]);
/// ```
#[derive(Default)]
pub struct Callbacks<'c> {
    parse_attributes: bool,
    text: Option<TextCallback<'c>>,
    start_tag: Option<TagCallback<'c>>,
    end_tag: Option<TagCallback<'c>>,
    comment: Option<TextCallback<'c>>,
    cdata: Option<TextCallback<'c>>,
    pi: Option<TagCallback<'c>>,
    decl: Option<TagCallback<'c>>,
    dtd: Option<DtdCallback<'c>>,
}

impl<'c> Callbacks<'c> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag mirrored from the last parse call.
    pub fn parse_attributes(&self) -> bool {
        self.parse_attributes
    }

    pub fn on_text(
        mut self,
        f: impl FnMut(&str, Span) -> Result<(), SaxHandlerError> + 'c,
    ) -> Self {
        self.text = Some(Box::new(f));
        self
    }

    pub fn on_start_tag(
        mut self,
        f: impl FnMut(&Tag, Span) -> Result<(), SaxHandlerError> + 'c,
    ) -> Self {
        self.start_tag = Some(Box::new(f));
        self
    }

    pub fn on_end_tag(
        mut self,
        f: impl FnMut(&Tag, Span) -> Result<(), SaxHandlerError> + 'c,
    ) -> Self {
        self.end_tag = Some(Box::new(f));
        self
    }

    pub fn on_comment(
        mut self,
        f: impl FnMut(&str, Span) -> Result<(), SaxHandlerError> + 'c,
    ) -> Self {
        self.comment = Some(Box::new(f));
        self
    }

    pub fn on_cdata(
        mut self,
        f: impl FnMut(&str, Span) -> Result<(), SaxHandlerError> + 'c,
    ) -> Self {
        self.cdata = Some(Box::new(f));
        self
    }

    pub fn on_pi(
        mut self,
        f: impl FnMut(&Tag, Span) -> Result<(), SaxHandlerError> + 'c,
    ) -> Self {
        self.pi = Some(Box::new(f));
        self
    }

    pub fn on_decl(
        mut self,
        f: impl FnMut(&Tag, Span) -> Result<(), SaxHandlerError> + 'c,
    ) -> Self {
        self.decl = Some(Box::new(f));
        self
    }

    pub fn on_dtd(
        mut self,
        f: impl FnMut(&Doctype, Span) -> Result<(), SaxHandlerError> + 'c,
    ) -> Self {
        self.dtd = Some(Box::new(f));
        self
    }
}

impl SaxHandler for Callbacks<'_> {
    fn set_parse_attributes(&mut self, enabled: bool) {
        self.parse_attributes = enabled;
    }

    fn text(&mut self, text: &str, span: Span) -> Result<(), SaxHandlerError> {
        match &mut self.text {
            Some(f) => f(text, span),
            None => Ok(()),
        }
    }

    fn start_tag(&mut self, tag: &Tag, span: Span) -> Result<(), SaxHandlerError> {
        match &mut self.start_tag {
            Some(f) => f(tag, span),
            None => Ok(()),
        }
    }

    fn end_tag(&mut self, tag: &Tag, span: Span) -> Result<(), SaxHandlerError> {
        match &mut self.end_tag {
            Some(f) => f(tag, span),
            None => Ok(()),
        }
    }

    fn comment(&mut self, text: &str, span: Span) -> Result<(), SaxHandlerError> {
        match &mut self.comment {
            Some(f) => f(text, span),
            None => Ok(()),
        }
    }

    fn cdata(&mut self, text: &str, span: Span) -> Result<(), SaxHandlerError> {
        match &mut self.cdata {
            Some(f) => f(text, span),
            None => Ok(()),
        }
    }

    fn pi(&mut self, pi: &Tag, span: Span) -> Result<(), SaxHandlerError> {
        match &mut self.pi {
            Some(f) => f(pi, span),
            None => Ok(()),
        }
    }

    fn decl(&mut self, decl: &Tag, span: Span) -> Result<(), SaxHandlerError> {
        match &mut self.decl {
            Some(f) => f(decl, span),
            None => Ok(()),
        }
    }

    fn dtd(&mut self, dtd: &Doctype, span: Span) -> Result<(), SaxHandlerError> {
        match &mut self.dtd {
            Some(f) => f(dtd, span),
            None => Ok(()),
        }
    }
}
