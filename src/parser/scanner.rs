/*
** This file is a part of Saxscan (streaming SAX tokenizer for XML)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Saxscan is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::borrow::Cow;

use log::debug;
use log::trace;

use crate::entities;

use super::ErrorKind;
use super::ParseOptions;
use super::SaxError;
use super::SaxHandler;
use super::Span;
use super::Tag;
use super::XmlError;
use super::error::description;
use super::matcher;
use super::matcher::TagRegion;
use super::parse_tag;
use super::report;

/// State of a single parse call.
///
/// A new scanner is made for every call, so the tag stack never carries
/// over from an earlier document.
pub(super) struct Scanner<'a, 'p, 'e, H: SaxHandler> {
    pub(super) document: &'a str,
    pos: usize,
    stack: Vec<&'a str>,
    pub(super) options: ParseOptions,
    pub(super) handler: &'p mut H,
    on_error: Option<&'p mut (dyn FnMut(&XmlError) + 'e)>,
    nr_constructs: usize,
}

impl<'a, 'p, 'e, H: SaxHandler> Scanner<'a, 'p, 'e, H> {
    pub(super) fn new(
        document: &'a str,
        options: ParseOptions,
        handler: &'p mut H,
        on_error: Option<&'p mut (dyn FnMut(&XmlError) + 'e)>,
    ) -> Self {
        Scanner {
            document,
            pos: 0,
            stack: Vec::new(),
            options,
            handler,
            on_error,
            nr_constructs: 0,
        }
    }

    pub(super) fn position(&self) -> usize {
        self.pos
    }

    pub(super) fn run(&mut self) -> Result<(), SaxError> {
        debug!(
            "scanning {} bytes with {:?}",
            self.document.len(),
            self.options
        );
        self.handler.set_parse_attributes(self.options.parse_attributes);

        while let Some(region) = matcher::tag_region(self.document, self.pos) {
            self.text(self.pos, region.lt)?;
            self.pos = region.lt;
            self.pos = self.dispatch(region)?;
        }

        self.finish()
    }

    fn finish(&mut self) -> Result<(), SaxError> {
        if let Some(open) = self.stack.last() {
            let detail = format!("'{}' is not closed", open);
            return Err(self.fatal(
                ErrorKind::IncompleteDocument,
                Some(detail.into()),
                self.document.len(),
            ));
        }

        let rest = &self.document[self.pos..];
        if let Some(i) = rest.bytes().position(|c| !matcher::is_whitespace(c)) {
            return Err(self.fatal(ErrorKind::UnparsableText, None, self.pos + i));
        }

        self.pos = self.document.len();
        debug!("scan finished after {} constructs", self.nr_constructs);
        Ok(())
    }

    pub(super) fn expand<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.options.expand_entities {
            entities::expand(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    fn text(&mut self, begin: usize, end: usize) -> Result<(), SaxError> {
        if begin == end {
            return Ok(());
        }
        let mut text = &self.document[begin..end];
        if self.options.strip_whitespace {
            text = matcher::trim(text);
            if text.is_empty() {
                return Ok(());
            }
        }
        let text = self.expand(text);
        let span = Span::from_range(begin, end);
        trace!("text at {}", span);
        self.handler.text(&text, span)?;
        Ok(())
    }

    /// Start, end and empty element tags.
    ///
    /// Returns the offset just past the tag.
    pub(super) fn tag(&mut self, mut region: TagRegion) -> Result<usize, SaxError> {
        // A '>' inside a quoted value does not end the tag.
        while matcher::has_open_quote(&self.document[region.body_start..region.gt]) {
            let Some(gt) = matcher::next_close(self.document, region.gt + 1) else {
                return Err(self.fatal(ErrorKind::MalformedXml, None, region.lt));
            };
            region.extend_to(self.document, gt);
        }

        let end = region.gt + 1;
        let span = Span::from_range(region.lt, end);
        let body = region.body(self.document);

        if region.is_end_tag {
            // Attributes are always extracted here to validate the end tag.
            let mut tag = parse_tag(body, true, self.options.expand_entities);
            if tag.name.is_empty() {
                return Err(self.empty_name(region.lt));
            }
            if tag.has_attributes() {
                let detail = format!("'{}'", tag.name);
                self.recoverable(
                    ErrorKind::EndTagAttributesInvalid,
                    Some(detail.into()),
                    region.lt,
                );
                if !self.options.parse_attributes {
                    tag = Tag::new(tag.name);
                }
            }
            match self.stack.pop() {
                Some(open) if open == tag.name => (),
                Some(open) => {
                    let detail = format!("expected '{}', found '{}'", open, tag.name);
                    self.recoverable(ErrorKind::UnmatchedTag, Some(detail.into()), region.lt);
                }
                None => {
                    let detail = format!("{} '{}'", description::CLOSE_WITHOUT_OPEN, tag.name);
                    self.recoverable(ErrorKind::UnmatchedTag, Some(detail.into()), region.lt);
                }
            }
            trace!("end tag '{}' at {}", tag.name, span);
            self.handler.end_tag(&tag, span)?;
        } else {
            let tag = parse_tag(
                body,
                self.options.parse_attributes,
                self.options.expand_entities,
            );
            if tag.name.is_empty() {
                return Err(self.empty_name(region.lt));
            }
            trace!("start tag '{}' at {}", tag.name, span);
            self.stack.push(tag.name);
            self.handler.start_tag(&tag, span)?;
            if region.is_empty_tag {
                self.stack.pop();
                self.handler.end_tag(&tag, span)?;
            }
        }

        Ok(end)
    }

    fn empty_name(&mut self, offset: usize) -> SaxError {
        self.fatal(
            ErrorKind::MalformedXml,
            Some(Cow::Borrowed(description::TAG_EMPTY_NAME)),
            offset,
        )
    }

    pub(super) fn count_construct(&mut self) {
        self.nr_constructs += 1;
    }

    /// Reports an error which stops the scan at `offset`.
    pub(super) fn fatal(
        &mut self,
        kind: ErrorKind,
        detail: Option<Cow<'static, str>>,
        offset: usize,
    ) -> SaxError {
        let err = XmlError::new(kind, detail, self.document, offset);
        debug!("fatal error: {}", err);
        report(self.on_error.as_deref_mut(), &err);
        self.pos = offset;
        SaxError::BadXml(err)
    }

    /// Reports an error after which the scan continues.
    pub(super) fn recoverable(
        &mut self,
        kind: ErrorKind,
        detail: Option<Cow<'static, str>>,
        offset: usize,
    ) {
        let err = XmlError::new(kind, detail, self.document, offset);
        report(self.on_error.as_deref_mut(), &err);
    }
}
