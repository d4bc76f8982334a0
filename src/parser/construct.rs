/*
** This file is a part of Saxscan (streaming SAX tokenizer for XML)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Saxscan is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use log::trace;

use super::ErrorKind;
use super::SaxError;
use super::SaxHandler;
use super::Span;
use super::Tag;
use super::matcher;
use super::matcher::TagRegion;
use super::parse_tag;
use super::scanner::Scanner;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Construct {
    Declaration,
    ProcessingInstruction,
    Comment,
    Doctype,
    CData,
    Tag,
}

fn is_declaration(s: &str) -> bool {
    s.strip_prefix("?xml")
        .and_then(|rest| rest.bytes().next())
        .is_some_and(matcher::is_whitespace)
}

fn is_processing_instruction(s: &str) -> bool {
    s.starts_with('?')
}

fn is_comment(s: &str) -> bool {
    s.starts_with("!--")
}

fn is_doctype(s: &str) -> bool {
    s.starts_with("!DOCTYPE")
}

fn is_cdata(s: &str) -> bool {
    s.starts_with("![CDATA[")
}

/// Checked in order, first match wins. Anything else is a normal tag.
const CONSTRUCTS: &[(Construct, fn(&str) -> bool)] = &[
    (Construct::Declaration, is_declaration),
    (Construct::ProcessingInstruction, is_processing_instruction),
    (Construct::Comment, is_comment),
    (Construct::Doctype, is_doctype),
    (Construct::CData, is_cdata),
];

/// Classifies the text following a `<`.
pub(super) fn classify(s: &str) -> Construct {
    CONSTRUCTS
        .iter()
        .find(|(_, test)| test(s))
        .map_or(Construct::Tag, |(construct, _)| *construct)
}

impl<H: SaxHandler> Scanner<'_, '_, '_, H> {
    /// Routes the construct at `region` to its parser.
    ///
    /// The coarse region only decides the kind. Each kind finds its own
    /// end, since comments and similar constructs may contain '>'.
    /// Returns the offset just past the construct.
    pub(super) fn dispatch(&mut self, region: TagRegion) -> Result<usize, SaxError> {
        let construct = if region.is_end_tag {
            Construct::Tag
        } else {
            classify(&self.document[region.body_start..])
        };
        trace!("{:?} at {}", construct, region.lt + 1);
        self.count_construct();

        match construct {
            Construct::Declaration => self.declaration(region.lt),
            Construct::ProcessingInstruction => self.processing_instruction(region.lt),
            Construct::Comment => self.comment(region.lt),
            Construct::Doctype => self.doctype(region.lt),
            Construct::CData => self.cdata(region.lt),
            Construct::Tag => self.tag(region),
        }
    }

    fn declaration(&mut self, lt: usize) -> Result<usize, SaxError> {
        let Some(found) = matcher::PI.find(self.document, lt) else {
            return Err(self.fatal(ErrorKind::DeclError, None, lt));
        };
        if lt != 0 {
            self.recoverable(ErrorKind::DeclNotAtStart, None, lt);
            return Ok(found.end);
        }
        let decl = parse_tag(found.body, true, self.options.expand_entities);
        if decl.attribute("version").is_none() {
            self.recoverable(ErrorKind::DeclAttrError, None, lt);
            return Ok(found.end);
        }
        self.handler.decl(&decl, Span::from_range(lt, found.end))?;
        Ok(found.end)
    }

    fn processing_instruction(&mut self, lt: usize) -> Result<usize, SaxError> {
        let Some(found) = matcher::PI.find(self.document, lt) else {
            return Err(self.fatal(ErrorKind::PiError, None, lt));
        };
        let body = found.body;
        let target_end = body
            .bytes()
            .position(matcher::is_whitespace)
            .unwrap_or(body.len());
        let mut pi = Tag::new(&body[..target_end]);
        let data = matcher::trim(&body[target_end..]);
        if !data.is_empty() {
            pi.insert_attribute(Tag::PI_DATA.to_string(), data.to_string());
        }
        self.handler.pi(&pi, Span::from_range(lt, found.end))?;
        Ok(found.end)
    }

    fn comment(&mut self, lt: usize) -> Result<usize, SaxError> {
        let Some(found) = matcher::COMMENT.find(self.document, lt) else {
            return Err(self.fatal(ErrorKind::CommentError, None, lt));
        };
        let mut body = found.body;
        if self.options.strip_whitespace {
            body = matcher::trim(body);
        }
        let text = self.expand(body);
        self.handler.comment(&text, Span::from_range(lt, found.end))?;
        Ok(found.end)
    }

    fn cdata(&mut self, lt: usize) -> Result<usize, SaxError> {
        let Some(found) = matcher::CDATA.find(self.document, lt) else {
            return Err(self.fatal(ErrorKind::CdataError, None, lt));
        };
        self.handler.cdata(found.body, Span::from_range(lt, found.end))?;
        Ok(found.end)
    }

    fn doctype(&mut self, lt: usize) -> Result<usize, SaxError> {
        let Some((dtd, end)) = matcher::doctype(self.document, lt) else {
            return Err(self.fatal(ErrorKind::DtdError, None, lt));
        };
        self.handler.dtd(&dtd, Span::from_range(lt, end))?;
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(classify("?xml version='1.0'?>"), Construct::Declaration);
        assert_eq!(classify("?xml\tversion='1.0'?>"), Construct::Declaration);
        assert_eq!(classify("?xml-stylesheet href='a'?>"), Construct::ProcessingInstruction);
        assert_eq!(classify("?xml?>"), Construct::ProcessingInstruction);
        assert_eq!(classify("?php echo 1 ?>"), Construct::ProcessingInstruction);
        assert_eq!(classify("!-- hi -->"), Construct::Comment);
        assert_eq!(classify("!DOCTYPE a [ ]>"), Construct::Doctype);
        assert_eq!(classify("![CDATA[x]]>"), Construct::CData);
        assert_eq!(classify("a x='1'>"), Construct::Tag);
        assert_eq!(classify("!ELEMENT a>"), Construct::Tag);
    }
}
