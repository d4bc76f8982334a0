/*
** This file is a part of Saxscan (streaming SAX tokenizer for XML)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Saxscan is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Recognizers for the textual shape of each XML construct.
//!
//! Every matcher works on the whole document and a byte offset, and
//! returns the matched region with its captured fields or `None`.

use memchr::memchr;
use memchr::memmem;

use super::tag::Doctype;
use super::tag::ExternalId;

macro_rules! whitespace {
    () => {
        b' ' | b'\t' | b'\r' | b'\n'
    };
}

pub(super) fn is_whitespace(c: u8) -> bool {
    matches!(c, whitespace!())
}

fn is_name_byte(c: u8) -> bool {
    !matches!(c, whitespace!() | b'=' | b'"' | b'\'' | b'<' | b'>' | b'/')
}

/// Strips leading and trailing whitespace.
pub(super) fn trim(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Coarse match of "text, `<`, optional `/`, body, optional `/`, `>`".
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct TagRegion {
    /// Offset of the `<`. Text before it starts at the search position.
    pub lt: usize,
    /// Body is `body_start..body_end`, slashes excluded.
    pub body_start: usize,
    pub body_end: usize,
    /// Offset of the `>`.
    pub gt: usize,
    pub is_end_tag: bool,
    pub is_empty_tag: bool,
}

impl TagRegion {
    pub fn body<'a>(&self, document: &'a str) -> &'a str {
        &document[self.body_start..self.body_end]
    }

    /// Moves the end of the region to the `>` at `gt`.
    pub fn extend_to(&mut self, document: &str, gt: usize) {
        self.gt = gt;
        self.body_end = gt;
        self.is_empty_tag = false;
        if gt > self.body_start && document.as_bytes()[gt - 1] == b'/' {
            self.body_end = gt - 1;
            self.is_empty_tag = true;
        }
    }
}

pub(super) fn tag_region(document: &str, pos: usize) -> Option<TagRegion> {
    let bytes = document.as_bytes();
    let lt = pos + memchr(b'<', &bytes[pos..])?;
    let gt = next_close(document, lt + 1)?;
    let is_end_tag = bytes.get(lt + 1) == Some(&b'/') && lt + 1 < gt;
    let body_start = if is_end_tag { lt + 2 } else { lt + 1 };
    let mut region = TagRegion {
        lt,
        body_start,
        body_end: gt,
        gt,
        is_end_tag,
        is_empty_tag: false,
    };
    region.extend_to(document, gt);
    Some(region)
}

/// Offset of the next `>` at or after `from`.
pub(super) fn next_close(document: &str, from: usize) -> Option<usize> {
    let bytes = document.as_bytes();
    if from > bytes.len() {
        return None;
    }
    memchr(b'>', &bytes[from..]).map(|i| from + i)
}

/// Checks for a quoted value which is still open at the end of `s`.
pub(super) fn has_open_quote(s: &str) -> bool {
    let mut open: Option<u8> = None;
    for c in s.bytes() {
        match open {
            None if c == b'"' || c == b'\'' => open = Some(c),
            Some(q) if c == q => open = None,
            _ => (),
        }
    }
    open.is_some()
}

/// A construct with fixed opening and closing delimiters.
pub(super) struct Delimiters {
    pub open: &'static str,
    pub close: &'static str,
}

pub(super) const COMMENT: Delimiters = Delimiters {
    open: "<!--",
    close: "-->",
};

pub(super) const CDATA: Delimiters = Delimiters {
    open: "<![CDATA[",
    close: "]]>",
};

pub(super) const PI: Delimiters = Delimiters {
    open: "<?",
    close: "?>",
};

#[derive(Debug, Eq, PartialEq)]
pub(super) struct Delimited<'a> {
    pub body: &'a str,
    /// Offset just past the closing delimiter.
    pub end: usize,
}

impl Delimiters {
    pub fn find<'a>(&self, document: &'a str, at: usize) -> Option<Delimited<'a>> {
        if !document[at..].starts_with(self.open) {
            return None;
        }
        let body_start = at + self.open.len();
        let i = memmem::find(&document.as_bytes()[body_start..], self.close.as_bytes())?;
        let body_end = body_start + i;
        Some(Delimited {
            body: &document[body_start..body_end],
            end: body_end + self.close.len(),
        })
    }
}

/// Iterator over `key="value"` and `key='value'` pairs.
///
/// Text which does not form a pair is skipped. Values are scanned in a
/// single pass so a quote of the other style inside a value never starts
/// a new pair.
pub(super) struct AttributePairs<'a> {
    text: &'a str,
    pos: usize,
}

pub(super) fn attributes(text: &str) -> AttributePairs<'_> {
    AttributePairs { text, pos: 0 }
}

impl<'a> Iterator for AttributePairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        let bytes = text.as_bytes();
        loop {
            let eq = self.pos + memchr(b'=', &bytes[self.pos..])?;

            let mut key_end = eq;
            while key_end > self.pos && is_whitespace(bytes[key_end - 1]) {
                key_end -= 1;
            }
            let mut key_start = key_end;
            while key_start > self.pos && is_name_byte(bytes[key_start - 1]) {
                key_start -= 1;
            }

            let mut value_start = eq + 1;
            while value_start < bytes.len() && is_whitespace(bytes[value_start]) {
                value_start += 1;
            }
            let quote = match bytes.get(value_start) {
                Some(&q) if q == b'"' || q == b'\'' => q,
                Some(_) => {
                    self.pos = eq + 1;
                    continue;
                }
                None => {
                    self.pos = bytes.len();
                    return None;
                }
            };
            let Some(i) = memchr(quote, &bytes[value_start + 1..]) else {
                self.pos = bytes.len();
                return None;
            };
            let value_end = value_start + 1 + i;
            self.pos = value_end + 1;
            if key_start == key_end {
                continue;
            }
            return Some((
                &text[key_start..key_end],
                &text[value_start + 1..value_end],
            ));
        }
    }
}

const DOCTYPE_OPEN: &str = "<!DOCTYPE";

struct DtdCursor<'a> {
    document: &'a str,
    pos: usize,
}

impl<'a> DtdCursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.document.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn whitespace(&mut self) -> Option<()> {
        self.skip_whitespace().then_some(())
    }

    fn name(&mut self) -> Option<&'a str> {
        let document = self.document;
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !is_whitespace(c) && c != b'[' && c != b'>')
        {
            self.pos += 1;
        }
        (self.pos > start).then(|| &document[start..self.pos])
    }

    fn keyword(&mut self, keyword: &str) -> Option<()> {
        if self.document[self.pos..].starts_with(keyword) {
            self.pos += keyword.len();
            Some(())
        } else {
            None
        }
    }

    fn literal(&mut self) -> Option<&'a str> {
        let document = self.document;
        let quote = self.peek().filter(|&q| q == b'"' || q == b'\'')?;
        let start = self.pos + 1;
        let i = memchr(quote, &document.as_bytes()[start..])?;
        self.pos = start + i + 1;
        Some(&document[start..start + i])
    }

    fn optional_literal(&mut self) -> Option<&'a str> {
        let saved = self.pos;
        if self.skip_whitespace() {
            if let Some(lit) = self.literal() {
                return Some(lit);
            }
        }
        self.pos = saved;
        None
    }

    fn close(&mut self) -> Option<()> {
        self.skip_whitespace();
        self.keyword(">")
    }

    /// Internal subset ends at the first `]` followed by optional whitespace and `>`.
    fn subset_and_close(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        self.keyword("[")?;
        let document = self.document;
        let start = self.pos;
        let bytes = document.as_bytes();
        let mut search = start;
        loop {
            let rbracket = search + memchr(b']', &bytes[search..])?;
            self.pos = rbracket + 1;
            if self.close().is_some() {
                return Some(&document[start..rbracket]);
            }
            search = rbracket + 1;
        }
    }

    fn head(&mut self) -> Option<&'a str> {
        self.whitespace()?;
        self.name()
    }

    fn system_id(&mut self) -> Option<ExternalId<'a>> {
        self.whitespace()?;
        self.keyword("SYSTEM")?;
        self.whitespace()?;
        let system = self.literal()?;
        Some(ExternalId::System { system })
    }

    fn public_id(&mut self) -> Option<ExternalId<'a>> {
        self.whitespace()?;
        self.keyword("PUBLIC")?;
        self.whitespace()?;
        let public = self.literal()?;
        let system = self.optional_literal();
        Some(ExternalId::Public { public, system })
    }
}

type DtdShape = for<'a> fn(&mut DtdCursor<'a>) -> Option<Doctype<'a>>;

fn system_with_subset<'a>(c: &mut DtdCursor<'a>) -> Option<Doctype<'a>> {
    let name = c.head()?;
    let external_id = c.system_id()?;
    let subset = c.subset_and_close()?;
    Some(Doctype {
        name,
        external_id: Some(external_id),
        internal_subset: Some(subset),
    })
}

fn public_with_subset<'a>(c: &mut DtdCursor<'a>) -> Option<Doctype<'a>> {
    let name = c.head()?;
    let external_id = c.public_id()?;
    let subset = c.subset_and_close()?;
    Some(Doctype {
        name,
        external_id: Some(external_id),
        internal_subset: Some(subset),
    })
}

fn subset_only<'a>(c: &mut DtdCursor<'a>) -> Option<Doctype<'a>> {
    let name = c.head()?;
    let subset = c.subset_and_close()?;
    Some(Doctype {
        name,
        external_id: None,
        internal_subset: Some(subset),
    })
}

fn system_only<'a>(c: &mut DtdCursor<'a>) -> Option<Doctype<'a>> {
    let name = c.head()?;
    let external_id = c.system_id()?;
    c.close()?;
    Some(Doctype {
        name,
        external_id: Some(external_id),
        internal_subset: None,
    })
}

fn public_only<'a>(c: &mut DtdCursor<'a>) -> Option<Doctype<'a>> {
    let name = c.head()?;
    let external_id = c.public_id()?;
    c.close()?;
    Some(Doctype {
        name,
        external_id: Some(external_id),
        internal_subset: None,
    })
}

const DTD_SHAPES: [DtdShape; 5] = [
    system_with_subset,
    public_with_subset,
    subset_only,
    system_only,
    public_only,
];

/// Matches a document type declaration starting at `at`.
///
/// Returns the declaration and the offset just past its `>`.
pub(super) fn doctype(document: &str, at: usize) -> Option<(Doctype<'_>, usize)> {
    if !document[at..].starts_with(DOCTYPE_OPEN) {
        return None;
    }
    DTD_SHAPES.iter().find_map(|shape| {
        let mut cursor = DtdCursor {
            document,
            pos: at + DOCTYPE_OPEN.len(),
        };
        shape(&mut cursor).map(|dtd| (dtd, cursor.pos))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region() {
        let doc = "text<a x='1'>";
        let r = tag_region(doc, 0).unwrap();
        assert_eq!(r.lt, 4);
        assert_eq!(r.gt, doc.len() - 1);
        assert_eq!(r.body(doc), "a x='1'");
        assert!(!r.is_end_tag);
        assert!(!r.is_empty_tag);

        let doc = "</b>";
        let r = tag_region(doc, 0).unwrap();
        assert!(r.is_end_tag);
        assert_eq!(r.body(doc), "b");

        let doc = " <br/>";
        let r = tag_region(doc, 0).unwrap();
        assert!(r.is_empty_tag);
        assert_eq!(r.body(doc), "br");

        assert_eq!(tag_region("no tags", 0), None);
        assert_eq!(tag_region("<open", 0), None);
        assert_eq!(tag_region("<a>", 3), None);
    }

    #[test]
    fn region_extension() {
        let doc = "<a x=\"1>2/\">";
        let mut r = tag_region(doc, 0).unwrap();
        assert!(has_open_quote(r.body(doc)));
        let gt = next_close(doc, r.gt + 1).unwrap();
        assert_eq!(gt, doc.len() - 1);
        r.extend_to(doc, gt);
        assert_eq!(r.body(doc), "a x=\"1>2/\"");
        assert!(!has_open_quote(r.body(doc)));
        assert!(!r.is_empty_tag);
    }

    #[test]
    fn open_quotes() {
        assert!(!has_open_quote("a x='1' y=\"2\""));
        assert!(has_open_quote("a x='1"));
        assert!(has_open_quote("a x=\"it's"));
        assert!(!has_open_quote("a x=\"it's\""));
    }

    #[test]
    fn delimiters() {
        let doc = "<!-- a > b -->rest";
        assert_eq!(
            COMMENT.find(doc, 0),
            Some(Delimited {
                body: " a > b ",
                end: doc.len() - 4
            })
        );
        assert_eq!(COMMENT.find("<!-- open", 0), None);
        assert_eq!(CDATA.find("<![CDATA[x]]>", 0).map(|d| d.body), Some("x"));
        assert_eq!(PI.find("<?go now?>", 0).map(|d| d.body), Some("go now"));
        assert_eq!(PI.find("<a>", 0), None);
    }

    #[test]
    fn attribute_pairs() {
        let pairs: Vec<_> = attributes(" x=\"1\" y = '2'").collect();
        assert_eq!(pairs, vec![("x", "1"), ("y", "2")]);

        let pairs: Vec<_> = attributes(" x=\"1").collect();
        assert!(pairs.is_empty());
    }

    #[test]
    fn doctypes() {
        let doc = "<!DOCTYPE greeting SYSTEM \"hello.dtd\" [ <!ELEMENT greeting (#PCDATA)> ]>";
        let (dtd, end) = doctype(doc, 0).unwrap();
        assert_eq!(end, doc.len());
        assert_eq!(dtd.name, "greeting");
        assert_eq!(
            dtd.external_id,
            Some(ExternalId::System {
                system: "hello.dtd"
            })
        );
        assert_eq!(dtd.internal_subset, Some(" <!ELEMENT greeting (#PCDATA)> "));

        let doc = "<!DOCTYPE html PUBLIC '-//W3C//DTD XHTML 1.0 Strict//EN' 'x.dtd' [<!ENTITY a 'b'>]>";
        let (dtd, _) = doctype(doc, 0).unwrap();
        assert_eq!(
            dtd.external_id,
            Some(ExternalId::Public {
                public: "-//W3C//DTD XHTML 1.0 Strict//EN",
                system: Some("x.dtd")
            })
        );
        assert_eq!(dtd.internal_subset, Some("<!ENTITY a 'b'>"));

        let doc = "<!DOCTYPE greeting [ <!ATTLIST a b CDATA \"]\"> ] >x";
        let (dtd, end) = doctype(doc, 0).unwrap();
        assert_eq!(end, doc.len() - 1);
        assert_eq!(dtd.external_id, None);
        assert_eq!(dtd.internal_subset, Some(" <!ATTLIST a b CDATA \"]\"> "));

        let doc = "<!DOCTYPE note SYSTEM \"note.dtd\">";
        let (dtd, end) = doctype(doc, 0).unwrap();
        assert_eq!(end, doc.len());
        assert_eq!(dtd.internal_subset, None);

        let doc = "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\">";
        let (dtd, _) = doctype(doc, 0).unwrap();
        assert_eq!(
            dtd.external_id,
            Some(ExternalId::Public {
                public: "-//W3C//DTD HTML 4.01//EN",
                system: None
            })
        );

        assert_eq!(doctype("<!DOCTYPE html>", 0), None);
        assert_eq!(doctype("<!DOCTYPE greeting [ <!ELEMENT a>", 0), None);
        assert_eq!(doctype("<!DOCTYPEx SYSTEM 'a'>", 0), None);
    }

    #[test]
    fn whitespace() {
        assert_eq!(trim(" \t\n text \r\n"), "text");
        assert_eq!(trim(" \n\t\r"), "");
        assert!(is_whitespace(b'\r'));
        assert!(!is_whitespace(b'x'));
    }
}
