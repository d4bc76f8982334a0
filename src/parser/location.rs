/*
** This file is a part of Saxscan (streaming SAX tokenizer for XML)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Saxscan is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;

use memchr::memchr_iter;
use memchr::memrchr;

/// Source offsets of an event.
///
/// Both ends are 1-based and inclusive byte positions in the original
/// document, measured before any whitespace stripping or entity
/// expansion. For `<a>` at the start of a document the span is `1..=3`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Builds a span from a 0-based half open byte range.
    pub(crate) fn from_range(begin: usize, end: usize) -> Self {
        Span {
            start: begin + 1,
            end,
        }
    }

    /// Number of source bytes covered.
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Returns the covered source text.
    pub fn slice<'a>(&self, document: &'a str) -> &'a str {
        &document[self.start - 1..self.end]
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A position in the parser input.
///
/// This struct is returned from the
/// [location()](crate::SaxParser::location) method and is attached to
/// every [XmlError](crate::XmlError). It is useful when printing error
/// messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Location {
    /// Byte offset in the input.
    pub bytes: usize,
    /// How many lines precede the position. Lines are separated by the newline character.
    pub lines: usize,
    /// How many bytes after the last newline character.
    pub column: usize,
}

impl Location {
    /// Creates a new location at the beginning of the input.
    ///
    /// This constructor is made public in case if you store the
    /// location in somewhere and need a default.
    pub fn new() -> Self {
        Location {
            bytes: 0,
            lines: 0,
            column: 0,
        }
    }

    /// Computes the location of the 0-based byte `offset` in `document`.
    pub fn of(document: &str, offset: usize) -> Self {
        let head = &document.as_bytes()[..offset.min(document.len())];
        let lines = memchr_iter(b'\n', head).count();
        let column = match memrchr(b'\n', head) {
            Some(nl) => head.len() - nl - 1,
            None => head.len(),
        };
        Location {
            bytes: head.len(),
            lines,
            column,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::new()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "byte: {}, line: {}, column: {}",
            self.bytes, self.lines, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_of() {
        let doc = "<a>\n  <b/>\n</a>";
        assert_eq!(Location::of(doc, 0), Location::new());
        assert_eq!(
            Location::of(doc, 6),
            Location {
                bytes: 6,
                lines: 1,
                column: 2
            }
        );
        assert_eq!(Location::of(doc, 999).bytes, doc.len());
        assert_eq!(Location::of(doc, doc.len()).lines, 2);
    }

    #[test]
    fn span() {
        let span = Span::from_range(0, 3);
        assert_eq!(span, Span::new(1, 3));
        assert_eq!(span.len(), 3);
        assert_eq!(span.slice("<a>text</a>"), "<a>");
        assert_eq!(span.to_string(), "1-3");

        let empty = Span::new(5, 4);
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(Span::new(9, 2).len(), 0);
    }
}
