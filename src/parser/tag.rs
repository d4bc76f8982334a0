/*
** This file is a part of Saxscan (streaming SAX tokenizer for XML)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Saxscan is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::HashMap;

use crate::entities;

use super::matcher;

/// Attribute mapping of a tag. Keys are lowercase.
pub type Attributes = HashMap<String, String>;

/// A parsed tag.
///
/// Used for start and end tags, processing instructions and the xml
/// declaration. A tag without attributes has `None` rather than an
/// empty map, so handlers can tell the two apart by presence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub attributes: Option<Attributes>,
}

impl<'a> Tag<'a> {
    /// Attribute key holding the free text payload of a processing instruction.
    pub const PI_DATA: &'static str = "#data";

    pub fn new(name: &'a str) -> Self {
        Tag {
            name,
            attributes: None,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|attrs| attrs.get(key))
            .map(String::as_str)
    }

    pub fn has_attributes(&self) -> bool {
        self.attributes.is_some()
    }

    /// Payload of a processing instruction.
    pub fn pi_data(&self) -> Option<&str> {
        self.attribute(Tag::PI_DATA)
    }

    pub(super) fn insert_attribute(&mut self, key: String, value: String) {
        self.attributes
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
    }
}

/// Parses the raw text between `<` and `>`, without the slashes.
///
/// The name ends at the first whitespace. Attribute pairs are searched in
/// the rest of the text with either quote style. Anything that does not
/// form a pair is skipped.
///
/// Pairs are read in one left-to-right pass, so text inside a quoted value
/// is never taken as another pair: `t a='x="y"'` gives only `a`.
pub fn parse_tag(raw: &str, parse_attributes: bool, expand_entities: bool) -> Tag<'_> {
    let name_end = raw
        .bytes()
        .position(matcher::is_whitespace)
        .unwrap_or(raw.len());
    let mut tag = Tag::new(&raw[..name_end]);
    if !parse_attributes {
        return tag;
    }

    for (key, value) in matcher::attributes(&raw[name_end..]) {
        let value = if expand_entities {
            entities::expand(value).into_owned()
        } else {
            value.to_string()
        };
        tag.insert_attribute(key.to_lowercase(), value);
    }

    tag
}

/// External identifier of a document type declaration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExternalId<'a> {
    System {
        system: &'a str,
    },
    Public {
        public: &'a str,
        system: Option<&'a str>,
    },
}

/// A parsed `<!DOCTYPE ...>` declaration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Doctype<'a> {
    pub name: &'a str,
    pub external_id: Option<ExternalId<'a>>,
    /// Text between `[` and `]`, untouched.
    pub internal_subset: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_only() {
        let tag = parse_tag("lonely", true, true);
        assert_eq!(tag.name, "lonely");
        assert_eq!(tag.attributes, None);
        assert!(!tag.has_attributes());

        let tag = parse_tag("b \n\t", true, true);
        assert_eq!(tag.name, "b");
        assert_eq!(tag.attributes, None);
    }

    #[test]
    fn both_quote_styles() {
        let tag = parse_tag("a x=\"1\" y='2'", true, true);
        assert_eq!(tag.name, "a");
        assert_eq!(tag.attribute("x"), Some("1"));
        assert_eq!(tag.attribute("y"), Some("2"));
        assert_eq!(tag.attributes.as_ref().map(|a| a.len()), Some(2));
    }

    #[test]
    fn keys_lowercased() {
        let tag = parse_tag("Item ID='7' Url = \"x\"", true, true);
        assert_eq!(tag.name, "Item");
        assert_eq!(tag.attribute("id"), Some("7"));
        assert_eq!(tag.attribute("url"), Some("x"));
        assert_eq!(tag.attribute("ID"), None);
    }

    #[test]
    fn values_expanded() {
        let tag = parse_tag("a b='a&amp;b &#x42;&#65;'", true, true);
        assert_eq!(tag.attribute("b"), Some("a&b BA"));

        let tag = parse_tag("a b='a&amp;b'", true, false);
        assert_eq!(tag.attribute("b"), Some("a&amp;b"));
    }

    #[test]
    fn other_quote_inside_value() {
        let tag = parse_tag("tag a='12\"34' b=\"123'456\"", true, true);
        assert_eq!(tag.attribute("a"), Some("12\"34"));
        assert_eq!(tag.attribute("b"), Some("123'456"));

        let tag = parse_tag("t a='x=\"y\"'", true, true);
        assert_eq!(tag.attribute("a"), Some("x=\"y\""));
        assert_eq!(tag.attribute("x"), None);
    }

    #[test]
    fn garbage_skipped() {
        let tag = parse_tag("a checked x='1' = 'z' y=unquoted z=\"3\"", true, true);
        assert_eq!(tag.attribute("x"), Some("1"));
        assert_eq!(tag.attribute("z"), Some("3"));
        assert_eq!(tag.attribute("checked"), None);
        assert_eq!(tag.attribute("y"), None);
    }

    #[test]
    fn attributes_disabled() {
        let tag = parse_tag("a x='1'", false, true);
        assert_eq!(tag.name, "a");
        assert_eq!(tag.attributes, None);
    }

    #[test]
    fn pi_data() {
        let mut tag = Tag::new("target");
        assert_eq!(tag.pi_data(), None);
        tag.insert_attribute(Tag::PI_DATA.to_string(), "some data".to_string());
        assert_eq!(tag.pi_data(), Some("some data"));
    }
}
