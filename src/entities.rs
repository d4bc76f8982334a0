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

use memchr::memchr;

pub mod predefined {
    pub const LT: &str = "&lt;";
    pub const GT: &str = "&gt;";
    pub const AMP: &str = "&amp;";
    pub const APOS: &str = "&apos;";
    pub const QUOT: &str = "&quot;";
}

/// One row of the entity table.
enum Entity {
    /// Literal reference and its replacement text.
    Named(&'static str, &'static str),
    /// Character reference prefix. The digits up to the `;` are the
    /// code point in the given radix.
    CharRef(&'static str, u32),
}

// Hex prefix must come before the decimal one.
const ENTITY_TABLE: &[Entity] = &[
    Entity::Named(predefined::LT, "<"),
    Entity::Named(predefined::GT, ">"),
    Entity::Named(predefined::AMP, "&"),
    Entity::Named(predefined::APOS, "'"),
    Entity::Named(predefined::QUOT, "\""),
    Entity::CharRef("&#x", 16),
    Entity::CharRef("&#", 10),
];

fn is_valid_xml_char(c: u32) -> bool {
    matches!(
        c,
        0x09 | 0x0a | 0x0d | 0x20..=0xd7ff | 0xe000..=0xfffd | 0x10000..=0x10ffff
    )
}

fn char_ref(s: &str, prefix_len: usize, radix: u32) -> Option<(char, usize)> {
    let body = &s[prefix_len..];
    let semi = memchr(b';', body.as_bytes())?;
    let digits = &body[..semi];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let value = u32::from_str_radix(digits, radix).ok()?;
    if !is_valid_xml_char(value) {
        return None;
    }
    let c = char::from_u32(value)?;
    Some((c, prefix_len + semi + 1))
}

/// Expands the reference at the start of `s` into `out`.
///
/// Returns the number of bytes consumed, or `None` if `s` does not start
/// with a known reference.
fn expand_one(s: &str, out: &mut String) -> Option<usize> {
    for entity in ENTITY_TABLE {
        match entity {
            Entity::Named(literal, replacement) => {
                if s.starts_with(literal) {
                    out.push_str(replacement);
                    return Some(literal.len());
                }
            }
            Entity::CharRef(prefix, radix) => {
                if s.starts_with(prefix) {
                    let (c, consumed) = char_ref(s, prefix.len(), *radix)?;
                    out.push(c);
                    return Some(consumed);
                }
            }
        }
    }
    None
}

/// Replaces the predefined entities and numeric character references.
///
/// Unknown or malformed references are kept as they are. Text without
/// any `&` is returned without copying.
pub fn expand(text: &str) -> Cow<'_, str> {
    if memchr(b'&', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match expand_one(rest, &mut out) {
            Some(consumed) => rest = &rest[consumed..],
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}
