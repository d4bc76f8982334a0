/*
** This file is a part of Saxscan (streaming SAX tokenizer for XML)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Saxscan is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Streaming SAX style XML tokenizer.
//!
//! The [SaxParser] scans an in-memory document once and calls a
//! [SaxHandler] for each start tag, end tag, text, comment, CDATA section,
//! processing instruction, xml declaration and document type declaration.
//! No tree is built. Every event reports the 1-based inclusive byte
//! offsets of its source text as a [Span].
//!
//! ```
//! use saxscan::{EventCollector, SaxEvent, SaxParser};
//!
//! let mut collector = EventCollector::new();
//! SaxParser::new()
//!     .parse(&mut collector, r#"<a x="1" y='2'>text</a>"#)
//!     .unwrap();
//!
//! let events = collector.events();
//! assert_eq!(events.len(), 3);
//! if let SaxEvent::StartTag { attributes: Some(attrs), .. } = &events[0] {
//!     assert_eq!(attrs["x"], "1");
//!     assert_eq!(attrs["y"], "2");
//! }
//! ```

pub mod entities;
mod parser;

pub use parser::Attributes;
pub use parser::Callbacks;
pub use parser::Doctype;
pub use parser::ErrorKind;
pub use parser::EventCollector;
pub use parser::ExternalId;
pub use parser::Location;
pub use parser::ParseOptions;
pub use parser::SaxError;
pub use parser::SaxEvent;
pub use parser::SaxHandler;
pub use parser::SaxHandlerError;
pub use parser::SaxParser;
pub use parser::Span;
pub use parser::Tag;
pub use parser::XmlError;
pub use parser::parse_tag;
