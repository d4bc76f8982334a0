/*
** This file is a part of Saxscan (streaming SAX tokenizer for XML)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Saxscan is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::Attributes;
use super::Doctype;
use super::ExternalId;
use super::SaxHandler;
use super::SaxHandlerError;
use super::Span;
use super::Tag;

/// An owned copy of a parser event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SaxEvent {
    Text {
        text: String,
        span: Span,
    },
    StartTag {
        name: String,
        attributes: Option<Attributes>,
        span: Span,
    },
    EndTag {
        name: String,
        attributes: Option<Attributes>,
        span: Span,
    },
    Comment {
        text: String,
        span: Span,
    },
    CData {
        text: String,
        span: Span,
    },
    ProcessingInstruction {
        target: String,
        data: Option<String>,
        span: Span,
    },
    Declaration {
        attributes: Option<Attributes>,
        span: Span,
    },
    Doctype {
        name: String,
        public_id: Option<String>,
        system_id: Option<String>,
        internal_subset: Option<String>,
        span: Span,
    },
}

impl SaxEvent {
    pub fn span(&self) -> Span {
        match self {
            SaxEvent::Text { span, .. }
            | SaxEvent::StartTag { span, .. }
            | SaxEvent::EndTag { span, .. }
            | SaxEvent::Comment { span, .. }
            | SaxEvent::CData { span, .. }
            | SaxEvent::ProcessingInstruction { span, .. }
            | SaxEvent::Declaration { span, .. }
            | SaxEvent::Doctype { span, .. } => *span,
        }
    }

    #[inline]
    pub fn is_start_tag(&self) -> bool {
        matches!(self, SaxEvent::StartTag { .. })
    }

    #[inline]
    pub fn is_end_tag(&self) -> bool {
        matches!(self, SaxEvent::EndTag { .. })
    }

    /// Tag name of a start or end tag event.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            SaxEvent::StartTag { name, .. } | SaxEvent::EndTag { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Handler which records every event.
///
/// ```
/// use saxscan::{EventCollector, SaxEvent, SaxParser, Span};
///
/// let mut collector = EventCollector::new();
/// SaxParser::new().parse(&mut collector, "<a>hi</a>").unwrap();
/// assert_eq!(
///     collector.events()[1],
///     SaxEvent::Text { text: "hi".to_string(), span: Span::new(4, 5) }
/// );
/// ```
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<SaxEvent>,
    parse_attributes: bool,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        EventCollector {
            events: Vec::with_capacity(capacity),
            parse_attributes: false,
        }
    }

    pub fn events(&self) -> &[SaxEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SaxEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn into_events(self) -> Vec<SaxEvent> {
        self.events
    }

    /// Flag mirrored from the last parse call.
    pub fn parse_attributes(&self) -> bool {
        self.parse_attributes
    }

    fn push(&mut self, event: SaxEvent) -> Result<(), SaxHandlerError> {
        self.events.push(event);
        Ok(())
    }
}

impl SaxHandler for EventCollector {
    fn set_parse_attributes(&mut self, enabled: bool) {
        self.parse_attributes = enabled;
    }

    fn text(&mut self, text: &str, span: Span) -> Result<(), SaxHandlerError> {
        self.push(SaxEvent::Text {
            text: text.to_string(),
            span,
        })
    }

    fn start_tag(&mut self, tag: &Tag, span: Span) -> Result<(), SaxHandlerError> {
        self.push(SaxEvent::StartTag {
            name: tag.name.to_string(),
            attributes: tag.attributes.clone(),
            span,
        })
    }

    fn end_tag(&mut self, tag: &Tag, span: Span) -> Result<(), SaxHandlerError> {
        self.push(SaxEvent::EndTag {
            name: tag.name.to_string(),
            attributes: tag.attributes.clone(),
            span,
        })
    }

    fn comment(&mut self, text: &str, span: Span) -> Result<(), SaxHandlerError> {
        self.push(SaxEvent::Comment {
            text: text.to_string(),
            span,
        })
    }

    fn cdata(&mut self, text: &str, span: Span) -> Result<(), SaxHandlerError> {
        self.push(SaxEvent::CData {
            text: text.to_string(),
            span,
        })
    }

    fn pi(&mut self, pi: &Tag, span: Span) -> Result<(), SaxHandlerError> {
        self.push(SaxEvent::ProcessingInstruction {
            target: pi.name.to_string(),
            data: pi.pi_data().map(str::to_string),
            span,
        })
    }

    fn decl(&mut self, decl: &Tag, span: Span) -> Result<(), SaxHandlerError> {
        self.push(SaxEvent::Declaration {
            attributes: decl.attributes.clone(),
            span,
        })
    }

    fn dtd(&mut self, dtd: &Doctype, span: Span) -> Result<(), SaxHandlerError> {
        let (public_id, system_id) = match dtd.external_id {
            None => (None, None),
            Some(ExternalId::System { system }) => (None, Some(system.to_string())),
            Some(ExternalId::Public { public, system }) => {
                (Some(public.to_string()), system.map(str::to_string))
            }
        };
        self.push(SaxEvent::Doctype {
            name: dtd.name.to_string(),
            public_id,
            system_id,
            internal_subset: dtd.internal_subset.map(str::to_string),
            span,
        })
    }
}
