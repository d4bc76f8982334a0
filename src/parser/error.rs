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
use std::error::Error;
use std::fmt::Display;

use super::Location;

/// Category of a problem found in the document.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A tag is never terminated, has no name, or the input is not UTF-8.
    MalformedXml,
    /// An XML declaration has no `?>` terminator.
    DeclError,
    /// An XML declaration appears after other content.
    DeclNotAtStart,
    /// An XML declaration has no `version` attribute.
    DeclAttrError,
    /// A processing instruction has no `?>` terminator.
    PiError,
    /// A comment has no `-->` terminator.
    CommentError,
    /// A CDATA section has no `]]>` terminator.
    CdataError,
    /// A document type declaration matches none of the accepted shapes.
    DtdError,
    /// An end tag carries attributes.
    EndTagAttributesInvalid,
    /// An end tag does not close the most recently opened tag.
    UnmatchedTag,
    /// The input ended with open tags.
    IncompleteDocument,
    /// The input ends with text that is not whitespace and not a tag.
    UnparsableText,
}

impl ErrorKind {
    /// Fatal errors stop the scan since there is no matched span to
    /// continue after. Others are reported and the scan goes on.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ErrorKind::DeclNotAtStart
                | ErrorKind::DeclAttrError
                | ErrorKind::EndTagAttributesInvalid
                | ErrorKind::UnmatchedTag
        )
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::MalformedXml => description::MALFORMED_XML,
            ErrorKind::DeclError => description::DECL_ERROR,
            ErrorKind::DeclNotAtStart => description::DECL_NOT_AT_START,
            ErrorKind::DeclAttrError => description::DECL_ATTR_ERROR,
            ErrorKind::PiError => description::PI_ERROR,
            ErrorKind::CommentError => description::COMMENT_ERROR,
            ErrorKind::CdataError => description::CDATA_ERROR,
            ErrorKind::DtdError => description::DTD_ERROR,
            ErrorKind::EndTagAttributesInvalid => description::END_TAG_ATTRIBUTES,
            ErrorKind::UnmatchedTag => description::UNMATCHED_TAG,
            ErrorKind::IncompleteDocument => description::INCOMPLETE_DOCUMENT,
            ErrorKind::UnparsableText => description::UNPARSABLE_TEXT,
        }
    }
}

/// A problem found in the document.
///
/// Every error is passed to the error handler installed with
/// [on_error()](crate::SaxParser::on_error). Fatal ones are also
/// returned from the parse call inside [SaxError::BadXml].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XmlError {
    kind: ErrorKind,
    detail: Option<Cow<'static, str>>,
    position: usize,
    location: Location,
}

impl XmlError {
    pub(crate) fn new(
        kind: ErrorKind,
        detail: Option<Cow<'static, str>>,
        document: &str,
        offset: usize,
    ) -> Self {
        XmlError {
            kind,
            detail,
            position: offset + 1,
            location: Location::of(document, offset),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human readable description including any detail like tag names.
    pub fn message(&self) -> Cow<'_, str> {
        match &self.detail {
            None => Cow::Borrowed(self.kind.description()),
            Some(detail) => Cow::Owned(format!("{}: {}", self.kind.description(), detail)),
        }
    }

    /// 1-based byte position of the offending construct.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl Display for XmlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at position {}", self.message(), self.position)
    }
}

impl Error for XmlError {}

/// Type of the error which stopped the XML SAX parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SaxError {
    /// A fatal syntax error is encountered in the XML input.
    ///
    /// Typical action is telling error details to the user so they can fix the document.
    BadXml(XmlError),

    /// Element handler function returned an error.
    ///
    /// This is intended for caller's handler to be able to abort the processing while
    /// signalling to the caller that the interruption is not caused by the parser itself.
    HandlerAbort,
}

impl Display for SaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaxError::BadXml(err) => write!(f, "invalid xml syntax: {}", err),
            SaxError::HandlerAbort => write!(f, "sax handler aborted the parsing"),
        }
    }
}

impl Error for SaxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SaxError::BadXml(err) => Some(err),
            SaxError::HandlerAbort => None,
        }
    }
}

/// Error returned from [SaxHandler](crate::SaxHandler) callbacks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaxHandlerError {
    /// Stop parsing at once.
    Abort,
}

impl Display for SaxHandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaxHandlerError::Abort => write!(f, "handler abort"),
        }
    }
}

impl Error for SaxHandlerError {}

impl From<SaxHandlerError> for SaxError {
    fn from(err: SaxHandlerError) -> Self {
        match err {
            SaxHandlerError::Abort => SaxError::HandlerAbort,
        }
    }
}

pub(super) mod description {
    pub(in super::super) const MALFORMED_XML: &str = "tag is not terminated with '>'";
    pub(in super::super) const DECL_ERROR: &str = "xml declaration must end with '?>'";
    pub(in super::super) const DECL_NOT_AT_START: &str =
        "xml declaration is only allowed at the start of the document";
    pub(in super::super) const DECL_ATTR_ERROR: &str =
        "xml declaration must have a version attribute";
    pub(in super::super) const PI_ERROR: &str = "processing instruction must end with '?>'";
    pub(in super::super) const COMMENT_ERROR: &str = "comment must end with '-->'";
    pub(in super::super) const CDATA_ERROR: &str = "character data section must end with ']]>'";
    pub(in super::super) const DTD_ERROR: &str = "document type declaration is not recognized";
    pub(in super::super) const END_TAG_ATTRIBUTES: &str = "end tag cannot have attributes";
    pub(in super::super) const UNMATCHED_TAG: &str = "end tag does not match the open tag";
    pub(in super::super) const INCOMPLETE_DOCUMENT: &str = "document has unclosed tags";
    pub(in super::super) const UNPARSABLE_TEXT: &str =
        "text outside of tags cannot be parsed";

    pub(in super::super) const TAG_EMPTY_NAME: &str = "tag has no name";
    pub(in super::super) const INVALID_UTF8: &str = "input is not valid utf-8";
    pub(in super::super) const CLOSE_WITHOUT_OPEN: &str = "close tag without open";
}
