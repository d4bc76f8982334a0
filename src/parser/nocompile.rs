/*
** This file is a part of Saxscan (streaming SAX tokenizer for XML)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Saxscan is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// Text given to a handler cannot be kept after the callback returns:
/// ```compile_fail
/// use saxscan::{SaxHandler, SaxHandlerError, Span};
///
/// struct Keeper<'d> {
///     last: Option<&'d str>,
/// }
///
/// impl<'d> SaxHandler for Keeper<'d> {
///     fn text(&mut self, text: &str, _span: Span) -> Result<(), SaxHandlerError> {
///         self.last = Some(text);
///         Ok(())
///     }
/// }
/// ```
///
/// Tags given to a handler cannot be kept either:
/// ```compile_fail
/// use saxscan::{SaxHandler, SaxHandlerError, Span, Tag};
///
/// struct Keeper<'d> {
///     last: Option<Tag<'d>>,
/// }
///
/// impl<'d> SaxHandler for Keeper<'d> {
///     fn start_tag(&mut self, tag: &Tag, _span: Span) -> Result<(), SaxHandlerError> {
///         self.last = Some(tag.clone());
///         Ok(())
///     }
/// }
/// ```
///
/// Values captured by the error handler are borrowed as long as the parser lives:
/// ```compile_fail
/// use saxscan::{EventCollector, SaxParser};
///
/// let mut errors = Vec::new();
/// let mut parser = SaxParser::new().on_error(|err| errors.push(err.clone()));
/// let mut collector = EventCollector::new();
/// let _ = parser.parse(&mut collector, "<a>");
/// println!("{}", errors.len());
/// let _ = parser.parse(&mut collector, "<b>");
/// ```
///
/// A parser cannot be used from inside its own handler:
/// ```compile_fail
/// use saxscan::{Callbacks, SaxParser};
///
/// let mut parser = SaxParser::new();
/// let mut handler = Callbacks::new().on_text(|text, _span| {
///     let mut inner = Callbacks::new();
///     parser.parse(&mut inner, text).ok();
///     Ok(())
/// });
/// parser.parse(&mut handler, "<a>x</a>").unwrap();
/// ```
///
#[cfg(doctest)]
struct MustNotCompileTests;
