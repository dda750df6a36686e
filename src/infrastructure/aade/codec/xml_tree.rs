//! Minimal element tree for inbound documents.
//!
//! Responses are read into a namespace-stripped tree rather than fixed serde
//! structs because the authority is inconsistent about list shapes (see
//! [`to_array`]).

use crate::infrastructure::aade::error::{AadeError, AadeResult};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::str::FromStr;

/// One element with its local name, trimmed text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Returns the local name (namespace prefix removed).
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the text content.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the child elements in document order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Returns true if the element has neither text nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.children.is_empty()
    }

    /// Returns the first child with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterates over children with the given local name.
    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a XmlElement> + use<'a, 'n> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Returns the non-empty text of a child element.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(XmlElement::text)
            .filter(|t| !t.is_empty())
    }

    /// Parses the text of a child element, keeping numbers numeric.
    ///
    /// # Errors
    ///
    /// Returns [`AadeError::Protocol`] if the text is present but does not parse.
    pub fn child_parse<T>(&self, name: &str) -> AadeResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.child_text(name)
            .map(|text| {
                text.parse::<T>().map_err(|e| {
                    AadeError::protocol(format!("invalid <{name}> value '{text}': {e}"))
                })
            })
            .transpose()
    }
}

/// Parses a document into its root element.
///
/// # Errors
///
/// Returns [`AadeError::Protocol`] for malformed XML or an empty document.
pub fn parse_document(xml: &str) -> AadeResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(XmlElement::named(local_name(&start)?)),
            Ok(Event::Empty(start)) => {
                let element = XmlElement::named(local_name(&start)?);
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| AadeError::protocol(format!("invalid text content: {e}")))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(text.trim());
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(String::from_utf8_lossy(&data.into_inner()).trim());
                }
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| AadeError::protocol("unbalanced closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(AadeError::protocol(format!(
                    "malformed XML at position {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }

    if !stack.is_empty() {
        return Err(AadeError::protocol("unexpected end of document"));
    }
    root.ok_or_else(|| AadeError::protocol("empty response document"))
}

fn local_name(start: &BytesStart<'_>) -> AadeResult<String> {
    std::str::from_utf8(start.local_name().as_ref())
        .map(str::to_owned)
        .map_err(|e| AadeError::protocol(format!("non UTF-8 element name: {e}")))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> AadeResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(AadeError::protocol("multiple root elements")),
    }
}

/// Normalizes a repeated element to a sequence.
///
/// Protocol quirk: the authority sends lists in more than one shape. A list
/// may come as a `container` wrapping repeated `item` elements, as several
/// bare `container` elements that are each one entry, or as `item` elements
/// directly under `parent`. A single entry is never wrapped in a one-element
/// list. All of these collapse to the same slice of entries here, in
/// document order. Empty containers contribute nothing.
#[must_use]
pub fn to_array<'a>(parent: &'a XmlElement, container: &str, item: &str) -> Vec<&'a XmlElement> {
    let mut entries = Vec::new();
    for child in parent.children() {
        if child.name == container {
            let wrapped: Vec<&XmlElement> = child.children_named(item).collect();
            if !wrapped.is_empty() {
                entries.extend(wrapped);
            } else if !child.children.is_empty() {
                entries.push(child);
            }
        } else if child.name == item {
            entries.push(child);
        }
    }
    entries
}
