//! Minimal owned XML element tree.
//!
//! The XML extractor needs ElementTree-style access (descendant walks,
//! tag-suffix matching, attribute lookup) which serde-driven deserialization
//! cannot give for arbitrarily nested, partially populated BOMs. This module
//! reads a document with quick-xml's namespace-resolving reader and keeps
//! only what the extractor looks at.

use crate::error::{ExtractError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

/// One element of a parsed XML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name without prefix
    pub local_name: String,
    /// Resolved namespace URI, if the element is bound to one
    pub namespace: Option<String>,
    /// Attributes as `(qualified name, unescaped value)`
    pub attributes: Vec<(String, String)>,
    /// Concatenated, trimmed text content directly inside this element
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Attribute value by qualified name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct children with the given local name.
    pub fn children_named<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Self> {
        self.children
            .iter()
            .filter(move |child| child.local_name == local_name)
    }

    /// Pre-order walk over this element and all of its descendants.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Text content, or `None` when empty.
    #[must_use]
    pub fn non_empty_text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    fn from_start(start: &BytesStart<'_>, namespace: Option<String>) -> Result<Self> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ExtractError::xml(format!("malformed attribute: {e}")))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            local_name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            namespace,
            attributes,
            ..Self::default()
        })
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
    }
}

/// Iterator returned by [`XmlElement::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// Parse a document and return its root element.
pub fn parse_document(content: &str) -> Result<XmlElement> {
    let mut reader = NsReader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut buf = Vec::new();

    loop {
        let position = reader.buffer_position();
        let (resolved, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| ExtractError::xml(format!("at position {position}: {e}")))?;
        let namespace = match resolved {
            ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
            _ => None,
        };

        match event {
            Event::Start(ref e) => {
                stack.push(XmlElement::from_start(e, namespace)?);
            }
            Event::Empty(ref e) => {
                let element = XmlElement::from_start(e, namespace)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ExtractError::xml("closing tag without opening tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                match stack.last_mut() {
                    Some(current) => current.push_text(text.trim()),
                    None if text.trim().is_empty() => {}
                    None => return Err(ExtractError::xml("text outside of the root element")),
                }
            }
            Event::CData(ref e) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(String::from_utf8_lossy(e).trim());
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ExtractError::xml(format!(
            "unexpected end of document inside <{}>",
            stack.last().map(|e| e.local_name.as_str()).unwrap_or_default()
        )));
    }
    root.ok_or_else(|| ExtractError::xml("document has no root element"))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(ExtractError::xml("multiple root elements"));
    }
    *root = Some(element);
    Ok(())
}
