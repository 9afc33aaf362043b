//! Owned XML element tree
//!
//! Just enough of a DOM to load a catalog file, edit the children of its root
//! and write it back. Text nodes (including whitespace between elements) are
//! kept, so untouched parts of a file keep their formatting after a rewrite.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::domain::error::{DomainError, DomainResult};

/// A child node of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
}

impl XmlNode {
    /// True for text nodes made up of whitespace only (indentation).
    pub fn is_blank_text(&self) -> bool {
        matches!(self, XmlNode::Text(text) if text.trim().is_empty())
    }
}

/// An element with its attributes (in document order) and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`XmlElement::set_attribute`].
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Append a child element holding a single text node: `<name>text</name>`.
    pub fn with_text_child(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut child = XmlElement::new(name);
        child.children.push(XmlNode::Text(text.into()));
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Direct child elements, in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First direct child element with the given name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|element| element.name == name)
    }

    /// Concatenated text and CDATA content of the direct children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) | XmlNode::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Remove the first direct child element matching `predicate`.
    ///
    /// The whitespace-only text node directly following the removed element
    /// goes with it, so repeated removals do not pile up blank lines.
    pub fn remove_first_child<P>(&mut self, mut predicate: P) -> Option<XmlElement>
    where
        P: FnMut(&XmlElement) -> bool,
    {
        let index = self.children.iter().position(|node| match node {
            XmlNode::Element(element) => predicate(element),
            _ => false,
        })?;

        let removed = match self.children.remove(index) {
            XmlNode::Element(element) => element,
            _ => unreachable!("position() only matches element nodes"),
        };
        if self
            .children
            .get(index)
            .is_some_and(XmlNode::is_blank_text)
        {
            self.children.remove(index);
        }
        Some(removed)
    }
}

/// A parsed document: one root element.
///
/// The XML declaration, doctype, processing instructions and comments outside
/// the root are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// Parse a complete document.
    ///
    /// Fails on anything that is not well-formed: mismatched or unclosed tags,
    /// duplicate attributes, unknown entities, several roots, no root, or
    /// non-whitespace text outside the root.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(DomainError::malformed(format!(
                        "{} (at byte {})",
                        e,
                        reader.buffer_position()
                    )))
                }
            };

            match event {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(end) => {
                    let element = stack.pop().ok_or_else(|| {
                        DomainError::malformed(format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(end.name().as_ref())
                        ))
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| DomainError::malformed(e.to_string()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Text(text.into_owned())),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(DomainError::malformed(
                                "text outside of the root element",
                            ))
                        }
                    }
                }
                Event::CData(data) => {
                    let data = decode_utf8(&data)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::CData(data)),
                        None => {
                            return Err(DomainError::malformed(
                                "CDATA outside of the root element",
                            ))
                        }
                    }
                }
                Event::Comment(comment) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Comment(decode_utf8(&comment)?));
                    }
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.last() {
            return Err(DomainError::malformed(format!(
                "unclosed element <{}>",
                open.name
            )));
        }
        let root = root.ok_or_else(|| DomainError::malformed("document has no root element"))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    /// Serialize the root element only, without an XML declaration.
    pub fn to_xml_string(&self) -> DomainResult<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        write_element(&mut writer, &self.root).map_err(serialize_err)?;
        into_string(writer)
    }

    /// Serialize the full document: UTF-8 declaration, newline, root element.
    pub fn to_document_string(&self) -> DomainResult<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        write_document(&mut writer, &self.root).map_err(serialize_err)?;
        into_string(writer)
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> DomainResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(DomainError::malformed(format!(
                "second root element <{}>",
                element.name
            )))
        }
    }
    Ok(())
}

fn element_from_start(start: &BytesStart<'_>) -> DomainResult<XmlElement> {
    let mut element = XmlElement::new(decode_utf8(start.name().as_ref())?);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| DomainError::malformed(e.to_string()))?;
        let key = decode_utf8(attribute.key.as_ref())?;
        let value = attribute
            .unescape_value()
            .map_err(|e| DomainError::malformed(e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn decode_utf8(bytes: &[u8]) -> DomainResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| DomainError::malformed(format!("invalid UTF-8: {e}")))
}

fn write_document<W: Write>(
    writer: &mut Writer<W>,
    root: &XmlElement,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Text(BytesText::new("\n")))?;
    write_element(writer, root)
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            XmlNode::CData(data) => {
                writer.write_event(Event::CData(BytesCData::new(data.as_str())))?
            }
            XmlNode::Comment(comment) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

fn into_string(writer: Writer<Cursor<Vec<u8>>>) -> DomainResult<String> {
    String::from_utf8(writer.into_inner().into_inner()).map_err(serialize_err)
}

fn serialize_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Serialize {
        message: e.to_string(),
    }
}
