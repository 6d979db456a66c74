// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{SerializeError, serialize::serialize_node};
use indexmap::map::IndexMap;
use std::fmt;

/// A single element in a SonarQube report.
///
/// Elements are modeled generically rather than with one type per tag: a name, an ordered set of
/// attributes, ordered children and optional character data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// The tag name of this element.
    pub name: String,

    /// Attributes on this element, serialized in insertion order.
    pub attributes: IndexMap<String, AttributeValue>,

    /// Child elements, serialized in order.
    pub children: Vec<XmlNode>,

    /// Character data for this element.
    ///
    /// This is serialized as a CDATA section after all children.
    pub text: Option<String>,
}

impl XmlNode {
    /// Creates a new element with no attributes, children or text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: vec![],
            text: None,
        }
    }

    /// Sets an attribute on this element.
    ///
    /// If the attribute already exists, its value is replaced but its position is kept.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the value of the given attribute, if set.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Adds a child element.
    pub fn add_child(&mut self, child: XmlNode) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Adds several child elements.
    pub fn add_children(&mut self, children: impl IntoIterator<Item = XmlNode>) -> &mut Self {
        self.children.extend(children);
        self
    }

    /// Sets the character data for this element.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    /// Returns an iterator over the children with the given tag name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Serializes this element into lines of markup.
    ///
    /// Joining the lines with `\n` produces the document. If `strip_ansi_control_sequences` is
    /// true, ANSI escape codes are removed from attribute values and text before escaping.
    pub fn serialize_lines(
        &self,
        strip_ansi_control_sequences: bool,
    ) -> Result<Vec<String>, SerializeError> {
        let mut lines = Vec::new();
        serialize_node(self, &mut lines, strip_ansi_control_sequences)?;
        Ok(lines)
    }

    /// Serializes this element into a document string.
    ///
    /// No XML declaration is emitted.
    pub fn to_document(
        &self,
        strip_ansi_control_sequences: bool,
    ) -> Result<String, SerializeError> {
        Ok(self.serialize_lines(strip_ansi_control_sequences)?.join("\n"))
    }
}

/// A scalar attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeValue {
    /// A string value.
    String(String),

    /// An integer value.
    Integer(u64),

    /// A boolean value, serialized as `true` or `false`.
    Bool(bool),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::Integer(n) => write!(f, "{n}"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_owned())
    }
}

impl From<u64> for AttributeValue {
    fn from(n: u64) -> Self {
        AttributeValue::Integer(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}
