// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialize an `XmlNode`.

use crate::{
    XmlNode,
    escape::{cdata_content, escape_attribute},
};
use quick_xml::{
    Writer,
    events::{BytesCData, BytesEnd, BytesStart, Event, attributes::Attribute},
    name::QName,
};
use std::borrow::Cow;

/// Serializes `node` and its descendants depth-first, pushing one line per tag or text section.
///
/// Every element is written as an open tag and a close tag, even if it has no content.
pub(crate) fn serialize_node(
    node: &XmlNode,
    lines: &mut Vec<String>,
    strip_ansi_control_sequences: bool,
) -> quick_xml::Result<()> {
    // Use the destructuring syntax to ensure that all fields are handled.
    let XmlNode {
        name,
        attributes,
        children,
        text,
    } = node;

    let mut start_tag = BytesStart::new(name.as_str());
    for (key, value) in attributes {
        let escaped = escape_attribute(&value.to_string(), strip_ansi_control_sequences);
        // The value is already escaped, so it's pushed as raw bytes.
        start_tag.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escaped.into_bytes()),
        });
    }
    write_line(lines, Event::Start(start_tag))?;

    for child in children {
        serialize_node(child, lines, strip_ansi_control_sequences)?;
    }

    if let Some(text) = text.as_deref().filter(|text| !text.is_empty()) {
        let content = cdata_content(text, strip_ansi_control_sequences);
        write_line(lines, Event::CData(BytesCData::new(content)))?;
    }

    write_line(lines, Event::End(BytesEnd::new(name.as_str())))
}

fn write_line(lines: &mut Vec<String>, event: Event<'_>) -> quick_xml::Result<()> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(event)?;
    // Every event is built from `str`s, so the output is always UTF-8.
    lines.push(String::from_utf8_lossy(&writer.into_inner()).into_owned());
    Ok(())
}
