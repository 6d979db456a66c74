// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escaping for attribute values and character data.

use std::borrow::Cow;

static CDATA_START: &str = "<![CDATA[";
static CDATA_END: &str = "]]>";
static CDATA_END_ESCAPED: &str = "]]&gt;";

/// Escapes a string for use as an attribute value.
///
/// `&`, `"`, `'`, `<` and `>` are replaced with their named entities, and characters that are
/// discouraged in XML 1.0 are removed. Tab, line feed and carriage return become character
/// references, since a parser would otherwise normalize them to spaces.
pub fn escape_attribute(value: &str, strip_ansi_control_sequences: bool) -> String {
    let value = maybe_strip_ansi(value, strip_ansi_control_sequences);
    let escaped = quick_xml::escape::escape(&*value);
    let mut out = String::with_capacity(escaped.len());
    for c in escaped.chars() {
        match c {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c if is_discouraged_xml_char(c) => {}
            c => out.push(c),
        }
    }
    out
}

/// Escapes a string as a CDATA section, including the `<![CDATA[` and `]]>` delimiters.
///
/// Occurrences of `]]>` within the text are replaced with `]]&gt;` so that the section cannot be
/// closed early. Characters that are discouraged in XML 1.0 are removed.
pub fn escape_text(text: &str, strip_ansi_control_sequences: bool) -> String {
    let content = cdata_content(text, strip_ansi_control_sequences);
    let mut out = String::with_capacity(content.len() + CDATA_START.len() + CDATA_END.len());
    out.push_str(CDATA_START);
    out.push_str(&content);
    out.push_str(CDATA_END);
    out
}

/// The contents of a CDATA section for `text`, without the delimiters.
pub(crate) fn cdata_content(text: &str, strip_ansi_control_sequences: bool) -> String {
    let text = maybe_strip_ansi(text, strip_ansi_control_sequences);
    remove_discouraged_chars(&text.replace(CDATA_END, CDATA_END_ESCAPED))
}

/// Returns true if this character is outside the ranges XML 1.0 recommends for documents.
///
/// Tab, line feed, carriage return and U+0085 (next line) are allowed. The noncharacters U+FFFE
/// and U+FFFF are not.
pub fn is_discouraged_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}'
            | '\u{b}'..='\u{c}'
            | '\u{e}'..='\u{1f}'
            | '\u{7f}'..='\u{84}'
            | '\u{86}'..='\u{9f}'
            | '\u{fffe}'
            | '\u{ffff}'
    )
}

fn maybe_strip_ansi(s: &str, strip: bool) -> Cow<'_, str> {
    if strip {
        Cow::Owned(strip_ansi_escapes::strip_str(s))
    } else {
        Cow::Borrowed(s)
    }
}

fn remove_discouraged_chars(s: &str) -> String {
    s.chars().filter(|&c| !is_discouraged_xml_char(c)).collect()
}
