// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generate SonarQube Generic Test Execution reports in Rust.
//!
//! Reports are built as a tree of [`XmlNode`]s and serialized with [`XmlNode::to_document`].

mod errors;
mod escape;
mod node;
mod serialize;

pub use errors::*;
pub use escape::{escape_attribute, escape_text, is_discouraged_xml_char};
pub use node::*;
