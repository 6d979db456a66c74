// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// An error that occurs while serializing an [`XmlNode`](crate::XmlNode).
///
/// Returned by [`XmlNode::serialize_lines`](crate::XmlNode::serialize_lines) and
/// [`XmlNode::to_document`](crate::XmlNode::to_document).
#[derive(Debug, Error)]
#[error("error serializing SonarQube report")]
pub struct SerializeError {
    #[from]
    inner: quick_xml::Error,
}
