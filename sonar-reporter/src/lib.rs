// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Write SonarQube Generic Test Execution reports from a host test runner's results.
//!
//! The host exposes its finished suite tree through [`ResultSuite`] and [`ResultTest`] (or builds
//! an owned [`model::RunSuite`]), then drives a [`SonarReporter`]:
//!
//! 1. [`SonarReporter::begin`] resolves the output path when the run starts.
//! 2. [`SonarReporter::finish`] flattens the tree into one `file` element per source file and
//!    writes the report to a file or to standard output.

mod config;
pub mod errors;
pub mod flatten;
pub mod model;
mod reporter;
mod results;

pub use config::*;
pub use reporter::*;
pub use results::*;
