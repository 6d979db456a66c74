// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by the SonarQube reporter.

use camino::{FromPathBufError, Utf8PathBuf};
use thiserror::Error;

/// An error that occurred while resolving the report's output path.
///
/// Returned by [`SonarReporter::begin`](crate::SonarReporter::begin).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputPathError {
    /// A relative output path was provided, but there is no configuration file to resolve it
    /// against.
    #[error(
        "output file `{path}` is relative, but no configuration file is in use \
         (expected a fully resolved path)"
    )]
    RelativeWithoutConfigFile {
        /// The output path as configured.
        path: Utf8PathBuf,
    },

    /// The output path did not resolve to an absolute path.
    #[error("output file `{path}` did not resolve to an absolute path")]
    NotAbsolute {
        /// The output path after resolution.
        path: Utf8PathBuf,
    },
}

/// An error that occurred while reading the output path from the environment.
///
/// Returned by [`output_name_from_env`](crate::output_name_from_env).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvOutputNameError {
    /// The environment variable was set, but was not valid Unicode.
    #[error("environment variable `{var}` is not valid Unicode")]
    NotUnicode {
        /// The name of the environment variable.
        var: &'static str,
    },

    /// The current directory could not be determined.
    #[error("error determining the current directory")]
    CurrentDir(#[source] std::io::Error),

    /// The current directory is not valid UTF-8.
    #[error("current directory is not valid UTF-8")]
    CurrentDirNotUtf8(#[source] FromPathBufError),
}

/// An error that occurred while parsing reporter options.
#[derive(Debug, Error)]
#[error("failed to parse SonarQube reporter options")]
pub struct OptionsParseError {
    #[source]
    err: toml::de::Error,
}

impl OptionsParseError {
    pub(crate) fn new(err: toml::de::Error) -> Self {
        Self { err }
    }
}

/// An error that occurred while writing the report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteReportError {
    /// The report was finished before [`SonarReporter::begin`](crate::SonarReporter::begin) was
    /// called.
    #[error("report finished before the reporter was started")]
    NotStarted,

    /// An error occurred while serializing the report.
    #[error("error serializing report")]
    Serialize(#[from] quick_sonar::SerializeError),

    /// An error occurred while writing the report to standard output.
    #[error("error writing report to standard output")]
    Io(#[source] std::io::Error),

    /// An error occurred while operating on the file system.
    #[error("error operating on path {file}")]
    Fs {
        /// The file being operated on.
        file: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },
}
