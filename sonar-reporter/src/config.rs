// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reporter options and output path resolution.

use crate::errors::{EnvOutputNameError, OptionsParseError, OutputPathError};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::ffi::OsString;
use tracing::debug;

/// The environment variable consulted for an output path if none is configured.
///
/// Relative values are resolved against the current directory.
pub static OUTPUT_NAME_ENV: &str = "SONAR_REPORT_OUTPUT_NAME";

/// Options accepted by the SonarQube reporter.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReporterOptions {
    /// Where to write the report. If unset, the report is written to standard output.
    ///
    /// Relative paths are resolved against the directory of the host's configuration file.
    #[serde(default)]
    pub output_file: Option<Utf8PathBuf>,

    /// Whether to strip ANSI escape codes from text before escaping it.
    #[serde(default, rename = "stripANSIControlSequences")]
    pub strip_ansi_control_sequences: bool,
}

impl ReporterOptions {
    /// Parses options from a TOML table.
    pub fn from_toml_str(input: &str) -> Result<Self, OptionsParseError> {
        toml::from_str(input).map_err(OptionsParseError::new)
    }

    /// Uses `env_output_name` as the output file if none was configured.
    ///
    /// `env_output_name` is typically obtained once at startup through [`output_name_from_env`].
    pub fn with_env_fallback(mut self, env_output_name: Option<Utf8PathBuf>) -> Self {
        // An empty path counts as unset.
        self.output_file = self
            .output_file
            .filter(|path| !path.as_str().is_empty())
            .or(env_output_name);
        self
    }
}

/// Reads [`OUTPUT_NAME_ENV`] and resolves it against the current directory.
///
/// Returns `Ok(None)` if the variable is unset or empty.
pub fn output_name_from_env() -> Result<Option<Utf8PathBuf>, EnvOutputNameError> {
    let Some(value) = std::env::var_os(OUTPUT_NAME_ENV).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    let cwd = std::env::current_dir().map_err(EnvOutputNameError::CurrentDir)?;
    let cwd = Utf8PathBuf::try_from(cwd).map_err(EnvOutputNameError::CurrentDirNotUtf8)?;
    output_name_from(Some(value), &cwd)
}

/// Resolves a value of [`OUTPUT_NAME_ENV`] against `cwd`.
pub(crate) fn output_name_from(
    value: Option<OsString>,
    cwd: &Utf8Path,
) -> Result<Option<Utf8PathBuf>, EnvOutputNameError> {
    let Some(value) = value.filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    let value = value
        .into_string()
        .map_err(|_| EnvOutputNameError::NotUnicode {
            var: OUTPUT_NAME_ENV,
        })?;

    let path = cwd.join(value);
    debug!("using output path {path} from {OUTPUT_NAME_ENV}");
    Ok(Some(path))
}

/// Configuration provided by the host test runner.
#[derive(Clone, Debug)]
pub struct HostConfig {
    /// The base directory for resolving relative paths.
    pub root_dir: Utf8PathBuf,

    /// The configuration file in use, if any.
    pub config_file: Option<Utf8PathBuf>,
}

impl HostConfig {
    /// Creates a new `HostConfig` with no configuration file.
    pub fn new(root_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            config_file: None,
        }
    }

    /// Sets the configuration file in use.
    pub fn set_config_file(&mut self, config_file: impl Into<Utf8PathBuf>) -> &mut Self {
        self.config_file = Some(config_file.into());
        self
    }

    /// Resolves an output path against this configuration.
    ///
    /// Relative paths are joined to the configuration file's directory, which is itself joined to
    /// `root_dir` if relative. Without a configuration file, the path must already be absolute.
    pub fn resolve_output_path(
        &self,
        output_file: &Utf8Path,
    ) -> Result<Utf8PathBuf, OutputPathError> {
        let Some(config_file) = &self.config_file else {
            if output_file.is_absolute() {
                return Ok(output_file.to_owned());
            }
            return Err(OutputPathError::RelativeWithoutConfigFile {
                path: output_file.to_owned(),
            });
        };

        let config_dir = config_file.parent().unwrap_or(Utf8Path::new(""));
        let mut resolved = config_dir.join(output_file);
        if resolved.is_relative() {
            resolved = self.root_dir.join(resolved);
        }

        if resolved.is_absolute() {
            Ok(resolved)
        } else {
            Err(OutputPathError::NotAbsolute { path: resolved })
        }
    }
}
