// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The reporter lifecycle: resolve the output path when the run begins, then build and write the
//! report once the run has finished.

use crate::{
    config::{HostConfig, ReporterOptions},
    errors::{OutputPathError, WriteReportError},
    flatten::build_report,
    results::{ResultSuite, RunResult},
};
use camino::{Utf8Path, Utf8PathBuf};
use quick_sonar::SerializeError;
use std::io::{self, Write};
use tracing::debug;

/// Standard output for the reporter.
pub enum ReportStdout<'a> {
    /// Write to the process's standard output.
    Terminal,

    /// Write output to a buffer.
    Buffer(&'a mut Vec<u8>),
}

/// Produces a SonarQube Generic Test Execution report for a test run.
#[derive(Clone, Debug)]
pub struct SonarReporter {
    options: ReporterOptions,
    state: ReporterState,
}

#[derive(Clone, Debug)]
enum ReporterState {
    NotStarted,
    Started { output_file: Option<Utf8PathBuf> },
}

impl SonarReporter {
    /// Creates a new reporter.
    ///
    /// To honor the environment fallback for the output path, pass options through
    /// [`ReporterOptions::with_env_fallback`] first.
    pub fn new(options: ReporterOptions) -> Self {
        Self {
            options,
            state: ReporterState::NotStarted,
        }
    }

    /// Returns true if the report will be written to standard output.
    ///
    /// Hosts can use this to suppress their own console summary.
    pub fn prints_to_stdio(&self) -> bool {
        self.options.output_file.is_none()
    }

    /// Starts the reporter, resolving the output path against the host configuration.
    ///
    /// Returns an error immediately if the output path cannot be made absolute.
    pub fn begin(&mut self, config: &HostConfig) -> Result<(), OutputPathError> {
        let output_file = match &self.options.output_file {
            Some(output_file) => {
                let resolved = config.resolve_output_path(output_file)?;
                debug!("SonarQube report will be written to {resolved}");
                Some(resolved)
            }
            None => None,
        };
        self.state = ReporterState::Started { output_file };
        Ok(())
    }

    /// Returns the resolved output path, if the reporter has started and one is configured.
    pub fn output_file(&self) -> Option<&Utf8Path> {
        match &self.state {
            ReporterState::Started { output_file } => output_file.as_deref(),
            ReporterState::NotStarted => None,
        }
    }

    /// Builds and serializes the report for the given root suite.
    pub fn render<S: ResultSuite>(&self, root: &S) -> Result<String, SerializeError> {
        build_report(root).to_document(self.options.strip_ansi_control_sequences)
    }

    /// Writes the report for a finished run.
    ///
    /// If an output path is configured, its parent directories are created and the file is
    /// overwritten. Otherwise the report is written to `stdout`.
    pub async fn finish<S: ResultSuite>(
        &self,
        root: &S,
        result: &RunResult,
        stdout: ReportStdout<'_>,
    ) -> Result<(), WriteReportError> {
        let ReporterState::Started { output_file } = &self.state else {
            return Err(WriteReportError::NotStarted);
        };

        let report = self.render(root)?;
        match output_file {
            Some(output_file) => write_report_file(output_file, &report).await?,
            None => write_report_stdout(&report, stdout).map_err(WriteReportError::Io)?,
        }

        debug!(
            "wrote SonarQube report for run with status {:?}",
            result.status
        );
        Ok(())
    }
}

async fn write_report_file(path: &Utf8Path, report: &str) -> Result<(), WriteReportError> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|error| WriteReportError::Fs {
                file: dir.to_owned(),
                error,
            })?;
    }

    tokio::fs::write(path, report)
        .await
        .map_err(|error| WriteReportError::Fs {
            file: path.to_owned(),
            error,
        })
}

fn write_report_stdout(report: &str, stdout: ReportStdout<'_>) -> io::Result<()> {
    match stdout {
        ReportStdout::Terminal => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{report}")?;
            stdout.flush()
        }
        ReportStdout::Buffer(buf) => writeln!(buf, "{report}"),
    }
}
