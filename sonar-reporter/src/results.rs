// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The view of a finished test run that the reporter consumes.
//!
//! Host test runners expose their suite tree through [`ResultSuite`] and [`ResultTest`]. The
//! reporter only reads from these; it never mutates the host's model.

use camino::Utf8Path;
use serde::Deserialize;
use std::time::Duration;

/// An entry within a suite: either a nested suite or a test.
#[derive(Debug)]
pub enum SuiteEntry<'a, S, T> {
    /// A nested suite, such as a project, a file or a `describe` group.
    Suite(&'a S),

    /// A test.
    Test(&'a T),
}

/// A suite in the host runner's result tree.
///
/// The root suite has one child per project, and each project suite has one child per source
/// file. File suites may contain nested groups to any depth.
pub trait ResultSuite: Sized {
    /// The type of tests contained in this suite.
    type Test: ResultTest;

    /// Returns the entries of this suite in declaration order.
    fn entries(&self) -> impl Iterator<Item = SuiteEntry<'_, Self, Self::Test>>;

    /// Returns the source file this suite was declared in, if known.
    fn location(&self) -> Option<&Utf8Path>;

    /// Returns the direct child suites of this suite, in order.
    fn suites(&self) -> impl Iterator<Item = &Self> {
        self.entries().filter_map(|entry| match entry {
            SuiteEntry::Suite(suite) => Some(suite),
            SuiteEntry::Test(_) => None,
        })
    }

    /// Returns all tests in this suite and its descendants, in declaration order.
    fn all_tests(&self) -> Vec<&Self::Test> {
        let mut tests = Vec::new();
        collect_tests(self, &mut tests);
        tests
    }
}

fn collect_tests<'a, S: ResultSuite>(suite: &'a S, tests: &mut Vec<&'a S::Test>) {
    for entry in suite.entries() {
        match entry {
            SuiteEntry::Suite(child) => collect_tests(child, tests),
            SuiteEntry::Test(test) => tests.push(test),
        }
    }
}

/// A test in the host runner's result tree.
pub trait ResultTest {
    /// Returns the names from the root suite down to this test.
    ///
    /// The first three segments are the root, project and file suites.
    fn title_path(&self) -> impl Iterator<Item = &str>;

    /// Returns the duration of each attempt at running this test, including retries.
    fn attempt_durations(&self) -> impl Iterator<Item = Duration>;

    /// Returns the outcome of this test after all attempts.
    fn outcome(&self) -> TestOutcome;
}

/// The resolved outcome of a test after all retries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestOutcome {
    /// The final attempt passed. Earlier attempts may have failed.
    Passed,

    /// The test failed on every attempt.
    Failed,

    /// The final attempt exceeded its time limit.
    TimedOut,

    /// The test was not run.
    Skipped,

    /// The test was interrupted before it could complete.
    Interrupted,
}

impl TestOutcome {
    /// Returns true if this outcome does not count as a failure.
    pub fn is_ok(self) -> bool {
        matches!(self, TestOutcome::Passed | TestOutcome::Skipped)
    }
}

/// The summary of a finished test run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RunResult {
    /// The overall status of the run.
    pub status: RunStatus,
}

impl RunResult {
    /// Creates a new `RunResult`.
    pub fn new(status: RunStatus) -> Self {
        Self { status }
    }
}

/// The overall status of a test run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    /// Every test passed or was skipped.
    Passed,

    /// At least one test failed.
    Failed,

    /// The run exceeded its global time limit.
    TimedOut,

    /// The run was interrupted.
    Interrupted,
}

impl RunStatus {
    /// Returns the process exit code a host runner should use for this status.
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Passed => 0,
            RunStatus::Failed | RunStatus::TimedOut | RunStatus::Interrupted => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(TestOutcome::Passed, true)]
    #[test_case(TestOutcome::Skipped, true)]
    #[test_case(TestOutcome::Failed, false)]
    #[test_case(TestOutcome::TimedOut, false)]
    #[test_case(TestOutcome::Interrupted, false)]
    fn outcome_is_ok(outcome: TestOutcome, ok: bool) {
        assert_eq!(outcome.is_ok(), ok);
    }

    #[test]
    fn run_status_exit_code() {
        assert_eq!(RunStatus::Passed.exit_code(), 0);
        assert_eq!(RunStatus::Failed.exit_code(), 1);
        assert_eq!(RunStatus::Interrupted.exit_code(), 1);
    }
}
