// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! An owned result tree implementing [`ResultSuite`] and [`ResultTest`].
//!
//! Hosts that cannot implement the traits directly can build this tree by hand, or deserialize it
//! from a dump of their results. Attempt durations are given in milliseconds:
//!
//! ```json
//! {
//!   "title": "",
//!   "entries": [
//!     { "kind": "suite", "title": "chromium", "entries": [
//!       { "kind": "suite", "title": "a.test.js", "location": "/repo/a.test.js", "entries": [
//!         { "kind": "test", "titlePath": ["", "chromium", "a.test.js", "one"],
//!           "outcome": "passed", "attempts": [{ "durationMs": 12.5 }] }
//!       ] }
//!     ] }
//!   ]
//! }
//! ```

use crate::results::{ResultSuite, ResultTest, SuiteEntry, TestOutcome};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Deserializer, de::Error};
use std::time::Duration;

/// A suite in an owned result tree.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSuite {
    /// The title of this suite.
    #[serde(default)]
    pub title: String,

    /// The source file this suite was declared in.
    #[serde(default)]
    pub location: Option<Utf8PathBuf>,

    /// Nested suites and tests, in declaration order.
    #[serde(default)]
    pub entries: Vec<RunSuiteEntry>,
}

impl RunSuite {
    /// Creates a new, empty suite.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            location: None,
            entries: vec![],
        }
    }

    /// Sets the source file for this suite.
    pub fn set_location(&mut self, location: impl Into<Utf8PathBuf>) -> &mut Self {
        self.location = Some(location.into());
        self
    }

    /// Adds a nested suite.
    pub fn add_suite(&mut self, suite: RunSuite) -> &mut Self {
        self.entries.push(RunSuiteEntry::Suite(suite));
        self
    }

    /// Adds a test.
    pub fn add_test(&mut self, test: RunTest) -> &mut Self {
        self.entries.push(RunSuiteEntry::Test(test));
        self
    }
}

impl ResultSuite for RunSuite {
    type Test = RunTest;

    fn entries(&self) -> impl Iterator<Item = SuiteEntry<'_, Self, RunTest>> {
        self.entries.iter().map(|entry| match entry {
            RunSuiteEntry::Suite(suite) => SuiteEntry::Suite(suite),
            RunSuiteEntry::Test(test) => SuiteEntry::Test(test),
        })
    }

    fn location(&self) -> Option<&Utf8Path> {
        self.location.as_deref()
    }
}

/// An entry within a [`RunSuite`].
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RunSuiteEntry {
    /// A nested suite.
    Suite(RunSuite),

    /// A test.
    Test(RunTest),
}

/// A test in an owned result tree.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTest {
    /// The names from the root suite down to this test.
    pub title_path: Vec<String>,

    /// The outcome of this test after all attempts.
    pub outcome: TestOutcome,

    /// Each attempt at running this test, in order.
    #[serde(default)]
    pub attempts: Vec<TestAttempt>,
}

impl RunTest {
    /// Creates a new test with no attempts.
    pub fn new(
        title_path: impl IntoIterator<Item = impl Into<String>>,
        outcome: TestOutcome,
    ) -> Self {
        Self {
            title_path: title_path.into_iter().map(Into::into).collect(),
            outcome,
            attempts: vec![],
        }
    }

    /// Records an attempt that took the given amount of time.
    pub fn add_attempt(&mut self, duration: Duration) -> &mut Self {
        self.attempts.push(TestAttempt { duration });
        self
    }
}

impl ResultTest for RunTest {
    fn title_path(&self) -> impl Iterator<Item = &str> {
        self.title_path.iter().map(String::as_str)
    }

    fn attempt_durations(&self) -> impl Iterator<Item = Duration> {
        self.attempts.iter().map(|attempt| attempt.duration)
    }

    fn outcome(&self) -> TestOutcome {
        self.outcome
    }
}

/// A single attempt at running a test.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TestAttempt {
    /// The time taken by this attempt.
    #[serde(rename = "durationMs", deserialize_with = "deserialize_millis")]
    pub duration: Duration,
}

// Negative durations are clamped to zero. Durations too large for `Duration` are rejected.
fn deserialize_millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = f64::deserialize(deserializer)?;
    if !millis.is_finite() {
        return Err(D::Error::custom(format!(
            "invalid duration {millis}: must be a finite number of milliseconds"
        )));
    }
    Duration::try_from_secs_f64(millis.max(0.0) / 1000.0).map_err(|error| {
        D::Error::custom(format!("invalid duration {millis} milliseconds: {error}"))
    })
}
