// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code to turn a result tree into a SonarQube Generic Test Execution document.

use crate::results::{ResultSuite, ResultTest, TestOutcome};
use quick_sonar::XmlNode;
use std::time::Duration;
use tracing::trace;

static TEST_EXECUTIONS_TAG: &str = "testExecutions";
static FILE_TAG: &str = "file";
static TEST_CASE_TAG: &str = "testCase";
static FAILURE_TAG: &str = "failure";
static SKIPPED_TAG: &str = "skipped";

/// The schema version written to the root element.
pub static REPORT_VERSION: &str = "1";

/// The separator between title segments in a test case name.
pub static TITLE_SEPARATOR: &str = " › ";

// Root, project and file suites.
const TITLE_PREFIX_LEN: usize = 3;

/// Builds the report tree for a finished run.
///
/// `root` must be the host's root suite: its children are projects, and their children are
/// files. Each file suite becomes one `file` element, in tree order.
pub fn build_report<S: ResultSuite>(root: &S) -> XmlNode {
    let mut report = XmlNode::new(TEST_EXECUTIONS_TAG);
    report.set_attribute("version", REPORT_VERSION);

    for project in root.suites() {
        for file in project.suites() {
            report.add_child(build_file(file));
        }
    }

    report
}

fn build_file<S: ResultSuite>(suite: &S) -> XmlNode {
    let mut file = XmlNode::new(FILE_TAG);
    // A missing location leaves the attribute off rather than failing the report.
    if let Some(location) = suite.location() {
        file.set_attribute("path", location.as_str());
    }

    let tests = suite.all_tests();
    trace!(
        "adding {} test cases for file {:?}",
        tests.len(),
        suite.location()
    );
    file.add_children(tests.into_iter().map(build_test_case));
    file
}

fn build_test_case<T: ResultTest>(test: &T) -> XmlNode {
    let mut test_case = XmlNode::new(TEST_CASE_TAG);
    test_case
        .set_attribute("name", test_case_name(test))
        .set_attribute("duration", total_duration_millis(test.attempt_durations()));

    // There is no equivalent to a failure message in this format.
    match test.outcome() {
        TestOutcome::Skipped => {
            test_case.add_child(XmlNode::new(SKIPPED_TAG));
        }
        outcome if !outcome.is_ok() => {
            test_case.add_child(XmlNode::new(FAILURE_TAG));
        }
        _ => {}
    }

    test_case
}

/// Returns the displayed name of a test: its title path without the root, project and file
/// segments.
pub fn test_case_name<T: ResultTest>(test: &T) -> String {
    let segments: Vec<_> = test.title_path().skip(TITLE_PREFIX_LEN).collect();
    segments.join(TITLE_SEPARATOR)
}

/// Sums attempt durations and rounds to the nearest millisecond.
///
/// The sum saturates at [`Duration::MAX`], and the result at [`u64::MAX`].
pub fn total_duration_millis(durations: impl IntoIterator<Item = Duration>) -> u64 {
    let total = durations
        .into_iter()
        .fold(Duration::ZERO, Duration::saturating_add);
    (total.as_secs_f64() * 1000.0).round() as u64
}
