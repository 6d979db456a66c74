// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end scenarios: a result tree goes in, a parsed SonarQube report comes out.

use pretty_assertions::assert_eq;
use quick_xml::{Reader, events::Event};
use serde::Deserialize;
use sonar_reporter::{
    HostConfig, ReportStdout, ReporterOptions, RunResult, SonarReporter, model::RunSuite,
};
use std::collections::BTreeMap;

#[derive(Deserialize)]
struct Dump {
    root: RunSuite,
    result: RunResult,
}

#[derive(Debug, PartialEq, Eq)]
struct Element {
    name: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    fn attr(&self, name: &str) -> &str {
        self.attributes
            .get(name)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{} has no attribute {name}", self.name))
    }

    fn children_named<'a>(&'a self, name: &'a str) -> Vec<&'a Element> {
        self.children.iter().filter(|c| c.name == name).collect()
    }

    fn has_child(&self, name: &str) -> bool {
        self.children.iter().any(|c| c.name == name)
    }
}

fn parse(document: &str) -> Element {
    let mut reader = Reader::from_str(document);
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event().expect("report is well-formed") {
            Event::Start(start) => {
                let name = String::from_utf8(start.name().as_ref().to_vec()).expect("UTF-8 name");
                let attributes = start
                    .attributes()
                    .map(|attr| {
                        let attr = attr.expect("attribute is well-formed");
                        let key = String::from_utf8(attr.key.as_ref().to_vec()).expect("UTF-8");
                        let value = attr.unescape_value().expect("value unescapes").into_owned();
                        (key, value)
                    })
                    .collect();
                stack.push(Element {
                    name,
                    attributes,
                    children: vec![],
                });
            }
            Event::End(_) => {
                let element = stack.pop().expect("balanced tags");
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return element,
                }
            }
            Event::Eof => panic!("document ended before the root element closed"),
            _ => {}
        }
    }
}

/// Runs the reporter on a JSON dump, returning the parsed report and the run's exit code.
async fn run(json: &str) -> (Element, i32) {
    let dump: Dump = serde_json::from_str(json).expect("valid dump");

    let mut reporter = SonarReporter::new(ReporterOptions::default());
    reporter
        .begin(&HostConfig::new("/repo"))
        .expect("stdout needs no output path");

    let mut buf = Vec::new();
    reporter
        .finish(&dump.root, &dump.result, ReportStdout::Buffer(&mut buf))
        .await
        .expect("report written");

    let output = String::from_utf8(buf).expect("report is UTF-8");
    (parse(&output), dump.result.status.exit_code())
}

fn single_file_dump(tests: &str, status: &str) -> String {
    format!(
        r#"{{
          "root": {{ "entries": [
            {{ "kind": "suite", "title": "", "entries": [
              {{ "kind": "suite", "title": "a.test.js", "location": "/repo/a.test.js",
                 "entries": [{tests}] }}
            ] }}
          ] }},
          "result": {{ "status": "{status}" }}
        }}"#
    )
}

#[tokio::test]
async fn renders_passing_files() {
    let json = r#"{
      "root": { "entries": [
        { "kind": "suite", "title": "", "entries": [
          { "kind": "suite", "title": "a.test.js", "location": "/repo/a.test.js", "entries": [
            { "kind": "test", "titlePath": ["", "", "a.test.js", "one"], "outcome": "passed",
              "attempts": [{ "durationMs": 3.2 }] }
          ] },
          { "kind": "suite", "title": "b.test.js", "location": "/repo/b.test.js", "entries": [
            { "kind": "test", "titlePath": ["", "", "b.test.js", "two"], "outcome": "passed",
              "attempts": [{ "durationMs": 8.7 }] }
          ] }
        ] }
      ] },
      "result": { "status": "passed" }
    }"#;
    let (report, exit_code) = run(json).await;

    assert_eq!(report.name, "testExecutions");
    assert_eq!(report.attr("version"), "1");

    let files = report.children_named("file");
    assert_eq!(files.len(), 2);
    assert!(files[0].attr("path").contains("a.test.js"));
    assert!(files[1].attr("path").contains("b.test.js"));

    for (file, (name, duration)) in files.iter().zip([("one", "3"), ("two", "9")]) {
        let cases = file.children_named("testCase");
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].attr("name"), name);
        assert_eq!(cases[0].attr("duration"), duration);
        assert!(cases[0].children.is_empty(), "no outcome markers");
    }
    assert_eq!(exit_code, 0);
}

#[tokio::test]
async fn renders_failure_after_retries() {
    let tests = r#"
      { "kind": "test", "titlePath": ["", "", "a.test.js", "one"], "outcome": "failed",
        "attempts": [
          { "durationMs": 10 }, { "durationMs": 20 }, { "durationMs": 30 }, { "durationMs": 40 }
        ] }
    "#;
    let (report, exit_code) = run(&single_file_dump(tests, "failed")).await;

    let files = report.children_named("file");
    assert_eq!(files.len(), 1);
    let cases = files[0].children_named("testCase");
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].attr("name"), "one");
    assert_eq!(cases[0].attr("duration"), "100");
    assert!(cases[0].has_child("failure"));
    assert!(!cases[0].has_child("skipped"));
    assert_eq!(exit_code, 1);
}

#[tokio::test]
async fn renders_flaky_success_as_passed() {
    let tests = r#"
      { "kind": "test", "titlePath": ["", "", "a.test.js", "one"], "outcome": "passed",
        "attempts": [
          { "durationMs": 5 }, { "durationMs": 5 }, { "durationMs": 5 }, { "durationMs": 5 }
        ] }
    "#;
    let (report, exit_code) = run(&single_file_dump(tests, "passed")).await;

    let files = report.children_named("file");
    let cases = files[0].children_named("testCase");
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].attr("duration"), "20");
    assert!(!cases[0].has_child("failure"));
    assert!(!cases[0].has_child("skipped"));
    assert_eq!(exit_code, 0);
}

#[tokio::test]
async fn renders_skipped() {
    let tests = r#"
      { "kind": "test", "titlePath": ["", "", "a.test.js", "one"], "outcome": "passed",
        "attempts": [{ "durationMs": 1 }] },
      { "kind": "test", "titlePath": ["", "", "a.test.js", "two"], "outcome": "skipped" }
    "#;
    let (report, exit_code) = run(&single_file_dump(tests, "passed")).await;

    let files = report.children_named("file");
    assert_eq!(files.len(), 1);
    let cases = files[0].children_named("testCase");
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].attr("name"), "one");
    assert!(cases[0].children.is_empty());
    assert_eq!(cases[1].attr("name"), "two");
    assert_eq!(cases[1].attr("duration"), "0");
    assert!(cases[1].has_child("skipped"));
    assert_eq!(exit_code, 0);
}

#[tokio::test]
async fn nested_groups_and_special_characters() {
    let tests = r#"
      { "kind": "suite", "title": "math & <logic>", "entries": [
        { "kind": "test", "titlePath": ["", "", "a.test.js", "math & <logic>", "it's \"fine\""],
          "outcome": "timedOut", "attempts": [{ "durationMs": 2 }] }
      ] }
    "#;
    let (report, _) = run(&single_file_dump(tests, "timedOut")).await;

    let files = report.children_named("file");
    let cases = files[0].children_named("testCase");
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].attr("name"), "math & <logic> › it's \"fine\"");
    assert!(cases[0].has_child("failure"));
}
