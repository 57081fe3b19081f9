//! Configuration documents and the test records they declare.
//!
//! A document is kept as a raw [`serde_json::Value`] so that documents which
//! fail schema validation can still be rule-checked. [`TestRecord`] is a
//! borrowed, typed view over one declared test.

use anyhow::{Context, Result};
use serde_json::{Number, Value};
use std::fs;
use std::path::Path;

/// Name substituted for tests that declare no `name`.
pub const UNNAMED_TEST: &str = "unnamed test";

/// Read and parse a JSON file.
pub fn load_json_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))
}

/// Load a configuration document, accepting YAML for `.yaml`/`.yml` files and JSON otherwise.
pub fn load_document(path: &Path) -> Result<Document> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if !is_yaml {
        return load_json_file(path).map(Document::new);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML: {}", path.display()))?;
    Ok(Document::new(value))
}

/// An API-test configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// The raw JSON value, as handed to schema validation.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// The `global_auth` block, if declared.
    pub fn global_auth(&self) -> Option<&Value> {
        self.root.get("global_auth")
    }

    /// Flatten every declared test: top-level `tests` first, then each suite's
    /// `tests` in document order.
    pub fn collect_tests(&self) -> Vec<TestRecord<'_>> {
        collect_tests(&self.root)
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

/// Flatten the test records of a raw document.
pub fn collect_tests(root: &Value) -> Vec<TestRecord<'_>> {
    let mut tests: Vec<TestRecord<'_>> = records_in(root.get("tests")).collect();

    if let Some(suites) = root.get("test_suites").and_then(Value::as_array) {
        for suite in suites {
            tests.extend(records_in(suite.get("tests")));
        }
    }

    tests
}

fn records_in(tests: Option<&Value>) -> impl Iterator<Item = TestRecord<'_>> {
    tests
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|entry| entry.is_object())
        .map(TestRecord)
}

/// Borrowed view over a single declared test.
///
/// Fields holding the wrong JSON type read as absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestRecord<'a>(&'a Value);

impl<'a> TestRecord<'a> {
    pub fn name(&self) -> Option<&'a str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Name used in messages: the declared name or [`UNNAMED_TEST`].
    pub fn display_name(&self) -> &'a str {
        self.name().unwrap_or(UNNAMED_TEST)
    }

    pub fn order(&self) -> Option<&'a Number> {
        match self.0.get("order") {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Entries of `depends_on`, in declaration order.
    pub fn depends_on(&self) -> Vec<&'a str> {
        self.0
            .get("depends_on")
            .and_then(Value::as_array)
            .map(|deps| deps.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// `use_response_from.test_name`, when set and non-empty.
    pub fn response_source(&self) -> Option<&'a str> {
        self.0
            .get("use_response_from")
            .and_then(|source| source.get("test_name"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Every test this one depends on: `depends_on` followed by the response source.
    pub fn dependencies(&self) -> Vec<&'a str> {
        let mut deps = self.depends_on();
        deps.extend(self.response_source());
        deps
    }
}
