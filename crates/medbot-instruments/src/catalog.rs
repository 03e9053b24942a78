//! Loading the set of tests available to the bot.
//!
//! The catalog file is JSON in one of two shapes: a bare array of tests, or
//! an object whose `tests` field holds that array.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::error::CatalogError;
use crate::scoring::RangeSpec;
use crate::test_definition::TestDefinition;

/// Loaded, read-only test definitions in load order.
#[derive(Debug, Clone)]
pub struct Catalog {
    tests: Vec<Arc<TestDefinition>>,
}

impl Catalog {
    /// Build a catalog from already constructed tests.
    pub fn new(tests: Vec<TestDefinition>) -> Result<Self, CatalogError> {
        if tests.is_empty() {
            return Err(CatalogError::Empty);
        }
        for test in &tests {
            warn_on_suspect_definition(test);
        }
        Ok(Self {
            tests: tests.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&contents)?;
        tracing::info!(path = %path.display(), tests = catalog.len(), "test catalog loaded");
        Ok(catalog)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, CatalogError> {
        // Parse as raw JSON first to tell the two accepted shapes apart.
        let root: Value = serde_json::from_str(contents)?;
        let entries = match root {
            Value::Array(entries) => entries,
            Value::Object(mut obj) => match obj.remove("tests") {
                Some(Value::Array(entries)) => entries,
                _ => return Err(CatalogError::UnrecognizedShape),
            },
            _ => return Err(CatalogError::UnrecognizedShape),
        };

        let tests = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let name = entry
                    .get("testName")
                    .and_then(Value::as_str)
                    .unwrap_or("<unnamed>")
                    .to_string();
                serde_json::from_value::<TestDefinition>(entry).map_err(|e| {
                    CatalogError::InvalidTest {
                        index,
                        name,
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(tests)
    }

    /// First test, in load order, whose name contains `needle` (case-sensitive).
    pub fn find(&self, needle: &str) -> Option<&Arc<TestDefinition>> {
        self.tests.iter().find(|t| t.name().contains(needle))
    }

    pub fn tests(&self) -> &[Arc<TestDefinition>] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

fn warn_on_suspect_definition(test: &TestDefinition) {
    if test.question_count() == 0 {
        tracing::warn!(test = %test.name(), "test has no questions");
    }
    for (index, question) in test.questions().iter().enumerate() {
        if !question.is_answerable() {
            tracing::warn!(
                test = %test.name(),
                question = index + 1,
                parameter = %question.parameter_name(),
                "question has no answer options and cannot be answered"
            );
        }
    }
    for rule in test.rules() {
        if rule.range.is_empty() {
            let kind = match rule.range {
                RangeSpec::Unrecognized => "unrecognized range form",
                _ => "lower bound above upper bound",
            };
            tracing::warn!(
                test = %test.name(),
                range = %rule.range_text,
                kind,
                "diagnosis rule can never match"
            );
        }
    }
}
