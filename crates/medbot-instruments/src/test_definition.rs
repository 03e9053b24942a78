use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::RangeError;
use crate::question::Question;
use crate::scoring::{self, Diagnosis, DiagnosisRule};

/// A named questionnaire: ordered questions plus score-range diagnosis rules.
///
/// Built once from configuration and then shared read-only between sessions.
/// Ranges are parsed when a rule is added, so a loaded definition never holds
/// a malformed range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTestDefinition", into = "RawTestDefinition")]
pub struct TestDefinition {
    name: String,
    questions: Vec<Question>,
    rules: Vec<DiagnosisRule>,
}

/// Wire shape of a test in the catalog file.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTestDefinition {
    test_name: String,
    #[serde(default)]
    questions: Option<Vec<Question>>,
    #[serde(default)]
    diagnosis_rules: Option<IndexMap<String, String>>,
}

impl TryFrom<RawTestDefinition> for TestDefinition {
    type Error = RangeError;

    fn try_from(raw: RawTestDefinition) -> Result<Self, Self::Error> {
        let mut test = TestDefinition::new(raw.test_name);
        test.questions = raw.questions.unwrap_or_default();
        for (range, diagnosis) in raw.diagnosis_rules.unwrap_or_default() {
            test.add_diagnosis_rule(range, diagnosis)?;
        }
        Ok(test)
    }
}

impl From<TestDefinition> for RawTestDefinition {
    fn from(test: TestDefinition) -> Self {
        Self {
            test_name: test.name,
            questions: Some(test.questions),
            diagnosis_rules: Some(
                test.rules
                    .into_iter()
                    .map(|rule| (rule.range_text, rule.diagnosis))
                    .collect(),
            ),
        }
    }
}

impl TestDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            questions: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Questions in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Diagnosis rules in evaluation order.
    pub fn rules(&self) -> &[DiagnosisRule] {
        &self.rules
    }

    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// Append a rule, or replace the diagnosis of the rule with the exact same
    /// range text. A replaced rule keeps its position. Returns the diagnosis
    /// that was replaced, if any.
    pub fn add_diagnosis_rule(
        &mut self,
        range: impl Into<String>,
        diagnosis: impl Into<String>,
    ) -> Result<Option<String>, RangeError> {
        let rule = DiagnosisRule::new(range, diagnosis)?;
        if let Some(existing) = self
            .rules
            .iter_mut()
            .find(|r| r.range_text == rule.range_text)
        {
            return Ok(Some(std::mem::replace(
                &mut existing.diagnosis,
                rule.diagnosis,
            )));
        }
        self.rules.push(rule);
        Ok(None)
    }

    /// Map a total score to the diagnosis of the first matching rule.
    pub fn diagnose(&self, total_score: i64) -> Diagnosis {
        scoring::evaluate(&self.rules, total_score)
    }
}
