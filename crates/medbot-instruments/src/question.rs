use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One test item and the score awarded for each of its answers.
///
/// Answer order is the order in which options were declared; it is the order
/// in which they are numbered for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    question_text: String,
    parameter_name: String,
    #[serde(default)]
    answers: IndexMap<String, i64>,
}

impl Question {
    pub fn new<I, L>(
        question_text: impl Into<String>,
        parameter_name: impl Into<String>,
        answers: I,
    ) -> Self
    where
        I: IntoIterator<Item = (L, i64)>,
        L: Into<String>,
    {
        Self {
            question_text: question_text.into(),
            parameter_name: parameter_name.into(),
            answers: answers
                .into_iter()
                .map(|(label, score)| (label.into(), score))
                .collect(),
        }
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    /// Answer labels in display order.
    pub fn answer_labels(&self) -> Vec<&str> {
        self.answers.keys().map(String::as_str).collect()
    }

    /// Score for an exact answer label, `None` if the label is not an option.
    pub fn score_for(&self, label: &str) -> Option<i64> {
        self.answers.get(label).copied()
    }

    /// Zero-based lookup of an option by its display position.
    pub fn option_at(&self, index: usize) -> Option<(&str, i64)> {
        self.answers
            .get_index(index)
            .map(|(label, score)| (label.as_str(), *score))
    }

    pub fn option_count(&self) -> usize {
        self.answers.len()
    }

    /// A question without options can be shown but never answered.
    pub fn is_answerable(&self) -> bool {
        !self.answers.is_empty()
    }
}
