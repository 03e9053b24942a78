use std::collections::HashMap;
use std::sync::Arc;

use medbot_instruments::{Diagnosis, Question, TestDefinition};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{SelectionIssue, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No question has been asked yet.
    NotStarted,
    InProgress,
    /// Every question has been asked.
    Complete,
}

/// One user's run through a single test.
///
/// The test is shared with every other session running it and is never
/// mutated here. Progression happens only through [`Session::advance`].
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    test: Arc<TestDefinition>,
    cursor: usize,
    collected_scores: HashMap<String, i64>,
    started_at: jiff::Timestamp,
}

/// The option picked for a question and the score recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedAnswer {
    pub parameter: String,
    pub label: String,
    pub score: i64,
}

/// Read-only progress snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub test_name: String,
    pub state: SessionState,
    pub question_number: usize,
    pub total_questions: usize,
    pub total_score: i64,
    pub started_at: jiff::Timestamp,
}

impl Session {
    pub fn new(test: Arc<TestDefinition>) -> Self {
        Self {
            id: Uuid::new_v4(),
            test,
            cursor: 0,
            collected_scores: HashMap::new(),
            started_at: jiff::Timestamp::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn test(&self) -> &TestDefinition {
        &self.test
    }

    pub fn started_at(&self) -> jiff::Timestamp {
        self.started_at
    }

    /// Return the next unasked question and move past it. Once every question
    /// has been returned this yields `None` on every call.
    pub fn advance(&mut self) -> Option<&Question> {
        let question = self.test.question(self.cursor)?;
        self.cursor += 1;
        Some(question)
    }

    /// The question most recently returned by [`Session::advance`].
    pub fn current_question(&self) -> Option<&Question> {
        match self.cursor {
            0 => None,
            n => self.test.question(n - 1),
        }
    }

    /// Store `score` for `parameter`, replacing any earlier score for it.
    pub fn record_answer(&mut self, parameter: impl Into<String>, score: i64) {
        self.collected_scores.insert(parameter.into(), score);
    }

    /// Answer the current question with a 1-based option number.
    pub fn answer_current(&mut self, input: &str) -> Result<RecordedAnswer, SessionError> {
        let question = self
            .current_question()
            .ok_or(SessionError::UnansweredQuestion)?;
        let input = input.trim();
        let invalid = |issue| SessionError::InvalidAnswerSelection {
            input: input.to_string(),
            issue,
        };

        if !question.is_answerable() {
            return Err(invalid(SelectionIssue::NoOptions));
        }
        let number: i64 = input
            .parse()
            .map_err(|_| invalid(SelectionIssue::NotANumber))?;
        let (label, score) = usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| question.option_at(index))
            .ok_or_else(|| {
                invalid(SelectionIssue::OutOfRange {
                    options: question.option_count(),
                })
            })?;

        let answer = RecordedAnswer {
            parameter: question.parameter_name().to_string(),
            label: label.to_string(),
            score,
        };
        self.record_answer(answer.parameter.clone(), score);
        Ok(answer)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.test.question_count()
    }

    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Complete
        } else if self.cursor == 0 {
            SessionState::NotStarted
        } else {
            SessionState::InProgress
        }
    }

    pub fn collected_scores(&self) -> &HashMap<String, i64> {
        &self.collected_scores
    }

    /// Sum of the collected scores, saturating at the `i64` bounds.
    pub fn total_score(&self) -> i64 {
        self.collected_scores
            .values()
            .fold(0i64, |acc, score| acc.saturating_add(*score))
    }

    /// Diagnosis for the scores collected so far. Meant for a complete
    /// session; earlier calls diagnose the partial sum.
    pub fn final_diagnosis(&self) -> Diagnosis {
        self.test.diagnose(self.total_score())
    }

    /// 1-based number of the question most recently asked, 0 before the
    /// first question.
    pub fn question_number(&self) -> usize {
        self.cursor.min(self.test.question_count())
    }

    pub fn total_questions(&self) -> usize {
        self.test.question_count()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            test_name: self.test.name().to_string(),
            state: self.state(),
            question_number: self.question_number(),
            total_questions: self.total_questions(),
            total_score: self.total_score(),
            started_at: self.started_at,
        }
    }
}
