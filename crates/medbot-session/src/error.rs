use thiserror::Error;

/// Expected, recoverable conditions. Each maps to a user-facing reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no active session for user {user_id}")]
    SessionNotFound { user_id: String },

    #[error("no loaded test matches '{needle}'")]
    TestNotFound { needle: String },

    #[error("no question is awaiting an answer")]
    UnansweredQuestion,

    #[error("invalid answer '{input}': {issue}")]
    InvalidAnswerSelection { input: String, issue: SelectionIssue },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionIssue {
    #[error("not an option number")]
    NotANumber,

    #[error("expected an option number between 1 and {options}")]
    OutOfRange { options: usize },

    #[error("the question has no answer options")]
    NoOptions,
}
