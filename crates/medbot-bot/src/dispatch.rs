//! Transport-neutral message handling.
//!
//! Turns one inbound chat message into one [`Reply`]. The session registry
//! is held behind a lock for the whole of each message, so a user's session
//! is never read and written by two messages at once.

use std::fmt::Write as _;
use std::sync::Arc;

use medbot_instruments::Catalog;
use medbot_session::{SelectionIssue, Session, SessionError, SessionRegistry, SessionSummary};
use serde::Serialize;
use tokio::sync::Mutex;

const TEST_UNAVAILABLE: &str = "This test is temporarily unavailable.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Info,
    Question,
    Result,
    /// The input was not accepted; the same question is still open.
    Retry,
    Error,
}

/// What to send back to the chat. Transports build their own message from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub chat_id: String,
    pub kind: ReplyKind,
    pub text: String,
    /// Ask the client to hide any custom keyboard while a question is shown.
    pub remove_keyboard: bool,
}

impl Reply {
    fn new(chat_id: &str, kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.to_string(),
            kind,
            text: text.into(),
            remove_keyboard: kind == ReplyKind::Question,
        }
    }
}

/// The command that starts the default test, e.g. `/mosftest` → `MOSF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub command: String,
    pub test: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Start,
    Help,
    Cancel,
    ListTests,
    /// Start the first test whose name contains the given fragment.
    Begin(&'a str),
    Answer(&'a str),
}

impl<'a> Command<'a> {
    /// Classify a message. Commands may carry a `@botname` suffix; anything
    /// that is not a known command is an answer.
    pub fn parse(text: &'a str, shortcut: &'a Shortcut) -> Self {
        let text = text.trim();
        let (head, rest) = text
            .split_once(char::is_whitespace)
            .map(|(head, rest)| (head, rest.trim()))
            .unwrap_or((text, ""));
        let name = head.split_once('@').map(|(name, _)| name).unwrap_or(head);

        match name {
            "/start" => Self::Start,
            "/help" => Self::Help,
            "/cancel" => Self::Cancel,
            "/tests" => Self::ListTests,
            "/test" => Self::Begin(rest),
            _ if name == shortcut.command => Self::Begin(&shortcut.test),
            _ => Self::Answer(text),
        }
    }
}

pub struct Dispatcher {
    catalog: Arc<Catalog>,
    registry: Mutex<SessionRegistry>,
    shortcut: Shortcut,
}

impl Dispatcher {
    pub fn new(catalog: Arc<Catalog>, shortcut: Shortcut) -> Self {
        Self {
            registry: Mutex::new(SessionRegistry::new(catalog.clone())),
            catalog,
            shortcut,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shortcut(&self) -> &Shortcut {
        &self.shortcut
    }

    /// Handle one inbound message to completion.
    pub async fn handle(&self, chat_id: &str, text: &str) -> Reply {
        tracing::debug!(chat_id = %chat_id, text = %text, "handling message");
        let mut registry = self.registry.lock().await;

        match Command::parse(text, &self.shortcut) {
            Command::Start => Reply::new(chat_id, ReplyKind::Info, self.welcome_text()),
            Command::Help => {
                tracing::debug!(chat_id = %chat_id, "help requested");
                Reply::new(chat_id, ReplyKind::Info, self.help_text())
            }
            Command::Cancel => self.cancel_session(&mut registry, chat_id),
            Command::ListTests => Reply::new(chat_id, ReplyKind::Info, self.tests_text()),
            Command::Begin("") => Reply::new(
                chat_id,
                ReplyKind::Info,
                format!("Usage: /test <name>\n\n{}", self.tests_text()),
            ),
            Command::Begin(needle) => self.begin_test(&mut registry, chat_id, needle),
            Command::Answer(answer) => self.handle_answer(&mut registry, chat_id, answer),
        }
    }

    /// Drop the user's session, if any. Returns whether one existed.
    pub async fn cancel(&self, chat_id: &str) -> bool {
        let removed = self.registry.lock().await.remove_session(chat_id);
        if removed {
            tracing::info!(chat_id = %chat_id, "session cancelled");
        }
        removed
    }

    pub async fn session_summary(&self, chat_id: &str) -> Option<SessionSummary> {
        self.registry
            .lock()
            .await
            .get_session(chat_id)
            .map(Session::summary)
    }

    pub async fn active_sessions(&self) -> usize {
        self.registry.lock().await.len()
    }

    fn begin_test(&self, registry: &mut SessionRegistry, chat_id: &str, needle: &str) -> Reply {
        let (session, replaced) = match registry.start_session_replacing(chat_id, needle) {
            Ok(started) => started,
            Err(e) => {
                tracing::error!(
                    chat_id = %chat_id,
                    needle = %needle,
                    error = %e,
                    "test not found in catalog"
                );
                return Reply::new(chat_id, ReplyKind::Error, TEST_UNAVAILABLE);
            }
        };
        tracing::info!(
            chat_id = %chat_id,
            session_id = %session.id(),
            test = %session.test().name(),
            "test started"
        );

        let notice = replaced
            .map(|old| format!("Your unfinished {} test was discarded.\n\n", old.test().name()))
            .unwrap_or_default();

        match ask_next(session) {
            Some(prompt) => Reply::new(chat_id, ReplyKind::Question, notice + &prompt),
            None => {
                registry.remove_session(chat_id);
                tracing::error!(chat_id = %chat_id, needle = %needle, "test has no questions");
                Reply::new(
                    chat_id,
                    ReplyKind::Error,
                    "An error occurred: the test has no questions.",
                )
            }
        }
    }

    fn handle_answer(&self, registry: &mut SessionRegistry, chat_id: &str, text: &str) -> Reply {
        let session = match registry.require_session_mut(chat_id) {
            Ok(session) => session,
            Err(_) => {
                tracing::warn!(chat_id = %chat_id, "answer received without an active session");
                return Reply::new(
                    chat_id,
                    ReplyKind::Info,
                    format!(
                        "You have no active test. Start one with {}.",
                        self.shortcut.command
                    ),
                );
            }
        };

        match session.answer_current(text) {
            Ok(answer) => {
                tracing::debug!(
                    chat_id = %chat_id,
                    parameter = %answer.parameter,
                    label = %answer.label,
                    score = answer.score,
                    "answer recorded"
                );
            }
            Err(SessionError::InvalidAnswerSelection { input, issue }) => {
                tracing::warn!(chat_id = %chat_id, input = %input, issue = %issue, "invalid answer");
                return Reply::new(chat_id, ReplyKind::Retry, retry_text(issue));
            }
            Err(e) => {
                tracing::error!(chat_id = %chat_id, error = %e, "no question awaiting an answer");
                return Reply::new(
                    chat_id,
                    ReplyKind::Error,
                    "Error: the current question was not found.",
                );
            }
        }

        if !session.is_complete()
            && let Some(prompt) = ask_next(session)
        {
            return Reply::new(chat_id, ReplyKind::Question, prompt);
        }

        let Some(finished) = registry.take_session(chat_id) else {
            return Reply::new(chat_id, ReplyKind::Error, "Error: the session was lost.");
        };
        let diagnosis = finished.final_diagnosis();
        tracing::info!(
            chat_id = %chat_id,
            session_id = %finished.id(),
            test = %finished.test().name(),
            total_score = finished.total_score(),
            determined = diagnosis.is_determined(),
            "test completed"
        );
        Reply::new(
            chat_id,
            ReplyKind::Result,
            format!(
                "Assessment complete.\n\nResult: {diagnosis}\n\nTo take a new test use {}.",
                self.shortcut.command
            ),
        )
    }

    fn cancel_session(&self, registry: &mut SessionRegistry, chat_id: &str) -> Reply {
        if registry.remove_session(chat_id) {
            tracing::info!(chat_id = %chat_id, "session cancelled");
            Reply::new(
                chat_id,
                ReplyKind::Info,
                format!(
                    "The current test was cancelled. You can start a new test with {}.",
                    self.shortcut.command
                ),
            )
        } else {
            tracing::warn!(chat_id = %chat_id, "cancel requested without an active session");
            Reply::new(chat_id, ReplyKind::Info, "There is no active test to cancel.")
        }
    }

    fn command_list(&self) -> String {
        format!(
            "{} - Start the {} test\n\
             /tests - List available tests\n\
             /test <name> - Start a test by name\n\
             /help - Show help\n\
             /cancel - Cancel the current test",
            self.shortcut.command, self.shortcut.test
        )
    }

    fn welcome_text(&self) -> String {
        format!(
            "Welcome to the medical diagnostic bot!\n\nAvailable commands:\n{}",
            self.command_list()
        )
    }

    fn help_text(&self) -> String {
        format!(
            "Bot help:\n\n\
             This bot runs medical diagnostic tests.\n\n\
             Available commands:\n{}\n\n\
             While taking a test, reply with the number of the chosen answer.",
            self.command_list()
        )
    }

    fn tests_text(&self) -> String {
        let mut text = String::from("Available tests:\n");
        for test in self.catalog.tests() {
            let _ = writeln!(text, "- {} ({} questions)", test.name(), test.question_count());
        }
        text
    }
}

/// Advance to the next question and render it, `None` when there is none.
fn ask_next(session: &mut Session) -> Option<String> {
    session.advance()?;
    let question = session.current_question()?;

    let mut prompt = format!(
        "Question {} of {}:\n{}\n\n",
        session.question_number(),
        session.total_questions(),
        question.question_text()
    );
    for (i, label) in question.answer_labels().iter().enumerate() {
        let _ = writeln!(prompt, "{}. {label}", i + 1);
    }
    if !question.is_answerable() {
        prompt.push_str("(This question has no answer options. Use /cancel to stop the test.)\n");
    }
    Some(prompt)
}

fn retry_text(issue: SelectionIssue) -> &'static str {
    match issue {
        SelectionIssue::NotANumber => "Please reply with the answer number (1, 2, 3 and so on).",
        SelectionIssue::OutOfRange { .. } => "Please reply with one of the offered answer numbers.",
        SelectionIssue::NoOptions => {
            "This question has no answer options. Use /cancel to stop the test."
        }
    }
}
