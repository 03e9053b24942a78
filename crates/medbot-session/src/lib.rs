//! medbot-session
//!
//! Per-user progress through a diagnostic test, and the keyed store that
//! owns those sessions. No transport dependency — a dispatcher drives these
//! types and turns their results into messages.

pub mod error;
pub mod registry;
pub mod session;

pub use error::{SelectionIssue, SessionError};
pub use registry::SessionRegistry;
pub use session::{RecordedAnswer, Session, SessionState, SessionSummary};
