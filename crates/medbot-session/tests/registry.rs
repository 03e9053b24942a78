use std::sync::Arc;

use medbot_instruments::{Catalog, Question, TestDefinition};
use medbot_session::{SessionError, SessionRegistry};

fn registry() -> SessionRegistry {
    let mut mosf = TestDefinition::new("MOSF scale");
    mosf.add_question(Question::new("Organ A?", "organA", [("none", 0), ("mild", 1)]));
    let mut glasgow = TestDefinition::new("Glasgow");
    glasgow.add_question(Question::new("Eyes?", "eyes", [("open", 4)]));
    let mosf_short = TestDefinition::new("MOSF short");

    let catalog = Catalog::new(vec![mosf, glasgow, mosf_short]).unwrap();
    SessionRegistry::new(Arc::new(catalog))
}

#[test]
fn start_picks_first_substring_match() {
    let mut registry = registry();
    let session = registry.start_session("chat-1", "MOSF").unwrap();
    assert_eq!(session.test().name(), "MOSF scale");
    assert_eq!(registry.len(), 1);
    assert!(registry.get_session("chat-1").is_some());
}

#[test]
fn unknown_test_creates_no_session() {
    let mut registry = registry();
    let err = registry.start_session("chat-1", "APACHE").unwrap_err();
    assert_eq!(
        err,
        SessionError::TestNotFound {
            needle: "APACHE".into()
        }
    );
    assert!(registry.is_empty());
    assert!(registry.get_session("chat-1").is_none());
}

#[test]
fn sessions_are_independent_per_user() {
    let mut registry = registry();
    registry.start_session("a", "MOSF").unwrap().advance();
    registry.start_session("b", "Glasgow").unwrap();

    assert_eq!(registry.get_session("a").unwrap().question_number(), 1);
    assert_eq!(registry.get_session("b").unwrap().question_number(), 0);
    assert_eq!(registry.get_session("b").unwrap().test().name(), "Glasgow");
}

#[test]
fn sessions_share_the_loaded_definition() {
    let mut registry = registry();
    let first = registry.start_session("a", "MOSF").unwrap().test() as *const TestDefinition;
    let second = registry.start_session("b", "MOSF").unwrap().test() as *const TestDefinition;
    assert_eq!(first, second);
}

#[test]
fn restarting_replaces_the_active_session() {
    let mut registry = registry();
    let old = registry.start_session("a", "MOSF").unwrap();
    old.advance();
    old.answer_current("2").unwrap();
    let old_id = old.id();

    let (fresh, replaced) = registry.start_session_replacing("a", "Glasgow").unwrap();
    assert_eq!(fresh.test().name(), "Glasgow");
    assert_eq!(fresh.question_number(), 0);
    let replaced = replaced.unwrap();
    assert_eq!(replaced.id(), old_id);
    assert_eq!(replaced.total_score(), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn remove_is_idempotent() {
    let mut registry = registry();
    registry.start_session("a", "MOSF").unwrap();
    assert!(registry.remove_session("a"));
    assert!(!registry.remove_session("a"));
    assert!(!registry.remove_session("never-seen"));
    assert!(registry.is_empty());
}

#[test]
fn require_session_reports_missing_user() {
    let mut registry = registry();
    assert_eq!(
        registry.require_session_mut("ghost").unwrap_err(),
        SessionError::SessionNotFound {
            user_id: "ghost".into()
        }
    );
}

#[test]
fn take_session_hands_back_progress() {
    let mut registry = registry();
    let session = registry.start_session("a", "MOSF").unwrap();
    session.advance();
    session.answer_current("2").unwrap();

    let taken = registry.take_session("a").unwrap();
    assert!(taken.is_complete());
    assert_eq!(taken.total_score(), 1);
    assert!(registry.get_session("a").is_none());
}
