use medbot_instruments::{Diagnosis, Question, TestDefinition};

fn mosf() -> TestDefinition {
    let mut test = TestDefinition::new("MOSF");
    test.add_question(Question::new(
        "Organ A function",
        "organA",
        [("none", 0), ("mild", 1), ("severe", 3)],
    ));
    test.add_question(Question::new(
        "Organ B function",
        "organB",
        [("none", 0), ("severe", 2)],
    ));
    test.add_diagnosis_rule("0-1", "Low risk").unwrap();
    test.add_diagnosis_rule("2-5", "High risk").unwrap();
    test
}

#[test]
fn question_keeps_declared_option_order() {
    let question = Question::new("q", "p", [("zeta", 5), ("alpha", 1), ("mid", 3)]);
    assert_eq!(question.answer_labels(), vec!["zeta", "alpha", "mid"]);
    assert_eq!(question.answer_labels(), question.answer_labels());
    assert_eq!(question.option_at(1), Some(("alpha", 1)));
    assert_eq!(question.option_at(3), None);
}

#[test]
fn score_lookup_by_label() {
    let question = Question::new("q", "p", [("none", 0), ("severe", 2)]);
    assert_eq!(question.score_for("severe"), Some(2));
    assert_eq!(question.score_for("Severe"), None);
}

#[test]
fn question_without_options_is_unanswerable() {
    let question = Question::new("q", "p", Vec::<(String, i64)>::new());
    assert!(!question.is_answerable());
    assert!(question.answer_labels().is_empty());
    assert_eq!(question.option_at(0), None);
}

#[test]
fn questions_keep_insertion_order() {
    let test = mosf();
    let params: Vec<_> = test.questions().iter().map(|q| q.parameter_name()).collect();
    assert_eq!(params, vec!["organA", "organB"]);
    assert_eq!(test.question_count(), 2);
}

#[test]
fn diagnose_uses_configured_ranges() {
    let test = mosf();
    assert_eq!(test.diagnose(0), Diagnosis::Determined("Low risk".into()));
    assert_eq!(test.diagnose(3), Diagnosis::Determined("High risk".into()));
    assert_eq!(test.diagnose(10), Diagnosis::Undetermined);
}

#[test]
fn re_adding_a_range_replaces_its_diagnosis_in_place() {
    let mut test = mosf();
    let previous = test.add_diagnosis_rule("0-1", "Minimal risk").unwrap();
    assert_eq!(previous.as_deref(), Some("Low risk"));
    assert_eq!(test.rules().len(), 2);
    assert_eq!(test.rules()[0].diagnosis(), "Minimal risk");
    assert_eq!(test.rules()[0].range_text(), "0-1");
    assert_eq!(test.diagnose(1), Diagnosis::Determined("Minimal risk".into()));
}

#[test]
fn malformed_rule_is_rejected_at_registration() {
    let mut test = mosf();
    assert!(test.add_diagnosis_rule("x-3", "Broken").is_err());
    assert_eq!(test.rules().len(), 2);
}

#[test]
fn unrecognized_rule_is_kept_but_never_matches() {
    let mut test = TestDefinition::new("T");
    test.add_diagnosis_rule("any", "Never").unwrap();
    assert_eq!(test.diagnose(0), Diagnosis::Undetermined);
}

#[test]
fn serializes_back_to_the_catalog_shape() {
    let json = serde_json::to_value(mosf()).unwrap();
    assert_eq!(json["testName"], "MOSF");
    assert_eq!(json["questions"][0]["parameterName"], "organA");
    assert_eq!(json["diagnosisRules"]["2-5"], "High risk");

    let back: TestDefinition = serde_json::from_value(json).unwrap();
    assert_eq!(back, mosf());
}
