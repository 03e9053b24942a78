use medbot_instruments::error::RangeError;
use medbot_instruments::scoring::{evaluate, UNDETERMINED_TEXT};
use medbot_instruments::{Diagnosis, DiagnosisRule, RangeSpec};

#[test]
fn closed_range_is_inclusive_and_trimmed() {
    let range = RangeSpec::parse(" 3 - 7 ").unwrap();
    assert_eq!(range, RangeSpec::Between { min: 3, max: 7 });
    assert!(!range.contains(2));
    assert!(range.contains(3));
    assert!(range.contains(7));
    assert!(!range.contains(8));
}

#[test]
fn single_point_range_matches_only_that_score() {
    let range = RangeSpec::parse("2-2").unwrap();
    assert!(!range.contains(1));
    assert!(range.contains(2));
    assert!(!range.contains(3));
}

#[test]
fn at_most_boundary() {
    let range = RangeSpec::parse("<=5").unwrap();
    assert!(range.contains(5));
    assert!(range.contains(-100));
    assert!(!range.contains(6));
}

#[test]
fn at_least_boundary() {
    let range = RangeSpec::parse(">= 5").unwrap();
    assert!(range.contains(5));
    assert!(range.contains(500));
    assert!(!range.contains(4));
}

#[test]
fn negative_bounds_parse() {
    assert_eq!(
        RangeSpec::parse("<=-2").unwrap(),
        RangeSpec::AtMost { max: -2 }
    );
    assert_eq!(
        RangeSpec::parse("-5--1").unwrap(),
        RangeSpec::Between { min: -5, max: -1 }
    );
}

#[test]
fn unknown_forms_never_match() {
    for raw in ["", "high", "5", "<5", "==3"] {
        let range = RangeSpec::parse(raw).unwrap();
        assert_eq!(range, RangeSpec::Unrecognized, "input {raw:?}");
        assert!(!range.contains(0));
        assert!(!range.contains(5));
    }
}

#[test]
fn non_integer_bounds_are_rejected_with_the_range_named() {
    for raw in ["a-b", "1-x", "<=five", ">=", "1-2-3", "1.5-3"] {
        let err = RangeSpec::parse(raw).unwrap_err();
        let RangeError::Malformed { range, .. } = &err;
        assert_eq!(range, raw);
        assert!(err.to_string().contains(raw));
    }
}

#[test]
fn inverted_range_is_empty() {
    let range = RangeSpec::parse("9-1").unwrap();
    assert!(range.is_empty());
    assert!(!range.contains(5));
}

#[test]
fn first_matching_rule_wins() {
    let rules = vec![
        DiagnosisRule::new("0-5", "A").unwrap(),
        DiagnosisRule::new("3-10", "B").unwrap(),
    ];
    assert_eq!(evaluate(&rules, 4), Diagnosis::Determined("A".into()));
    assert_eq!(evaluate(&rules, 6), Diagnosis::Determined("B".into()));
}

#[test]
fn no_match_is_undetermined() {
    let rules = vec![DiagnosisRule::new("0-1", "Low").unwrap()];
    let diagnosis = evaluate(&rules, 10);
    assert_eq!(diagnosis, Diagnosis::Undetermined);
    assert!(!diagnosis.is_determined());
    assert_eq!(diagnosis.to_string(), UNDETERMINED_TEXT);
}
