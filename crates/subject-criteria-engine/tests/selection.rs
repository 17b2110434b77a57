mod common;

use common::*;
use pretty_assertions::assert_eq;
use subject_criteria_ast::Criteria;
use subject_criteria_diagnostics::CriteriaError;
use subject_criteria_engine::SubjectSelector;

fn population() -> subject_criteria_engine::SqliteExecutor {
    let store = store();
    add_subject(&store, 3, "9990000003", "Call", years_before(today(), 62));
    add_subject(&store, 1, "9990000001", "Call", years_before(today(), 70));
    add_subject(&store, 2, "9990000002", "Recall", years_before(today(), 65));
    add_subject(&store, 4, "9990000004", "Call", years_before(today(), 40));
    store
}

#[test]
fn test_find_subjects_in_id_order() {
    let store = population();
    let selector = SubjectSelector::with_config(&store, config()).unwrap();

    let criteria = Criteria::new()
        .with("screening status", "Call")
        .with("subject age", "between 60 and 74");
    let found = selector.find_subjects(&criteria, 10).unwrap();

    assert_eq!(found, vec!["9990000001", "9990000003"]);
}

#[test]
fn test_limit() {
    let store = population();
    let selector = SubjectSelector::with_config(&store, config()).unwrap();

    let criteria = Criteria::new().with("screening status", "Call");
    assert_eq!(selector.find_subjects(&criteria, 2).unwrap().len(), 2);
    assert_eq!(
        selector.find_subject(&criteria).unwrap().as_deref(),
        Some("9990000001")
    );
}

#[test]
fn test_no_match() {
    let store = population();
    let selector = SubjectSelector::with_config(&store, config()).unwrap();

    let criteria = Criteria::new()
        .with("screening status", "Recall")
        .with("subject age", "< 50");
    assert_eq!(selector.find_subject(&criteria).unwrap(), None);
}

#[test]
fn test_sentinels_select_everyone() {
    let store = population();
    let selector = SubjectSelector::with_config(&store, config()).unwrap();

    let criteria = Criteria::new().with("screening due date", "Unchanged");
    assert_eq!(selector.find_subjects(&criteria, 10).unwrap().len(), 4);
}

#[test]
fn test_criteria_nhs_number_selects_that_subject() {
    let store = population();
    let selector = SubjectSelector::with_config(&store, config()).unwrap();

    let criteria = Criteria::new().with("nhs number", "9990000002");
    assert_eq!(selector.find_subjects(&criteria, 10).unwrap(), vec!["9990000002"]);
}

#[test]
fn test_invalid_criteria() {
    let store = population();
    let selector = SubjectSelector::with_config(&store, config()).unwrap();

    let err = selector
        .find_subjects(&Criteria::new().with("favourite colour", "blue"), 1)
        .unwrap_err();
    assert!(matches!(err, CriteriaError::UnknownField { .. }));
}
