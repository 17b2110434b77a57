//! End-to-end verification against an in-memory SQLite store

mod common;

use common::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use subject_criteria_ast::Criteria;
use subject_criteria_catalog::{CanonicalField, CriteriaNormalizer, FieldCatalog};
use subject_criteria_diagnostics::CriteriaError;
use subject_criteria_engine::{AssertionEngine, FailedCriterion, SqliteExecutor, subject_assertion};
use subject_criteria_sql::{CompileMode, QueryCompiler, SqlValue};

fn seeded() -> SqliteExecutor {
    let store = store();
    add_subject(&store, 1, NHS, "Call", years_before(today(), 30));
    store
}

#[test]
fn test_literal_status_passes() {
    let store = seeded();
    let engine = engine(&store);

    let result = engine
        .verify(NHS, &Criteria::new().with("screening status", "Call"))
        .unwrap();

    assert!(result.passed);
    assert!(result.failed_criteria.is_empty());
    // lookup plus combined check
    assert_eq!(engine.executor().count(), 2);
}

#[test]
fn test_due_date_today_is_the_only_failure() {
    let store = seeded();
    set_subject(&store, NHS, "screening_due_date", &"2025-01-01");
    let engine = engine(&store);

    let criteria = Criteria::new()
        .with("screening status", "Call")
        .with("screening due date", "Today");
    let result = engine.verify(NHS, &criteria).unwrap();

    assert!(!result.passed);
    assert_eq!(
        result.failed_criteria,
        vec![FailedCriterion::new(CanonicalField::ScreeningDueDate, "Today")]
    );
    // lookup, combined, then one isolated query per checked criterion
    assert_eq!(engine.executor().count(), 4);
}

#[test]
fn test_due_date_today_passes_on_the_pinned_date() {
    let store = seeded();
    set_subject(&store, NHS, "screening_due_date", &iso(today()));
    let engine = engine(&store);

    let criteria = Criteria::new()
        .with("Screening Status", "Call")
        .with("screening_due_date", "today");
    assert!(engine.check(NHS, &criteria).unwrap());
}

#[rstest]
#[case(30, "> 28", true)]
#[case(20, "> 28", false)]
#[case(30, "between 25 and 35", true)]
#[case(40, "between 25 and 35", false)]
#[case(30, "30", true)]
#[case(30, "<= 29", false)]
fn test_subject_age(#[case] age: u32, #[case] expected: &str, #[case] passes: bool) {
    let store = store();
    add_subject(&store, 1, NHS, "Call", years_before(today(), age));
    let engine = engine(&store);

    let result = engine
        .verify(NHS, &Criteria::new().with("subject age", expected))
        .unwrap();

    assert_eq!(result.passed, passes);
    if !passes {
        assert_eq!(result.failed_fields(), vec![CanonicalField::SubjectAge]);
    }
}

#[test]
fn test_subject_age_years_and_days() {
    let store = store();
    let dob = years_before(today(), 65) - chrono::Days::new(25);
    add_subject(&store, 1, NHS, "Call", dob);
    let engine = engine(&store);

    assert!(engine.check(NHS, &Criteria::new().with("subject age (y/d)", "65/25")).unwrap());
    assert!(!engine.check(NHS, &Criteria::new().with("subject age (y/d)", "65/24")).unwrap());
}

#[test]
fn test_relative_date_without_anchor_event_fails_cleanly() {
    let store = seeded();
    set_subject(&store, NHS, "calculated_sdd", &"2025-06-01");
    let engine = engine(&store);

    let criteria = Criteria::new().with("calculated fobt due date", "2 years from earliest S10 event");
    let result = engine.verify(NHS, &criteria).unwrap();

    assert!(!result.passed);
    assert_eq!(
        result.failed_fields(),
        vec![CanonicalField::CalculatedFobtDueDate]
    );
}

#[test]
fn test_relative_date_uses_requested_occurrence() {
    let store = seeded();
    add_episode(&store, 1, 100, "Open");
    add_event(&store, 100, S10, "2021-03-04 09:30:00");
    add_event(&store, 100, S10, "2023-06-01 14:00:00");
    set_subject(&store, NHS, "calculated_sdd", &"2023-03-04");
    let engine = engine(&store);

    let earliest = Criteria::new().with("calculated fobt due date", "2 years from earliest S10 event");
    assert!(engine.check(NHS, &earliest).unwrap());

    let latest = Criteria::new().with("calculated fobt due date", "2 years from latest S10 event");
    assert!(!engine.check(NHS, &latest).unwrap());

    // occurrence defaults to latest
    set_subject(&store, NHS, "calculated_sdd", &"2025-06-01");
    let unqualified = Criteria::new().with("calculated fobt due date", "2 years from S10 event");
    assert!(engine.check(NHS, &unqualified).unwrap());
}

#[test]
fn test_relative_date_ignores_other_subjects_events() {
    let store = seeded();
    add_subject(&store, 2, OTHER_NHS, "Call", years_before(today(), 50));
    add_episode(&store, 2, 200, "Open");
    add_event(&store, 200, S10, "2023-06-01");
    set_subject(&store, NHS, "calculated_sdd", &"2025-06-01");
    let engine = engine(&store);

    let criteria = Criteria::new().with("calculated fobt due date", "2 years from S10 event");
    assert!(!engine.check(NHS, &criteria).unwrap());
}

#[test]
fn test_unknown_field_runs_no_queries() {
    let store = seeded();
    let engine = engine(&store);

    let criteria = Criteria::new()
        .with("screening status", "Call")
        .with("screening stauts", "Call");
    let err = engine.verify(NHS, &criteria).unwrap_err();

    assert!(matches!(err, CriteriaError::UnknownField { .. }));
    assert_eq!(engine.executor().count(), 0);
}

#[rstest]
#[case("screening status", "between 1 and 4")]
#[case("subject age", "2 years from S10 event")]
#[case("screening due date", "not-a-date")]
#[case("latest event status", "Z999")]
#[case("subject has gp practice", "maybe")]
fn test_invalid_criteria_run_no_queries(#[case] field: &str, #[case] expected: &str) {
    let store = seeded();
    let engine = engine(&store);

    let criteria = Criteria::new()
        .with("screening status", "Call")
        .with(field, expected);
    let err = engine.verify(NHS, &criteria).unwrap_err();

    assert!(err.code().is_pre_query(), "unexpected error: {}", err);
    assert_eq!(engine.executor().count(), 0);
}

#[test]
fn test_sentinels_never_fail() {
    let store = seeded();
    let engine = engine(&store);

    let criteria = Criteria::new()
        .with("screening status", "Recall")
        .with("screening due date", "Unchanged")
        .with("latest episode status", "# not checking until episode closes");
    let result = engine.verify(NHS, &criteria).unwrap();

    assert!(!result.passed);
    assert_eq!(result.failed_fields(), vec![CanonicalField::ScreeningStatus]);
    assert_eq!(
        result.unverified,
        vec![CanonicalField::ScreeningDueDate, CanonicalField::LatestEpisodeStatus]
    );
    // lookup, combined, one isolated query
    assert_eq!(engine.executor().count(), 3);
}

#[test]
fn test_only_sentinels_pass_after_lookup() {
    let store = seeded();
    let engine = engine(&store);

    let criteria = Criteria::new().with("screening due date", "Unchanged");
    let result = engine.verify(NHS, &criteria).unwrap();

    assert!(result.passed);
    assert_eq!(engine.executor().count(), 1);
}

#[test]
fn test_missing_subject() {
    let store = seeded();
    let engine = engine(&store);

    let err = engine
        .verify(OTHER_NHS, &Criteria::new().with("screening status", "Call"))
        .unwrap_err();

    assert!(matches!(err, CriteriaError::SubjectNotFound { ref nhs_number } if nhs_number == OTHER_NHS));
    assert_eq!(engine.executor().count(), 1);
}

#[test]
fn test_pass_is_sound() {
    let store = seeded();
    set_subject(&store, NHS, "screening_due_date", &iso(today()));
    let engine = engine(&store);

    let criteria = Criteria::new()
        .with("screening status", "Call")
        .with("screening due date", "Today")
        .with("date of death", "Null");
    assert!(engine.check(NHS, &criteria).unwrap());

    let combined = engine.executor().queries().pop().unwrap();
    assert_eq!(combined.bind("nhs_number"), Some(&SqlValue::Text(NHS.to_string())));
    let rows = subject_criteria_engine::QueryExecutor::execute(&store, &combined).unwrap();
    assert!(rows.contains_nhs_number(NHS));
}

#[test]
fn test_combined_query_is_anchored_to_one_subject() {
    let store = seeded();
    add_subject(&store, 2, OTHER_NHS, "Recall", years_before(today(), 30));
    let engine = engine(&store);

    let result = engine
        .verify(OTHER_NHS, &Criteria::new().with("screening status", "Call"))
        .unwrap();
    assert!(!result.passed);
    assert_eq!(result.failed_fields(), vec![CanonicalField::ScreeningStatus]);
}

#[test]
fn test_latest_episode_fields() {
    let store = seeded();
    add_episode(&store, 1, 100, "Closed");
    add_episode(&store, 1, 101, "Open");
    add_event(&store, 101, A99, "2024-11-02");
    exec(&store, "INSERT INTO ds_mdt_t (episode_id) VALUES (101)", &[]);
    exec(&store, "INSERT INTO ds_colonoscopy_t (episode_id) VALUES (100)", &[]);
    let engine = engine(&store);

    let criteria = Criteria::new()
        .with("latest episode status", "Open")
        .with("latest episode type", "FOBT Screening")
        .with("latest event status", "A99 - Suitable for Endoscopic Test")
        .with("latest episode has mdt dataset", "Yes")
        .with("latest episode has colonoscopy dataset", "No");
    assert!(engine.check(NHS, &criteria).unwrap());

    let mislabelled = Criteria::new().with("latest event status", "A99 - Discharged from Screening Round");
    assert!(matches!(
        engine.check(NHS, &mislabelled).unwrap_err(),
        CriteriaError::UnknownEventStatus { .. }
    ));

    let stale = Criteria::new().with("latest episode status", "Closed");
    assert!(!engine.check(NHS, &stale).unwrap());
}

#[test]
fn test_episode_history_fields() {
    let store = seeded();
    add_episode(&store, 1, 100, "Closed");
    add_episode(&store, 1, 101, "Open");
    exec(
        &store,
        "UPDATE ep_subject_episode_t SET episode_end_date = '2024-02-01', episode_end_reason_id = 8001 \
         WHERE subject_epis_id = 100",
        &[],
    );
    exec(&store, "INSERT INTO appointment_t (subject_epis_id) VALUES (101)", &[]);
    let engine = engine(&store);

    let open = Criteria::new()
        .with("subject has open episode", "Yes")
        .with("latest episode id", "101")
        .with("latest episode end reason", "Null")
        .with("latest episode has open appointment", "Yes")
        .with("subject has kits", "No")
        .with("subject deceased", "No");
    assert!(engine.check(NHS, &open).unwrap());

    exec(
        &store,
        "UPDATE ep_subject_episode_t SET episode_end_date = '2025-05-01', episode_end_reason_id = 8001 \
         WHERE subject_epis_id = 101",
        &[],
    );
    exec(&store, "UPDATE appointment_t SET attended_date = '2025-04-20'", &[]);

    let closed = Criteria::new()
        .with("subject has open episode", "No")
        .with("latest episode closed reason", "Patient Choice")
        .with("latest episode has open appointment", "No");
    assert!(engine.check(NHS, &closed).unwrap());
}

#[test]
fn test_contact_fields() {
    let store = seeded();
    exec(
        &store,
        "UPDATE sd_contact_t SET surname = 'Smith', postcode = 'LS1 4AP' WHERE nhs_number = ?1",
        &[&NHS],
    );
    exec(
        &store,
        "INSERT INTO sd_address_t (contact_id, address_type) \
         SELECT contact_id, 'TEMPORARY' FROM sd_contact_t WHERE nhs_number = ?1",
        &[&NHS],
    );
    let engine = engine(&store);

    let criteria = Criteria::new()
        .with("surname", "Smith")
        .with("postcode", "LS1 4AP")
        .with("forename", "Null")
        .with("subject has temporary address", "Yes");
    assert!(engine.check(NHS, &criteria).unwrap());

    exec(&store, "UPDATE sd_address_t SET effective_to = '2025-01-01'", &[]);
    let lapsed = Criteria::new().with("subject has temporary address", "Yes");
    assert!(!engine.check(NHS, &lapsed).unwrap());
}

#[test]
fn test_subject_without_episodes() {
    let store = seeded();
    let engine = engine(&store);

    let criteria = Criteria::new()
        .with("subject has episodes", "No")
        .with("latest episode status", "Null")
        .with("subject has gp practice", "Yes");
    assert!(engine.check(NHS, &criteria).unwrap());
}

#[test]
fn test_nhs_number_criterion() {
    let store = seeded();
    let engine = engine(&store);

    let same = Criteria::new().with("nhs number", NHS);
    assert!(engine.check(NHS, &same).unwrap());

    let other = Criteria::new().with("nhs number", OTHER_NHS);
    let err = engine.verify(NHS, &other).unwrap_err();
    assert!(matches!(err, CriteriaError::ConflictingNhsNumber { .. }));
}

#[test]
fn test_timeout_propagates() {
    let engine = AssertionEngine::with_config(TimingOut, config()).unwrap();

    let err = engine
        .verify(NHS, &Criteria::new().with("screening status", "Call"))
        .unwrap_err();
    assert!(err.is_timeout());
}

#[test]
fn test_subject_assertion() {
    let store = seeded();
    assert!(subject_assertion(&store, NHS, &Criteria::new().with("screening status", "Call")).unwrap());
    assert!(!subject_assertion(&store, NHS, &Criteria::new().with("screening status", "Inactive")).unwrap());
}

mod monotonicity {
    use super::*;
    use proptest::prelude::*;
    use subject_criteria_engine::QueryExecutor;

    const POOL: &[(&str, &[&str])] = &[
        ("screening status", &["Call", "Recall", "Inactive"]),
        ("subject age", &["30", "> 28", "< 28", "between 18 and 40"]),
        ("screening due date", &["Today", "Null", "2025-01-01"]),
        ("latest episode status", &["Open", "Closed", "Null"]),
        ("subject has episodes", &["Yes", "No"]),
        ("calculated fobt due date", &["2 years from S10 event", "Null"]),
    ];

    fn criteria() -> impl Strategy<Value = Criteria> {
        proptest::collection::vec(any::<Option<prop::sample::Index>>(), POOL.len()).prop_map(
            |choices| {
                POOL.iter()
                    .zip(choices)
                    .filter_map(|((field, values), choice)| {
                        choice.map(|i| (*field, *i.get(values)))
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        /// A failing isolated predicate always fails the combined query
        #[test]
        fn isolated_failure_fails_combined(criteria in criteria()) {
            let store = seeded();
            add_episode(&store, 1, 100, "Open");
            add_event(&store, 100, S10, "2023-06-01");
            set_subject(&store, NHS, "calculated_sdd", &"2025-06-01");

            let catalog = FieldCatalog::global().unwrap();
            let compiler = QueryCompiler::new(catalog).with_today(Some(today()));
            let normalized = CriteriaNormalizer::new(catalog).normalize(&criteria).unwrap();
            let plan = compiler.plan(Some(NHS), &normalized).unwrap();
            prop_assume!(plan.checked().next().is_some());

            let combined = compiler.compile(&plan, CompileMode::Combined).unwrap();
            let combined_holds = store.execute(&combined).unwrap().contains_nhs_number(NHS);

            let mut all_isolated_hold = true;
            for criterion in plan.checked() {
                let isolated = compiler
                    .compile(&plan, CompileMode::Isolated(criterion.field))
                    .unwrap();
                if !store.execute(&isolated).unwrap().contains_nhs_number(NHS) {
                    all_isolated_hold = false;
                    prop_assert!(!combined_holds, "{} failed alone but combined passed", criterion.field);
                }
            }
            prop_assert_eq!(combined_holds, all_isolated_hold);
        }
    }
}
