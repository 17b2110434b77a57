//! Integration tests for the built-in field catalog

use pretty_assertions::assert_eq;
use rstest::rstest;
use subject_criteria_ast::ExpressionKind;
use subject_criteria_catalog::{CanonicalField, ColumnExpr, FieldCatalog, Table, ValueType};

fn catalog() -> &'static FieldCatalog {
    FieldCatalog::global().unwrap()
}

#[test]
fn test_every_field_is_resolvable_by_its_own_name() {
    for field in CanonicalField::ALL {
        assert_eq!(catalog().resolve(field.as_str()), Some(field));
    }
}

#[test]
fn test_every_field_accepts_something() {
    for spec in catalog().iter() {
        assert!(!spec.accepts.is_empty(), "{} accepts nothing", spec.field);
    }
}

#[rstest]
#[case(CanonicalField::ScreeningStatus, ValueType::Lookup)]
#[case(CanonicalField::CalculatedFobtDueDate, ValueType::Date)]
#[case(CanonicalField::SubjectAge, ValueType::AgeYears)]
#[case(CanonicalField::SubjectAgeYD, ValueType::AgeYearsDays)]
#[case(CanonicalField::LatestEventStatus, ValueType::EventStatus)]
#[case(CanonicalField::SubjectHasGpPractice, ValueType::Flag)]
#[case(CanonicalField::CeasedConfirmationUserId, ValueType::Integer)]
fn test_value_types(#[case] field: CanonicalField, #[case] expected: ValueType) {
    assert_eq!(catalog().spec(field).unwrap().value_type, expected);
}

#[rstest]
#[case(CanonicalField::SubjectAge, ExpressionKind::NumericComparison, true)]
#[case(CanonicalField::SubjectAge, ExpressionKind::AgeYearsDays, false)]
#[case(CanonicalField::SubjectAgeYD, ExpressionKind::AgeYearsDays, true)]
#[case(CanonicalField::ScreeningDueDate, ExpressionKind::Today, true)]
#[case(CanonicalField::ScreeningDueDate, ExpressionKind::RelativeDate, true)]
#[case(CanonicalField::ScreeningStatus, ExpressionKind::NumericRange, false)]
#[case(CanonicalField::ScreeningStatus, ExpressionKind::Null, true)]
#[case(CanonicalField::NhsNumber, ExpressionKind::Null, false)]
fn test_accepted_kinds(
    #[case] field: CanonicalField,
    #[case] kind: ExpressionKind,
    #[case] accepted: bool,
) {
    assert_eq!(catalog().spec(field).unwrap().accepts.contains(kind), accepted);
}

#[test]
fn test_subject_columns_need_no_join() {
    let spec = catalog().spec(CanonicalField::CalculatedFobtDueDate).unwrap();
    assert!(spec.join_path().is_empty());
}

#[test]
fn test_episode_lookup_join_path() {
    let spec = catalog().spec(CanonicalField::LatestEpisodeStatusReason).unwrap();
    let aliases: Vec<_> = spec.join_path().iter().map(|j| j.alias).collect();
    assert_eq!(aliases, vec!["ep", "vv_ep_reason"]);
}

#[test]
fn test_age_fields_read_date_of_birth() {
    for field in [CanonicalField::SubjectAge, CanonicalField::SubjectAgeYD] {
        let spec = catalog().spec(field).unwrap();
        let column = spec.column.column().unwrap();
        assert_eq!(column.table, Table::Contact);
        assert_eq!(column.column, "date_of_birth");
    }
}

#[test]
fn test_latest_event_status_is_resolved_through_status_table() {
    let spec = catalog().spec(CanonicalField::LatestEventStatus).unwrap();
    assert!(matches!(spec.column, ColumnExpr::EventStatus(_)));
    assert!(catalog().event_statuses().lookup("S10").is_some());
}

#[rstest]
#[case("subject id", CanonicalField::ScreeningSubjectId)]
#[case("Surname", CanonicalField::SubjectSurname)]
#[case("subject deceased", CanonicalField::SubjectIsDeceased)]
#[case("latest episode closed date", CanonicalField::LatestEpisodeEndDate)]
#[case("latest episode end reason", CanonicalField::LatestEpisodeClosedReason)]
#[case("latest_episode_has_open_appointment", CanonicalField::LatestEpisodeHasOpenAppointment)]
fn test_resolve_names(#[case] name: &str, #[case] expected: CanonicalField) {
    assert_eq!(catalog().resolve(name), Some(expected));
}

#[rstest]
#[case(CanonicalField::SubjectIsDeceased, Table::Contact)]
#[case(CanonicalField::SubjectHasTemporaryAddress, Table::Contact)]
#[case(CanonicalField::SubjectHasOpenEpisode, Table::Subject)]
#[case(CanonicalField::LatestEpisodeHasDiagnosisDate, Table::LatestEpisode)]
#[case(CanonicalField::LatestEpisodeHasRadiologyDataset, Table::LatestEpisode)]
fn test_flag_tables(#[case] field: CanonicalField, #[case] table: Table) {
    let spec = catalog().spec(field).unwrap();
    assert_eq!(spec.value_type, ValueType::Flag);
    assert_eq!(spec.column.table(), table);
}

#[test]
fn test_closed_reason_join_path() {
    let spec = catalog().spec(CanonicalField::LatestEpisodeClosedReason).unwrap();
    let aliases: Vec<_> = spec.join_path().iter().map(|j| j.alias).collect();
    assert_eq!(aliases, vec!["ep", "vv_ep_end_reason"]);
}

#[test]
fn test_version_and_size() {
    assert_eq!(catalog().version(), "1.4");
    assert_eq!(catalog().len(), 75);
}
