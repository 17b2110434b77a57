//! The built-in field table

use crate::field::CanonicalField as F;
use crate::schema::{ColumnExpr, ColumnRef, FlagProbe, Table, ValueType};
use crate::spec::FieldSpec;
use subject_criteria_ast::{ExpressionKind, KindSet};

/// Bumped whenever a field, alias or column mapping changes
pub const CATALOG_VERSION: &str = "1.4";

const fn col(table: Table, column: &'static str) -> ColumnRef {
    ColumnRef::new(table, column)
}

const fn text(field: F, table: Table, column: &'static str) -> FieldSpec {
    FieldSpec::new(field, ValueType::Text, ColumnExpr::Column(col(table, column)))
}

const fn integer(field: F, table: Table, column: &'static str) -> FieldSpec {
    FieldSpec::new(field, ValueType::Integer, ColumnExpr::Column(col(table, column)))
}

const fn date(field: F, table: Table, column: &'static str) -> FieldSpec {
    FieldSpec::new(field, ValueType::Date, ColumnExpr::Column(col(table, column)))
}

const fn lookup(field: F, table: Table, column: &'static str, alias: &'static str) -> FieldSpec {
    FieldSpec::new(
        field,
        ValueType::Lookup,
        ColumnExpr::Lookup {
            id: col(table, column),
            alias,
        },
    )
}

const fn not_null(field: F, table: Table, column: &'static str) -> FieldSpec {
    FieldSpec::new(
        field,
        ValueType::Flag,
        ColumnExpr::Flag(FlagProbe::NotNull(col(table, column))),
    )
}

const fn exists(field: F, probe: &'static str, requires: Table) -> FieldSpec {
    FieldSpec::new(
        field,
        ValueType::Flag,
        ColumnExpr::Flag(FlagProbe::Exists { probe, requires }),
    )
}

use Table::{Contact, LatestEpisode as Episode, Subject};

pub(crate) static BUILTIN_FIELDS: &[FieldSpec] = &[
    text(F::NhsNumber, Subject, "subject_nhs_number")
        .with_aliases(&["nhs no", "subject nhs number"])
        .accepting(KindSet::of(&[ExpressionKind::Literal])),
    // Screening subject
    lookup(F::ScreeningStatus, Subject, "screening_status_id", "vv_ss_status"),
    lookup(F::ScreeningStatusReason, Subject, "ss_reason_for_change_id", "vv_ss_reason")
        .with_aliases(&["screening status reason for change"]),
    date(F::ScreeningStatusDateOfChange, Subject, "ss_status_change_date")
        .with_aliases(&["screening status change date"]),
    lookup(F::PreviousScreeningStatus, Subject, "previous_screening_status_id", "vv_ss_prev_status"),
    date(F::ScreeningDueDate, Subject, "screening_due_date").with_aliases(&["sdd"]),
    lookup(F::ScreeningDueDateReason, Subject, "sdd_reason_for_change_id", "vv_sdd_reason")
        .with_aliases(&["sdd reason"]),
    date(F::ScreeningDueDateDateOfChange, Subject, "sdd_change_date")
        .with_aliases(&["screening due date change date", "sdd date of change"]),
    date(F::CalculatedFobtDueDate, Subject, "calculated_sdd")
        .with_aliases(&["calculated screening due date", "calculated sdd"]),
    date(F::SurveillanceDueDate, Subject, "surveillance_screen_due_date")
        .with_aliases(&["ssdd"]),
    lookup(F::SurveillanceDueDateReason, Subject, "surveillance_sdd_rsn_id", "vv_ssdd_reason")
        .with_aliases(&["ssdd reason"]),
    date(F::SurveillanceDueDateDateOfChange, Subject, "surveillance_sdd_change_date")
        .with_aliases(&["surveillance due date change date"]),
    date(F::CalculatedSurveillanceDueDate, Subject, "calculated_ssdd")
        .with_aliases(&["calculated ssdd"]),
    date(F::LynchDueDate, Subject, "lynch_screening_due_date"),
    lookup(F::LynchDueDateReason, Subject, "lynch_sdd_reason_for_change_id", "vv_lynch_reason"),
    date(F::LynchDueDateDateOfChange, Subject, "lynch_sdd_date_of_change")
        .with_aliases(&["lynch due date change date"]),
    date(F::CalculatedLynchDueDate, Subject, "lynch_calculated_sdd"),
    date(F::CeasedConfirmationDate, Subject, "ceased_confirmation_recd_date"),
    text(F::CeasedConfirmationDetails, Subject, "ceased_confirmation_details"),
    integer(F::CeasedConfirmationUserId, Subject, "ceased_confirmation_pio_id")
        .with_aliases(&["ceased confirmation pio id"]),
    lookup(F::ClinicalReasonForCease, Subject, "clinical_reason_for_cease_id", "vv_cease_reason"),
    text(F::ScreeningCentreCode, Subject, "screening_centre_code")
        .with_aliases(&["screening centre"]),
    integer(F::ScreeningSubjectId, Subject, "screening_subject_id")
        .with_aliases(&["subject id"]),
    lookup(F::SurveillanceReviewStatus, Subject, "surveillance_review_status_id", "vv_surv_review_status"),
    lookup(F::SurveillanceReviewCaseType, Subject, "surveillance_review_case_type_id", "vv_surv_review_case"),
    date(F::SurveillanceReviewDate, Subject, "surveillance_review_date"),
    lookup(F::ManualCeaseRequested, Subject, "manual_cease_requested_id", "vv_manual_cease"),
    date(F::LynchIncidentDate, Subject, "lynch_incident_date"),
    // Contact
    date(F::DateOfBirth, Contact, "date_of_birth").with_aliases(&["dob"]),
    date(F::DateOfDeath, Contact, "date_of_death"),
    FieldSpec::new(
        F::SubjectAge,
        ValueType::AgeYears,
        ColumnExpr::AgeInYears(col(Contact, "date_of_birth")),
    )
    .with_aliases(&["age"]),
    FieldSpec::new(
        F::SubjectAgeYD,
        ValueType::AgeYearsDays,
        ColumnExpr::AgeYearsDays(col(Contact, "date_of_birth")),
    )
    .with_aliases(&["subject age (y/d)", "subject age years days"]),
    lookup(F::SubjectGender, Contact, "gender_id", "vv_gender").with_aliases(&["gender"]),
    text(F::SubjectHubCode, Contact, "hub_code").with_aliases(&["hub code"]),
    text(F::GpPracticeCode, Contact, "gp_practice_code"),
    not_null(F::SubjectHasGpPractice, Contact, "gp_practice_code"),
    text(F::SubjectSurname, Contact, "surname").with_aliases(&["surname"]),
    text(F::SubjectForename, Contact, "forename").with_aliases(&["forename"]),
    text(F::SubjectPostcode, Contact, "postcode").with_aliases(&["postcode"]),
    not_null(F::SubjectIsDeceased, Contact, "date_of_death").with_aliases(&["subject deceased"]),
    exists(
        F::SubjectHasTemporaryAddress,
        concat!(
            "SELECT 1 FROM sd_address_t adx WHERE adx.contact_id = c.contact_id",
            " AND adx.address_type = 'TEMPORARY' AND adx.effective_to IS NULL"
        ),
        Contact,
    ),
    // Latest episode
    lookup(F::LatestEpisodeType, Episode, "episode_type_id", "vv_ep_type")
        .with_aliases(&["latest episode kind"]),
    lookup(F::LatestEpisodeStatus, Episode, "episode_status_id", "vv_ep_status"),
    lookup(F::LatestEpisodeStatusReason, Episode, "episode_status_reason_id", "vv_ep_reason"),
    date(F::LatestEpisodeStartDate, Episode, "episode_start_date")
        .with_aliases(&["latest episode started"]),
    date(F::LatestEpisodeEndDate, Episode, "episode_end_date")
        .with_aliases(&["latest episode ended", "latest episode closed date"]),
    FieldSpec::new(
        F::LatestEventStatus,
        ValueType::EventStatus,
        ColumnExpr::EventStatus(col(Episode, "latest_event_status_id")),
    )
    .with_aliases(&["latest episode latest event status"]),
    lookup(F::LatestEpisodeRecallCalculationMethod, Episode, "recall_calculation_method_id", "vv_recall_method")
        .with_aliases(&["latest episode recall calc method"]),
    lookup(F::LatestEpisodeRecallEpisodeType, Episode, "recall_episode_type_id", "vv_recall_ep_type"),
    lookup(F::LatestEpisodeRecallSurveillanceType, Episode, "recall_surveillance_type_id", "vv_recall_surv_type"),
    date(F::LatestEpisodeDiagnosisDate, Episode, "diagnosis_date"),
    lookup(F::LatestEpisodeDiagnosisDateReason, Episode, "diagnosis_date_reason_id", "vv_diag_reason"),
    date(F::LatestEpisodeReferralDate, Episode, "referral_date"),
    integer(F::LatestEpisodeId, Episode, "subject_epis_id"),
    lookup(F::LatestEpisodeSubType, Episode, "episode_sub_type_id", "vv_ep_sub_type"),
    date(F::LatestEpisodeStatusDateOfChange, Episode, "episode_status_change_date")
        .with_aliases(&["latest episode status change date"]),
    date(F::LatestEpisodeRecallDateOfChange, Episode, "recall_change_date"),
    lookup(F::LatestEpisodeClosedReason, Episode, "episode_end_reason_id", "vv_ep_end_reason")
        .with_aliases(&["latest episode end reason"]),
    lookup(F::LatestEpisodeAccumulatedResult, Episode, "accumulated_result_id", "vv_ep_accum_result"),
    lookup(F::LatestEpisodeReferralType, Episode, "referral_type_id", "vv_referral_type"),
    lookup(F::LatestEpisodeReferralReason, Episode, "referral_reason_id", "vv_referral_reason"),
    date(F::LatestEpisodeDiagnosisDateDateOfChange, Episode, "diagnosis_date_change_date"),
    not_null(F::LatestEpisodeHasDiagnosisDate, Episode, "diagnosis_date"),
    not_null(F::LatestEpisodeHasReferralDate, Episode, "referral_date"),
    // Existence probes
    exists(
        F::SubjectHasEpisodes,
        "SELECT 1 FROM ep_subject_episode_t epx WHERE epx.screening_subject_id = ss.screening_subject_id",
        Subject,
    ),
    exists(
        F::SubjectHasEvents,
        concat!(
            "SELECT 1 FROM ep_events_t evx",
            " INNER JOIN ep_subject_episode_t epx ON epx.subject_epis_id = evx.subject_epis_id",
            " WHERE epx.screening_subject_id = ss.screening_subject_id"
        ),
        Subject,
    ),
    exists(
        F::SubjectHasOpenEpisode,
        concat!(
            "SELECT 1 FROM ep_subject_episode_t epx WHERE epx.screening_subject_id = ss.screening_subject_id",
            " AND epx.episode_end_date IS NULL"
        ),
        Subject,
    ),
    exists(
        F::SubjectHasKits,
        "SELECT 1 FROM tk_items_t tkx WHERE tkx.screening_subject_id = ss.screening_subject_id",
        Subject,
    ),
    exists(
        F::SubjectHasLynchDiagnosis,
        "SELECT 1 FROM lynch_diagnosis_t lyx WHERE lyx.screening_subject_id = ss.screening_subject_id",
        Subject,
    ),
    exists(
        F::LatestEpisodeHasColonoscopyDataset,
        "SELECT 1 FROM ds_colonoscopy_t dsx WHERE dsx.episode_id = ep.subject_epis_id",
        Episode,
    ),
    exists(
        F::LatestEpisodeHasCancerAuditDataset,
        "SELECT 1 FROM ds_cancer_audit_t dsx WHERE dsx.episode_id = ep.subject_epis_id",
        Episode,
    ),
    exists(
        F::LatestEpisodeHasMdtDataset,
        "SELECT 1 FROM ds_mdt_t dsx WHERE dsx.episode_id = ep.subject_epis_id",
        Episode,
    ),
    exists(
        F::LatestEpisodeHasPathologyDataset,
        "SELECT 1 FROM ds_pathology_t dsx WHERE dsx.episode_id = ep.subject_epis_id",
        Episode,
    ),
    exists(
        F::LatestEpisodeHasRadiologyDataset,
        "SELECT 1 FROM ds_radiology_t dsx WHERE dsx.episode_id = ep.subject_epis_id",
        Episode,
    ),
    exists(
        F::LatestEpisodeHasOpenAppointment,
        concat!(
            "SELECT 1 FROM appointment_t apx WHERE apx.subject_epis_id = ep.subject_epis_id",
            " AND apx.cancel_date IS NULL AND apx.attended_date IS NULL"
        ),
        Episode,
    ),
];
