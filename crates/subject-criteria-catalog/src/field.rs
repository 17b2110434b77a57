//! Canonical field vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// One field of the closed criteria vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    NhsNumber,
    // Screening subject
    ScreeningStatus,
    ScreeningStatusReason,
    ScreeningStatusDateOfChange,
    PreviousScreeningStatus,
    ScreeningDueDate,
    ScreeningDueDateReason,
    ScreeningDueDateDateOfChange,
    CalculatedFobtDueDate,
    SurveillanceDueDate,
    SurveillanceDueDateReason,
    SurveillanceDueDateDateOfChange,
    CalculatedSurveillanceDueDate,
    LynchDueDate,
    LynchDueDateReason,
    LynchDueDateDateOfChange,
    CalculatedLynchDueDate,
    CeasedConfirmationDate,
    CeasedConfirmationDetails,
    CeasedConfirmationUserId,
    ClinicalReasonForCease,
    ScreeningCentreCode,
    ScreeningSubjectId,
    SurveillanceReviewStatus,
    SurveillanceReviewCaseType,
    SurveillanceReviewDate,
    ManualCeaseRequested,
    LynchIncidentDate,
    // Contact
    DateOfBirth,
    DateOfDeath,
    SubjectAge,
    SubjectAgeYD,
    SubjectGender,
    SubjectHubCode,
    GpPracticeCode,
    SubjectHasGpPractice,
    SubjectSurname,
    SubjectForename,
    SubjectPostcode,
    SubjectIsDeceased,
    SubjectHasTemporaryAddress,
    // Latest episode
    LatestEpisodeType,
    LatestEpisodeStatus,
    LatestEpisodeStatusReason,
    LatestEpisodeStartDate,
    LatestEpisodeEndDate,
    LatestEventStatus,
    LatestEpisodeRecallCalculationMethod,
    LatestEpisodeRecallEpisodeType,
    LatestEpisodeRecallSurveillanceType,
    LatestEpisodeDiagnosisDate,
    LatestEpisodeDiagnosisDateReason,
    LatestEpisodeReferralDate,
    LatestEpisodeId,
    LatestEpisodeSubType,
    LatestEpisodeStatusDateOfChange,
    LatestEpisodeRecallDateOfChange,
    LatestEpisodeClosedReason,
    LatestEpisodeAccumulatedResult,
    LatestEpisodeReferralType,
    LatestEpisodeReferralReason,
    LatestEpisodeDiagnosisDateDateOfChange,
    LatestEpisodeHasDiagnosisDate,
    LatestEpisodeHasReferralDate,
    // Existence probes
    SubjectHasEpisodes,
    SubjectHasEvents,
    SubjectHasOpenEpisode,
    SubjectHasKits,
    SubjectHasLynchDiagnosis,
    LatestEpisodeHasColonoscopyDataset,
    LatestEpisodeHasCancerAuditDataset,
    LatestEpisodeHasMdtDataset,
    LatestEpisodeHasPathologyDataset,
    LatestEpisodeHasRadiologyDataset,
    LatestEpisodeHasOpenAppointment,
}

impl CanonicalField {
    /// Every canonical field, in catalog order
    pub const ALL: [CanonicalField; 75] = [
        Self::NhsNumber,
        Self::ScreeningStatus,
        Self::ScreeningStatusReason,
        Self::ScreeningStatusDateOfChange,
        Self::PreviousScreeningStatus,
        Self::ScreeningDueDate,
        Self::ScreeningDueDateReason,
        Self::ScreeningDueDateDateOfChange,
        Self::CalculatedFobtDueDate,
        Self::SurveillanceDueDate,
        Self::SurveillanceDueDateReason,
        Self::SurveillanceDueDateDateOfChange,
        Self::CalculatedSurveillanceDueDate,
        Self::LynchDueDate,
        Self::LynchDueDateReason,
        Self::LynchDueDateDateOfChange,
        Self::CalculatedLynchDueDate,
        Self::CeasedConfirmationDate,
        Self::CeasedConfirmationDetails,
        Self::CeasedConfirmationUserId,
        Self::ClinicalReasonForCease,
        Self::ScreeningCentreCode,
        Self::ScreeningSubjectId,
        Self::SurveillanceReviewStatus,
        Self::SurveillanceReviewCaseType,
        Self::SurveillanceReviewDate,
        Self::ManualCeaseRequested,
        Self::LynchIncidentDate,
        Self::DateOfBirth,
        Self::DateOfDeath,
        Self::SubjectAge,
        Self::SubjectAgeYD,
        Self::SubjectGender,
        Self::SubjectHubCode,
        Self::GpPracticeCode,
        Self::SubjectHasGpPractice,
        Self::SubjectSurname,
        Self::SubjectForename,
        Self::SubjectPostcode,
        Self::SubjectIsDeceased,
        Self::SubjectHasTemporaryAddress,
        Self::LatestEpisodeType,
        Self::LatestEpisodeStatus,
        Self::LatestEpisodeStatusReason,
        Self::LatestEpisodeStartDate,
        Self::LatestEpisodeEndDate,
        Self::LatestEventStatus,
        Self::LatestEpisodeRecallCalculationMethod,
        Self::LatestEpisodeRecallEpisodeType,
        Self::LatestEpisodeRecallSurveillanceType,
        Self::LatestEpisodeDiagnosisDate,
        Self::LatestEpisodeDiagnosisDateReason,
        Self::LatestEpisodeReferralDate,
        Self::LatestEpisodeId,
        Self::LatestEpisodeSubType,
        Self::LatestEpisodeStatusDateOfChange,
        Self::LatestEpisodeRecallDateOfChange,
        Self::LatestEpisodeClosedReason,
        Self::LatestEpisodeAccumulatedResult,
        Self::LatestEpisodeReferralType,
        Self::LatestEpisodeReferralReason,
        Self::LatestEpisodeDiagnosisDateDateOfChange,
        Self::LatestEpisodeHasDiagnosisDate,
        Self::LatestEpisodeHasReferralDate,
        Self::SubjectHasEpisodes,
        Self::SubjectHasEvents,
        Self::SubjectHasOpenEpisode,
        Self::SubjectHasKits,
        Self::SubjectHasLynchDiagnosis,
        Self::LatestEpisodeHasColonoscopyDataset,
        Self::LatestEpisodeHasCancerAuditDataset,
        Self::LatestEpisodeHasMdtDataset,
        Self::LatestEpisodeHasPathologyDataset,
        Self::LatestEpisodeHasRadiologyDataset,
        Self::LatestEpisodeHasOpenAppointment,
    ];

    /// Snake-case name, also used as the bind variable stem
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NhsNumber => "nhs_number",
            Self::ScreeningStatus => "screening_status",
            Self::ScreeningStatusReason => "screening_status_reason",
            Self::ScreeningStatusDateOfChange => "screening_status_date_of_change",
            Self::PreviousScreeningStatus => "previous_screening_status",
            Self::ScreeningDueDate => "screening_due_date",
            Self::ScreeningDueDateReason => "screening_due_date_reason",
            Self::ScreeningDueDateDateOfChange => "screening_due_date_date_of_change",
            Self::CalculatedFobtDueDate => "calculated_fobt_due_date",
            Self::SurveillanceDueDate => "surveillance_due_date",
            Self::SurveillanceDueDateReason => "surveillance_due_date_reason",
            Self::SurveillanceDueDateDateOfChange => "surveillance_due_date_date_of_change",
            Self::CalculatedSurveillanceDueDate => "calculated_surveillance_due_date",
            Self::LynchDueDate => "lynch_due_date",
            Self::LynchDueDateReason => "lynch_due_date_reason",
            Self::LynchDueDateDateOfChange => "lynch_due_date_date_of_change",
            Self::CalculatedLynchDueDate => "calculated_lynch_due_date",
            Self::CeasedConfirmationDate => "ceased_confirmation_date",
            Self::CeasedConfirmationDetails => "ceased_confirmation_details",
            Self::CeasedConfirmationUserId => "ceased_confirmation_user_id",
            Self::ClinicalReasonForCease => "clinical_reason_for_cease",
            Self::ScreeningCentreCode => "screening_centre_code",
            Self::ScreeningSubjectId => "screening_subject_id",
            Self::SurveillanceReviewStatus => "surveillance_review_status",
            Self::SurveillanceReviewCaseType => "surveillance_review_case_type",
            Self::SurveillanceReviewDate => "surveillance_review_date",
            Self::ManualCeaseRequested => "manual_cease_requested",
            Self::LynchIncidentDate => "lynch_incident_date",
            Self::DateOfBirth => "date_of_birth",
            Self::DateOfDeath => "date_of_death",
            Self::SubjectAge => "subject_age",
            Self::SubjectAgeYD => "subject_age_y_d",
            Self::SubjectGender => "subject_gender",
            Self::SubjectHubCode => "subject_hub_code",
            Self::GpPracticeCode => "gp_practice_code",
            Self::SubjectHasGpPractice => "subject_has_gp_practice",
            Self::SubjectSurname => "subject_surname",
            Self::SubjectForename => "subject_forename",
            Self::SubjectPostcode => "subject_postcode",
            Self::SubjectIsDeceased => "subject_is_deceased",
            Self::SubjectHasTemporaryAddress => "subject_has_temporary_address",
            Self::LatestEpisodeType => "latest_episode_type",
            Self::LatestEpisodeStatus => "latest_episode_status",
            Self::LatestEpisodeStatusReason => "latest_episode_status_reason",
            Self::LatestEpisodeStartDate => "latest_episode_start_date",
            Self::LatestEpisodeEndDate => "latest_episode_end_date",
            Self::LatestEventStatus => "latest_event_status",
            Self::LatestEpisodeRecallCalculationMethod => "latest_episode_recall_calculation_method",
            Self::LatestEpisodeRecallEpisodeType => "latest_episode_recall_episode_type",
            Self::LatestEpisodeRecallSurveillanceType => "latest_episode_recall_surveillance_type",
            Self::LatestEpisodeDiagnosisDate => "latest_episode_diagnosis_date",
            Self::LatestEpisodeDiagnosisDateReason => "latest_episode_diagnosis_date_reason",
            Self::LatestEpisodeReferralDate => "latest_episode_referral_date",
            Self::LatestEpisodeId => "latest_episode_id",
            Self::LatestEpisodeSubType => "latest_episode_sub_type",
            Self::LatestEpisodeStatusDateOfChange => "latest_episode_status_date_of_change",
            Self::LatestEpisodeRecallDateOfChange => "latest_episode_recall_date_of_change",
            Self::LatestEpisodeClosedReason => "latest_episode_closed_reason",
            Self::LatestEpisodeAccumulatedResult => "latest_episode_accumulated_result",
            Self::LatestEpisodeReferralType => "latest_episode_referral_type",
            Self::LatestEpisodeReferralReason => "latest_episode_referral_reason",
            Self::LatestEpisodeDiagnosisDateDateOfChange => "latest_episode_diagnosis_date_date_of_change",
            Self::LatestEpisodeHasDiagnosisDate => "latest_episode_has_diagnosis_date",
            Self::LatestEpisodeHasReferralDate => "latest_episode_has_referral_date",
            Self::SubjectHasEpisodes => "subject_has_episodes",
            Self::SubjectHasEvents => "subject_has_events",
            Self::SubjectHasOpenEpisode => "subject_has_open_episode",
            Self::SubjectHasKits => "subject_has_kits",
            Self::SubjectHasLynchDiagnosis => "subject_has_lynch_diagnosis",
            Self::LatestEpisodeHasColonoscopyDataset => "latest_episode_has_colonoscopy_dataset",
            Self::LatestEpisodeHasCancerAuditDataset => "latest_episode_has_cancer_audit_dataset",
            Self::LatestEpisodeHasMdtDataset => "latest_episode_has_mdt_dataset",
            Self::LatestEpisodeHasPathologyDataset => "latest_episode_has_pathology_dataset",
            Self::LatestEpisodeHasRadiologyDataset => "latest_episode_has_radiology_dataset",
            Self::LatestEpisodeHasOpenAppointment => "latest_episode_has_open_appointment",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_serde() {
        for field in CanonicalField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn test_all_is_distinct() {
        let mut names: Vec<_> = CanonicalField::ALL.iter().map(|f| f.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CanonicalField::ALL.len());
    }
}
