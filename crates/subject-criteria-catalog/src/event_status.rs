//! Event-status lookup table
//!
//! Anchor text in relative dates and `latest event status` literals are written
//! as a code (`S10`), a description (`Invitation & Test Kit Sent`) or both
//! (`S10 - Invitation & Test Kit Sent`). All forms resolve case-insensitively to
//! the internal status id stored in the event history.

use serde::Serialize;

/// One coded milestone within an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventStatus {
    pub id: i64,
    pub code: &'static str,
    pub description: &'static str,
}

const fn status(id: i64, code: &'static str, description: &'static str) -> EventStatus {
    EventStatus {
        id,
        code,
        description,
    }
}

static EVENT_STATUSES: &[EventStatus] = &[
    status(11190, "S1", "Selected for Screening"),
    status(11196, "S9", "Pre-invitation Sent"),
    status(11198, "S10", "Invitation & Test Kit Sent"),
    status(11213, "S19", "Reminder of Initial Test Sent"),
    status(11223, "S43", "Kit Returned and Logged (Initial Test)"),
    status(11240, "S61", "Normal Test Result"),
    status(20366, "S158", "Subject Discharge Sent (Normal)"),
    status(20367, "S159", "GP Discharge Sent (Normal)"),
    status(11139, "A8", "Abnormal"),
    status(11126, "A25", "Abnormal Result Letter Sent"),
    status(11111, "A99", "Suitable for Endoscopic Test"),
    status(11132, "A183", "Practitioner Clinic 1st Appointment"),
    status(20022, "J10", "Attendance Not Updated"),
    status(20245, "P202", "Waiting Completion of Outstanding Events"),
    status(11201, "C203", "Episode Closed"),
];

/// Immutable code -> record table
#[derive(Debug, Clone, Copy)]
pub struct EventStatusTable {
    statuses: &'static [EventStatus],
}

impl Default for EventStatusTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EventStatusTable {
    /// The built-in status table
    pub const fn builtin() -> Self {
        Self {
            statuses: EVENT_STATUSES,
        }
    }

    /// Resolve a code, description or `"code - description"`
    pub fn lookup(&self, text: &str) -> Option<&'static EventStatus> {
        let text = text.trim();
        if let Some((code, description)) = text.split_once(" - ") {
            let (code, description) = (code.trim(), description.trim());
            return self.statuses.iter().find(|s| {
                s.code.eq_ignore_ascii_case(code) && s.description.eq_ignore_ascii_case(description)
            });
        }
        self.statuses
            .iter()
            .find(|s| s.code.eq_ignore_ascii_case(text))
            .or_else(|| {
                self.statuses
                    .iter()
                    .find(|s| s.description.eq_ignore_ascii_case(text))
            })
    }

    /// Find a status by internal id
    pub fn by_id(&self, id: i64) -> Option<&'static EventStatus> {
        self.statuses.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static EventStatus> {
        self.statuses.iter()
    }
}
