//! Nurse-facing records: bedside alerts, medication rounds and nurse notes.

use crate::vocab::Severity;
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

closed_vocabulary! {
    /// Whether an alert has been seen by a nurse.
    ///
    /// Stored as the `acknowledged` flag on [`Alert`]; this enum is the lifecycle view of it.
    AlertStatus("alert status") {
        Unacknowledged => "unacknowledged",
        Acknowledged => "acknowledged",
    }
}

closed_vocabulary! {
    /// Position of a scheduled dose in the medication round.
    MedicationStatus("medication status") {
        Upcoming => "upcoming",
        Due => "due",
        /// Given to the patient.
        Administered => "administered",
        Missed => "missed",
    }
}

closed_vocabulary! {
    /// Kind of free-text nurse note.
    NoteCategory("note category") {
        Observation => "observation",
        Handover => "handover",
        Incident => "incident",
        General => "general",
    }
}

/// A bedside alert raised against a patient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Alert {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub bed_number: String,
    pub severity: Severity,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Lifecycle status derived from the `acknowledged` flag.
    pub fn status(&self) -> AlertStatus {
        if self.acknowledged {
            AlertStatus::Acknowledged
        } else {
            AlertStatus::Unacknowledged
        }
    }
}

/// One scheduled dose on the nurse's medication round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MedicationDose {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub bed_number: String,
    pub drug: String,
    pub dose: String,
    pub route: String,
    pub scheduled_time: NaiveTime,
    pub status: MedicationStatus,
    /// Nurse who administered or recorded the dose as missed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// A nurse note written during the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NurseNote {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub category: NoteCategory,
    pub text: String,
    pub written_by: String,
    pub written_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_status_follows_acknowledged_flag() {
        let mut alert = Alert {
            id: "AL-1".into(),
            patient_id: "P-1".into(),
            patient_name: "John Martinez".into(),
            bed_number: "A-01".into(),
            severity: Severity::Critical,
            message: "SpO2 below 90%".into(),
            raised_at: "2024-03-14T07:55:00Z".parse().unwrap(),
            acknowledged: false,
            acknowledged_by: None,
            acknowledged_at: None,
        };
        assert_eq!(alert.status(), AlertStatus::Unacknowledged);

        alert.acknowledged = true;
        assert_eq!(alert.status(), AlertStatus::Acknowledged);
    }
}
