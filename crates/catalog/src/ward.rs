//! Ward management records: incidents, the event schedule and the staff roster.

use crate::vocab::{Role, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

closed_vocabulary! {
    IncidentStatus("incident status") {
        Investigating => "investigating",
        Resolved => "resolved",
        Closed => "closed",
    }
}

closed_vocabulary! {
    /// Kind of scheduled ward event.
    EventKind("event kind") {
        Admission => "admission",
        Discharge => "discharge",
        Transfer => "transfer",
        Procedure => "procedure",
        Meeting => "meeting",
    }
}

closed_vocabulary! {
    Shift("shift") {
        Morning => "morning",
        Evening => "evening",
        Night => "night",
    }
}

/// A reported safety incident.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Incident {
    pub id: String,
    pub title: String,
    pub category: String,
    pub severity: Severity,
    pub location: String,
    pub description: String,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    pub status: IncidentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An entry in the ward's event schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WardEvent {
    pub id: String,
    pub title: String,
    pub kind: EventKind,
    pub scheduled_at: DateTime<Utc>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
}

/// A member of the ward's staff roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub shift: Shift,
    pub on_duty: bool,
}
