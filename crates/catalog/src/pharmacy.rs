//! Pharmacy records: prescriptions and refill requests.

use crate::vocab::Urgency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

closed_vocabulary! {
    /// Pharmacy stock level for the prescribed drug.
    Availability("availability") {
        InStock => "in-stock",
        LowStock => "low-stock",
        OutOfStock => "out-of-stock",
    }
}

closed_vocabulary! {
    PrescriptionStatus("prescription status") {
        Active => "active",
        Completed => "completed",
        Discontinued => "discontinued",
    }
}

closed_vocabulary! {
    RefillStatus("refill status") {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

/// A prescription awaiting or under pharmacy fulfilment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Prescription {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub bed_number: String,
    pub medication: String,
    pub dose: String,
    pub frequency: String,
    pub urgency: Urgency,
    pub availability: Availability,
    pub prescribed_by: String,
    pub prescribed_at: DateTime<Utc>,
    pub status: PrescriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

/// A request to refill an existing medication.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefillRequest {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub bed_number: String,
    pub medication: String,
    pub requested_by: String,
    pub requested_at: DateTime<Utc>,
    pub urgency: Urgency,
    pub status: RefillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}
