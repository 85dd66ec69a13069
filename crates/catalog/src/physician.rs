//! Items waiting on a doctor: approval requests and clinical reviews.

use crate::vocab::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

closed_vocabulary! {
    /// What an approval request is asking the doctor to sign off.
    ApprovalKind("approval kind") {
        Medication => "medication",
        Procedure => "procedure",
        Discharge => "discharge",
        Transfer => "transfer",
        Test => "test",
    }
}

closed_vocabulary! {
    ApprovalStatus("approval status") {
        Pending => "pending",
        Approved => "approved",
        Denied => "denied",
    }
}

closed_vocabulary! {
    ReviewStatus("review status") {
        Pending => "pending",
        InProgress => "in-progress",
        Completed => "completed",
    }
}

/// A request raised by ward staff that needs a doctor's decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApprovalRequest {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub bed_number: String,
    pub kind: ApprovalKind,
    pub description: String,
    pub requested_by: String,
    pub requested_at: DateTime<Utc>,
    pub priority: Priority,
    pub status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

/// A patient case queued for clinical review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClinicalReview {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub bed_number: String,
    pub reason: String,
    pub priority: Priority,
    pub due_at: DateTime<Utc>,
    pub status: ReviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
