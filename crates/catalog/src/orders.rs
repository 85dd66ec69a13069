//! Test orders and their results, shared by the lab technician and radiologist views.

use crate::vocab::Urgency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

closed_vocabulary! {
    /// Department that fulfils a test order.
    TestCategory("test category") {
        Laboratory => "laboratory",
        Imaging => "imaging",
    }
}

closed_vocabulary! {
    /// Progress of a test order, in workflow order.
    TestOrderStatus("test order status") {
        Ordered => "ordered",
        Scheduled => "scheduled",
        /// Sample taken, or patient scanned for imaging orders.
        Collected => "collected",
        InProgress => "in-progress",
        Completed => "completed",
    }
}

closed_vocabulary! {
    /// Interpretation flag on a reported result.
    ResultFlag("result flag") {
        Critical => "critical",
        Abnormal => "abnormal",
        Normal => "normal",
    }
}

closed_vocabulary! {
    /// Hand-off state of a reported result.
    ResultStatus("result status") {
        Reported => "reported",
        /// Ordering doctor has been told about the result.
        Notified => "notified",
        Reviewed => "reviewed",
    }
}

/// A laboratory or imaging test ordered for a patient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestOrder {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub bed_number: String,
    pub test_name: String,
    pub category: TestCategory,
    pub urgency: Urgency,
    pub ordered_by: String,
    pub ordered_at: DateTime<Utc>,
    pub status: TestOrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A result reported against a test order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestResult {
    pub id: String,
    pub order_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub test_name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<String>,
    pub flag: ResultFlag,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    pub status: ResultStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}
