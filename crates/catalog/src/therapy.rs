//! Allied-health records: referrals, physiotherapy sessions and diet plans.

use crate::vocab::Urgency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

closed_vocabulary! {
    /// Allied-health service a referral is addressed to.
    Service("service") {
        Nutrition => "nutrition",
        Physiotherapy => "physiotherapy",
    }
}

closed_vocabulary! {
    ReferralStatus("referral status") {
        Pending => "pending",
        Accepted => "accepted",
        Completed => "completed",
    }
}

closed_vocabulary! {
    SessionStatus("session status") {
        Scheduled => "scheduled",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

/// A doctor's referral of a patient to an allied-health service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Referral {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub bed_number: String,
    pub service: Service,
    pub reason: String,
    pub urgency: Urgency,
    pub referred_by: String,
    pub referred_at: DateTime<Utc>,
    pub status: ReferralStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handled_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A scheduled physiotherapy session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TherapySession {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub bed_number: String,
    pub exercise_plan: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// A patient's current diet plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DietPlan {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub bed_number: String,
    pub diet: String,
    pub calories_per_day: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<String>,
}
