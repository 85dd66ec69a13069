//! Patients and ward beds.
//!
//! Patients are read-only in every view. Other entities refer to them by a denormalised
//! `patient_id`/`patient_name`/`bed_number` triple; nothing enforces that these match.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

closed_vocabulary! {
    /// Clinical condition shown against each patient.
    PatientCondition("patient condition") {
        Critical => "critical",
        Observation => "observation",
        Stable => "stable",
        Improving => "improving",
    }
}

/// An admitted patient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub bed_number: String,
    pub diagnosis: String,
    pub condition: PatientCondition,
    pub admitted_on: NaiveDate,
    pub attending_doctor: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergies: Vec<String>,
}

/// Static description of the ward itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WardInfo {
    /// Display name of the ward.
    pub name: String,

    /// Every bed number on the ward, occupied or not.
    pub beds: Vec<String>,
}
