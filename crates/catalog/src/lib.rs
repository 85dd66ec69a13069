//! Entity catalog for the ward operations dashboard.
//!
//! This crate provides the **typed records** every dashboard view works with and the seed data
//! set they are loaded from:
//! - closed vocabularies (roles, urgency, severity, per-entity status enums)
//! - one record type per domain entity (patients, alerts, test orders, prescriptions, ...)
//! - strict YAML parsing/rendering of the whole catalog
//!
//! This crate holds data only. Status transitions, filtering and navigation live in `ward-core`.

#[macro_use]
mod vocab;

pub mod catalog;
pub mod nursing;
pub mod orders;
pub mod patient;
pub mod pharmacy;
pub mod physician;
pub mod therapy;
pub mod ward;

// Re-export facades
pub use catalog::Catalog;

// Re-export public domain-level types
pub use nursing::{Alert, AlertStatus, MedicationDose, MedicationStatus, NoteCategory, NurseNote};
pub use orders::{ResultFlag, ResultStatus, TestCategory, TestOrder, TestOrderStatus, TestResult};
pub use patient::{Patient, PatientCondition, WardInfo};
pub use pharmacy::{Availability, Prescription, PrescriptionStatus, RefillRequest, RefillStatus};
pub use physician::{ApprovalKind, ApprovalRequest, ApprovalStatus, ClinicalReview, ReviewStatus};
pub use therapy::{DietPlan, Referral, ReferralStatus, Service, SessionStatus, TherapySession};
pub use vocab::{Priority, Role, Severity, Urgency};
pub use ward::{EventKind, Incident, IncidentStatus, Shift, StaffMember, WardEvent};

/// Errors returned by the `ward-catalog` crate.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("duplicate id {id:?} in {collection}")]
    DuplicateId {
        collection: &'static str,
        id: String,
    },
}

/// Type alias for Results that can fail with a [`CatalogError`].
pub type CatalogResult<T> = Result<T, CatalogError>;
