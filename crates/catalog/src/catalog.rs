//! The ward catalog: every seeded collection in one document.
//!
//! Responsibilities:
//! - Parse the seed YAML strictly (unknown keys and wrong types are rejected with a field path)
//! - Check that ids are present and unique within each collection, and that bed numbers are unique
//! - Render a catalog back to YAML (used to export the current in-memory state)
//!
//! Cross-collection references (`patient_id`, `order_id`, ...) are deliberately not checked.

use crate::nursing::{Alert, MedicationDose, NurseNote};
use crate::orders::{TestOrder, TestResult};
use crate::patient::{Patient, WardInfo};
use crate::pharmacy::{Prescription, RefillRequest};
use crate::physician::{ApprovalRequest, ClinicalReview};
use crate::therapy::{DietPlan, Referral, TherapySession};
use crate::ward::{Incident, StaffMember, WardEvent};
use crate::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use ward_types::NonEmptyText;

/// Seed data compiled into the binary, used when no seed file is configured.
const EMBEDDED_SEED: &str = include_str!("../seed/ward.yaml");

// ============================================================================
// Public domain-level types
// ============================================================================

/// All collections making up the ward's in-memory data set.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    pub ward: WardInfo,
    pub patients: Vec<Patient>,
    pub alerts: Vec<Alert>,
    pub medications: Vec<MedicationDose>,
    pub nurse_notes: Vec<NurseNote>,
    pub test_orders: Vec<TestOrder>,
    pub test_results: Vec<TestResult>,
    pub prescriptions: Vec<Prescription>,
    pub refill_requests: Vec<RefillRequest>,
    pub approval_requests: Vec<ApprovalRequest>,
    pub clinical_reviews: Vec<ClinicalReview>,
    pub incidents: Vec<Incident>,
    pub events: Vec<WardEvent>,
    pub staff: Vec<StaffMember>,
    pub referrals: Vec<Referral>,
    pub therapy_sessions: Vec<TherapySession>,
    pub diet_plans: Vec<DietPlan>,
}

impl Catalog {
    /// Parse a catalog from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `test_orders[2].urgency`) to the failing field when the YAML does not match the schema.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if:
    /// - the YAML does not match the catalog schema ([`CatalogError::Translation`]),
    /// - the ward name is blank or an id is empty ([`CatalogError::InvalidInput`]),
    /// - an id or bed number appears twice ([`CatalogError::DuplicateId`]).
    pub fn parse(yaml_text: &str) -> CatalogResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, CatalogWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(CatalogError::Translation(format!(
                    "Catalog schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire)
    }

    /// Render the catalog as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidYaml`] if serialisation fails.
    pub fn render(&self) -> CatalogResult<String> {
        let wire = domain_to_wire(self);
        Ok(serde_yaml::to_string(&wire)?)
    }

    /// The catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded seed itself is malformed.
    pub fn seed() -> CatalogResult<Self> {
        Self::parse(EMBEDDED_SEED)
    }

    /// Read and parse a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as [`Catalog::parse`].
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// On-disk shape of the catalog. Collections may be omitted and default to empty.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct CatalogWire {
    ward: WardInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    patients: Vec<Patient>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    alerts: Vec<Alert>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    medications: Vec<MedicationDose>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    nurse_notes: Vec<NurseNote>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    test_orders: Vec<TestOrder>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    test_results: Vec<TestResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    prescriptions: Vec<Prescription>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    refill_requests: Vec<RefillRequest>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    approval_requests: Vec<ApprovalRequest>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    clinical_reviews: Vec<ClinicalReview>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    incidents: Vec<Incident>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    events: Vec<WardEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    staff: Vec<StaffMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    referrals: Vec<Referral>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    therapy_sessions: Vec<TherapySession>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    diet_plans: Vec<DietPlan>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: CatalogWire) -> CatalogResult<Catalog> {
    let ward_name = NonEmptyText::new(&wire.ward.name)
        .map_err(|_| CatalogError::InvalidInput("ward name cannot be empty".into()))?;

    check_unique("beds", &wire.ward.beds, |b| b.as_str())?;
    check_unique("patients", &wire.patients, |p| &p.id)?;
    check_unique("alerts", &wire.alerts, |a| &a.id)?;
    check_unique("medications", &wire.medications, |m| &m.id)?;
    check_unique("nurse_notes", &wire.nurse_notes, |n| &n.id)?;
    check_unique("test_orders", &wire.test_orders, |o| &o.id)?;
    check_unique("test_results", &wire.test_results, |r| &r.id)?;
    check_unique("prescriptions", &wire.prescriptions, |p| &p.id)?;
    check_unique("refill_requests", &wire.refill_requests, |r| &r.id)?;
    check_unique("approval_requests", &wire.approval_requests, |a| &a.id)?;
    check_unique("clinical_reviews", &wire.clinical_reviews, |r| &r.id)?;
    check_unique("incidents", &wire.incidents, |i| &i.id)?;
    check_unique("events", &wire.events, |e| &e.id)?;
    check_unique("staff", &wire.staff, |s| &s.id)?;
    check_unique("referrals", &wire.referrals, |r| &r.id)?;
    check_unique("therapy_sessions", &wire.therapy_sessions, |s| &s.id)?;
    check_unique("diet_plans", &wire.diet_plans, |d| &d.id)?;

    Ok(Catalog {
        ward: WardInfo {
            name: ward_name.into_string(),
            beds: wire.ward.beds,
        },
        patients: wire.patients,
        alerts: wire.alerts,
        medications: wire.medications,
        nurse_notes: wire.nurse_notes,
        test_orders: wire.test_orders,
        test_results: wire.test_results,
        prescriptions: wire.prescriptions,
        refill_requests: wire.refill_requests,
        approval_requests: wire.approval_requests,
        clinical_reviews: wire.clinical_reviews,
        incidents: wire.incidents,
        events: wire.events,
        staff: wire.staff,
        referrals: wire.referrals,
        therapy_sessions: wire.therapy_sessions,
        diet_plans: wire.diet_plans,
    })
}

fn domain_to_wire(catalog: &Catalog) -> CatalogWire {
    CatalogWire {
        ward: catalog.ward.clone(),
        patients: catalog.patients.clone(),
        alerts: catalog.alerts.clone(),
        medications: catalog.medications.clone(),
        nurse_notes: catalog.nurse_notes.clone(),
        test_orders: catalog.test_orders.clone(),
        test_results: catalog.test_results.clone(),
        prescriptions: catalog.prescriptions.clone(),
        refill_requests: catalog.refill_requests.clone(),
        approval_requests: catalog.approval_requests.clone(),
        clinical_reviews: catalog.clinical_reviews.clone(),
        incidents: catalog.incidents.clone(),
        events: catalog.events.clone(),
        staff: catalog.staff.clone(),
        referrals: catalog.referrals.clone(),
        therapy_sessions: catalog.therapy_sessions.clone(),
        diet_plans: catalog.diet_plans.clone(),
    }
}

/// Rejects empty or repeated keys within one collection.
fn check_unique<T>(
    collection: &'static str,
    items: &[T],
    key: impl Fn(&T) -> &str,
) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let id = key(item);
        if id.trim().is_empty() {
            return Err(CatalogError::InvalidInput(format!(
                "empty id in {collection}"
            )));
        }
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::TestOrderStatus;
    use crate::vocab::Urgency;
    use std::io::Write;

    const MINIMAL: &str = r#"ward:
  name: "Ward 7B"
  beds: ["A-01", "A-02"]
test_orders:
  - id: "TO-1"
    patient_id: "P-1"
    patient_name: "John Martinez"
    bed_number: "A-01"
    test_name: "Complete Blood Count"
    category: laboratory
    urgency: stat
    ordered_by: "Dr. Patel"
    ordered_at: "2024-03-14T07:30:00Z"
    status: ordered
"#;

    #[test]
    fn test_parses_minimal_catalog() {
        let catalog = Catalog::parse(MINIMAL).expect("parse minimal");
        assert_eq!(catalog.ward.name, "Ward 7B");
        assert_eq!(catalog.ward.beds.len(), 2);
        assert!(catalog.patients.is_empty());
        assert_eq!(catalog.test_orders.len(), 1);
        assert_eq!(catalog.test_orders[0].urgency, Urgency::Stat);
        assert_eq!(catalog.test_orders[0].status, TestOrderStatus::Ordered);
    }

    #[test]
    fn test_embedded_seed_is_valid() {
        let catalog = Catalog::seed().expect("seed parses");
        assert!(!catalog.patients.is_empty());
        assert!(!catalog.test_orders.is_empty());
        assert!(catalog
            .patients
            .iter()
            .any(|p| p.name == "John Martinez"));
        assert!(catalog.ward.beds.len() >= catalog.patients.len());
    }

    #[test]
    fn test_render_then_parse_preserves_seed() {
        let catalog = Catalog::seed().unwrap();
        let yaml = catalog.render().unwrap();
        let reparsed = Catalog::parse(&yaml).unwrap();
        assert_eq!(catalog, reparsed);
    }

    #[test]
    fn test_strict_validation_rejects_unknown_keys() {
        let input = MINIMAL.replace("    status: ordered", "    status: ordered\n    colour: red");
        let err = Catalog::parse(&input).expect_err("should reject unknown key");
        match err {
            CatalogError::Translation(msg) => {
                assert!(msg.contains("colour"), "{msg}");
                assert!(msg.contains("test_orders"), "{msg}");
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_status_outside_vocabulary() {
        let input = MINIMAL.replace("status: ordered", "status: lost");
        let err = Catalog::parse(&input).expect_err("should reject status");
        match err {
            CatalogError::Translation(msg) => assert!(msg.contains("status"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let input = MINIMAL.replace("beds: [\"A-01\", \"A-02\"]", "beds: [\"A-01\", \"A-01\"]");
        let err = Catalog::parse(&input).expect_err("should reject duplicate bed");
        match err {
            CatalogError::DuplicateId { collection, id } => {
                assert_eq!(collection, "beds");
                assert_eq!(id, "A-01");
            }
            other => panic!("expected DuplicateId error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_blank_ward_name() {
        let input = MINIMAL.replace("\"Ward 7B\"", "\"  \"");
        assert!(matches!(
            Catalog::parse(&input),
            Err(CatalogError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_reads_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let catalog = Catalog::load(file.path()).expect("load from file");
        assert_eq!(catalog.test_orders[0].id, "TO-1");
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Catalog::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
