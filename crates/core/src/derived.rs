//! Values computed from the store rather than stored on records.
//!
//! Flags such as "this patient has tests pending" and the top-bar badge counts are derived here
//! on every render, so they cannot drift from the collections they summarise.

use crate::filter::{count_by, count_where, Count};
use crate::navigation::profile;
use crate::store::WardStore;
use serde::Serialize;
use std::sync::Arc;
use ward_catalog::{
    Alert, AlertStatus, ApprovalRequest, ApprovalStatus, Availability, ClinicalReview,
    IncidentStatus, MedicationDose, MedicationStatus, Patient, PatientCondition, Prescription,
    PrescriptionStatus, Referral, ReferralStatus, RefillRequest, RefillStatus, ResultFlag,
    ResultStatus, ReviewStatus, Role, Service, SessionStatus, Severity, TestCategory, TestOrder,
    TestOrderStatus, TestResult, TherapySession,
};

/// True iff any test order for the patient is not yet completed.
pub fn test_pending(orders: &[Arc<TestOrder>], patient_id: &str) -> bool {
    orders
        .iter()
        .any(|o| o.patient_id == patient_id && o.status != TestOrderStatus::Completed)
}

/// Unacknowledged alerts raised for the patient.
pub fn active_alerts(alerts: &[Arc<Alert>], patient_id: &str) -> usize {
    alerts
        .iter()
        .filter(|a| a.patient_id == patient_id && !a.acknowledged)
        .count()
}

/// One row of the patients tab.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatientSummary {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub bed_number: String,
    pub diagnosis: String,
    pub condition: PatientCondition,
    pub attending_doctor: String,
    pub allergies: Vec<String>,
    pub test_pending: bool,
    pub active_alerts: usize,
}

/// Summaries for `patients`, in the order given.
pub fn patient_summaries<'a>(
    patients: impl IntoIterator<Item = &'a Arc<Patient>>,
    orders: &[Arc<TestOrder>],
    alerts: &[Arc<Alert>],
) -> Vec<PatientSummary> {
    patients
        .into_iter()
        .map(|p| PatientSummary {
            id: p.id.clone(),
            name: p.name.clone(),
            age: p.age,
            bed_number: p.bed_number.clone(),
            diagnosis: p.diagnosis.clone(),
            condition: p.condition,
            attending_doctor: p.attending_doctor.clone(),
            allergies: p.allergies.clone(),
            test_pending: test_pending(orders, &p.id),
            active_alerts: active_alerts(alerts, &p.id),
        })
        .collect()
}

/// Occupancy of one configured bed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BedStatus {
    pub bed_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<PatientCondition>,
}

impl BedStatus {
    pub fn occupied(&self) -> bool {
        self.patient_id.is_some()
    }
}

/// Every configured bed, occupied iff some patient's bed number equals it.
pub fn bed_occupancy(beds: &[String], patients: &[Arc<Patient>]) -> Vec<BedStatus> {
    beds.iter()
        .map(|bed| {
            let patient = patients.iter().find(|p| &p.bed_number == bed);
            BedStatus {
                bed_number: bed.clone(),
                patient_id: patient.map(|p| p.id.clone()),
                patient_name: patient.map(|p| p.name.clone()),
                condition: patient.map(|p| p.condition),
            }
        })
        .collect()
}

/// Badge counts shown in the top bar for every role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopBar {
    pub ward_name: String,
    pub critical_alerts: usize,
    pub medications_due: usize,
    pub pending_approvals: usize,
}

impl TopBar {
    pub fn from_store(store: &WardStore) -> Self {
        Self {
            ward_name: store.ward().name.clone(),
            critical_alerts: store
                .alerts()
                .iter()
                .filter(|a| a.severity == Severity::Critical && !a.acknowledged)
                .count(),
            medications_due: store
                .medications()
                .iter()
                .filter(|m| matches!(m.status, MedicationStatus::Due | MedicationStatus::Missed))
                .count(),
            pending_approvals: count_where(
                store.approval_requests(),
                |a: &ApprovalRequest| a.status,
                ApprovalStatus::Pending,
            ),
        }
    }
}

/// A headline number on a role dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: usize,
}

/// A per-dimension breakdown on a role dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub label: &'static str,
    pub counts: Vec<Count>,
}

/// The dashboard (or overview) tab for one role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub role: Role,
    pub title: &'static str,
    pub metrics: Vec<Metric>,
    pub breakdowns: Vec<Breakdown>,
}

fn metric(label: &'static str, value: usize) -> Metric {
    Metric { label, value }
}

fn breakdown(label: &'static str, counts: Vec<Count>) -> Breakdown {
    Breakdown { label, counts }
}

/// Test orders fulfilled by one department.
pub fn orders_in(store: &WardStore, category: TestCategory) -> Vec<Arc<TestOrder>> {
    store
        .test_orders()
        .iter()
        .filter(|o| o.category == category)
        .cloned()
        .collect()
}

/// Results reported against one department's orders.
pub fn results_in(store: &WardStore, category: TestCategory) -> Vec<Arc<TestResult>> {
    store
        .test_results()
        .iter()
        .filter(|r| {
            store
                .test_orders()
                .iter()
                .any(|o| o.id == r.order_id && o.category == category)
        })
        .cloned()
        .collect()
}

/// Referrals to one service.
pub fn referrals_for(store: &WardStore, service: Service) -> Vec<Arc<Referral>> {
    store
        .referrals()
        .iter()
        .filter(|r| r.service == service)
        .cloned()
        .collect()
}

fn test_dashboard(store: &WardStore, category: TestCategory) -> (Vec<Metric>, Vec<Breakdown>) {
    let orders = orders_in(store, category);
    let results = results_in(store, category);
    let open = orders
        .iter()
        .filter(|o| o.status != TestOrderStatus::Completed)
        .count();
    (
        vec![
            metric("open orders", open),
            metric(
                "stat orders",
                orders
                    .iter()
                    .filter(|o| {
                        o.urgency == ward_catalog::Urgency::Stat
                            && o.status != TestOrderStatus::Completed
                    })
                    .count(),
            ),
            metric(
                "critical results",
                count_where(&results, |r: &TestResult| r.flag, ResultFlag::Critical),
            ),
            metric(
                "results awaiting notification",
                count_where(&results, |r: &TestResult| r.status, ResultStatus::Reported),
            ),
        ],
        vec![
            breakdown("orders by status", count_by(&orders, |o: &TestOrder| o.status)),
            breakdown("orders by urgency", count_by(&orders, |o: &TestOrder| o.urgency)),
        ],
    )
}

/// Builds the summary shown on `role`'s default tab.
pub fn dashboard(store: &WardStore, role: Role) -> DashboardSummary {
    let (metrics, breakdowns) = match role {
        Role::Nurse => (
            vec![
                metric("patients", store.patients().len()),
                metric(
                    "unacknowledged alerts",
                    count_where(store.alerts(), Alert::status, AlertStatus::Unacknowledged),
                ),
                metric(
                    "medications due",
                    count_where(
                        store.medications(),
                        |m: &MedicationDose| m.status,
                        MedicationStatus::Due,
                    ),
                ),
                metric(
                    "medications missed",
                    count_where(
                        store.medications(),
                        |m: &MedicationDose| m.status,
                        MedicationStatus::Missed,
                    ),
                ),
                metric("scheduled events", store.events().len()),
            ],
            vec![
                breakdown("alerts by severity", count_by(store.alerts(), |a: &Alert| a.severity)),
                breakdown(
                    "medications by status",
                    count_by(store.medications(), |m: &MedicationDose| m.status),
                ),
            ],
        ),
        Role::Doctor => (
            vec![
                metric(
                    "critical patients",
                    count_where(
                        store.patients(),
                        |p: &Patient| p.condition,
                        PatientCondition::Critical,
                    ),
                ),
                metric(
                    "pending approvals",
                    count_where(
                        store.approval_requests(),
                        |a: &ApprovalRequest| a.status,
                        ApprovalStatus::Pending,
                    ),
                ),
                metric(
                    "open reviews",
                    store
                        .clinical_reviews()
                        .iter()
                        .filter(|r| r.status != ReviewStatus::Completed)
                        .count(),
                ),
                metric(
                    "results to review",
                    store
                        .test_results()
                        .iter()
                        .filter(|r| r.status != ResultStatus::Reviewed)
                        .count(),
                ),
            ],
            vec![
                breakdown(
                    "approvals by priority",
                    count_by(store.approval_requests(), |a: &ApprovalRequest| a.priority),
                ),
                breakdown(
                    "reviews by status",
                    count_by(store.clinical_reviews(), |r: &ClinicalReview| r.status),
                ),
            ],
        ),
        Role::WardIncharge => {
            let beds = bed_occupancy(&store.ward().beds, store.patients());
            let occupied = beds.iter().filter(|b| b.occupied()).count();
            (
                vec![
                    metric("beds", beds.len()),
                    metric("occupied beds", occupied),
                    metric("available beds", beds.len() - occupied),
                    metric(
                        "staff on duty",
                        store.staff().iter().filter(|s| s.on_duty).count(),
                    ),
                    metric(
                        "open incidents",
                        store
                            .incidents()
                            .iter()
                            .filter(|i| i.status != IncidentStatus::Closed)
                            .count(),
                    ),
                ],
                vec![
                    breakdown(
                        "patients by condition",
                        count_by(store.patients(), |p: &Patient| p.condition),
                    ),
                    breakdown(
                        "incidents by status",
                        count_by(store.incidents(), |i: &ward_catalog::Incident| i.status),
                    ),
                ],
            )
        }
        Role::LabTechnician => test_dashboard(store, TestCategory::Laboratory),
        Role::Radiologist => test_dashboard(store, TestCategory::Imaging),
        Role::Pharmacist => (
            vec![
                metric(
                    "active prescriptions",
                    count_where(
                        store.prescriptions(),
                        |p: &Prescription| p.status,
                        PrescriptionStatus::Active,
                    ),
                ),
                metric(
                    "pending refills",
                    count_where(
                        store.refill_requests(),
                        |r: &RefillRequest| r.status,
                        RefillStatus::Pending,
                    ),
                ),
                metric(
                    "out of stock",
                    count_where(
                        store.prescriptions(),
                        |p: &Prescription| p.availability,
                        Availability::OutOfStock,
                    ),
                ),
            ],
            vec![
                breakdown(
                    "prescriptions by urgency",
                    count_by(store.prescriptions(), |p: &Prescription| p.urgency),
                ),
                breakdown(
                    "stock levels",
                    count_by(store.prescriptions(), |p: &Prescription| p.availability),
                ),
            ],
        ),
        Role::Nutritionist => {
            let referrals = referrals_for(store, Service::Nutrition);
            (
                vec![
                    metric(
                        "pending referrals",
                        count_where(&referrals, |r: &Referral| r.status, ReferralStatus::Pending),
                    ),
                    metric("diet plans", store.diet_plans().len()),
                ],
                vec![breakdown(
                    "referrals by status",
                    count_by(&referrals, |r: &Referral| r.status),
                )],
            )
        }
        Role::PhysicalTherapist => {
            let referrals = referrals_for(store, Service::Physiotherapy);
            (
                vec![
                    metric(
                        "pending referrals",
                        count_where(&referrals, |r: &Referral| r.status, ReferralStatus::Pending),
                    ),
                    metric(
                        "scheduled sessions",
                        count_where(
                            store.therapy_sessions(),
                            |s: &TherapySession| s.status,
                            SessionStatus::Scheduled,
                        ),
                    ),
                ],
                vec![
                    breakdown("referrals by status", count_by(&referrals, |r: &Referral| r.status)),
                    breakdown(
                        "sessions by status",
                        count_by(store.therapy_sessions(), |s: &TherapySession| s.status),
                    ),
                ],
            )
        }
    };

    DashboardSummary {
        role,
        title: profile(role).label,
        metrics,
        breakdowns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Actor;
    use crate::navigation::WorkflowAction;
    use chrono::{DateTime, Utc};

    fn at() -> DateTime<Utc> {
        "2024-03-14T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_pending_follows_orders() {
        let mut store = WardStore::seeded().unwrap();
        let tech = Actor::new("Omar Haddad", Role::LabTechnician).unwrap();
        let radiologist = Actor::new("Dr. Alan Reyes", Role::Radiologist).unwrap();

        let patient_id = store
            .test_orders()
            .iter()
            .find(|o| o.id == "TO-001")
            .map(|o| o.patient_id.clone())
            .unwrap();
        let open: Vec<(String, TestCategory)> = store
            .test_orders()
            .iter()
            .filter(|o| o.patient_id == patient_id && o.status != TestOrderStatus::Completed)
            .map(|o| (o.id.clone(), o.category))
            .collect();
        assert!(test_pending(store.test_orders(), &patient_id));

        for (id, category) in &open {
            let actor = match category {
                TestCategory::Laboratory => &tech,
                TestCategory::Imaging => &radiologist,
            };
            while store
                .perform_at(actor, WorkflowAction::AdvanceTest, id, at())
                .is_ok()
            {}
        }
        assert!(!test_pending(store.test_orders(), &patient_id));
    }

    #[test]
    fn test_patient_without_orders_has_nothing_pending() {
        assert!(!test_pending(&[], "P-001"));
    }

    #[test]
    fn test_bed_occupancy_matches_by_bed_number() {
        let store = WardStore::seeded().unwrap();
        let beds = bed_occupancy(&store.ward().beds, store.patients());
        assert_eq!(beds.len(), store.ward().beds.len());
        assert_eq!(
            beds.iter().filter(|b| b.occupied()).count(),
            store.patients().len()
        );
        let a01 = beds.iter().find(|b| b.bed_number == "A-01").unwrap();
        assert_eq!(a01.patient_name.as_deref(), Some("John Martinez"));
    }

    #[test]
    fn test_top_bar_counts_are_derived() {
        let mut store = WardStore::seeded().unwrap();
        let before = TopBar::from_store(&store);
        assert!(before.critical_alerts > 0);

        let critical = store
            .alerts()
            .iter()
            .find(|a| a.severity == Severity::Critical && !a.acknowledged)
            .map(|a| a.id.clone())
            .unwrap();
        let nurse = Actor::new("Emma Davis", Role::Nurse).unwrap();
        store
            .perform_at(&nurse, WorkflowAction::AcknowledgeAlert, &critical, at())
            .unwrap();

        let after = TopBar::from_store(&store);
        assert_eq!(after.critical_alerts, before.critical_alerts - 1);
        assert_eq!(after.medications_due, before.medications_due);
    }

    #[test]
    fn test_every_role_has_a_dashboard() {
        let store = WardStore::seeded().unwrap();
        for role in Role::ALL {
            let summary = dashboard(&store, *role);
            assert_eq!(summary.role, *role);
            assert!(!summary.metrics.is_empty());
        }
    }

    #[test]
    fn test_patient_summaries_carry_derived_flags() {
        let store = WardStore::seeded().unwrap();
        let rows = patient_summaries(store.patients(), store.test_orders(), store.alerts());
        assert_eq!(rows.len(), store.patients().len());
        let john = rows.iter().find(|r| r.name == "John Martinez").unwrap();
        assert!(john.active_alerts > 0);
    }
}
