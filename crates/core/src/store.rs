//! The in-memory ward store.
//!
//! [`WardStore`] owns one [`Collection`] per entity type and is the single source of truth every
//! view reads from. Workflow actions go through [`WardStore::perform`], which checks the actor's
//! role against the navigation table before applying the lifecycle rule. Forms go through the
//! `submit_*` methods.
//!
//! Nothing here is persisted. [`WardStore::to_catalog`] exports the current state in catalog form.

use crate::actor::{Actor, Stamp};
use crate::constants::{NURSE_NOTE_ID_PREFIX, PRESCRIPTION_ID_PREFIX, REFERRAL_ID_PREFIX};
use crate::error::{WardError, WardResult};
use crate::forms::{NurseNoteForm, PrescriptionForm, ReferralForm};
use crate::ids::new_entity_id;
use crate::lifecycle::{
    AlertAction, ApprovalAction, EntityKind, IncidentAction, Lifecycle, MedicationAction,
    PrescriptionAction, Record, ReferralAction, RefillAction, ResultAction, ReviewAction,
    SessionAction, TestOrderAction,
};
use crate::navigation::{profile, FormKind, WorkflowAction};
use crate::transition::{try_transition, Transitioned};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use ward_catalog::{
    Alert, ApprovalRequest, Availability, Catalog, ClinicalReview, DietPlan, Incident,
    MedicationDose, NurseNote, Patient, Prescription, PrescriptionStatus, Referral,
    ReferralStatus, RefillRequest, StaffMember, TestOrder, TestResult, TherapySession, WardEvent,
    WardInfo,
};

/// Records of one type, in seed order, addressable by id.
#[derive(Clone, Debug)]
pub struct Collection<T> {
    items: Vec<Arc<T>>,
    index: HashMap<String, usize>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    /// Builds a collection, rejecting repeated ids.
    pub fn new(items: Vec<T>) -> WardResult<Self> {
        let mut collection = Self::default();
        for item in items {
            collection.push(item)?;
        }
        Ok(collection)
    }

    pub fn items(&self) -> &[Arc<T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<T>> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    /// Like [`Collection::get`], failing with [`WardError::NotFound`].
    pub fn require(&self, id: &str) -> WardResult<&Arc<T>> {
        self.get(id).ok_or_else(|| WardError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
    }

    /// Appends a record.
    ///
    /// # Errors
    /// Returns [`WardError::DuplicateId`] if a record with the same id exists.
    pub fn push(&mut self, item: T) -> WardResult<Arc<T>> {
        if self.index.contains_key(item.id()) {
            return Err(WardError::DuplicateId {
                kind: T::KIND,
                id: item.id().to_string(),
            });
        }
        let item = Arc::new(item);
        self.index.insert(item.id().to_string(), self.items.len());
        self.items.push(Arc::clone(&item));
        Ok(item)
    }

    fn to_records(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().map(|item| T::clone(item)).collect()
    }
}

impl<T: Lifecycle> Collection<T> {
    /// Applies a lifecycle action to the record with `id`.
    pub fn apply(
        &mut self,
        id: &str,
        action: T::Action,
        stamp: &Stamp,
    ) -> WardResult<Transitioned<T>> {
        let done = try_transition(&self.items, id, action, stamp)?;
        self.items.clone_from(&done.items);
        Ok(done)
    }
}

/// Result of a workflow action, as reported back to the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub action: WorkflowAction,
    pub kind: EntityKind,
    pub id: String,
    pub from: String,
    pub to: String,
    /// `false` when the record already had the target status.
    pub changed: bool,
}

impl ActionOutcome {
    fn from_transition<T: Lifecycle>(action: WorkflowAction, done: Transitioned<T>) -> Self {
        Self {
            action,
            kind: T::KIND,
            id: done.entity.id().to_string(),
            from: done.from.to_string(),
            to: done.entity.status().to_string(),
            changed: done.changed,
        }
    }
}

/// All ward collections for the running session.
#[derive(Clone, Debug)]
pub struct WardStore {
    ward: WardInfo,
    patients: Collection<Patient>,
    alerts: Collection<Alert>,
    medications: Collection<MedicationDose>,
    nurse_notes: Collection<NurseNote>,
    test_orders: Collection<TestOrder>,
    test_results: Collection<TestResult>,
    prescriptions: Collection<Prescription>,
    refill_requests: Collection<RefillRequest>,
    approval_requests: Collection<ApprovalRequest>,
    clinical_reviews: Collection<ClinicalReview>,
    incidents: Collection<Incident>,
    events: Collection<WardEvent>,
    staff: Collection<StaffMember>,
    referrals: Collection<Referral>,
    therapy_sessions: Collection<TherapySession>,
    diet_plans: Collection<DietPlan>,
}

impl WardStore {
    /// Loads every collection from a parsed catalog.
    pub fn from_catalog(catalog: Catalog) -> WardResult<Self> {
        Ok(Self {
            ward: catalog.ward,
            patients: Collection::new(catalog.patients)?,
            alerts: Collection::new(catalog.alerts)?,
            medications: Collection::new(catalog.medications)?,
            nurse_notes: Collection::new(catalog.nurse_notes)?,
            test_orders: Collection::new(catalog.test_orders)?,
            test_results: Collection::new(catalog.test_results)?,
            prescriptions: Collection::new(catalog.prescriptions)?,
            refill_requests: Collection::new(catalog.refill_requests)?,
            approval_requests: Collection::new(catalog.approval_requests)?,
            clinical_reviews: Collection::new(catalog.clinical_reviews)?,
            incidents: Collection::new(catalog.incidents)?,
            events: Collection::new(catalog.events)?,
            staff: Collection::new(catalog.staff)?,
            referrals: Collection::new(catalog.referrals)?,
            therapy_sessions: Collection::new(catalog.therapy_sessions)?,
            diet_plans: Collection::new(catalog.diet_plans)?,
        })
    }

    /// Loads the embedded seed catalog.
    pub fn seeded() -> WardResult<Self> {
        Self::from_catalog(Catalog::seed()?)
    }

    /// Exports the current state.
    pub fn to_catalog(&self) -> Catalog {
        Catalog {
            ward: self.ward.clone(),
            patients: self.patients.to_records(),
            alerts: self.alerts.to_records(),
            medications: self.medications.to_records(),
            nurse_notes: self.nurse_notes.to_records(),
            test_orders: self.test_orders.to_records(),
            test_results: self.test_results.to_records(),
            prescriptions: self.prescriptions.to_records(),
            refill_requests: self.refill_requests.to_records(),
            approval_requests: self.approval_requests.to_records(),
            clinical_reviews: self.clinical_reviews.to_records(),
            incidents: self.incidents.to_records(),
            events: self.events.to_records(),
            staff: self.staff.to_records(),
            referrals: self.referrals.to_records(),
            therapy_sessions: self.therapy_sessions.to_records(),
            diet_plans: self.diet_plans.to_records(),
        }
    }

    pub fn ward(&self) -> &WardInfo {
        &self.ward
    }

    pub fn patients(&self) -> &[Arc<Patient>] {
        self.patients.items()
    }

    pub fn patient(&self, id: &str) -> WardResult<&Arc<Patient>> {
        self.patients.require(id)
    }

    pub fn alerts(&self) -> &[Arc<Alert>] {
        self.alerts.items()
    }

    pub fn medications(&self) -> &[Arc<MedicationDose>] {
        self.medications.items()
    }

    pub fn nurse_notes(&self) -> &[Arc<NurseNote>] {
        self.nurse_notes.items()
    }

    pub fn test_orders(&self) -> &[Arc<TestOrder>] {
        self.test_orders.items()
    }

    pub fn test_results(&self) -> &[Arc<TestResult>] {
        self.test_results.items()
    }

    pub fn prescriptions(&self) -> &[Arc<Prescription>] {
        self.prescriptions.items()
    }

    pub fn refill_requests(&self) -> &[Arc<RefillRequest>] {
        self.refill_requests.items()
    }

    pub fn approval_requests(&self) -> &[Arc<ApprovalRequest>] {
        self.approval_requests.items()
    }

    pub fn clinical_reviews(&self) -> &[Arc<ClinicalReview>] {
        self.clinical_reviews.items()
    }

    pub fn incidents(&self) -> &[Arc<Incident>] {
        self.incidents.items()
    }

    pub fn events(&self) -> &[Arc<WardEvent>] {
        self.events.items()
    }

    pub fn staff(&self) -> &[Arc<StaffMember>] {
        self.staff.items()
    }

    pub fn referrals(&self) -> &[Arc<Referral>] {
        self.referrals.items()
    }

    pub fn therapy_sessions(&self) -> &[Arc<TherapySession>] {
        self.therapy_sessions.items()
    }

    pub fn diet_plans(&self) -> &[Arc<DietPlan>] {
        self.diet_plans.items()
    }

    /// Performs a workflow action on the record with `id`, stamped now.
    pub fn perform(
        &mut self,
        actor: &Actor,
        action: WorkflowAction,
        id: &str,
    ) -> WardResult<ActionOutcome> {
        self.perform_at(actor, action, id, Utc::now())
    }

    /// Performs a workflow action stamped at `at`.
    ///
    /// # Errors
    /// - [`WardError::ActionNotPermitted`] if the actor's role does not expose `action`, or the
    ///   record belongs to another department than the role's.
    /// - [`WardError::NotFound`] if no record of the action's entity type has `id`.
    /// - [`WardError::InvalidTransition`] if the record's status does not allow `action`.
    pub fn perform_at(
        &mut self,
        actor: &Actor,
        action: WorkflowAction,
        id: &str,
        at: DateTime<Utc>,
    ) -> WardResult<ActionOutcome> {
        if !profile(actor.role).allows(action) {
            tracing::warn!("{} rejected for role {} on {}", action, actor.role, id);
            return Err(WardError::ActionNotPermitted {
                role: actor.role,
                action: action.to_string(),
            });
        }

        let stamp = actor.stamp_at(at);
        let result = self
            .check_scope(actor, action, id)
            .and_then(|()| self.dispatch(action, id, &stamp));

        match &result {
            Ok(outcome) if outcome.changed => tracing::info!(
                "{} {} {}: {} -> {} by {}",
                action,
                outcome.kind,
                outcome.id,
                outcome.from,
                outcome.to,
                stamp.by
            ),
            Ok(outcome) => tracing::debug!(
                "{} {} {}: already {}",
                action,
                outcome.kind,
                outcome.id,
                outcome.to
            ),
            Err(e) => tracing::warn!("{} on {} failed: {}", action, id, e),
        }
        result
    }

    /// Rejects actions on another department's test orders, results or referrals.
    fn check_scope(&self, actor: &Actor, action: WorkflowAction, id: &str) -> WardResult<()> {
        use WorkflowAction as W;

        let profile = profile(actor.role);
        let in_scope = match (action, profile.test_category, profile.service) {
            (
                W::ScheduleTest
                | W::CollectSample
                | W::StartTest
                | W::CompleteTest
                | W::AdvanceTest,
                Some(category),
                _,
            ) => self.test_orders.require(id)?.category == category,
            (W::NotifyResult, Some(category), _) => {
                let result = self.test_results.require(id)?;
                self.test_orders
                    .get(&result.order_id)
                    .is_some_and(|order| order.category == category)
            }
            (W::AcceptReferral | W::CompleteReferral, _, Some(service)) => {
                self.referrals.require(id)?.service == service
            }
            _ => true,
        };

        if in_scope {
            Ok(())
        } else {
            Err(WardError::ActionNotPermitted {
                role: actor.role,
                action: format!("{action} on {id}"),
            })
        }
    }

    fn dispatch(
        &mut self,
        action: WorkflowAction,
        id: &str,
        stamp: &Stamp,
    ) -> WardResult<ActionOutcome> {
        use WorkflowAction as W;

        let outcome = match action {
            W::AcknowledgeAlert => ActionOutcome::from_transition(
                action,
                self.alerts.apply(id, AlertAction::Acknowledge, stamp)?,
            ),
            W::MarkMedicationDue => ActionOutcome::from_transition(
                action,
                self.medications.apply(id, MedicationAction::MarkDue, stamp)?,
            ),
            W::AdministerMedication => ActionOutcome::from_transition(
                action,
                self.medications.apply(id, MedicationAction::Administer, stamp)?,
            ),
            W::MarkMedicationMissed => ActionOutcome::from_transition(
                action,
                self.medications.apply(id, MedicationAction::MarkMissed, stamp)?,
            ),
            W::ScheduleTest => ActionOutcome::from_transition(
                action,
                self.test_orders.apply(id, TestOrderAction::Schedule, stamp)?,
            ),
            W::CollectSample => ActionOutcome::from_transition(
                action,
                self.test_orders.apply(id, TestOrderAction::Collect, stamp)?,
            ),
            W::StartTest => ActionOutcome::from_transition(
                action,
                self.test_orders.apply(id, TestOrderAction::Start, stamp)?,
            ),
            W::CompleteTest => ActionOutcome::from_transition(
                action,
                self.test_orders.apply(id, TestOrderAction::Complete, stamp)?,
            ),
            W::AdvanceTest => ActionOutcome::from_transition(
                action,
                self.test_orders.apply(id, TestOrderAction::Advance, stamp)?,
            ),
            W::NotifyResult => ActionOutcome::from_transition(
                action,
                self.test_results.apply(id, ResultAction::Notify, stamp)?,
            ),
            W::ReviewResult => ActionOutcome::from_transition(
                action,
                self.test_results.apply(id, ResultAction::Review, stamp)?,
            ),
            W::ApproveRequest => ActionOutcome::from_transition(
                action,
                self.approval_requests.apply(id, ApprovalAction::Approve, stamp)?,
            ),
            W::DenyRequest => ActionOutcome::from_transition(
                action,
                self.approval_requests.apply(id, ApprovalAction::Deny, stamp)?,
            ),
            W::StartReview => ActionOutcome::from_transition(
                action,
                self.clinical_reviews.apply(id, ReviewAction::Start, stamp)?,
            ),
            W::CompleteReview => ActionOutcome::from_transition(
                action,
                self.clinical_reviews.apply(id, ReviewAction::Complete, stamp)?,
            ),
            W::CompletePrescription => ActionOutcome::from_transition(
                action,
                self.prescriptions.apply(id, PrescriptionAction::Complete, stamp)?,
            ),
            W::DiscontinuePrescription => ActionOutcome::from_transition(
                action,
                self.prescriptions.apply(id, PrescriptionAction::Discontinue, stamp)?,
            ),
            W::ApproveRefill => ActionOutcome::from_transition(
                action,
                self.refill_requests.apply(id, RefillAction::Approve, stamp)?,
            ),
            W::RejectRefill => ActionOutcome::from_transition(
                action,
                self.refill_requests.apply(id, RefillAction::Reject, stamp)?,
            ),
            W::ResolveIncident => ActionOutcome::from_transition(
                action,
                self.incidents.apply(id, IncidentAction::Resolve, stamp)?,
            ),
            W::CloseIncident => ActionOutcome::from_transition(
                action,
                self.incidents.apply(id, IncidentAction::Close, stamp)?,
            ),
            W::AcceptReferral => ActionOutcome::from_transition(
                action,
                self.referrals.apply(id, ReferralAction::Accept, stamp)?,
            ),
            W::CompleteReferral => ActionOutcome::from_transition(
                action,
                self.referrals.apply(id, ReferralAction::Complete, stamp)?,
            ),
            W::CompleteSession => ActionOutcome::from_transition(
                action,
                self.therapy_sessions.apply(id, SessionAction::Complete, stamp)?,
            ),
            W::CancelSession => ActionOutcome::from_transition(
                action,
                self.therapy_sessions.apply(id, SessionAction::Cancel, stamp)?,
            ),
        };
        Ok(outcome)
    }

    fn check_form(&self, actor: &Actor, form: FormKind) -> WardResult<()> {
        if profile(actor.role).allows_form(form) {
            return Ok(());
        }
        tracing::warn!("{} form rejected for role {}", form, actor.role);
        Err(WardError::ActionNotPermitted {
            role: actor.role,
            action: format!("{form} form"),
        })
    }

    /// Adds a nurse note written by `actor`.
    pub fn submit_nurse_note(
        &mut self,
        actor: &Actor,
        form: &NurseNoteForm,
    ) -> WardResult<Arc<NurseNote>> {
        self.check_form(actor, FormKind::NurseNote)?;
        let valid = form.validate()?;
        let patient = Arc::clone(self.patients.require(valid.patient_id.as_str())?);
        let stamp = actor.stamp_now();

        let note = self.nurse_notes.push(NurseNote {
            id: new_entity_id(NURSE_NOTE_ID_PREFIX),
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            category: valid.category,
            text: valid.text.into_string(),
            written_by: stamp.by,
            written_at: stamp.at,
        })?;
        tracing::info!("nurse note {} added for {}", note.id, note.patient_name);
        Ok(note)
    }

    /// Adds an active prescription written by `actor`.
    ///
    /// Stock is assumed available until the pharmacy says otherwise.
    pub fn submit_prescription(
        &mut self,
        actor: &Actor,
        form: &PrescriptionForm,
    ) -> WardResult<Arc<Prescription>> {
        self.check_form(actor, FormKind::Prescription)?;
        let valid = form.validate()?;
        let patient = Arc::clone(self.patients.require(valid.patient_id.as_str())?);
        let stamp = actor.stamp_now();

        let prescription = self.prescriptions.push(Prescription {
            id: new_entity_id(PRESCRIPTION_ID_PREFIX),
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            bed_number: patient.bed_number.clone(),
            medication: valid.medication.into_string(),
            dose: valid.dose.into_string(),
            frequency: valid.frequency.into_string(),
            urgency: valid.urgency,
            availability: Availability::InStock,
            prescribed_by: stamp.by,
            prescribed_at: stamp.at,
            status: PrescriptionStatus::Active,
            closed_by: None,
            closed_at: None,
        })?;
        tracing::info!(
            "prescription {} ({}) added for {}",
            prescription.id,
            prescription.medication,
            prescription.patient_name
        );
        Ok(prescription)
    }

    /// Adds a pending referral written by `actor`.
    pub fn submit_referral(
        &mut self,
        actor: &Actor,
        form: &ReferralForm,
    ) -> WardResult<Arc<Referral>> {
        self.check_form(actor, FormKind::Referral)?;
        let valid = form.validate()?;
        let patient = Arc::clone(self.patients.require(valid.patient_id.as_str())?);
        let stamp = actor.stamp_now();

        let referral = self.referrals.push(Referral {
            id: new_entity_id(REFERRAL_ID_PREFIX),
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            bed_number: patient.bed_number.clone(),
            service: valid.service,
            reason: valid.reason.into_string(),
            urgency: valid.urgency,
            referred_by: stamp.by,
            referred_at: stamp.at,
            status: ReferralStatus::Pending,
            handled_by: None,
            updated_at: None,
        })?;
        tracing::info!(
            "{} referral {} added for {}",
            referral.service,
            referral.id,
            referral.patient_name
        );
        Ok(referral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_catalog::{
        AlertStatus, ApprovalStatus, MedicationStatus, NoteCategory, Role, Service,
        TestOrderStatus, Urgency,
    };

    fn store() -> WardStore {
        WardStore::seeded().unwrap()
    }

    fn at() -> DateTime<Utc> {
        "2024-03-14T11:00:00Z".parse().unwrap()
    }

    fn actor(role: Role) -> Actor {
        Actor::new("Test Staff", role).unwrap()
    }

    #[test]
    fn test_seed_loads_every_collection() {
        let store = store();
        assert_eq!(store.patients().len(), 8);
        assert_eq!(store.test_orders().len(), 11);
        assert!(!store.alerts().is_empty());
        assert!(!store.diet_plans().is_empty());
    }

    #[test]
    fn test_nurse_acknowledges_alert() {
        let mut store = store();
        let before = store.alerts().to_vec();
        let outcome = store
            .perform_at(&actor(Role::Nurse), WorkflowAction::AcknowledgeAlert, "AL-001", at())
            .unwrap();

        assert!(outcome.changed);
        assert_eq!(outcome.kind, EntityKind::Alert);
        assert_eq!(outcome.from, "unacknowledged");
        assert_eq!(outcome.to, "acknowledged");

        let alert = &store.alerts()[0];
        assert_eq!(alert.status(), AlertStatus::Acknowledged);
        assert_eq!(alert.acknowledged_by.as_deref(), Some("Test Staff"));
        assert_eq!(alert.acknowledged_at, Some(at()));
        for (after, before) in store.alerts().iter().zip(&before).skip(1) {
            assert!(Arc::ptr_eq(after, before));
        }
    }

    #[test]
    fn test_role_without_action_is_rejected() {
        let mut store = store();
        let err = store
            .perform_at(&actor(Role::Pharmacist), WorkflowAction::AcknowledgeAlert, "AL-001", at())
            .unwrap_err();
        assert!(matches!(
            err,
            WardError::ActionNotPermitted { role: Role::Pharmacist, .. }
        ));
        assert_eq!(store.alerts()[0].status(), AlertStatus::Unacknowledged);
    }

    #[test]
    fn test_ward_incharge_cannot_touch_incidents() {
        let mut store = store();
        let err = store
            .perform_at(&actor(Role::WardIncharge), WorkflowAction::ResolveIncident, "IN-001", at())
            .unwrap_err();
        assert!(matches!(err, WardError::ActionNotPermitted { .. }));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut store = store();
        let err = store
            .perform_at(&actor(Role::Doctor), WorkflowAction::ApproveRequest, "AP-999", at())
            .unwrap_err();
        assert!(matches!(
            err,
            WardError::NotFound { kind: EntityKind::ApprovalRequest, ref id } if id == "AP-999"
        ));
    }

    #[test]
    fn test_decided_approval_cannot_flip() {
        let mut store = store();
        let doctor = actor(Role::Doctor);
        store
            .perform_at(&doctor, WorkflowAction::ApproveRequest, "AP-001", at())
            .unwrap();
        let err = store
            .perform_at(&doctor, WorkflowAction::DenyRequest, "AP-001", at())
            .unwrap_err();
        assert!(matches!(err, WardError::InvalidTransition { .. }));
        let again = store
            .perform_at(&doctor, WorkflowAction::ApproveRequest, "AP-001", at())
            .unwrap();
        assert!(!again.changed);
        assert_eq!(
            store.approval_requests()[0].status,
            ApprovalStatus::Approved
        );
    }

    #[test]
    fn test_lab_technician_walks_an_order_to_completion() {
        let mut store = store();
        let tech = actor(Role::LabTechnician);
        for _ in 0..4 {
            store
                .perform_at(&tech, WorkflowAction::AdvanceTest, "TO-001", at())
                .unwrap();
        }
        let order = store.test_orders.require("TO-001").unwrap();
        assert_eq!(order.status, TestOrderStatus::Completed);
        assert_eq!(order.collected_by.as_deref(), Some("Test Staff"));
        assert!(store
            .perform_at(&tech, WorkflowAction::AdvanceTest, "TO-001", at())
            .is_err());
    }

    #[test]
    fn test_lab_technician_cannot_touch_imaging_orders() {
        let mut store = store();
        let err = store
            .perform_at(&actor(Role::LabTechnician), WorkflowAction::CollectSample, "TO-006", at())
            .unwrap_err();
        assert!(matches!(
            err,
            WardError::ActionNotPermitted { role: Role::LabTechnician, .. }
        ));
        let order = store.test_orders.require("TO-006").unwrap();
        assert_eq!(order.status, TestOrderStatus::Ordered);
    }

    #[test]
    fn test_radiologist_cannot_touch_lab_orders() {
        let mut store = store();
        let radiologist = actor(Role::Radiologist);
        assert!(matches!(
            store.perform_at(&radiologist, WorkflowAction::AdvanceTest, "TO-001", at()),
            Err(WardError::ActionNotPermitted { .. })
        ));
        assert_eq!(
            store.test_orders.require("TO-001").unwrap().status,
            TestOrderStatus::Ordered
        );

        // TR-001 reports on lab order TO-005
        assert!(matches!(
            store.perform_at(&radiologist, WorkflowAction::NotifyResult, "TR-001", at()),
            Err(WardError::ActionNotPermitted { .. })
        ));
        let outcome = store
            .perform_at(&radiologist, WorkflowAction::AdvanceTest, "TO-006", at())
            .unwrap();
        assert_eq!(outcome.to, "scheduled");
    }

    #[test]
    fn test_referrals_are_scoped_to_service() {
        let mut store = store();
        assert!(matches!(
            store.perform_at(
                &actor(Role::Nutritionist),
                WorkflowAction::AcceptReferral,
                "RE-004",
                at()
            ),
            Err(WardError::ActionNotPermitted { role: Role::Nutritionist, .. })
        ));
        assert!(matches!(
            store.perform_at(
                &actor(Role::PhysicalTherapist),
                WorkflowAction::AcceptReferral,
                "RE-001",
                at()
            ),
            Err(WardError::ActionNotPermitted { .. })
        ));
        let outcome = store
            .perform_at(&actor(Role::Nutritionist), WorkflowAction::AcceptReferral, "RE-001", at())
            .unwrap();
        assert_eq!(outcome.to, "accepted");
    }

    #[test]
    fn test_scope_check_reports_unknown_ids() {
        let mut store = store();
        assert!(matches!(
            store.perform_at(&actor(Role::LabTechnician), WorkflowAction::StartTest, "TO-404", at()),
            Err(WardError::NotFound { kind: EntityKind::TestOrder, .. })
        ));
    }

    #[test]
    fn test_nurse_administers_due_dose() {
        let mut store = store();
        let outcome = store
            .perform_at(&actor(Role::Nurse), WorkflowAction::AdministerMedication, "MD-002", at())
            .unwrap();
        assert_eq!(outcome.from, "due");
        let dose = store.medications.require("MD-002").unwrap();
        assert_eq!(dose.status, MedicationStatus::Administered);
        assert_eq!(dose.recorded_at, Some(at()));
    }

    #[test]
    fn test_nurse_note_form() {
        let mut store = store();
        let note = store
            .submit_nurse_note(
                &actor(Role::Nurse),
                &NurseNoteForm {
                    patient_id: "P-001".into(),
                    category: NoteCategory::Observation,
                    text: "Resting comfortably after nebuliser.".into(),
                },
            )
            .unwrap();
        assert!(note.id.starts_with("NN-"));
        assert_eq!(note.patient_name, "John Martinez");
        assert_eq!(note.written_by, "Test Staff");
        assert!(store.nurse_notes.get(&note.id).is_some());
    }

    #[test]
    fn test_form_for_unknown_patient_is_rejected() {
        let mut store = store();
        let count = store.prescriptions().len();
        let err = store
            .submit_prescription(
                &actor(Role::Doctor),
                &PrescriptionForm {
                    patient_id: "P-404".into(),
                    medication: "Paracetamol".into(),
                    dose: "1 g".into(),
                    frequency: "QDS".into(),
                    urgency: Urgency::Routine,
                },
            )
            .unwrap_err();
        assert!(matches!(err, WardError::NotFound { kind: EntityKind::Patient, .. }));
        assert_eq!(store.prescriptions().len(), count);
    }

    #[test]
    fn test_referral_form_requires_doctor() {
        let mut store = store();
        let form = ReferralForm {
            patient_id: "P-002".into(),
            service: Service::Physiotherapy,
            reason: "Deconditioning after prolonged bed rest".into(),
            urgency: Urgency::Routine,
        };
        assert!(matches!(
            store.submit_referral(&actor(Role::Nurse), &form),
            Err(WardError::ActionNotPermitted { .. })
        ));
        let referral = store.submit_referral(&actor(Role::Doctor), &form).unwrap();
        assert_eq!(referral.status, ReferralStatus::Pending);

        let outcome = store
            .perform_at(
                &actor(Role::PhysicalTherapist),
                WorkflowAction::AcceptReferral,
                &referral.id,
                at(),
            )
            .unwrap();
        assert_eq!(outcome.to, "accepted");
    }

    #[test]
    fn test_export_reflects_changes() {
        let mut store = store();
        store
            .perform_at(&actor(Role::Pharmacist), WorkflowAction::ApproveRefill, "RF-001", at())
            .unwrap();
        let catalog = store.to_catalog();
        let reparsed = Catalog::parse(&catalog.render().unwrap()).unwrap();
        let refill = reparsed
            .refill_requests
            .iter()
            .find(|r| r.id == "RF-001")
            .unwrap();
        assert_eq!(refill.decided_by.as_deref(), Some("Test Staff"));
        assert_eq!(reparsed.patients.len(), 8);
    }
}
