//! Status lifecycles of the ward's workflow entities.
//!
//! Each entity with a status gets a small action enum and a transition table expressed as a
//! `match` on `(from, action)`. An action taken from the state it settles on maps back onto that
//! state, so re-applying it is accepted and changes nothing.

use crate::actor::Stamp;
use std::fmt;
use ward_catalog::{
    Alert, AlertStatus, ApprovalRequest, ApprovalStatus, ClinicalReview, DietPlan, Incident,
    IncidentStatus, MedicationDose, MedicationStatus, NurseNote, Patient, Prescription,
    PrescriptionStatus, Referral, ReferralStatus, RefillRequest, RefillStatus, ResultStatus,
    ReviewStatus, SessionStatus, StaffMember, TestOrder, TestOrderStatus, TestResult,
    TherapySession, WardEvent,
};

/// Kind of record held in the store, used in errors and log fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Patient,
    Alert,
    Medication,
    NurseNote,
    TestOrder,
    TestResult,
    Prescription,
    RefillRequest,
    ApprovalRequest,
    ClinicalReview,
    Incident,
    WardEvent,
    StaffMember,
    Referral,
    TherapySession,
    DietPlan,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Alert => "alert",
            Self::Medication => "medication",
            Self::NurseNote => "nurse note",
            Self::TestOrder => "test order",
            Self::TestResult => "test result",
            Self::Prescription => "prescription",
            Self::RefillRequest => "refill request",
            Self::ApprovalRequest => "approval request",
            Self::ClinicalReview => "clinical review",
            Self::Incident => "incident",
            Self::WardEvent => "ward event",
            Self::StaffMember => "staff member",
            Self::Referral => "referral",
            Self::TherapySession => "therapy session",
            Self::DietPlan => "diet plan",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record addressable by id.
pub trait Record {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: EntityKind = EntityKind::$kind;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

impl_record! {
    Patient => Patient,
    Alert => Alert,
    MedicationDose => Medication,
    NurseNote => NurseNote,
    TestOrder => TestOrder,
    TestResult => TestResult,
    Prescription => Prescription,
    RefillRequest => RefillRequest,
    ApprovalRequest => ApprovalRequest,
    ClinicalReview => ClinicalReview,
    Incident => Incident,
    WardEvent => WardEvent,
    StaffMember => StaffMember,
    Referral => Referral,
    TherapySession => TherapySession,
    DietPlan => DietPlan,
}

/// A record whose status moves through a closed set of states.
pub trait Lifecycle: Record + Clone {
    type Status: Copy + Eq + fmt::Debug + fmt::Display;
    type Action: Copy + Eq + fmt::Debug + fmt::Display;

    fn status(&self) -> Self::Status;

    /// State reached by taking `action` from `from`, or `None` if the action is not allowed there.
    fn target(from: Self::Status, action: Self::Action) -> Option<Self::Status>;

    /// Writes the new status together with the actor and time fields `action` touches.
    fn record(&mut self, action: Self::Action, to: Self::Status, stamp: &Stamp);
}

/// Declares an action enum with its kebab-case spelling.
macro_rules! actions {
    ($(#[$meta:meta])* $name:ident {
        $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

actions! {
    AlertAction { Acknowledge => "acknowledge" }
}

actions! {
    MedicationAction {
        MarkDue => "mark due",
        Administer => "administer",
        MarkMissed => "mark missed",
    }
}

actions! {
    TestOrderAction {
        Schedule => "schedule",
        Collect => "collect",
        Start => "start",
        Complete => "complete",
        /// Move to the next state in workflow order.
        Advance => "advance",
    }
}

actions! {
    ResultAction {
        Notify => "notify",
        Review => "review",
    }
}

actions! {
    PrescriptionAction {
        Complete => "complete",
        Discontinue => "discontinue",
    }
}

actions! {
    RefillAction {
        Approve => "approve",
        Reject => "reject",
    }
}

actions! {
    ApprovalAction {
        Approve => "approve",
        Deny => "deny",
    }
}

actions! {
    ReviewAction {
        Start => "start",
        Complete => "complete",
    }
}

actions! {
    IncidentAction {
        Resolve => "resolve",
        Close => "close",
    }
}

actions! {
    ReferralAction {
        Accept => "accept",
        Complete => "complete",
    }
}

actions! {
    SessionAction {
        Complete => "complete",
        Cancel => "cancel",
    }
}

impl Lifecycle for Alert {
    type Status = AlertStatus;
    type Action = AlertAction;

    fn status(&self) -> AlertStatus {
        Alert::status(self)
    }

    fn target(_from: AlertStatus, action: AlertAction) -> Option<AlertStatus> {
        match action {
            AlertAction::Acknowledge => Some(AlertStatus::Acknowledged),
        }
    }

    fn record(&mut self, _action: AlertAction, to: AlertStatus, stamp: &Stamp) {
        self.acknowledged = to == AlertStatus::Acknowledged;
        self.acknowledged_by = Some(stamp.by.clone());
        self.acknowledged_at = Some(stamp.at);
    }
}

impl Lifecycle for MedicationDose {
    type Status = MedicationStatus;
    type Action = MedicationAction;

    fn status(&self) -> MedicationStatus {
        self.status
    }

    fn target(from: MedicationStatus, action: MedicationAction) -> Option<MedicationStatus> {
        use MedicationAction::*;
        use MedicationStatus::*;

        match (from, action) {
            (Upcoming | Due, MarkDue) => Some(Due),
            (Upcoming | Due | Administered, Administer) => Some(Administered),
            (Due | Missed, MarkMissed) => Some(Missed),
            _ => None,
        }
    }

    fn record(&mut self, action: MedicationAction, to: MedicationStatus, stamp: &Stamp) {
        self.status = to;
        if action != MedicationAction::MarkDue {
            self.recorded_by = Some(stamp.by.clone());
            self.recorded_at = Some(stamp.at);
        }
    }
}

impl TestOrderStatusExt for TestOrderStatus {
    fn next(self) -> Option<Self> {
        match self {
            Self::Ordered => Some(Self::Scheduled),
            Self::Scheduled => Some(Self::Collected),
            Self::Collected => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed => None,
        }
    }
}

/// Workflow ordering of test order states.
pub trait TestOrderStatusExt: Sized {
    /// The state after this one, or `None` once completed.
    fn next(self) -> Option<Self>;
}

impl Lifecycle for TestOrder {
    type Status = TestOrderStatus;
    type Action = TestOrderAction;

    fn status(&self) -> TestOrderStatus {
        self.status
    }

    fn target(from: TestOrderStatus, action: TestOrderAction) -> Option<TestOrderStatus> {
        use TestOrderAction::*;
        use TestOrderStatus::*;

        match (from, action) {
            (_, Advance) => from.next(),
            (Ordered | Scheduled, Schedule) => Some(Scheduled),
            (Ordered | Scheduled | Collected, Collect) => Some(Collected),
            (Collected | InProgress, Start) => Some(InProgress),
            (InProgress | Completed, Complete) => Some(Completed),
            _ => None,
        }
    }

    fn record(&mut self, _action: TestOrderAction, to: TestOrderStatus, stamp: &Stamp) {
        self.status = to;
        if to == TestOrderStatus::Collected {
            self.collected_by = Some(stamp.by.clone());
            self.collected_at = Some(stamp.at);
        }
        self.updated_by = Some(stamp.by.clone());
        self.updated_at = Some(stamp.at);
    }
}

impl Lifecycle for TestResult {
    type Status = ResultStatus;
    type Action = ResultAction;

    fn status(&self) -> ResultStatus {
        self.status
    }

    fn target(from: ResultStatus, action: ResultAction) -> Option<ResultStatus> {
        use ResultAction::*;
        use ResultStatus::*;

        match (from, action) {
            (Reported | Notified, Notify) => Some(Notified),
            (_, Review) => Some(Reviewed),
            _ => None,
        }
    }

    fn record(&mut self, action: ResultAction, to: ResultStatus, stamp: &Stamp) {
        self.status = to;
        match action {
            ResultAction::Notify => self.notified_at = Some(stamp.at),
            ResultAction::Review => {
                self.reviewed_by = Some(stamp.by.clone());
                self.reviewed_at = Some(stamp.at);
            }
        }
    }
}

impl Lifecycle for Prescription {
    type Status = PrescriptionStatus;
    type Action = PrescriptionAction;

    fn status(&self) -> PrescriptionStatus {
        self.status
    }

    fn target(from: PrescriptionStatus, action: PrescriptionAction) -> Option<PrescriptionStatus> {
        use PrescriptionAction::*;
        use PrescriptionStatus::*;

        match (from, action) {
            (Active | Completed, Complete) => Some(Completed),
            (Active | Discontinued, Discontinue) => Some(Discontinued),
            _ => None,
        }
    }

    fn record(&mut self, _action: PrescriptionAction, to: PrescriptionStatus, stamp: &Stamp) {
        self.status = to;
        self.closed_by = Some(stamp.by.clone());
        self.closed_at = Some(stamp.at);
    }
}

impl Lifecycle for RefillRequest {
    type Status = RefillStatus;
    type Action = RefillAction;

    fn status(&self) -> RefillStatus {
        self.status
    }

    fn target(from: RefillStatus, action: RefillAction) -> Option<RefillStatus> {
        use RefillAction::*;
        use RefillStatus::*;

        match (from, action) {
            (Pending | Approved, Approve) => Some(Approved),
            (Pending | Rejected, Reject) => Some(Rejected),
            _ => None,
        }
    }

    fn record(&mut self, _action: RefillAction, to: RefillStatus, stamp: &Stamp) {
        self.status = to;
        self.decided_by = Some(stamp.by.clone());
        self.decided_at = Some(stamp.at);
    }
}

impl Lifecycle for ApprovalRequest {
    type Status = ApprovalStatus;
    type Action = ApprovalAction;

    fn status(&self) -> ApprovalStatus {
        self.status
    }

    fn target(from: ApprovalStatus, action: ApprovalAction) -> Option<ApprovalStatus> {
        use ApprovalAction::*;
        use ApprovalStatus::*;

        match (from, action) {
            (Pending | Approved, Approve) => Some(Approved),
            (Pending | Denied, Deny) => Some(Denied),
            _ => None,
        }
    }

    fn record(&mut self, _action: ApprovalAction, to: ApprovalStatus, stamp: &Stamp) {
        self.status = to;
        self.decided_by = Some(stamp.by.clone());
        self.decided_at = Some(stamp.at);
    }
}

impl Lifecycle for ClinicalReview {
    type Status = ReviewStatus;
    type Action = ReviewAction;

    fn status(&self) -> ReviewStatus {
        self.status
    }

    fn target(from: ReviewStatus, action: ReviewAction) -> Option<ReviewStatus> {
        use ReviewAction::*;
        use ReviewStatus::*;

        match (from, action) {
            (Pending | InProgress, Start) => Some(InProgress),
            (InProgress | Completed, Complete) => Some(Completed),
            _ => None,
        }
    }

    fn record(&mut self, _action: ReviewAction, to: ReviewStatus, stamp: &Stamp) {
        self.status = to;
        self.reviewed_by = Some(stamp.by.clone());
        self.updated_at = Some(stamp.at);
    }
}

impl Lifecycle for Incident {
    type Status = IncidentStatus;
    type Action = IncidentAction;

    fn status(&self) -> IncidentStatus {
        self.status
    }

    fn target(from: IncidentStatus, action: IncidentAction) -> Option<IncidentStatus> {
        use IncidentAction::*;
        use IncidentStatus::*;

        match (from, action) {
            (Investigating | Resolved, Resolve) => Some(Resolved),
            (Resolved | Closed, Close) => Some(Closed),
            _ => None,
        }
    }

    fn record(&mut self, _action: IncidentAction, to: IncidentStatus, stamp: &Stamp) {
        self.status = to;
        self.updated_by = Some(stamp.by.clone());
        self.updated_at = Some(stamp.at);
    }
}

impl Lifecycle for Referral {
    type Status = ReferralStatus;
    type Action = ReferralAction;

    fn status(&self) -> ReferralStatus {
        self.status
    }

    fn target(from: ReferralStatus, action: ReferralAction) -> Option<ReferralStatus> {
        use ReferralAction::*;
        use ReferralStatus::*;

        match (from, action) {
            (Pending | Accepted, Accept) => Some(Accepted),
            (Accepted | Completed, Complete) => Some(Completed),
            _ => None,
        }
    }

    fn record(&mut self, _action: ReferralAction, to: ReferralStatus, stamp: &Stamp) {
        self.status = to;
        self.handled_by = Some(stamp.by.clone());
        self.updated_at = Some(stamp.at);
    }
}

impl Lifecycle for TherapySession {
    type Status = SessionStatus;
    type Action = SessionAction;

    fn status(&self) -> SessionStatus {
        self.status
    }

    fn target(from: SessionStatus, action: SessionAction) -> Option<SessionStatus> {
        use SessionAction::*;
        use SessionStatus::*;

        match (from, action) {
            (Scheduled | Completed, Complete) => Some(Completed),
            (Scheduled | Cancelled, Cancel) => Some(Cancelled),
            _ => None,
        }
    }

    fn record(&mut self, _action: SessionAction, to: SessionStatus, stamp: &Stamp) {
        self.status = to;
        self.recorded_by = Some(stamp.by.clone());
        self.recorded_at = Some(stamp.at);
    }
}
