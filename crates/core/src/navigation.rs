//! Role and tab navigation.
//!
//! Which tabs a role sees, which tab it opens on, and which workflow actions and forms it may use
//! all come from one static table, [`ROLE_PROFILES`], indexed by [`Role`].

use crate::error::{WardError, WardResult};
use std::fmt;
use ward_catalog::{Role, Service, TestCategory};

/// Declares a keyword enum parsed from kebab-case text.
macro_rules! keywords {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }

            /// Parses the kebab-case spelling; `_` is accepted for `-`.
            pub fn parse(s: &str) -> WardResult<Self> {
                let wanted = s.trim().to_lowercase().replace('_', "-");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == wanted)
                    .ok_or_else(|| WardError::InvalidInput(format!("unknown {}: {}", $label, s)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = WardError;

            fn from_str(s: &str) -> WardResult<Self> {
                Self::parse(s)
            }
        }
    };
}

keywords! {
    /// A dashboard tab.
    Tab("tab") {
        Dashboard => "dashboard",
        Patients => "patients",
        Medications => "medications",
        Alerts => "alerts",
        Notes => "notes",
        Schedule => "schedule",
        Approvals => "approvals",
        Reviews => "reviews",
        Results => "results",
        Prescriptions => "prescriptions",
        Referrals => "referrals",
        Overview => "overview",
        Beds => "beds",
        Staff => "staff",
        Incidents => "incidents",
        TestOrders => "test-orders",
        Refills => "refills",
        Inventory => "inventory",
        ImagingOrders => "imaging-orders",
        Reports => "reports",
        DietPlans => "diet-plans",
        Sessions => "sessions",
    }
}

keywords! {
    /// A button a role can press on a record.
    WorkflowAction("action") {
        AcknowledgeAlert => "acknowledge-alert",
        MarkMedicationDue => "mark-medication-due",
        AdministerMedication => "administer-medication",
        MarkMedicationMissed => "mark-medication-missed",
        ScheduleTest => "schedule-test",
        CollectSample => "collect-sample",
        StartTest => "start-test",
        CompleteTest => "complete-test",
        AdvanceTest => "advance-test",
        NotifyResult => "notify-result",
        ReviewResult => "review-result",
        ApproveRequest => "approve-request",
        DenyRequest => "deny-request",
        StartReview => "start-review",
        CompleteReview => "complete-review",
        CompletePrescription => "complete-prescription",
        DiscontinuePrescription => "discontinue-prescription",
        ApproveRefill => "approve-refill",
        RejectRefill => "reject-refill",
        ResolveIncident => "resolve-incident",
        CloseIncident => "close-incident",
        AcceptReferral => "accept-referral",
        CompleteReferral => "complete-referral",
        CompleteSession => "complete-session",
        CancelSession => "cancel-session",
    }
}

keywords! {
    /// A form that creates a new record.
    FormKind("form") {
        NurseNote => "nurse-note",
        Prescription => "prescription",
        Referral => "referral",
    }
}

/// What a role sees and may do.
#[derive(Debug, PartialEq, Eq)]
pub struct RoleProfile {
    pub role: Role,
    pub label: &'static str,
    pub tabs: &'static [Tab],
    pub default_tab: Tab,
    pub actions: &'static [WorkflowAction],
    pub forms: &'static [FormKind],
    /// Department whose test orders and results this role may act on; `None` for any.
    pub test_category: Option<TestCategory>,
    /// Service whose referrals this role may act on; `None` for any.
    pub service: Option<Service>,
}

impl RoleProfile {
    pub fn has_tab(&self, tab: Tab) -> bool {
        self.tabs.contains(&tab)
    }

    pub fn allows(&self, action: WorkflowAction) -> bool {
        self.actions.contains(&action)
    }

    pub fn allows_form(&self, form: FormKind) -> bool {
        self.forms.contains(&form)
    }
}

use WorkflowAction as A;

const TEST_ACTIONS: &[WorkflowAction] = &[
    A::ScheduleTest,
    A::CollectSample,
    A::StartTest,
    A::CompleteTest,
    A::AdvanceTest,
    A::NotifyResult,
];

/// One entry per [`Role`], in `Role::ALL` order.
pub static ROLE_PROFILES: [RoleProfile; 8] = [
    RoleProfile {
        role: Role::Nurse,
        label: "Nurse",
        tabs: &[
            Tab::Dashboard,
            Tab::Patients,
            Tab::Medications,
            Tab::Alerts,
            Tab::Notes,
            Tab::Schedule,
        ],
        default_tab: Tab::Dashboard,
        actions: &[
            A::AcknowledgeAlert,
            A::MarkMedicationDue,
            A::AdministerMedication,
            A::MarkMedicationMissed,
        ],
        forms: &[FormKind::NurseNote],
        test_category: None,
        service: None,
    },
    RoleProfile {
        role: Role::Doctor,
        label: "Doctor",
        tabs: &[
            Tab::Dashboard,
            Tab::Patients,
            Tab::Approvals,
            Tab::Reviews,
            Tab::Results,
            Tab::Prescriptions,
            Tab::Referrals,
        ],
        default_tab: Tab::Dashboard,
        actions: &[
            A::ApproveRequest,
            A::DenyRequest,
            A::StartReview,
            A::CompleteReview,
            A::ReviewResult,
        ],
        forms: &[FormKind::Prescription, FormKind::Referral],
        test_category: None,
        service: None,
    },
    RoleProfile {
        role: Role::WardIncharge,
        label: "Ward In-Charge",
        tabs: &[
            Tab::Overview,
            Tab::Beds,
            Tab::Staff,
            Tab::Incidents,
            Tab::Schedule,
        ],
        default_tab: Tab::Overview,
        actions: &[],
        forms: &[],
        test_category: None,
        service: None,
    },
    RoleProfile {
        role: Role::LabTechnician,
        label: "Lab Technician",
        tabs: &[Tab::Dashboard, Tab::TestOrders, Tab::Results],
        default_tab: Tab::Dashboard,
        actions: TEST_ACTIONS,
        forms: &[],
        test_category: Some(TestCategory::Laboratory),
        service: None,
    },
    RoleProfile {
        role: Role::Pharmacist,
        label: "Pharmacist",
        tabs: &[
            Tab::Dashboard,
            Tab::Prescriptions,
            Tab::Refills,
            Tab::Inventory,
        ],
        default_tab: Tab::Dashboard,
        actions: &[
            A::CompletePrescription,
            A::DiscontinuePrescription,
            A::ApproveRefill,
            A::RejectRefill,
        ],
        forms: &[],
        test_category: None,
        service: None,
    },
    RoleProfile {
        role: Role::Radiologist,
        label: "Radiologist",
        tabs: &[Tab::Dashboard, Tab::ImagingOrders, Tab::Reports],
        default_tab: Tab::Dashboard,
        actions: TEST_ACTIONS,
        forms: &[],
        test_category: Some(TestCategory::Imaging),
        service: None,
    },
    RoleProfile {
        role: Role::Nutritionist,
        label: "Nutritionist",
        tabs: &[Tab::Dashboard, Tab::Referrals, Tab::DietPlans],
        default_tab: Tab::Dashboard,
        actions: &[A::AcceptReferral, A::CompleteReferral],
        forms: &[],
        test_category: None,
        service: Some(Service::Nutrition),
    },
    RoleProfile {
        role: Role::PhysicalTherapist,
        label: "Physical Therapist",
        tabs: &[Tab::Dashboard, Tab::Referrals, Tab::Sessions],
        default_tab: Tab::Dashboard,
        actions: &[
            A::AcceptReferral,
            A::CompleteReferral,
            A::CompleteSession,
            A::CancelSession,
        ],
        forms: &[],
        test_category: None,
        service: Some(Service::Physiotherapy),
    },
];

/// Looks up the profile for `role`.
pub fn profile(role: Role) -> &'static RoleProfile {
    let index = match role {
        Role::Nurse => 0,
        Role::Doctor => 1,
        Role::WardIncharge => 2,
        Role::LabTechnician => 3,
        Role::Pharmacist => 4,
        Role::Radiologist => 5,
        Role::Nutritionist => 6,
        Role::PhysicalTherapist => 7,
    };
    &ROLE_PROFILES[index]
}

/// The selected role and tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigation {
    role: Role,
    tab: Tab,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::for_role(Role::Nurse)
    }
}

impl Navigation {
    /// Starts on `role`'s default tab.
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            tab: profile(role).default_tab,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn profile(&self) -> &'static RoleProfile {
        profile(self.role)
    }

    /// Switches role; the tab resets to the new role's default.
    pub fn select_role(&mut self, role: Role) {
        *self = Self::for_role(role);
    }

    /// Switches tab within the current role.
    ///
    /// # Errors
    /// Returns [`WardError::InvalidInput`] if the role has no such tab. The navigation is left
    /// unchanged.
    pub fn select_tab(&mut self, tab: Tab) -> WardResult<()> {
        if !self.profile().has_tab(tab) {
            return Err(WardError::InvalidInput(format!(
                "the {} role has no {tab} tab",
                self.role
            )));
        }
        self.tab = tab;
        Ok(())
    }
}
