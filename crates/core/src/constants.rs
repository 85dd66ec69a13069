//! Constants used throughout the ward core crate.

use ward_catalog::Role;

/// Display name stamped on transitions when no actor is configured.
pub const DEFAULT_ACTOR_NAME: &str = "Duty Staff";

/// Role the dashboard opens with.
pub const DEFAULT_ROLE: Role = Role::Nurse;

/// Maximum length of free-text form fields such as nurse notes.
pub const MAX_FORM_TEXT_LEN: usize = 2_000;

/// Maximum length of short form fields such as drug names and doses.
pub const MAX_FORM_FIELD_LEN: usize = 120;

/// Id prefix for nurse notes created during a session.
pub const NURSE_NOTE_ID_PREFIX: &str = "NN";

/// Id prefix for prescriptions created during a session.
pub const PRESCRIPTION_ID_PREFIX: &str = "RX";

/// Id prefix for referrals created during a session.
pub const REFERRAL_ID_PREFIX: &str = "RE";
