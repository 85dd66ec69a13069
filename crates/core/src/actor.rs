//! The staff member performing actions, and the stamp written onto entities they change.

use chrono::{DateTime, Utc};
use ward_catalog::Role;
use ward_types::NonEmptyText;

use crate::error::WardResult;

/// Represents the staff member acting on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    /// Display name written into `*_by` fields.
    pub name: NonEmptyText,

    /// Role the actor is currently working as.
    pub role: Role,
}

impl Actor {
    /// Creates an actor, rejecting a blank display name.
    pub fn new(name: impl AsRef<str>, role: Role) -> WardResult<Self> {
        Ok(Self {
            name: NonEmptyText::new(name)?,
            role,
        })
    }

    /// The same person working as a different role.
    pub fn with_role(&self, role: Role) -> Self {
        Self {
            name: self.name.clone(),
            role,
        }
    }

    /// Stamp for an action taken at `at`.
    pub fn stamp_at(&self, at: DateTime<Utc>) -> Stamp {
        Stamp {
            by: self.name.to_string(),
            at,
        }
    }

    /// Stamp for an action taken now.
    pub fn stamp_now(&self) -> Stamp {
        self.stamp_at(Utc::now())
    }
}

/// Who changed an entity, and when.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stamp {
    pub by: String,
    pub at: DateTime<Utc>,
}
