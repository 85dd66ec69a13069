use crate::lifecycle::EntityKind;
use ward_catalog::{CatalogError, Role};
use ward_types::TextError;

#[derive(Debug, thiserror::Error)]
pub enum WardError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{kind} {id:?} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} {id:?} cannot {action} while {from}")]
    InvalidTransition {
        kind: EntityKind,
        id: String,
        from: String,
        action: String,
    },

    #[error("{action} is not available to the {role} role")]
    ActionNotPermitted { role: Role, action: String },

    #[error("{kind} {id:?} already exists")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("invalid text: {0}")]
    Text(#[from] TextError),
}

pub type WardResult<T> = std::result::Result<T, WardError>;
