//! Ward runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the store and views.
//! This crate never reads environment variables itself; binaries read them and hand the raw
//! values to the helpers below.

use crate::actor::Actor;
use crate::constants::{DEFAULT_ACTOR_NAME, DEFAULT_ROLE};
use crate::error::{WardError, WardResult};
use crate::store::WardStore;
use std::path::{Path, PathBuf};
use ward_catalog::{Catalog, Role};

/// Ward configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct WardConfig {
    seed_file: Option<PathBuf>,
    actor: Actor,
    ward_name: Option<String>,
}

impl WardConfig {
    /// Create a new `WardConfig`.
    ///
    /// A blank `ward_name` is treated as absent.
    pub fn new(seed_file: Option<PathBuf>, actor: Actor, ward_name: Option<String>) -> Self {
        let ward_name = ward_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        Self {
            seed_file,
            actor,
            ward_name,
        }
    }

    pub fn seed_file(&self) -> Option<&Path> {
        self.seed_file.as_deref()
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn ward_name(&self) -> Option<&str> {
        self.ward_name.as_deref()
    }

    /// Loads the configured catalog: the seed file if set, otherwise the embedded seed.
    pub fn load_catalog(&self) -> WardResult<Catalog> {
        let mut catalog = match &self.seed_file {
            Some(path) => Catalog::load(path)?,
            None => Catalog::seed()?,
        };
        if let Some(name) = &self.ward_name {
            catalog.ward.name = name.clone();
        }
        Ok(catalog)
    }

    /// Loads the catalog into a fresh store.
    pub fn open_store(&self) -> WardResult<WardStore> {
        WardStore::from_catalog(self.load_catalog()?)
    }
}

/// Resolves the initial role from an optional `WARD_ROLE` value.
pub fn role_from_env_value(value: Option<String>) -> WardResult<Role> {
    match value {
        Some(raw) if !raw.trim().is_empty() => {
            Role::parse(&raw).map_err(|e| WardError::InvalidInput(format!("WARD_ROLE: {e}")))
        }
        _ => Ok(DEFAULT_ROLE),
    }
}

/// Resolves the actor display name from an optional `WARD_ACTOR` value.
///
/// Unset falls back to the default name; set but blank is an error.
pub fn actor_from_env_value(value: Option<String>, role: Role) -> WardResult<Actor> {
    match value {
        Some(raw) => Actor::new(&raw, role)
            .map_err(|_| WardError::InvalidInput("WARD_ACTOR cannot be empty".into())),
        None => Actor::new(DEFAULT_ACTOR_NAME, role),
    }
}

/// Resolves the seed file from an optional `WARD_SEED_FILE` value.
///
/// The path must point at an existing file.
pub fn seed_file_from_env_value(value: Option<String>) -> WardResult<Option<PathBuf>> {
    match value {
        Some(raw) if !raw.trim().is_empty() => {
            let path = PathBuf::from(raw.trim());
            if !path.is_file() {
                return Err(WardError::InvalidInput(format!(
                    "WARD_SEED_FILE {} is not a file",
                    path.display()
                )));
            }
            Ok(Some(path))
        }
        _ => Ok(None),
    }
}
