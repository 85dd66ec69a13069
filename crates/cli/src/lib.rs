//! # Ward CLI
//!
//! Terminal surface of the ward operations dashboard: text and JSON views over the core store,
//! the interactive session used by `ward-run`, and the startup plumbing both binaries share.

pub mod session;
pub mod view;

use std::fmt::Write;
use ward_core::catalog::Role;
use ward_core::config::{actor_from_env_value, role_from_env_value, seed_file_from_env_value};
use ward_core::navigation::profile;
use ward_core::{WardConfig, WardResult};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "ward=info";

/// Installs the tracing subscriber, logging to stderr so views on stdout stay clean.
pub fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = match std::env::var("RUST_LOG") {
        Ok(value) if !value.trim().is_empty() => tracing_subscriber::EnvFilter::new(value),
        _ => tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

/// Resolves [`WardConfig`] from the environment, loading `.env` first if present.
///
/// # Environment Variables
/// - `WARD_SEED_FILE`: YAML catalog to load instead of the embedded seed
/// - `WARD_ACTOR`: display name stamped on actions (default: "Duty Staff")
/// - `WARD_ROLE`: role the dashboard opens with (default: "nurse")
/// - `WARD_NAME`: ward name shown in the top bar (default: from the catalog)
pub fn config_from_env() -> WardResult<WardConfig> {
    dotenvy::dotenv().ok();

    let role = role_from_env_value(std::env::var("WARD_ROLE").ok())?;
    let actor = actor_from_env_value(std::env::var("WARD_ACTOR").ok(), role)?;
    let seed_file = seed_file_from_env_value(std::env::var("WARD_SEED_FILE").ok())?;
    let ward_name = std::env::var("WARD_NAME").ok();

    let config = WardConfig::new(seed_file, actor, ward_name);
    match config.seed_file() {
        Some(path) => tracing::info!("-- Seed catalog: {}", path.display()),
        None => tracing::info!("-- Seed catalog: embedded"),
    }
    if let Some(name) = config.ward_name() {
        tracing::info!("-- Ward name override: {}", name);
    }
    Ok(config)
}

/// One line per role: spelling, label and default tab.
pub fn list_roles() -> String {
    let mut out = String::new();
    for role in Role::ALL {
        let profile = profile(*role);
        let _ = writeln!(
            out,
            "{:<20}{:<20}opens on {}",
            role.as_str(),
            profile.label,
            profile.default_tab
        );
    }
    out.trim_end().to_string()
}

/// The tabs `role` can open, default first marked with `*`.
pub fn list_tabs(role: Role) -> String {
    let profile = profile(role);
    profile
        .tabs
        .iter()
        .map(|tab| {
            let marker = if *tab == profile.default_tab { "*" } else { " " };
            format!("{marker} {:<16}{}", tab.as_str(), view::tab_title(*tab))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
