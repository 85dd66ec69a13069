use std::io::{self, BufRead, Write};

use ward_cli::session::{Reply, Session};
use ward_cli::{config_from_env, init_tracing};

/// Main entry point for the interactive ward dashboard
///
/// Loads the catalog, opens on the configured role's default tab, then reads one command per
/// line from stdin until `quit` or end of input. Views go to stdout; logs and errors go to
/// stderr.
///
/// # Environment Variables
/// - `WARD_SEED_FILE`: YAML catalog to load (default: embedded seed)
/// - `WARD_ACTOR`: display name stamped on actions (default: "Duty Staff")
/// - `WARD_ROLE`: initial role (default: "nurse")
/// - `WARD_NAME`: ward name for the top bar
/// - `RUST_LOG`: log filter (default: "ward=info")
fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let config = config_from_env()?;
    let store = config.open_store()?;

    tracing::info!(
        "++ Opening {} as {} ({})",
        store.ward().name,
        config.actor().name,
        config.actor().role
    );

    let mut session = Session::new(store, config.actor().clone());
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{}", session.render()?)?;
    writeln!(stdout, "type `help` for commands")?;

    for line in stdin.lock().lines() {
        let line = line?;
        match session.handle_line(&line) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Output(text)) if text.is_empty() => {}
            Ok(Reply::Output(text)) => writeln!(stdout, "{text}")?,
            Err(e) => eprintln!("error: {e}"),
        }
        stdout.flush()?;
    }

    Ok(())
}
