use chrono::Utc;
use clap::{Parser, Subcommand};
use ward_cli::view::{build_view, render_text, ViewQuery};
use ward_cli::{config_from_env, init_tracing, list_roles, list_tabs};
use ward_core::catalog::Role;
use ward_core::{Navigation, Tab, WorkflowAction};

#[derive(Parser)]
#[command(name = "ward")]
#[command(about = "Ward operations dashboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List roles and the tab each opens on
    Roles,
    /// List the tabs a role can open
    Tabs {
        /// Role, e.g. nurse or lab-technician
        role: Role,
    },
    /// Show one tab of a role's dashboard
    View {
        /// Role, e.g. nurse or lab-technician
        role: Role,
        /// Tab to show (default: the role's default tab)
        #[arg(long)]
        tab: Option<Tab>,
        /// Case-insensitive search over names, beds and drug/test names
        #[arg(long)]
        search: Option<String>,
        /// Show only one group, e.g. stat, critical or pending
        #[arg(long)]
        filter: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Perform a workflow action on a record
    Act {
        /// Role performing the action
        role: Role,
        /// Action, e.g. collect-sample or approve-refill
        action: WorkflowAction,
        /// Record id, e.g. TO-001
        id: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the seeded catalog as YAML
    Export,
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();
    let config = config_from_env()?;

    match cli.command {
        Some(Commands::Roles) => println!("{}", list_roles()),
        Some(Commands::Tabs { role }) => println!("{}", list_tabs(role)),
        Some(Commands::View {
            role,
            tab,
            search,
            filter,
            json,
        }) => {
            let store = config.open_store()?;
            let actor = config.actor().with_role(role);
            let mut nav = Navigation::for_role(role);
            if let Some(tab) = tab {
                nav.select_tab(tab)?;
            }
            let query = ViewQuery { search, filter };
            let view = build_view(&store, &nav, &actor, &query, Utc::now())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render_text(&view));
            }
        }
        Some(Commands::Act {
            role,
            action,
            id,
            json,
        }) => {
            let mut store = config.open_store()?;
            let actor = config.actor().with_role(role);
            tracing::info!("++ {} as {} on {}", action, role, id);
            let outcome = store.perform(&actor, action, &id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else if outcome.changed {
                println!(
                    "{} {}: {} -> {}",
                    outcome.kind, outcome.id, outcome.from, outcome.to
                );
            } else {
                println!("{} {} is already {}", outcome.kind, outcome.id, outcome.to);
            }
        }
        Some(Commands::Export) => {
            let store = config.open_store()?;
            tracing::info!("++ Exporting catalog for {}", store.ward().name);
            print!("{}", store.to_catalog().render()?);
        }
        None => {
            let store = config.open_store()?;
            let nav = Navigation::for_role(config.actor().role);
            let view = build_view(&store, &nav, config.actor(), &ViewQuery::default(), Utc::now())?;
            print!("{}", render_text(&view));
        }
    }

    Ok(())
}
