//! AAC console command-line shell.
//!
//! ```bash
//! REACT_APP_API_URL=https://aac.example.org aac-console --console dev realms
//! aac-console --console dev --realm r1 list apps --sort name,ASC
//! aac-console --console dev --realm r1 get users u1 --flatten roles
//! aac-console --console admin props
//! ```

mod commands;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aac_console_provider::config::{ENV_API_URL, ENV_SESSION_COOKIE};
use aac_console_provider::{ConsoleConfig, ConsoleError, ConsoleKind, ErrorClass, Sort};
use aac_console_shell::ConsoleShell;

#[derive(Parser)]
#[command(name = "aac-console")]
#[command(about = "AAC admin and developer console", long_about = None)]
#[command(version)]
struct Cli {
    /// Console to talk to: admin or dev
    #[arg(short, long, default_value = "dev")]
    console: ConsoleKind,

    /// Active realm for realm-scoped resources
    #[arg(short, long, global = true)]
    realm: Option<String>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resources navigable under the current realm selection
    Resources,

    /// List the realms available to the current principal
    Realms,

    /// List records of a resource
    List {
        resource: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 25)]
        per_page: u32,
        /// `field` or `field,ASC|DESC`
        #[arg(long)]
        sort: Option<Sort>,
        /// Filter as `key=value`, repeatable
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,
    },

    /// Show one record
    Get {
        resource: String,
        id: String,
        /// Relation fields to collapse to ids
        #[arg(long)]
        flatten: Vec<String>,
    },

    /// Show several records by id
    GetMany {
        resource: String,
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        flatten: Vec<String>,
    },

    /// List records referencing another record
    References {
        resource: String,
        /// Field pointing at the referenced record
        #[arg(long)]
        target: String,
        /// Id of the referenced record
        #[arg(long)]
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 25)]
        per_page: u32,
        #[arg(long)]
        sort: Option<Sort>,
    },

    /// Create a record from JSON
    Create {
        resource: String,
        #[arg(long)]
        data: String,
    },

    /// Import records from a YAML file
    Import {
        resource: String,
        #[arg(long)]
        file: std::path::PathBuf,
        /// Let the backend assign fresh ids
        #[arg(long)]
        reset: bool,
    },

    /// Replace a record with JSON
    Update {
        resource: String,
        id: String,
        #[arg(long)]
        data: String,
        #[arg(long)]
        flatten: Vec<String>,
    },

    /// Apply the same JSON to several records
    UpdateMany {
        resource: String,
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        data: String,
    },

    /// Delete a record
    Delete { resource: String, id: String },

    /// Delete several records
    DeleteMany {
        resource: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Call a backend endpoint outside the CRUD verbs
    Invoke {
        /// Path relative to the console base URL
        path: String,
        #[arg(long)]
        method: Option<String>,
        /// Query parameter as `key=value`, repeatable
        #[arg(long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,
        /// JSON body
        #[arg(long)]
        body: Option<String>,
    },

    /// Application properties (admin console)
    Props,

    /// Authorities of the current principal (developer console)
    Authorities,
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Operator hint for a failed command, by error class.
fn failure_hint(err: &anyhow::Error) -> Option<String> {
    let err = err.downcast_ref::<ConsoleError>()?;
    match err.class() {
        ErrorClass::Authorization => Some(format!(
            "the backend rejected the session ({}); set {} to a valid session cookie",
            err.status_code().unwrap_or_default(),
            ENV_SESSION_COOKIE
        )),
        ErrorClass::Transport => Some(format!("backend unreachable; check {}", ENV_API_URL)),
        ErrorClass::Envelope => Some("the backend answered in an unexpected format".to_string()),
        ErrorClass::Status | ErrorClass::Request => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    let config = ConsoleConfig::from_env()?;
    let shell = ConsoleShell::bootstrap(&config, cli.console)?;
    if let Some(realm) = cli.realm.as_deref() {
        shell.select_realm(realm)?;
    }
    debug!("Running against {}", config.console_base_url(cli.console));

    let output = match commands::run(&shell, cli.command).await {
        Ok(output) => output,
        Err(err) => {
            if let Some(hint) = failure_hint(&err) {
                error!("{}", hint);
            }
            return Err(err);
        }
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
