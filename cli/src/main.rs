//! Waypoint CLI - replays post-authentication reconciliation.
//!
//! ```text
//! waypoint simulate <snapshot.json> [--sign-up] [--identifier <id>]
//! ```
//!
//! The snapshot scripts the provider's answer and seeds the anonymous store
//! and the workspace list. The report goes to stdout as JSON; logs go to
//! stderr so the two never interleave.

mod simulate;

use anyhow::{Context, Result, bail};
use std::{env, path::PathBuf, process::ExitCode};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use waypoint_config::WaypointConfig;
use waypoint_core::{WorkspaceNamer, WorkspaceReconciler};
use waypoint_types::{AuthMode, Credentials};

const USAGE: &str = "usage: waypoint simulate <snapshot.json> [--sign-up] [--identifier <id>]";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

#[derive(Debug, PartialEq, Eq)]
struct SimulateArgs {
    snapshot: PathBuf,
    mode: AuthMode,
    identifier: String,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<SimulateArgs> {
    match args.next().as_deref() {
        Some("simulate") => {}
        Some(other) => bail!("unknown command `{other}`\n{USAGE}"),
        None => bail!(USAGE),
    }

    let mut snapshot = None;
    let mut mode = AuthMode::SignIn;
    let mut identifier = "simulated@waypoint.local".to_string();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sign-up" => mode = AuthMode::SignUp,
            "--sign-in" => mode = AuthMode::SignIn,
            "--identifier" => {
                identifier = args
                    .next()
                    .with_context(|| format!("--identifier needs a value\n{USAGE}"))?;
            }
            flag if flag.starts_with("--") => bail!("unknown flag `{flag}`\n{USAGE}"),
            path if snapshot.is_none() => snapshot = Some(PathBuf::from(path)),
            extra => bail!("unexpected argument `{extra}`\n{USAGE}"),
        }
    }

    let snapshot = snapshot.with_context(|| format!("missing snapshot path\n{USAGE}"))?;
    Ok(SimulateArgs {
        snapshot,
        mode,
        identifier,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let args = parse_args(env::args().skip(1))?;

    let config = match WaypointConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(path = %err.path().display(), "Ignoring unusable config: {err}");
            WaypointConfig::default()
        }
    };

    let snapshot = simulate::Snapshot::load(&args.snapshot)?;
    let reconciler = WorkspaceReconciler::new(WorkspaceNamer::new(config.naming()));
    let credentials = Credentials::new(args.identifier, String::new());

    match simulate::run(
        snapshot,
        args.mode,
        credentials,
        reconciler,
        &config.navigation(),
    )
    .await
    {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("Error: {:?}", anyhow::Error::new(err));
            Ok(ExitCode::FAILURE)
        }
    }
}
