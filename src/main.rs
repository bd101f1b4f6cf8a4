//! sops-run - Run a command with secrets decrypted from sops manifests.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sops_run::cli::output;
use sops_run::cli::{execute, Cli};
use sops_run::core::constants::ENV_LOG;
use sops_run::error::{Error, KeyError, StoreError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sops_run=debug")
        } else {
            EnvFilter::new("sops_run=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    match execute(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::error(&e.to_string());
            if let Some(hint) = suggestion(&e) {
                output::hint(&hint);
            }
            std::process::exit(1);
        }
    }
}

/// Follow-up command for errors the user can fix directly.
fn suggestion(e: &Error) -> Option<String> {
    match e {
        Error::Store(StoreError::NotFound(name)) => {
            Some(format!("run: sops-run --create {}", name))
        }
        Error::Store(StoreError::AlreadyExists(name)) => {
            Some(format!("run: sops-run --edit {}", name))
        }
        Error::Store(StoreError::DirMissing(_)) => {
            Some("run: sops-run --create <command>".to_string())
        }
        Error::Key(KeyError::NoKeyFound(dir)) => Some(format!(
            "run: age-keygen -o {}/key.txt, or pass --key",
            dir.display()
        )),
        _ => None,
    }
}
