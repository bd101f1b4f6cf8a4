//! Command-line interface.

pub mod completions;
pub mod manifest;
pub mod output;
pub mod run;

use clap::Parser;
use std::path::PathBuf;

use crate::core::deps;
use crate::core::settings::Paths;
use crate::core::store::Store;
use crate::error::Result;

/// sops-run - Run a command with secrets decrypted from sops manifests.
#[derive(Parser, Debug)]
#[command(
    name = "sops-run",
    about = "Run a command with secrets decrypted from sops manifests",
    version,
    after_help = "Options must come before the command; everything after the command name is passed through.",
    group(clap::ArgGroup::new("update").args(["create", "edit"]))
)]
pub struct Cli {
    /// Command to run; the first token names the manifest
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required_unless_present_any = ["list", "completions"],
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,

    /// Create a new manifest for the command
    #[arg(long, conflicts_with = "edit")]
    pub create: bool,

    /// Edit the manifest for the command
    #[arg(long)]
    pub edit: bool,

    /// Path to the age key used to derive the manifest recipient
    #[arg(long, value_name = "PATH", requires = "update")]
    pub key: Option<PathBuf>,

    /// List existing manifests
    #[arg(long, conflicts_with_all = ["create", "edit", "command"])]
    pub list: bool,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL", conflicts_with_all = ["create", "edit", "list", "command"])]
    pub completions: Option<Shell>,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// What a parsed command line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit,
    List,
    Completions(Shell),
    Run,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if let Some(shell) = self.completions {
            Mode::Completions(shell)
        } else if self.list {
            Mode::List
        } else if self.create {
            Mode::Create
        } else if self.edit {
            Mode::Edit
        } else {
            Mode::Run
        }
    }
}

/// Execute a parsed command line.
///
/// # Returns
///
/// The exit code for the process.
pub fn execute(cli: Cli) -> Result<i32> {
    match cli.mode() {
        Mode::Completions(shell) => {
            completions::execute(shell)?;
            Ok(0)
        }
        Mode::List => {
            let (_, store) = layout()?;
            manifest::list(&store)?;
            Ok(0)
        }
        Mode::Create => {
            let (paths, store) = layout()?;
            deps::check_dependencies()?;
            manifest::create(&cli.command, cli.key, &paths, &store)?;
            Ok(0)
        }
        Mode::Edit => {
            let (paths, store) = layout()?;
            deps::check_dependencies()?;
            manifest::edit(&cli.command, cli.key, &paths, &store)?;
            Ok(0)
        }
        Mode::Run => {
            let (_, store) = layout()?;
            deps::check_dependencies()?;
            run::execute(&cli.command, &store)
        }
    }
}

fn layout() -> Result<(Paths, Store)> {
    let paths = Paths::from_home()?;
    let store = Store::new(&paths.store_dir);
    Ok((paths, store))
}
