//! Manifest commands: `--create`, `--edit` and `--list`.

use std::path::PathBuf;

use crate::cli::output;
use crate::core::recipient::{self, Resolved};
use crate::core::settings::{Paths, Settings};
use crate::core::store::Store;
use crate::core::tools::{AgeKeygen, SopsCli};
use crate::error::Result;

/// Create a new manifest for a single command name.
pub fn create(command: &[String], key: Option<PathBuf>, paths: &Paths, store: &Store) -> Result<()> {
    let settings = Settings::load()?;
    let resolved = resolve_recipients(&settings, key, paths)?;
    let fresh_store = !store.exists();

    let sops = SopsCli::new().with_env(settings.child_env);
    let manifest = store.create(command, &resolved.recipients, &sops)?;

    if fresh_store {
        output::dimmed(&format!("created store directory {}", store.dir().display()));
    }
    output::success(&format!("created manifest {}", output::path(&manifest)));
    Ok(())
}

/// Edit an existing manifest.
pub fn edit(command: &[String], key: Option<PathBuf>, paths: &Paths, store: &Store) -> Result<()> {
    let settings = Settings::load()?;
    let resolved = resolve_recipients(&settings, key, paths)?;
    let sops = SopsCli::new().with_env(settings.child_env);
    let manifest = store.edit(command, &resolved.recipients, &sops)?;
    output::success(&format!("updated manifest {}", output::path(&manifest)));
    Ok(())
}

/// List the manifests in the store.
pub fn list(store: &Store) -> Result<()> {
    let names = store.list()?;
    if names.is_empty() {
        output::dimmed(&format!("no manifests in {}", store.dir().display()));
        return Ok(());
    }

    for name in names {
        output::list_item(&name);
    }
    Ok(())
}

fn resolve_recipients(settings: &Settings, key: Option<PathBuf>, paths: &Paths) -> Result<Resolved> {
    let sources = settings.recipient_sources(key);
    let resolved = recipient::resolve(&sources, &AgeKeygen::new(), &paths.key_dir)?;
    output::dimmed(&format!(
        "encrypting for {} (from {})",
        resolved.recipients, resolved.source
    ));
    Ok(resolved)
}
