//! Run command.
//!
//! Executes a command with its manifest decrypted into the environment.

use crate::core::runner;
use crate::core::settings::Settings;
use crate::core::store::Store;
use crate::core::tools::SopsCli;
use crate::error::Result;

/// Run `command` through `sops exec-env` and return its exit code.
pub fn execute(command: &[String], store: &Store) -> Result<i32> {
    let settings = Settings::load()?;
    let sops = SopsCli::new().with_env(settings.child_env);
    runner::run(command, store, &sops)
}
