//! Command runner.
//!
//! Hands the wrapped command to `sops exec-env`, which decrypts the manifest
//! into the child's environment. The plaintext never passes through this
//! process.

use tracing::debug;

use super::store::Store;
use super::tools::Sops;
use crate::error::{Error, Result};

/// Run `command` with the secrets from its manifest.
///
/// The manifest is looked up from the first token. The whole command is
/// passed to sops as one shell string.
///
/// # Returns
///
/// The child's exit code.
///
/// # Errors
///
/// - `Error::InvalidArguments` if `command` is empty
/// - `StoreError::DirMissing` / `StoreError::NotFound` if there is no
///   manifest; sops is not invoked in that case
pub fn run(command: &[String], store: &Store, sops: &dyn Sops) -> Result<i32> {
    let name = command
        .first()
        .ok_or_else(|| Error::InvalidArguments("no command specified".to_string()))?;

    let manifest = store.resolve(name)?;
    let shell_command = shell_join(command);

    debug!(manifest = %manifest.display(), command = %shell_command, "running command");
    let code = sops.exec_env(&manifest, &shell_command)?;
    debug!(code, "command exited");
    Ok(code)
}

/// Join tokens into a string a POSIX shell splits back into the same tokens.
///
/// Tokens made only of safe characters are left bare; anything else is
/// single-quoted.
pub fn shell_join<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| shell_quote(t.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(token: &str) -> String {
    let safe = !token.is_empty()
        && token
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || "-_./:=@%+,".contains(ch));
    if safe {
        return token.to_string();
    }
    format!("'{}'", token.replace('\'', r"'\''"))
}
