//! Key discovery and recipient derivation.
//!
//! Keys are never created here. The default key is picked from
//! `~/.local/age`, and its public recipient comes from `age-keygen -y`.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::tools::Keygen;
use crate::error::{KeyError, Result};

/// Find the default age key in `dir`.
///
/// Candidates are the regular files in `dir`, ordered by file name, with
/// hidden files (a leading `.`) skipped. The
/// first one wins; when there is more than one a warning names the key
/// that was picked.
///
/// # Returns
///
/// The canonical (absolute, symlink-free) path of the chosen key.
///
/// # Errors
///
/// Returns `KeyError::NoKeyFound` if `dir` is missing, unreadable or holds
/// no visible regular files.
pub fn find_default_key(dir: &Path) -> Result<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "key directory unreadable");
            return Err(KeyError::NoKeyFound(dir.to_path_buf()).into());
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    candidates.sort();

    let first = candidates
        .first()
        .ok_or_else(|| KeyError::NoKeyFound(dir.to_path_buf()))?;

    if candidates.len() > 1 {
        warn!(
            count = candidates.len(),
            key = %first.display(),
            "multiple keys found, using the first"
        );
    }

    let key = fs::canonicalize(first)?;
    debug!(key = %key.display(), "using default key");
    Ok(key)
}

/// Derive the public recipient for a private key file.
///
/// Runs the key-generation tool in extraction mode and returns its stdout
/// with surrounding whitespace removed.
///
/// # Errors
///
/// Returns `KeyError::ExtractionFailed` if the tool cannot be started,
/// exits unsuccessfully, or prints nothing.
pub fn derive_recipient(keygen: &dyn Keygen, key: &Path) -> Result<String> {
    let failed = |reason: String| KeyError::ExtractionFailed {
        key: key.to_path_buf(),
        reason,
    };

    let output = keygen
        .extract_public_key(key)
        .map_err(|e| failed(format!("could not run age-keygen: {}", e)))?;

    if !output.success {
        let stderr = output.stderr.trim();
        let reason = if stderr.is_empty() {
            format!("age-keygen {}", output.status)
        } else {
            format!("age-keygen {}: {}", output.status, stderr)
        };
        return Err(failed(reason).into());
    }

    let recipient = output.stdout.trim();
    if recipient.is_empty() {
        return Err(failed("age-keygen produced no output".to_string()).into());
    }

    debug!(key = %key.display(), recipient, "derived recipient");
    Ok(recipient.to_string())
}
