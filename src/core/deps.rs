//! External dependency check.

use tracing::debug;

use super::constants::{AGE_INSTALL_HINT, AGE_KEYGEN_BIN, SOPS_BIN, SOPS_INSTALL_HINT};
use crate::error::{DependencyError, Result};

/// Tools that must resolve on PATH, with their install docs.
const REQUIRED: &[(&str, &str)] = &[
    (SOPS_BIN, SOPS_INSTALL_HINT),
    (AGE_KEYGEN_BIN, AGE_INSTALL_HINT),
];

/// Verify `sops` and `age-keygen` are available.
///
/// # Errors
///
/// Returns `DependencyError::Missing` for the first tool that does not
/// resolve on PATH.
pub fn check_dependencies() -> Result<()> {
    for &(tool, hint) in REQUIRED {
        let path = which::which(tool).map_err(|_| DependencyError::Missing { tool, hint })?;
        debug!(tool, path = %path.display(), "found dependency");
    }
    Ok(())
}
