//! Input validation for manifest names.

use crate::error::{Result, StoreError};

/// Validate a manifest name (the first token of the wrapped command).
///
/// The name becomes `<store>/<name>.yml`, so it must stay a single plain
/// path component:
/// - Cannot be empty
/// - Cannot contain `/`, `\` or NUL
/// - Cannot start with `.`
///
/// # Errors
///
/// Returns `StoreError::InvalidName` describing the first violation.
pub fn validate_manifest_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| StoreError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty").into());
    }

    if name.starts_with('.') {
        return Err(invalid("cannot start with '.'").into());
    }

    if let Some(ch) = name.chars().find(|ch| matches!(ch, '/' | '\\' | '\0')) {
        return Err(invalid(&format!("cannot contain {:?}", ch)).into());
    }

    Ok(())
}
