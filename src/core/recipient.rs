//! Recipient selection.
//!
//! Decides which age recipients a manifest is encrypted for. Precedence,
//! first match wins:
//!
//! 1. `--key <path>`
//! 2. `SOPS_AGE_KEY`
//! 3. `SOPS_AGE_RECIPIENTS`
//! 4. the default key in `~/.local/age`

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::keys;
use super::tools::Keygen;
use crate::error::{KeyError, Result};

/// Ordered, de-duplicated, non-empty list of age recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientSet(Vec<String>);

impl RecipientSet {
    /// Build a set from raw entries.
    ///
    /// Entries are trimmed, empty entries dropped, and duplicates removed
    /// keeping the first occurrence. Returns `None` if nothing is left.
    pub fn from_entries<I, S>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut recipients: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() || recipients.iter().any(|r| r == entry) {
                continue;
            }
            recipients.push(entry.to_string());
        }

        if recipients.is_empty() {
            None
        } else {
            Some(Self(recipients))
        }
    }

    /// Parse a comma-separated recipient list.
    pub fn parse_list(list: &str) -> Option<Self> {
        Self::from_entries(list.split(','))
    }

    /// Recipients in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no recipients.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The argument form sops expects: a bare recipient, or a comma-joined
    /// list when there are several.
    pub fn to_arg(&self) -> String {
        self.0.join(",")
    }
}

impl fmt::Display for RecipientSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_arg())
    }
}

/// Inputs to recipient resolution, gathered once at startup.
#[derive(Debug, Clone, Default)]
pub struct RecipientSources {
    /// `--key` from the command line.
    pub cli_key: Option<PathBuf>,
    /// `SOPS_AGE_KEY`.
    pub env_key: Option<PathBuf>,
    /// Raw `SOPS_AGE_RECIPIENTS`.
    pub env_recipients: Option<String>,
}

/// Which branch of the precedence order produced the recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientSource {
    CliKey(PathBuf),
    EnvKey(PathBuf),
    EnvRecipients,
    DefaultKey(PathBuf),
}

impl fmt::Display for RecipientSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliKey(path) => write!(f, "--key {}", path.display()),
            Self::EnvKey(path) => write!(f, "SOPS_AGE_KEY ({})", path.display()),
            Self::EnvRecipients => f.write_str("SOPS_AGE_RECIPIENTS"),
            Self::DefaultKey(path) => write!(f, "default key {}", path.display()),
        }
    }
}

/// Resolved recipients and where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub recipients: RecipientSet,
    pub source: RecipientSource,
}

/// Resolve the recipient set for this invocation.
///
/// `key_dir` is only scanned when no other source applies. An empty or
/// all-blank `SOPS_AGE_RECIPIENTS` counts as unset.
///
/// # Errors
///
/// Returns `KeyError::ExtractionFailed` when a key cannot be turned into a
/// recipient, or `KeyError::NoKeyFound` when falling back to an empty
/// default key directory.
pub fn resolve(sources: &RecipientSources, keygen: &dyn Keygen, key_dir: &Path) -> Result<Resolved> {
    let resolved = if let Some(key) = &sources.cli_key {
        from_key(keygen, key, RecipientSource::CliKey(key.clone()))?
    } else if let Some(key) = &sources.env_key {
        from_key(keygen, key, RecipientSource::EnvKey(key.clone()))?
    } else if let Some(recipients) = sources
        .env_recipients
        .as_deref()
        .and_then(RecipientSet::parse_list)
    {
        Resolved {
            recipients,
            source: RecipientSource::EnvRecipients,
        }
    } else {
        let key = keys::find_default_key(key_dir)?;
        from_key(keygen, &key, RecipientSource::DefaultKey(key.clone()))?
    };

    debug!(
        source = %resolved.source,
        recipients = %resolved.recipients,
        "resolved recipients"
    );
    Ok(resolved)
}

fn from_key(keygen: &dyn Keygen, key: &Path, source: RecipientSource) -> Result<Resolved> {
    let recipient = keys::derive_recipient(keygen, key)?;
    let recipients =
        RecipientSet::from_entries([recipient]).ok_or_else(|| KeyError::ExtractionFailed {
            key: key.to_path_buf(),
            reason: "empty recipient".to_string(),
        })?;
    Ok(Resolved { recipients, source })
}
