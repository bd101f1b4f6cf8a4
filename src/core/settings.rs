//! Runtime settings.
//!
//! Gathers the filesystem layout and the environment-provided key settings.
//! Values from the process environment beat values from a `.env` file in
//! the current directory. Empty values count as unset.
//!
//! The rest of the `.env` file is passed to `sops` as [`Settings::child_env`],
//! again without overriding anything already set in the process.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::constants;
use super::dotenv::DotEnv;
use super::recipient::RecipientSources;
use crate::error::{KeyError, Result};

/// Per-user directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Manifest store (`~/.sops-run`).
    pub store_dir: PathBuf,
    /// Default key directory (`~/.local/age`).
    pub key_dir: PathBuf,
}

impl Paths {
    /// Layout under the current user's home directory.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(KeyError::NoHomeDir)?;
        Ok(Self::under(&home))
    }

    /// Layout under an explicit home directory.
    pub fn under(home: &Path) -> Self {
        Self {
            store_dir: home.join(constants::STORE_DIR),
            key_dir: home.join(constants::KEY_DIR),
        }
    }
}

/// Key settings taken from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// `SOPS_AGE_KEY`
    pub age_key: Option<PathBuf>,
    /// `SOPS_AGE_RECIPIENTS`, unparsed
    pub age_recipients: Option<String>,
    /// `.env` entries not already set in the process environment
    pub child_env: Vec<(String, String)>,
}

impl Settings {
    /// Read settings from the process environment and `./.env`.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let dotenv = DotEnv::find_in(&cwd, constants::DOTENV_FILE)?;
        if let Some(file) = &dotenv {
            debug!(path = %file.path().display(), entries = file.len(), "loaded env file");
        }
        Ok(Self::from_lookup(|key| std::env::var(key).ok(), dotenv.as_ref()))
    }

    /// Build settings from an environment lookup and an optional env file.
    pub fn from_lookup<F>(env: F, dotenv: Option<&DotEnv>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| {
            env(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| {
                    dotenv
                        .and_then(|file| file.get(key))
                        .filter(|v| !v.trim().is_empty())
                        .map(str::to_string)
                })
        };

        let child_env = dotenv
            .map(|file| {
                file.entries()
                    .iter()
                    .filter(|(key, _)| env(key.as_str()).is_none())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Self {
            age_key: lookup(constants::ENV_AGE_KEY).map(PathBuf::from),
            age_recipients: lookup(constants::ENV_AGE_RECIPIENTS),
            child_env,
        }
    }

    /// Combine with the `--key` flag into recipient resolution inputs.
    pub fn recipient_sources(&self, cli_key: Option<PathBuf>) -> RecipientSources {
        RecipientSources {
            cli_key,
            env_key: self.age_key.clone(),
            env_recipients: self.age_recipients.clone(),
        }
    }
}
