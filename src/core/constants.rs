//! Constants used throughout sops-run.
//!
//! Centralizes tool names, environment variables and directory layout.

/// Secrets tool binary.
pub const SOPS_BIN: &str = "sops";

/// Key-generation tool binary.
pub const AGE_KEYGEN_BIN: &str = "age-keygen";

/// Where to point users when `sops` is missing.
pub const SOPS_INSTALL_HINT: &str = "https://github.com/getsops/sops#download";

/// Where to point users when `age-keygen` is missing.
pub const AGE_INSTALL_HINT: &str = "https://github.com/FiloSottile/age#installation";

/// Manifest store directory relative to HOME (~/.sops-run).
pub const STORE_DIR: &str = ".sops-run";

/// Default key directory relative to HOME (~/.local/age).
pub const KEY_DIR: &str = ".local/age";

/// Manifest file extension.
pub const MANIFEST_EXT: &str = "yml";

/// Path to an age key file used instead of the default key.
pub const ENV_AGE_KEY: &str = "SOPS_AGE_KEY";

/// Comma-separated list of age recipients.
pub const ENV_AGE_RECIPIENTS: &str = "SOPS_AGE_RECIPIENTS";

/// Tracing filter override.
pub const ENV_LOG: &str = "SOPS_RUN_LOG";

/// Optional env file read from the current directory.
pub const DOTENV_FILE: &str = ".env";
