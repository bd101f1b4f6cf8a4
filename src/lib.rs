//! sops-run - Run a command with secrets decrypted from sops manifests.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── manifest      # --create / --edit / --list
//! │   ├── run           # Run with injected secrets
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── deps          # sops / age-keygen availability
//!     ├── keys          # Default key discovery, recipient derivation
//!     ├── recipient     # Recipient precedence
//!     ├── store         # ~/.sops-run manifest store
//!     ├── runner        # sops exec-env
//!     ├── settings      # Paths and environment settings
//!     ├── dotenv        # .env reader
//!     └── tools         # External tool seams
//! ```
//!
//! Encryption, decryption and secret injection are always delegated to
//! `sops`; public keys come from `age-keygen -y`.

pub mod cli;
pub mod core;
pub mod error;
