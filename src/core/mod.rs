//! Core library components.
//!
//! Key resolution, recipient selection and the manifest store. Encryption
//! itself always happens in `sops`.

pub mod constants;
pub mod deps;
pub mod dotenv;
pub mod keys;
pub mod recipient;
pub mod runner;
pub mod settings;
pub mod store;
pub mod tools;
pub mod validation;
