//! Manifest store.
//!
//! One sops-encrypted manifest per command, kept at
//! `~/.sops-run/<name>.yml`. Manifests are created and edited through the
//! sops editor and are never deleted here.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::constants::MANIFEST_EXT;
use super::recipient::RecipientSet;
use super::tools::Sops;
use super::validation::validate_manifest_name;
use crate::error::{Error, Result, StoreError};

/// Directory of manifests.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

/// Which editor operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Update {
    Create,
    Edit,
}

impl Update {
    fn action(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
        }
    }
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the store directory exists.
    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// Path of the manifest for `name`, after validating the name.
    pub fn manifest_path(&self, name: &str) -> Result<PathBuf> {
        validate_manifest_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, MANIFEST_EXT)))
    }

    /// Create the store directory if it does not exist.
    ///
    /// Returns `true` when the directory was created by this call. On Unix
    /// the directory is restricted to its owner (0700).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CreateDirFailed` on any filesystem error.
    pub fn ensure_dir(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }

        let create_failed = |source| StoreError::CreateDirFailed {
            path: self.dir.clone(),
            source,
        };

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(&self.dir).map_err(create_failed)?;

        // The mode above is masked by the umask.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                let _ = fs::remove_dir(&self.dir);
                return Err(create_failed(e).into());
            }
        }

        debug!(dir = %self.dir.display(), "created store directory");
        Ok(true)
    }

    /// Create a new manifest for a single command name.
    ///
    /// # Arguments
    ///
    /// * `command` - Command tokens; exactly one is accepted
    /// * `recipients` - Recipients the manifest is encrypted for
    /// * `sops` - Secrets tool used to write the manifest
    ///
    /// # Returns
    ///
    /// The path of the new manifest.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArguments` if `command` is not exactly one token
    /// - `StoreError::AlreadyExists` if the manifest is already present
    /// - `StoreError::OperationFailed` if sops exits unsuccessfully
    pub fn create(
        &self,
        command: &[String],
        recipients: &RecipientSet,
        sops: &dyn Sops,
    ) -> Result<PathBuf> {
        let name = single_name(command)?;
        let path = self.manifest_path(name)?;
        self.ensure_dir()?;

        if path.exists() {
            return Err(StoreError::AlreadyExists(name.to_string()).into());
        }

        self.update(Update::Create, &path, recipients, sops)?;
        Ok(path)
    }

    /// Edit an existing manifest.
    ///
    /// Never creates the manifest or the store directory.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArguments` if `command` is not exactly one token
    /// - `StoreError::NotFound` if no manifest exists for the name
    /// - `StoreError::OperationFailed` if sops exits unsuccessfully
    pub fn edit(
        &self,
        command: &[String],
        recipients: &RecipientSet,
        sops: &dyn Sops,
    ) -> Result<PathBuf> {
        let name = single_name(command)?;
        let path = self.manifest_path(name)?;

        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()).into());
        }

        self.update(Update::Edit, &path, recipients, sops)?;
        Ok(path)
    }

    /// Look up the manifest for `name`.
    ///
    /// # Errors
    ///
    /// - `StoreError::DirMissing` if the store directory does not exist
    /// - `StoreError::NotFound` if the manifest is absent
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        if !self.exists() {
            return Err(StoreError::DirMissing(self.dir.clone()).into());
        }

        let path = self.manifest_path(name)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()).into());
        }

        debug!(name, path = %path.display(), "resolved manifest");
        Ok(path)
    }

    /// Names of all manifests in the store, sorted.
    ///
    /// An absent store directory is treated as empty.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(MANIFEST_EXT)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn update(
        &self,
        update: Update,
        path: &Path,
        recipients: &RecipientSet,
        sops: &dyn Sops,
    ) -> Result<()> {
        debug!(
            action = update.action(),
            path = %path.display(),
            recipients = recipients.len(),
            "running sops editor"
        );

        let output = sops.edit(&recipients.to_arg(), path)?;
        if !output.success {
            let mut captured = output.stderr;
            if !output.stdout.trim().is_empty() {
                captured.push_str(&output.stdout);
            }
            return Err(StoreError::OperationFailed {
                action: update.action(),
                status: output.status,
                output: captured,
            }
            .into());
        }
        Ok(())
    }
}

/// The manifest name for create/edit, which take exactly one token.
fn single_name(command: &[String]) -> Result<&str> {
    match command {
        [name] => Ok(name.as_str()),
        [] => Err(Error::InvalidArguments("a command name is required".to_string())),
        _ => Err(Error::InvalidArguments(
            "only one command name accepted with --create or --edit".to_string(),
        )),
    }
}
