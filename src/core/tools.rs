//! External tool invocation.
//!
//! `sops` and `age-keygen` are driven as child processes. Both sit behind
//! traits so the resolution and store logic can run against fakes.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, trace};

use super::constants;

/// Captured result of a finished tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Whether the tool exited successfully.
    pub success: bool,
    /// Human-readable exit status (`exit status: 1`, `signal: 9`, ...).
    pub status: String,
    /// Captured stdout (empty when stdout was inherited).
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

impl ToolOutput {
    fn from_parts(status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            success: status.success(),
            status: status.to_string(),
            stdout: String::from_utf8_lossy(stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }
}

/// Key-generation tool.
pub trait Keygen {
    /// Run the tool in public-key extraction mode (`-y <key>`).
    fn extract_public_key(&self, key: &Path) -> std::io::Result<ToolOutput>;
}

/// Secrets tool.
pub trait Sops {
    /// Open `path` in the interactive editor, encrypting for `recipients`.
    ///
    /// `recipients` is already in the comma-joined form sops expects.
    fn edit(&self, recipients: &str, path: &Path) -> std::io::Result<ToolOutput>;

    /// Run `command` with the decrypted manifest as its environment.
    ///
    /// Returns the child's exit code.
    fn exec_env(&self, path: &Path, command: &str) -> std::io::Result<i32>;
}

/// `age-keygen` on PATH.
#[derive(Debug, Clone)]
pub struct AgeKeygen {
    program: PathBuf,
}

impl AgeKeygen {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(constants::AGE_KEYGEN_BIN),
        }
    }
}

impl Default for AgeKeygen {
    fn default() -> Self {
        Self::new()
    }
}

impl Keygen for AgeKeygen {
    fn extract_public_key(&self, key: &Path) -> std::io::Result<ToolOutput> {
        debug!(key = %key.display(), "extracting public key");
        let output = Command::new(&self.program)
            .arg("-y")
            .arg(key)
            .stdin(Stdio::null())
            .output()?;
        Ok(ToolOutput::from_parts(
            output.status,
            &output.stdout,
            &output.stderr,
        ))
    }
}

/// `sops` on PATH.
#[derive(Debug, Clone)]
pub struct SopsCli {
    program: PathBuf,
    env: Vec<(String, String)>,
}

impl SopsCli {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(constants::SOPS_BIN),
            env: Vec::new(),
        }
    }

    /// Extra environment for every sops invocation, on top of the inherited one.
    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.envs(self.env.iter().map(|(k, v)| (k, v)));
        cmd
    }
}

impl Default for SopsCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Sops for SopsCli {
    fn edit(&self, recipients: &str, path: &Path) -> std::io::Result<ToolOutput> {
        debug!(recipients, path = %path.display(), "invoking sops editor");

        // The editor needs the terminal, so only stderr is captured.
        let output = self
            .command()
            .arg("--age")
            .arg(recipients)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()?;

        trace!(status = %output.status, "sops editor exited");
        Ok(ToolOutput::from_parts(
            output.status,
            &output.stdout,
            &output.stderr,
        ))
    }

    fn exec_env(&self, path: &Path, command: &str) -> std::io::Result<i32> {
        debug!(path = %path.display(), command, "invoking sops exec-env");
        let status = self
            .command()
            .arg("exec-env")
            .arg(path)
            .arg(command)
            .status()?;
        Ok(exit_code(status))
    }
}

/// Map a child's exit status onto a process exit code.
///
/// Signal terminations follow the shell convention of 128 + signal number.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
