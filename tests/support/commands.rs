//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a sops-run command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - PATH limited to the stub bin directory and the system shell tools
    /// - the sops-run and sops key environment variables removed
    /// - current directory set to the test working directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sops-run").expect("failed to find sops-run binary");
        cmd.env("HOME", self.home.path());
        cmd.env("PATH", format!("{}:/usr/bin:/bin", self.bin.path().display()));
        cmd.env("STUB_LOG", self.log_path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SOPS_AGE_KEY");
        cmd.env_remove("SOPS_AGE_RECIPIENTS");
        cmd.env_remove("SOPS_RUN_LOG");
        cmd.env_remove("SOPS_AGE_KEY_FILE");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `sops-run --create <name>`.
    pub fn create(&self, name: &str) -> Output {
        self.cmd()
            .args(["--create", name])
            .output()
            .expect("failed to run sops-run --create")
    }

    /// Shortcut for `sops-run --edit <name>`.
    pub fn edit(&self, name: &str) -> Output {
        self.cmd()
            .args(["--edit", name])
            .output()
            .expect("failed to run sops-run --edit")
    }

    /// Shortcut for `sops-run --list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("--list")
            .output()
            .expect("failed to run sops-run --list")
    }

    /// Shortcut for `sops-run <command...>`.
    pub fn run(&self, command: &[&str]) -> Output {
        self.cmd()
            .args(command)
            .output()
            .expect("failed to run sops-run")
    }
}
