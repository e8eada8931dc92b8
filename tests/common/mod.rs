//! Shared helpers for the integration suite.

#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding catalogs, macro sources and a settings file.
pub struct TestWorkspace {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    root: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().to_path_buf();
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write `content` to `name` inside the workspace and return its path.
    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Path of the settings file every command run picks up.
    pub fn config_path(&self) -> PathBuf {
        self.path("config.toml")
    }

    /// Run the `macromsg` binary inside the workspace.
    ///
    /// `MACROMSG_CONFIG` points into the workspace so the user's own settings
    /// never leak into a test.
    pub fn run_macromsg(&self, args: &[&str]) -> Result<CommandOutput> {
        self.run(self.command(args)?)
    }

    /// Like [`run_macromsg`](Self::run_macromsg), feeding `input` on stdin.
    pub fn run_macromsg_with_input(&self, args: &[&str], input: &str) -> Result<CommandOutput> {
        let mut command = self.command(args)?;
        command.write_stdin(input.to_string());
        self.run(command)
    }

    fn command(&self, args: &[&str]) -> Result<Command> {
        let mut command = Command::cargo_bin("macromsg")?;
        command
            .args(args)
            .current_dir(&self.root)
            .env("MACROMSG_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        Ok(command)
    }

    fn run(&self, mut command: Command) -> Result<CommandOutput> {
        let output = command.output().context("Failed to run macromsg command")?;
        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Captured result of a command run.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert the command failed
    pub fn assert_failure(&self) -> &Self {
        assert!(!self.success, "Command unexpectedly succeeded\nStdout: {}", self.stdout);
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{text}'\nActual stdout: {}",
            self.stdout
        );
        self
    }

    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{text}'\nActual stderr: {}",
            self.stderr
        );
        self
    }
}
