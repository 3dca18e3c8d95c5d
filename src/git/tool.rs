//! External tool spawning.
//!
//! Both `git` and `gh` go through [`ExternalTool::run`], which either captures
//! output for queries or hands the terminal to the tool for commands that open
//! an editor.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::context::{CallContext, Interrupted};
use crate::error::ToolError;

/// How the child process is wired to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Pipe stdout/stderr and return trimmed stdout.
    Capture,
    /// Inherit stdin/stdout/stderr so the tool's editor and prompts work.
    Interactive,
}

/// A command-line program invoked as `<program> <subcommand> [tokens...]`.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: String,
    workdir: Option<PathBuf>,
}

impl ExternalTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            workdir: None,
        }
    }

    pub fn git() -> Self {
        Self::new("git")
    }

    pub fn gh() -> Self {
        Self::new("gh")
    }

    /// Run the tool inside `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    /// Run `<program> <subcommand> [tokens...]`.
    ///
    /// In [`RunMode::Capture`] the trimmed stdout is returned and a non-zero
    /// exit becomes [`ToolError::Failed`] carrying stderr. In
    /// [`RunMode::Interactive`] nothing is captured and an empty string is
    /// returned on success.
    ///
    /// A captured child is killed if `ctx` is cancelled or its deadline
    /// passes. An interactive child is only prevented from starting by an
    /// already-cancelled `ctx`; after that it runs to completion and handles
    /// Ctrl+C itself.
    pub async fn run(
        &self,
        ctx: &CallContext,
        subcommand: &str,
        tokens: &[String],
        mode: RunMode,
    ) -> Result<String, ToolError> {
        if which::which(&self.program).is_err() {
            return Err(ToolError::NotFound {
                program: self.program.clone(),
            });
        }

        debug!(program = %self.program, subcommand, ?tokens, ?mode, "running external tool");

        let mut cmd = Command::new(&self.program);
        cmd.arg(subcommand).args(tokens);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        match mode {
            RunMode::Capture => self.capture(ctx, subcommand, cmd).await,
            RunMode::Interactive => self.interactive(ctx, subcommand, cmd).await,
        }
    }

    async fn capture(
        &self,
        ctx: &CallContext,
        subcommand: &str,
        mut cmd: Command,
    ) -> Result<String, ToolError> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = ctx
            .run(cmd.output())
            .await
            .map_err(|i| self.interrupted(subcommand, i))?
            .map_err(|e| self.spawn_failed(e))?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                program: self.program.clone(),
                subcommand: subcommand.to_string(),
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn interactive(
        &self,
        ctx: &CallContext,
        subcommand: &str,
        mut cmd: Command,
    ) -> Result<String, ToolError> {
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Once started, the child owns the terminal: Ctrl+C reaches it directly
        // and an editor it opened must not be killed underneath the user.
        if ctx.is_cancelled() {
            return Err(self.interrupted(subcommand, Interrupted::Canceled));
        }

        let status = cmd.status().await.map_err(|e| self.spawn_failed(e))?;

        if !status.success() {
            return Err(ToolError::Failed {
                program: self.program.clone(),
                subcommand: subcommand.to_string(),
                exit_code: status.code(),
                stderr: String::new(),
            });
        }

        Ok(String::new())
    }

    fn spawn_failed(&self, err: std::io::Error) -> ToolError {
        if err.kind() == std::io::ErrorKind::NotFound {
            ToolError::NotFound {
                program: self.program.clone(),
            }
        } else {
            ToolError::SpawnFailed {
                program: self.program.clone(),
                source: err,
            }
        }
    }

    fn interrupted(&self, subcommand: &str, interrupted: Interrupted) -> ToolError {
        match interrupted {
            Interrupted::Canceled => ToolError::Canceled {
                program: self.program.clone(),
                subcommand: subcommand.to_string(),
            },
            Interrupted::TimedOut(timeout) => ToolError::TimedOut {
                program: self.program.clone(),
                subcommand: subcommand.to_string(),
                secs: timeout.as_secs(),
            },
        }
    }
}
