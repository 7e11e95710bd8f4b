//! Process invocation boundary
//!
//! Every cpdf call goes through [`CommandRunner::run`]. The production
//! [`ProcessRunner`] spawns the configured binary once per call, waits for
//! it to exit and maps the exit status to a result. There are no retries,
//! timeouts or cancellation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, instrument, warn};

use crate::command::CommandLine;
use crate::config::CpdfConfig;
use crate::error::CpdfError;

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run cpdf with `args`, returning its stdout on exit status 0
    ///
    /// `label` names the logical operation in logs and errors.
    async fn run(&self, label: &str, args: &CommandLine) -> Result<String, CpdfError>;
}

/// Runs the real cpdf executable
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: PathBuf,
    env: BTreeMap<String, String>,
}

impl ProcessRunner {
    pub fn new(config: &CpdfConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            env: config.env.clone(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(label = %label))]
    async fn run(&self, label: &str, args: &CommandLine) -> Result<String, CpdfError> {
        debug!(binary = %self.binary.display(), command = %args, "Spawning cpdf");

        let output = Command::new(&self.binary)
            .args(args.tokens())
            .envs(&self.env)
            .output()
            .await
            .map_err(|source| {
                error!(binary = %self.binary.display(), "Failed to spawn cpdf: {}", source);
                CpdfError::Spawn {
                    label: label.to_string(),
                    command: args.to_string(),
                    source,
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            warn!(code = ?output.status.code(), "cpdf failed: {}", stderr);
            return Err(CpdfError::ProcessFailed {
                label: label.to_string(),
                command: args.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = stdout.len(), "cpdf finished");
        Ok(stdout)
    }
}

/// Canned reply for [`RecordingRunner`]
#[cfg(test)]
#[derive(Debug, Clone)]
pub enum Reply {
    Stdout(String),
    Exit { code: i32, stderr: String },
}

/// Records every invocation instead of spawning anything
#[cfg(test)]
#[derive(Debug)]
pub struct RecordingRunner {
    reply: Reply,
    calls: std::sync::Mutex<Vec<(String, CommandLine)>>,
}

#[cfg(test)]
impl RecordingRunner {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn replying(stdout: &str) -> Self {
        Self::new(Reply::Stdout(stdout.to_string()))
    }

    pub fn calls(&self) -> Vec<(String, CommandLine)> {
        self.calls.lock().unwrap().clone()
    }

    /// The single recorded call; panics unless exactly one was made
    pub fn only_call(&self) -> (String, CommandLine) {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one invocation, got {:?}", calls);
        calls.into_iter().next().unwrap()
    }
}

#[cfg(test)]
#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, label: &str, args: &CommandLine) -> Result<String, CpdfError> {
        self.calls
            .lock()
            .unwrap()
            .push((label.to_string(), args.clone()));

        match &self.reply {
            Reply::Stdout(stdout) => Ok(stdout.clone()),
            Reply::Exit { code, stderr } => Err(CpdfError::ProcessFailed {
                label: label.to_string(),
                command: args.to_string(),
                code: Some(*code),
                stderr: stderr.clone(),
            }),
        }
    }
}
