//! Process runners: the seam between the launcher and the OS.
use std::{future::Future, io, process::Stdio};

use indexmap::IndexMap;
use tokio::process::Command;

/// Fully prepared child invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub program: String,
    pub args: Vec<String>,
    /// Complete child environment; nothing is inherited beyond this map.
    pub env: IndexMap<String, String>,
}

/// Runs a [`LaunchRequest`] to completion.
///
/// Resolves with the child's exit code, or `None` when it reported none
/// (for example when killed by a signal). Spawn failures surface as the
/// underlying `io::Error`.
pub trait ProcessRunner {
    fn run(&self, request: &LaunchRequest) -> impl Future<Output = io::Result<Option<i32>>> + Send;
}

/// Production runner: stdin/stdout/stderr are the parent's own handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct InheritedStdioRunner;

impl ProcessRunner for InheritedStdioRunner {
    fn run(&self, request: &LaunchRequest) -> impl Future<Output = io::Result<Option<i32>>> + Send {
        let mut command = build_child_command(request);
        async move {
            let mut child = command.spawn()?;
            let status = child.wait().await?;
            Ok(status.code())
        }
    }
}

/// Build the `tokio` command for `request` with inherited stdio.
pub fn build_child_command(request: &LaunchRequest) -> Command {
    let mut command = Command::new(&request.program);
    command.args(&request.args);
    command.env_clear();
    command.envs(&request.env);
    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    command
}
