//! Launch a child process with a profile's variables in its environment.
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::{
    lib::{errors::LaunchError, telemetry::LaunchSpan},
    store::Profile,
};

pub mod runner;

pub use runner::{build_child_command, InheritedStdioRunner, LaunchRequest, ProcessRunner};

/// Program launched when `CCSWITCH_COMMAND` is unset.
pub const DEFAULT_COMMAND: &str = "claude-code";
/// Environment variable overriding the launched program.
pub const COMMAND_ENV: &str = "CCSWITCH_COMMAND";

/// Outcome of [`validate`]. Empty `missing` means the profile can launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub missing: Vec<&'static str>,
}

impl Validation {
    /// True when no required variable is missing.
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Report which required variables are absent or empty.
pub fn validate(profile: &Profile) -> Validation {
    Validation {
        missing: profile.missing_required(),
    }
}

/// Copy `base_env`, then let every profile variable overwrite or extend it.
pub fn build_environment<I, K, V>(profile: &Profile, base_env: I) -> IndexMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut env: IndexMap<String, String> = base_env
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    for (key, value) in profile.iter() {
        env.insert(key.to_string(), value.to_string());
    }
    env
}

/// Resolve the launched program from an explicit override value.
pub fn resolve_command(override_value: Option<String>) -> String {
    override_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_COMMAND.to_string())
}

/// Validates profiles and hands prepared requests to a [`ProcessRunner`].
#[derive(Debug, Clone)]
pub struct Launcher<R> {
    runner: R,
    command: String,
}

impl Launcher<InheritedStdioRunner> {
    /// Launcher for `command` with the parent's stdio.
    pub fn inherited(command: impl Into<String>) -> Self {
        Self::new(InheritedStdioRunner, command)
    }
}

impl<R: ProcessRunner> Launcher<R> {
    /// Launch `command` through `runner`.
    pub fn new(runner: R, command: impl Into<String>) -> Self {
        Self {
            runner,
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Validate, spawn, and wait for the child.
    ///
    /// Resolves with the child's exit code, `0` when it ended without one.
    /// A failed spawn is reported once and never retried.
    pub async fn launch<I, K, V>(
        &self,
        profile: &Profile,
        extra_args: &[String],
        base_env: I,
    ) -> Result<i32, LaunchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let validation = validate(profile);
        if !validation.is_valid() {
            debug!(
                target: "ccswitch::launcher",
                missing = ?validation.missing,
                "Profile failed validation"
            );
            return Err(LaunchError::Validation {
                missing: validation.missing,
            });
        }

        let request = LaunchRequest {
            program: self.command.clone(),
            args: extra_args.to_vec(),
            env: build_environment(profile, base_env),
        };
        debug!(
            target: "ccswitch::launcher",
            command = %request.program,
            args = ?request.args,
            env_vars = request.env.len(),
            "Spawning child process"
        );

        let span = LaunchSpan::start(&request.program, request.args.len());
        match self.runner.run(&request).await {
            Ok(code) => {
                span.finish("exited", code);
                Ok(code.unwrap_or(0))
            }
            Err(err) => {
                span.finish("spawn_failed", None);
                let err = LaunchError::from_spawn(&self.command, err);
                info!(target: "ccswitch::launcher", reason = %err, "Launch failed");
                Err(err)
            }
        }
    }
}
