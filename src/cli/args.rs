//! CLI argument definitions and `Invocation` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::{resolve_config_path, resolve_profile_name, Invocation};
use crate::launcher::{resolve_command, COMMAND_ENV};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    /// Resolve a profile and launch the child with it.
    Launch(Invocation),
    /// Print the stored profile names.
    List { config_path: PathBuf },
    /// Mutate the profile store.
    Cli {
        config_path: PathBuf,
        command: CliCommand,
    },
}

/// Profile management subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Add a profile (prompts for fields not given as flags).
    Add(AddArgs),
    /// Delete a profile.
    Delete(NameArgs),
    /// Make an existing profile the default.
    SetDefault(NameArgs),
}

impl CliCommand {
    fn config_override(&self) -> Option<PathBuf> {
        match self {
            CliCommand::Add(args) => args.config.config_override.clone(),
            CliCommand::Delete(args) | CliCommand::SetDefault(args) => {
                args.config.config_override.clone()
            }
        }
    }
}

/// Shared `--config` flag.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Path to profiles.json (overrides CCSWITCH_CONFIG).
    #[arg(long = "config", value_name = "PATH")]
    pub config_override: Option<PathBuf>,
}

/// Arguments for `add`.
#[derive(Debug, Clone, Args)]
#[command(
    after_help = "Hint: passing --token skips the prompts and uses defaults for the remaining fields."
)]
pub struct AddArgs {
    /// Profile name.
    pub name: String,
    /// API token (ANTHROPIC_AUTH_TOKEN).
    #[arg(long)]
    pub token: Option<String>,
    /// Base URL (ANTHROPIC_BASE_URL).
    #[arg(long)]
    pub base_url: Option<String>,
    /// Model name (ANTHROPIC_MODEL).
    #[arg(long)]
    pub model: Option<String>,
    /// Request timeout in milliseconds (API_TIMEOUT_MS).
    #[arg(long)]
    pub timeout_ms: Option<String>,
    /// Set CLAUDE_CODE_DISABLE_NONESSENTIAL_TRAFFIC=1.
    #[arg(long, default_value_t = false)]
    pub disable_traffic: bool,
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for commands taking only a profile name.
#[derive(Debug, Clone, Args)]
pub struct NameArgs {
    /// Profile name.
    pub name: String,
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ccswitch",
    author,
    version,
    about = "Launch Claude Code with a named API profile",
    long_about = None,
    args_conflicts_with_subcommands = true,
    after_help = "Run `ccswitch [profile] -- [args...]` to pass flags through to Claude Code."
)]
pub struct LaunchArgs {
    /// List stored profiles.
    #[arg(short = 'l', long = "list", default_value_t = false)]
    pub list: bool,
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Profile to launch (defaults to CC_SWITCH_PROFILE, then the default profile).
    pub profile: Option<String>,
    /// Arguments passed verbatim to the launched command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
    /// Profile management command.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchArgs {
    /// Build an `Invocation` from CLI args and environment variables.
    pub fn build(self) -> Result<Invocation> {
        let config_path = resolve_config_path(self.config.config_override)?;
        let (profile, args) = split_profile_and_args(self.profile, self.args);
        Ok(Invocation {
            config_path,
            profile: resolve_profile_name(profile),
            args,
            command: resolve_command(std::env::var(COMMAND_ENV).ok()),
        })
    }

    /// Parse CLI args into launch, list, or store management mode.
    pub fn into_command(self) -> Result<ParsedCommand> {
        if let Some(command) = self.command {
            let config_path = resolve_config_path(command.config_override())?;
            return Ok(ParsedCommand::Cli {
                config_path,
                command,
            });
        }

        if self.list {
            let config_path = resolve_config_path(self.config.config_override)?;
            return Ok(ParsedCommand::List { config_path });
        }

        Ok(ParsedCommand::Launch(self.build()?))
    }
}

/// `ccswitch -- -p hi` lands `-p` in the profile slot; hand it back to the child.
fn split_profile_and_args(
    profile: Option<String>,
    mut args: Vec<String>,
) -> (Option<String>, Vec<String>) {
    match profile {
        Some(flag) if flag.starts_with('-') => {
            args.insert(0, flag);
            (None, args)
        }
        other => (other, args),
    }
}
