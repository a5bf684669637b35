//! CLI entrypoint module structure.
use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::{lib::errors::StoreError, store::ProfileStore};

pub mod args;
pub mod invocation;
pub mod prompt;
pub mod ui;

pub use args::{AddArgs, CliCommand, ConfigArgs, LaunchArgs, NameArgs, ParsedCommand};
pub use invocation::{
    ambient_environment, resolve_config_path, resolve_config_path_from, resolve_profile_name,
    Invocation, CONFIG_ENV, PROFILE_ENV,
};
pub use prompt::{FieldPrompter, TerminalPrompter};

/// Execute a store management command and return the user-facing message.
pub fn execute_cli_command(config_path: &Path, command: CliCommand) -> Result<String> {
    match command {
        CliCommand::Add(args) => add_profile(config_path, &args, &mut TerminalPrompter),
        CliCommand::Delete(args) => delete_profile(config_path, &args.name),
        CliCommand::SetDefault(args) => set_default_profile(config_path, &args.name),
    }
}

/// Render the stored profile names.
pub fn list_profiles(config_path: &Path) -> Result<String> {
    let store = ProfileStore::load(config_path)?;
    Ok(ui::render_profile_list(&store.list(), store.default_name()))
}

/// Collect, check, and store a profile. Creates the config file when missing.
pub fn add_profile<P: FieldPrompter>(
    config_path: &Path,
    args: &AddArgs,
    prompter: &mut P,
) -> Result<String> {
    let mut store = ProfileStore::load_or_default(config_path)?;
    let profile = prompt::collect_profile(args, prompter)?;
    profile.check()?;

    let outcome = store.add(&args.name, profile)?;
    info!(
        target: "ccswitch::cli",
        profile = %args.name,
        path = %config_path.display(),
        "Profile added"
    );

    let mut lines = Vec::new();
    if outcome.replaced {
        lines.push(ui::warning(&format!(
            "Profile \"{}\" already existed and was overwritten.",
            args.name
        )));
    }
    lines.push(ui::success(&format!(
        "Profile \"{}\" added successfully.",
        args.name
    )));
    if outcome.became_default {
        lines.push(ui::info(&format!("\"{}\" is now the default profile.", args.name)));
    }
    lines.push(format!(
        "You can now use it with: {}",
        ui::highlight(&format!("ccswitch {}", args.name))
    ));
    Ok(lines.join("\n"))
}

/// Delete a profile; an unknown name is an error listing the alternatives.
pub fn delete_profile(config_path: &Path, name: &str) -> Result<String> {
    let mut store = ProfileStore::load(config_path)?;
    if !store.delete(name)? {
        return Err(not_found(&store, name).into());
    }

    let mut message = ui::success(&format!("Profile \"{name}\" deleted."));
    match store.default_name() {
        "" => message.push_str(&format!("\n{}", ui::info("No default profile remains."))),
        default => message.push_str(&format!(
            "\n{}",
            ui::info(&format!("Default profile: {default}"))
        )),
    }
    Ok(message)
}

/// Point the default at an existing profile.
pub fn set_default_profile(config_path: &Path, name: &str) -> Result<String> {
    let mut store = ProfileStore::load(config_path)?;
    if !store.set_default(name)? {
        return Err(not_found(&store, name).into());
    }
    Ok(ui::success(&format!("Default profile set to \"{name}\".")))
}

fn not_found(store: &ProfileStore, name: &str) -> StoreError {
    StoreError::ProfileNotFound {
        requested: Some(name.to_string()),
        available: store.list().into_iter().map(str::to_string).collect(),
        default_name: store.default_name().to_string(),
    }
}
