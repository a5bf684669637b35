//! `Invocation` and config/profile/environment resolution.
use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};

use crate::lib::paths::{absolutize, default_config_path_from};

/// Environment variable pointing at an alternative profiles.json.
pub const CONFIG_ENV: &str = "CCSWITCH_CONFIG";
/// Environment variable naming the profile to launch.
pub const PROFILE_ENV: &str = "CC_SWITCH_PROFILE";
const HOME_ENV: &str = "HOME";
const USERPROFILE_ENV: &str = "USERPROFILE";

/// Resolved launch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config_path: PathBuf,
    /// Requested profile; `None` means the store default.
    pub profile: Option<String>,
    pub args: Vec<String>,
    /// Program to launch.
    pub command: String,
}

/// Resolve config path in the order: CLI override → `CCSWITCH_CONFIG` → `$HOME/.ccswitch/profiles.json`.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = env::current_dir().context("failed to obtain current directory")?;
    let home = env::var_os(HOME_ENV).or_else(|| env::var_os(USERPROFILE_ENV));
    resolve_config_path_from(override_path, env::var_os(CONFIG_ENV), home, &cwd)
}

/// Resolve config path from explicit values (testable helper).
pub fn resolve_config_path_from(
    override_path: Option<PathBuf>,
    env_path: Option<OsString>,
    home: Option<OsString>,
    cwd: &Path,
) -> Result<PathBuf> {
    let path = match override_path.or_else(|| {
        env_path
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }) {
        Some(path) => path,
        None => default_config_path_from(home).map_err(|message| anyhow!(message))?,
    };
    Ok(absolutize(path, cwd))
}

/// Resolve the profile name in the order: CLI argument → `CC_SWITCH_PROFILE`.
pub fn resolve_profile_name(cli_name: Option<String>) -> Option<String> {
    resolve_profile_name_from(cli_name, env::var(PROFILE_ENV).ok())
}

fn resolve_profile_name_from(cli_name: Option<String>, env_name: Option<String>) -> Option<String> {
    cli_name
        .or(env_name)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Current process environment as UTF-8 pairs.
///
/// Entries that are not valid UTF-8 cannot be represented in the merged map
/// and are skipped.
pub fn ambient_environment() -> Vec<(String, String)> {
    env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
