//! Config path resolution shared by the CLI and tests.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Directory under `$HOME` holding ccswitch state.
pub const CONFIG_DIR_NAME: &str = ".ccswitch";
/// File name of the profile document.
pub const CONFIG_FILE_NAME: &str = "profiles.json";

/// Default profile document location derived from a home directory value.
pub fn default_config_path_from(home: Option<OsString>) -> Result<PathBuf, &'static str> {
    match home {
        Some(home) if !home.is_empty() => Ok(PathBuf::from(home)
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)),
        _ => Err("HOME is unset; pass --config or set CCSWITCH_CONFIG"),
    }
}

/// Join relative paths onto `cwd`; absolute paths pass through.
pub fn absolutize(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
