use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors raised while reading, querying, or persisting the profile store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The config file does not exist yet.
    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },
    /// The config file exists but is not a valid profile document.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Failed to encode the profile document.
    #[error("Failed to serialize config file {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The requested (or default) profile is absent.
    #[error("Profile not found: {}", .requested.as_deref().unwrap_or("(default)"))]
    ProfileNotFound {
        requested: Option<String>,
        available: Vec<String>,
        default_name: String,
    },
    /// The config file or its directory is not accessible.
    #[error("Permission denied while accessing {path}: {source}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The directory holding the config file is missing.
    #[error("Directory for config file {path} does not exist: {source}")]
    MissingDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O failed for config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Map an I/O failure on `path` to the matching user-facing kind.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            io::ErrorKind::NotFound => Self::MissingDirectory { path, source },
            _ => Self::Io { path, source },
        }
    }
}

/// Failures of a profile's field presence/format checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Profile is missing required fields: {}", .missing.join(", "))]
    MissingFields { missing: Vec<&'static str> },
    #[error("Profile field `{field}` is invalid: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

/// Failures of a launch, raised before or during spawn.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Missing required environment variables: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },
    #[error("{command} command not found. Install it or point CCSWITCH_COMMAND at the program to launch.")]
    CommandNotFound {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to launch {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Classify a spawn failure of `command`.
    pub fn from_spawn(command: &str, source: io::Error) -> Self {
        let command = command.to_string();
        if source.kind() == io::ErrorKind::NotFound {
            Self::CommandNotFound { command, source }
        } else {
            Self::Spawn { command, source }
        }
    }
}
