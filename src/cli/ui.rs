//! Human-readable output: status lines, profile listings, error reports.
use std::fmt::Write as _;

use anyhow::Error;
use colored::Colorize;

use crate::lib::errors::{LaunchError, ProfileError, StoreError};

const SUCCESS_MARK: &str = "✓";
const ERROR_MARK: &str = "✗";
const WARNING_MARK: &str = "⚠";
const INFO_MARK: &str = "ℹ";
const DEFAULT_SUFFIX: &str = "(default)";

/// Green ✓ status line.
pub fn success(message: &str) -> String {
    format!("{} {message}", SUCCESS_MARK.green())
}

/// Red ✗ status line.
pub fn error(message: &str) -> String {
    format!("{} {message}", ERROR_MARK.red())
}

/// Yellow ⚠ status line.
pub fn warning(message: &str) -> String {
    format!("{} {message}", WARNING_MARK.yellow())
}

/// Blue ℹ status line.
pub fn info(message: &str) -> String {
    format!("{} {message}", INFO_MARK.blue())
}

/// Secondary text, dimmed.
pub fn dim(message: &str) -> String {
    message.dimmed().to_string()
}

/// Text the user is expected to copy or act on.
pub fn highlight(message: &str) -> String {
    message.cyan().bold().to_string()
}

/// `name`, suffixed with a cyan `(default)` when it is the default profile.
pub fn format_profile_name(name: &str, default_name: Option<&str>) -> String {
    if default_name == Some(name) {
        format!("{name} {}", DEFAULT_SUFFIX.cyan())
    } else {
        name.to_string()
    }
}

/// Bulleted profile names, default marked.
pub fn render_profile_list(names: &[&str], default_name: &str) -> String {
    if names.is_empty() {
        return info("No profiles configured. Add one with `ccswitch add <name>`.");
    }

    let default_name = Some(default_name).filter(|name| !name.is_empty());
    let mut out = String::from("Available profiles:");
    for name in names {
        let _ = write!(out, "\n  - {}", format_profile_name(name, default_name));
    }
    out
}

/// Render an error with the context a user needs to act on it.
pub fn render_error(err: &Error) -> String {
    if let Some(store_err) = err.downcast_ref::<StoreError>() {
        return render_store_error(store_err);
    }
    if let Some(launch_err) = err.downcast_ref::<LaunchError>() {
        return error(&launch_err.to_string());
    }
    if let Some(profile_err) = err.downcast_ref::<ProfileError>() {
        return error(&profile_err.to_string());
    }
    error(&format!("{err:#}"))
}

fn render_store_error(err: &StoreError) -> String {
    match err {
        StoreError::ProfileNotFound {
            available,
            default_name,
            ..
        } => {
            if available.is_empty() {
                return error("No profiles found in config file. Add one with `ccswitch add <name>`.");
            }
            let names: Vec<&str> = available.iter().map(String::as_str).collect();
            format!(
                "{}\n\n{}\n\nPlease specify a valid profile.",
                error(&err.to_string()),
                render_profile_list(&names, default_name)
            )
        }
        StoreError::ConfigNotFound { .. } => format!(
            "{}\nAdd a profile with `ccswitch add <name>` to create it.",
            error(&err.to_string())
        ),
        other => error(&other.to_string()),
    }
}
