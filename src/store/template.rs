//! Starter document written when no config file exists yet.
use std::path::Path;

use tracing::info;

use super::{render_document, Profile, ProfileDocument, TIMEOUT_MS_VAR};
use crate::lib::{errors::StoreError, fs::write_new};

const TEMPLATE_PROFILE_NAME: &str = "anthropic";
const TEMPLATE_AUTH_TOKEN: &str = "sk-ant-your-token-here";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250514";
pub const DEFAULT_TIMEOUT_MS: &str = "300000";

/// Result of [`initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyExists,
}

/// One placeholder profile, marked default.
pub fn template_document() -> ProfileDocument {
    let mut document = ProfileDocument::default();
    document.profiles.insert(
        TEMPLATE_PROFILE_NAME.to_string(),
        Profile::with_required(TEMPLATE_AUTH_TOKEN, DEFAULT_BASE_URL, DEFAULT_MODEL)
            .with_var(TIMEOUT_MS_VAR, DEFAULT_TIMEOUT_MS),
    );
    document.default = TEMPLATE_PROFILE_NAME.to_string();
    document
}

/// Write the template to `path` unless a file is already there.
pub fn initialize(path: &Path) -> Result<InitOutcome, StoreError> {
    let content = render_document(&template_document()).map_err(|source| {
        StoreError::Serialize {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let created =
        write_new(path, content.as_bytes()).map_err(|err| StoreError::from_io(path, err))?;
    if created {
        info!(
            target: "ccswitch::store",
            path = %path.display(),
            "Created template config"
        );
        Ok(InitOutcome::Created)
    } else {
        Ok(InitOutcome::AlreadyExists)
    }
}
