//! JSON-backed profile store.
//!
//! The document is read once, mutated in memory, and written back whole after
//! every successful mutation. There is no locking: two processes mutating the
//! same file race and the last writer wins.
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::lib::{errors::StoreError, fs::write_replacing};

pub mod profile;
pub mod template;

pub use profile::{
    Profile, AUTH_TOKEN_VAR, BASE_URL_VAR, DISABLE_TRAFFIC_VAR, MODEL_VAR, REQUIRED_VARS,
    TIMEOUT_MS_VAR,
};
pub use template::{
    initialize, template_document, InitOutcome, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_MS,
};

/// On-disk shape: `{"profiles": {...}, "default": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDocument {
    #[serde(default)]
    pub profiles: IndexMap<String, Profile>,
    #[serde(default)]
    pub default: String,
}

impl ProfileDocument {
    fn has_valid_default(&self) -> bool {
        !self.default.is_empty() && self.profiles.contains_key(&self.default)
    }
}

/// A profile picked by `resolve`, together with the name it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub name: String,
    pub profile: Profile,
}

/// What `add` did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// An existing profile with the same name was overwritten.
    pub replaced: bool,
    /// The added profile is now the default.
    pub became_default: bool,
}

/// Profile document bound to the file it was loaded from.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
    document: ProfileDocument,
}

impl ProfileStore {
    /// Read and parse the profile document at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(
                    target: "ccswitch::store",
                    path = %path.display(),
                    "Config file does not exist"
                );
                return Err(StoreError::ConfigNotFound { path });
            }
            Err(err) => return Err(StoreError::from_io(&path, err)),
        };

        let document: ProfileDocument =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;

        debug!(
            target: "ccswitch::store",
            path = %path.display(),
            profiles = document.profiles.len(),
            default = %document.default,
            "Loaded profile store"
        );
        Ok(Self { path, document })
    }

    /// Like [`ProfileStore::load`], but a missing file yields an empty store.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        match Self::load(path) {
            Err(StoreError::ConfigNotFound { path }) => Ok(Self::empty(path)),
            other => other,
        }
    }

    /// Empty store bound to `path`; nothing is written until the first mutation.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self::from_document(path, ProfileDocument::default())
    }

    /// Store bound to `path` holding `document`; nothing is read or written.
    pub fn from_document(path: impl Into<PathBuf>, document: ProfileDocument) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &ProfileDocument {
        &self.document
    }

    /// Current default profile name; empty when unset.
    pub fn default_name(&self) -> &str {
        &self.document.default
    }

    /// Profile names in insertion order.
    pub fn list(&self) -> Vec<&str> {
        self.document.profiles.keys().map(String::as_str).collect()
    }

    /// Stored profile `name`, without default fallback.
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.document.profiles.get(name)
    }

    /// Look up `name`, falling back to the default when it is absent or empty.
    pub fn resolve(&self, name: Option<&str>) -> Result<ResolvedProfile, StoreError> {
        let requested = name.filter(|name| !name.is_empty());
        let key = requested.unwrap_or(self.document.default.as_str());

        match self.document.profiles.get(key) {
            Some(profile) if !key.is_empty() => Ok(ResolvedProfile {
                name: key.to_string(),
                profile: profile.clone(),
            }),
            _ => Err(StoreError::ProfileNotFound {
                requested: requested.map(str::to_string),
                available: self.list().into_iter().map(str::to_string).collect(),
                default_name: self.document.default.clone(),
            }),
        }
    }

    /// Insert or overwrite `name`, then persist.
    ///
    /// The profile becomes the default when the store had no usable default.
    pub fn add(&mut self, name: &str, profile: Profile) -> Result<AddOutcome, StoreError> {
        let replaced = self
            .document
            .profiles
            .insert(name.to_string(), profile)
            .is_some();
        if replaced {
            warn!(
                target: "ccswitch::store",
                profile = name,
                "Profile already existed and was overwritten"
            );
        }

        let became_default = !self.document.has_valid_default();
        if became_default {
            self.document.default = name.to_string();
        }

        self.save()?;
        info!(
            target: "ccswitch::store",
            profile = name,
            replaced,
            became_default,
            "Stored profile"
        );
        Ok(AddOutcome {
            replaced,
            became_default,
        })
    }

    /// Remove `name` and persist. Returns `false` (and writes nothing) when absent.
    ///
    /// When the default no longer names a stored profile (it was the one
    /// removed, or was already dangling), the role goes to the first remaining
    /// profile.
    pub fn delete(&mut self, name: &str) -> Result<bool, StoreError> {
        if self.document.profiles.shift_remove(name).is_none() {
            return Ok(false);
        }

        if !self.document.has_valid_default() {
            self.document.default = self
                .document
                .profiles
                .keys()
                .next()
                .cloned()
                .unwrap_or_default();
        }

        self.save()?;
        info!(
            target: "ccswitch::store",
            profile = name,
            default = %self.document.default,
            "Deleted profile"
        );
        Ok(true)
    }

    /// Make `name` the default and persist. Returns `false` when `name` is unknown.
    pub fn set_default(&mut self, name: &str) -> Result<bool, StoreError> {
        if !self.document.profiles.contains_key(name) {
            return Ok(false);
        }

        self.document.default = name.to_string();
        self.save()?;
        info!(target: "ccswitch::store", profile = name, "Changed default profile");
        Ok(true)
    }

    /// Overwrite the backing file with the current document.
    pub fn save(&self) -> Result<(), StoreError> {
        let content = render_document(&self.document).map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        write_replacing(&self.path, content.as_bytes())
            .map_err(|err| StoreError::from_io(&self.path, err))?;
        debug!(
            target: "ccswitch::store",
            path = %self.path.display(),
            bytes = content.len(),
            "Saved profile store"
        );
        Ok(())
    }
}

/// Two-space indented JSON with a trailing newline.
pub(crate) fn render_document(document: &ProfileDocument) -> Result<String, serde_json::Error> {
    let mut content = serde_json::to_string_pretty(document)?;
    content.push('\n');
    Ok(content)
}
