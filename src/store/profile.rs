//! `Profile`: the environment variables a launch injects.
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::lib::errors::ProfileError;

pub const AUTH_TOKEN_VAR: &str = "ANTHROPIC_AUTH_TOKEN";
pub const BASE_URL_VAR: &str = "ANTHROPIC_BASE_URL";
pub const MODEL_VAR: &str = "ANTHROPIC_MODEL";
pub const TIMEOUT_MS_VAR: &str = "API_TIMEOUT_MS";
pub const DISABLE_TRAFFIC_VAR: &str = "CLAUDE_CODE_DISABLE_NONESSENTIAL_TRAFFIC";

/// Variables every launchable profile must define with a non-empty value.
pub const REQUIRED_VARS: [&str; 3] = [AUTH_TOKEN_VAR, BASE_URL_VAR, MODEL_VAR];

/// Ordered variable-name to value map.
///
/// Keys keep their file order so a load/save cycle rewrites the document
/// unchanged. The required and optional Claude Code variables have typed
/// accessors; any other key rides along as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Profile {
    vars: IndexMap<String, String>,
}

impl Profile {
    /// Profile with no variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile with the three required variables set.
    pub fn with_required(
        auth_token: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self::new()
            .with_var(AUTH_TOKEN_VAR, auth_token)
            .with_var(BASE_URL_VAR, base_url)
            .with_var(MODEL_VAR, model)
    }

    /// Builder form of [`Profile::insert`].
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`, returning the previous value. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.vars.insert(key.into(), value.into())
    }

    /// Raw value of `key`, empty strings included.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// `ANTHROPIC_AUTH_TOKEN`, when set and non-empty.
    pub fn auth_token(&self) -> Option<&str> {
        self.non_empty(AUTH_TOKEN_VAR)
    }

    /// `ANTHROPIC_BASE_URL`, when set and non-empty.
    pub fn base_url(&self) -> Option<&str> {
        self.non_empty(BASE_URL_VAR)
    }

    /// `ANTHROPIC_MODEL`, when set and non-empty.
    pub fn model(&self) -> Option<&str> {
        self.non_empty(MODEL_VAR)
    }

    /// `API_TIMEOUT_MS` as stored; [`Profile::check`] validates the number.
    pub fn timeout_ms(&self) -> Option<&str> {
        self.non_empty(TIMEOUT_MS_VAR)
    }

    /// Whether `CLAUDE_CODE_DISABLE_NONESSENTIAL_TRAFFIC` is `1`.
    pub fn disables_nonessential_traffic(&self) -> bool {
        self.get(DISABLE_TRAFFIC_VAR) == Some("1")
    }

    /// Variables in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Required variables that are absent or empty, in declaration order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_VARS
            .into_iter()
            .filter(|key| self.non_empty(key).is_none())
            .collect()
    }

    /// Presence and format checks applied before a profile is stored.
    pub fn check(&self) -> Result<(), ProfileError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ProfileError::MissingFields { missing });
        }

        if let Some(url) = self.base_url() {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ProfileError::InvalidField {
                    field: BASE_URL_VAR,
                    message: format!("`{url}` must start with http:// or https://"),
                });
            }
        }

        if let Some(timeout) = self.timeout_ms() {
            match timeout.parse::<u64>() {
                Ok(value) if value > 0 => {}
                _ => {
                    return Err(ProfileError::InvalidField {
                        field: TIMEOUT_MS_VAR,
                        message: format!("`{timeout}` must be a positive integer"),
                    })
                }
            }
        }

        if let Some(flag) = self.get(DISABLE_TRAFFIC_VAR) {
            if flag != "0" && flag != "1" {
                return Err(ProfileError::InvalidField {
                    field: DISABLE_TRAFFIC_VAR,
                    message: format!("`{flag}` must be 0 or 1"),
                });
            }
        }

        Ok(())
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for Profile
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Hand-edited files sometimes carry numbers or booleans; they are kept as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl RawValue {
    fn into_text(self) -> String {
        match self {
            RawValue::Text(text) => text,
            RawValue::Number(number) => number.to_string(),
            RawValue::Flag(flag) => flag.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for Profile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, RawValue>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(key, value)| (key, value.into_text()))
            .collect())
    }
}
