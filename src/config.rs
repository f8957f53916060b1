// src/config.rs
use std::env;

pub const DEFAULT_MODEL: &str = "gemini-1.5-mini";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Process-wide settings, read once at start-up and never mutated.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub model: String,
    /// `None` selects the canned fallback reply instead of the provider.
    pub api_key: Option<String>,
    pub api_base: String,
    pub bind_addr: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Unset and empty variables are treated the same.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            api_key: get("GEMINI_API_KEY"),
            api_base: get("GEMINI_BASE").unwrap_or(defaults.api_base),
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// `{base}/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}
