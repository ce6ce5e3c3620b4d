//! Environment lookups with legacy-name fallbacks.
//!
//! Credentials may be exported under the current `SNAKE_CASE` names or the
//! older mixed-case names; the first non-empty value wins.

use std::collections::HashMap;
use std::env;

/// A read-only mapping from variable name to value.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| value.to_string())
    }
}

/// A configuration value and the names it may be exported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvKey {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl EnvKey {
    /// Returns the first non-empty value among the canonical name and its aliases.
    pub fn lookup(&self, source: &impl EnvSource) -> Option<String> {
        std::iter::once(self.name)
            .chain(self.aliases.iter().copied())
            .filter_map(|name| source.var(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }
}

pub const FIRECRAWL_API_KEY: EnvKey = EnvKey {
    name: "FIRECRAWL_API_KEY",
    aliases: &["FIRECRAWL_API_Key"],
};

pub const MODEL_BASE_URL: EnvKey = EnvKey {
    name: "KIMI_K2_HF_BASE",
    aliases: &["Kimi_K2_HF_Base"],
};

pub const MODEL_TOKEN: EnvKey = EnvKey {
    name: "KIMI_K2_HF_TOKEN",
    aliases: &["Kimi_K2_HF_Token"],
};

pub const MODEL_ID: EnvKey = EnvKey {
    name: "KIMI_K2_HF_MODEL",
    aliases: &["Kimi_K2_HF_Model"],
};
