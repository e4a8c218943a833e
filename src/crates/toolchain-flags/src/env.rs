//! Build environment: named, ordered flag lists.
//!
//! [`Environment`] is the store the host build tool owns. [`ConfigEnv`] is an
//! in-memory implementation that can be seeded from the process environment
//! or from a JSON/YAML dump.

use crate::category::{FlagCategory, LDFLAGS};
use crate::config::get_env_flags;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A store of named flag lists supporting ordered merges.
pub trait Environment {
    /// Current list for `key`; empty when the key is absent.
    fn get_list(&self, key: &str) -> &[String];

    /// Place `values` before the current contents of `key`, creating the list if absent.
    fn prepend_value(&mut self, key: &str, values: &[String]);

    /// Place `values` after the current contents of `key`, creating the list if absent.
    fn append_value(&mut self, key: &str, values: &[String]);
}

/// In-memory environment keyed by variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigEnv {
    table: BTreeMap<String, Vec<String>>,
}

impl ConfigEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list stored under `key`.
    pub fn set_list<I, S>(&mut self, key: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Builder form of [`ConfigEnv::set_list`].
    pub fn with_list<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_list(key, values);
        self
    }

    /// Whether `key` has been created, even if its list is empty.
    pub fn contains_key(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Variable names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Seed the flag lists from process environment variables.
    ///
    /// Reads `CPPFLAGS`, `CFLAGS`, `CXXFLAGS`, `LINKFLAGS` and `LDFLAGS`,
    /// splitting each on whitespace. Unset variables are skipped.
    pub fn from_process_env() -> Result<Self> {
        let mut env = Self::new();
        let keys = FlagCategory::ALL
            .iter()
            .map(FlagCategory::as_str)
            .chain(std::iter::once(LDFLAGS));

        for key in keys {
            if let Some(flags) = get_env_flags(key)? {
                debug!(key, count = flags.len(), "Seeding flags from process environment");
                env.set_list(key, flags);
            }
        }
        Ok(env)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load an environment dump; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loading environment");
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Environment for ConfigEnv {
    fn get_list(&self, key: &str) -> &[String] {
        self.table.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn prepend_value(&mut self, key: &str, values: &[String]) {
        let current = self.table.entry(key.to_string()).or_default();
        current.splice(0..0, values.iter().cloned());
    }

    fn append_value(&mut self, key: &str, values: &[String]) {
        self.table
            .entry(key.to_string())
            .or_default()
            .extend_from_slice(values);
    }
}
