//! Flag files: a mapping from category name to a flag or list of flags.
//!
//! ```yaml
//! CFLAGS: ["-O2", "-Wall"]
//! LINKFLAGS: -pthread
//! ```

use crate::category::FlagCategory;
use crate::value::FlagValue;
use crate::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A parsed and fully validated flag file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagFile {
    entries: Vec<(FlagCategory, FlagValue)>,
}

impl FlagFile {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::from_map(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_map(serde_json::from_str(text)?)
    }

    /// Load a flag file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loading flag file");
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Validate every entry; the first bad name or value rejects the whole file.
    fn from_map(map: BTreeMap<String, Value>) -> Result<Self> {
        let entries = map
            .into_iter()
            .map(|(name, value)| -> Result<(FlagCategory, FlagValue)> {
                Ok((name.parse::<FlagCategory>()?, FlagValue::try_from(value)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(FlagCategory, FlagValue)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(FlagCategory, FlagValue)> {
        self.entries
    }
}
