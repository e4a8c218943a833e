//! Flag categories.

use crate::FlagsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the linker flag list that the report reads but `FlagSet` never writes.
pub const LDFLAGS: &str = "LDFLAGS";

/// One of the four buckets a `FlagSet` accumulates into.
///
/// The string names are the exact environment keys the host build tool uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FlagCategory {
    #[serde(rename = "CPPFLAGS")]
    Preprocessor,
    #[serde(rename = "CFLAGS")]
    C,
    #[serde(rename = "CXXFLAGS")]
    Cxx,
    #[serde(rename = "LINKFLAGS")]
    Link,
}

impl FlagCategory {
    /// All categories, in flush order.
    pub const ALL: [FlagCategory; 4] = [
        FlagCategory::Preprocessor,
        FlagCategory::C,
        FlagCategory::Cxx,
        FlagCategory::Link,
    ];

    /// Environment key for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preprocessor => "CPPFLAGS",
            Self::C => "CFLAGS",
            Self::Cxx => "CXXFLAGS",
            Self::Link => "LINKFLAGS",
        }
    }
}

impl fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagCategory {
    type Err = FlagsError;

    /// Exact match only; environment keys are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| FlagsError::UnknownCategory(s.to_string()))
    }
}
