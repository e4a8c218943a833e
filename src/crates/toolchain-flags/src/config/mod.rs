//! Configuration management
//!
//! - `ConfigBuilder` trait and `FlagSetConfig`, the options a `FlagSet` runs with
//! - Environment variable loading with proper error handling
//! - Flag files (`FlagFile`)
//!
//! # Example
//!
//! ```rust,ignore
//! use toolchain_flags::config::{ConfigBuilder, FlagSetConfig, FlushPolicy};
//!
//! // TOOLCHAIN_FLAGS_FLUSH_POLICY=retain TOOLCHAIN_FLAGS_REPORT_STYLE=cyan
//! let config = FlagSetConfig::new().overridden_by_env("TOOLCHAIN_FLAGS_")?;
//! assert_eq!(config.flush_policy(), FlushPolicy::Retain);
//! ```

mod builder;
mod env;
mod file;

pub use builder::ConfigBuilder;
pub use env::{build_env_key, get_env, get_env_flags, get_env_parse};
pub use file::FlagFile;

use crate::configure::MsgStyle;
use crate::{FlagsError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Prefix for the environment variables read by [`FlagSetConfig::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "TOOLCHAIN_FLAGS_";

/// What `FlagSet::flush` does with the accumulated flags once applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlushPolicy {
    /// Empty the buckets; flushing again is a no-op.
    #[default]
    Drain,
    /// Keep the buckets; flushing again prepends the same flags again.
    Retain,
}

impl FromStr for FlushPolicy {
    type Err = FlagsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "drain" => Ok(Self::Drain),
            "retain" => Ok(Self::Retain),
            _ => Err(FlagsError::Config(format!("unknown flush policy: {}", s))),
        }
    }
}

/// Options for a `FlagSet`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSetConfig {
    pub flush_policy: Option<FlushPolicy>,
    /// Style passed to `msg` for each report line.
    pub report_style: Option<MsgStyle>,
}

impl FlagSetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flush_policy(mut self, policy: FlushPolicy) -> Self {
        self.flush_policy = Some(policy);
        self
    }

    pub fn with_report_style(mut self, style: MsgStyle) -> Self {
        self.report_style = Some(style);
        self
    }

    /// Effective flush policy.
    pub fn flush_policy(&self) -> FlushPolicy {
        self.flush_policy.unwrap_or_default()
    }
}

impl ConfigBuilder for FlagSetConfig {
    fn from_env(prefix: &str) -> Result<Self> {
        Ok(Self {
            flush_policy: get_env_parse(&build_env_key(prefix, "flush_policy"))?,
            report_style: get_env_parse(&build_env_key(prefix, "report_style"))?,
        })
    }

    fn merge(&mut self, other: Self) -> &mut Self {
        if other.flush_policy.is_some() {
            self.flush_policy = other.flush_policy;
        }
        if other.report_style.is_some() {
            self.report_style = other.report_style;
        }
        self
    }
}
