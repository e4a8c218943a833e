//! Configuration builder trait
//!
//! Common shape for configuration structures: environment variable loading
//! and merging over values set in code.

use crate::Result;

/// Trait for configuration structures that support environment loading and merging
///
/// # Example
///
/// ```rust,ignore
/// use toolchain_flags::config::{ConfigBuilder, FlagSetConfig, FlushPolicy};
///
/// // Retain unless TOOLCHAIN_FLAGS_FLUSH_POLICY says otherwise
/// let config = FlagSetConfig::new()
///     .with_flush_policy(FlushPolicy::Retain)
///     .overridden_by_env("TOOLCHAIN_FLAGS_")?;
/// ```
pub trait ConfigBuilder: Default + Clone {
    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern `{PREFIX}{FIELD_NAME}`
    /// where FIELD_NAME is the uppercased field name. Unset variables leave
    /// the field unset.
    fn from_env(prefix: &str) -> Result<Self>;

    /// Merge another configuration into this one
    ///
    /// Option fields: `other` value overwrites if Some.
    ///
    /// Returns self for chaining.
    fn merge(&mut self, other: Self) -> &mut Self;

    /// Apply environment variables on top of this configuration
    ///
    /// Fields set in the environment win; everything else keeps its value.
    fn overridden_by_env(self, prefix: &str) -> Result<Self> {
        let mut config = self;
        config.merge(Self::from_env(prefix)?);
        Ok(config)
    }
}
