//! Environment variable loading utilities
//!
//! Helper functions for loading and parsing environment variables with proper error handling.

use crate::{FlagsError, Result};
use std::env;
use std::str::FromStr;

/// Load an environment variable as a string
///
/// # Returns
///
/// * `Ok(Some(value))` if variable exists
/// * `Ok(None)` if variable doesn't exist
/// * `Err` if variable exists but has invalid UTF-8
pub fn get_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(FlagsError::Config(format!(
            "Environment variable {} contains invalid UTF-8",
            key
        ))),
    }
}

/// Load and parse an environment variable
///
/// # Returns
///
/// * `Ok(Some(value))` if variable exists and parses successfully
/// * `Ok(None)` if variable doesn't exist
/// * `Err` if variable exists but fails to parse
///
/// # Example
///
/// ```rust,ignore
/// let policy: Option<FlushPolicy> = get_env_parse("TOOLCHAIN_FLAGS_FLUSH_POLICY")?;
/// ```
pub fn get_env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env(key)? {
        Some(val) => {
            let parsed = val.parse::<T>().map_err(|e| {
                FlagsError::Config(format!(
                    "Failed to parse environment variable {}: {}",
                    key, e
                ))
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Load a flag list from an environment variable
///
/// The value is split on whitespace, so `CFLAGS="-O2  -g"` yields `["-O2", "-g"]`.
/// A variable that is set but blank yields an empty list.
pub fn get_env_flags(key: &str) -> Result<Option<Vec<String>>> {
    Ok(get_env(key)?.map(|val| val.split_whitespace().map(str::to_string).collect()))
}

/// Build a prefixed environment variable name
///
/// # Example
///
/// ```rust
/// use toolchain_flags::config::build_env_key;
///
/// assert_eq!(build_env_key("APP_", "flush_policy"), "APP_FLUSH_POLICY");
/// ```
pub fn build_env_key(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name.to_uppercase())
}
