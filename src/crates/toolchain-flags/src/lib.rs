//! Compiler and linker flag accumulation for build configuration
//!
//! Configuration logic collects flags into four buckets (CPPFLAGS, CFLAGS,
//! CXXFLAGS, LINKFLAGS) on a [`FlagSet`], then flushes them into the build
//! environment. Flushing prepends, so flags already present in the
//! environment keep the last word on the tool command line.
//!
//! # Modules
//!
//! - `category` - The four flag categories and their environment keys
//! - `value` - Single flags and flag lists, with validation of dynamic input
//! - `env` - The `Environment` store and the in-memory `ConfigEnv`
//! - `configure` - The `Configuration` object: environment plus messages
//! - `flags` - `FlagSet`: add, flush, display
//! - `report` - Per-tool summary of the flags in an environment
//! - `config` - `FlagSetConfig`, environment variable loading, flag files
//! - `error` - `FlagsError` and `Result`

pub mod category;
pub mod config;
pub mod configure;
pub mod env;
pub mod error;
pub mod flags;
pub mod report;
pub mod value;

pub use category::{FlagCategory, LDFLAGS};
pub use config::{ConfigBuilder, FlagFile, FlagSetConfig, FlushPolicy};
pub use configure::{Configuration, Configure, Message, MsgStyle};
pub use env::{ConfigEnv, Environment};
pub use error::{FlagsError, Result};
pub use flags::FlagSet;
pub use report::{collect_report, format_flag_list, ReportLine};
pub use value::FlagValue;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
