//! Flag accumulation.
//!
//! A [`FlagSet`] collects flags into four buckets while configuration logic
//! runs, then [`flush`](FlagSet::flush)es them into the build environment.
//! Flushing *prepends*, so flags the caller already put in the environment
//! (from the distro, the packager, the command line) come later on the tool
//! command line and win over the accumulated defaults.

use crate::category::FlagCategory;
use crate::config::{ConfigBuilder, FlagFile, FlagSetConfig, FlushPolicy, DEFAULT_ENV_PREFIX};
use crate::configure::Configuration;
use crate::env::Environment;
use crate::report::collect_report;
use crate::value::FlagValue;
use crate::{FlagsError, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, trace};

/// Accumulated compiler and linker flags bound to a configuration object.
///
/// # Example
///
/// ```rust
/// use toolchain_flags::{ConfigEnv, Configuration, Configure, Environment, FlagSet};
///
/// let mut conf = Configure::new(ConfigEnv::new().with_list("CFLAGS", ["-Werror"]));
///
/// let mut flags = FlagSet::new(&mut conf);
/// flags.add_c("-O2").unwrap();
/// flags.add_c_and_cxx(["-g", "-Wall"]).unwrap();
/// flags.flush();
///
/// assert_eq!(conf.env().get_list("CFLAGS"), ["-O2", "-g", "-Wall", "-Werror"]);
/// ```
pub struct FlagSet<'a, C: Configuration + ?Sized> {
    conf: &'a mut C,
    flags: BTreeMap<FlagCategory, Vec<String>>,
    config: FlagSetConfig,
}

impl<'a, C: Configuration + ?Sized> FlagSet<'a, C> {
    /// Create an empty flag set bound to `conf`.
    pub fn new(conf: &'a mut C) -> Self {
        Self::with_config(conf, FlagSetConfig::default())
    }

    pub fn with_config(conf: &'a mut C, config: FlagSetConfig) -> Self {
        let flags = FlagCategory::ALL
            .into_iter()
            .map(|category| (category, Vec::new()))
            .collect();
        Self { conf, flags, config }
    }

    /// Create a flag set with options read from `TOOLCHAIN_FLAGS_*` variables.
    pub fn from_env(conf: &'a mut C) -> Result<Self> {
        Self::with_env_overrides(conf, FlagSetConfig::default())
    }

    /// Start from `base` and let `TOOLCHAIN_FLAGS_*` variables override it.
    pub fn with_env_overrides(conf: &'a mut C, base: FlagSetConfig) -> Result<Self> {
        let config = base.overridden_by_env(DEFAULT_ENV_PREFIX)?;
        Ok(Self::with_config(conf, config))
    }

    pub fn config(&self) -> &FlagSetConfig {
        &self.config
    }

    /// The configuration object this set flushes into.
    pub fn conf(&self) -> &C {
        &*self.conf
    }

    /// Accumulated flags for one category, in insertion order.
    pub fn flags(&self, category: FlagCategory) -> &[String] {
        self.flags.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.flags.values().all(Vec::is_empty)
    }

    /// Append a flag or list of flags to `category`.
    ///
    /// The value is converted before any bucket is touched, so a rejected
    /// value leaves the set unchanged.
    pub fn add<V>(&mut self, category: FlagCategory, value: V) -> Result<()>
    where
        V: TryInto<FlagValue>,
        FlagsError: From<V::Error>,
    {
        let value = value.try_into()?;
        self.push(category, value);
        Ok(())
    }

    /// Like [`add`](Self::add), with the category given by its environment key.
    pub fn add_named<V>(&mut self, name: &str, value: V) -> Result<()>
    where
        V: TryInto<FlagValue>,
        FlagsError: From<V::Error>,
    {
        match name.parse::<FlagCategory>() {
            Ok(category) => self.add(category, value),
            Err(err) => Err(err),
        }
    }

    /// Add to CPPFLAGS.
    pub fn add_preprocessor<V>(&mut self, value: V) -> Result<()>
    where
        V: TryInto<FlagValue>,
        FlagsError: From<V::Error>,
    {
        self.add(FlagCategory::Preprocessor, value)
    }

    /// Add to CFLAGS.
    pub fn add_c<V>(&mut self, value: V) -> Result<()>
    where
        V: TryInto<FlagValue>,
        FlagsError: From<V::Error>,
    {
        self.add(FlagCategory::C, value)
    }

    /// Add to CXXFLAGS.
    pub fn add_cxx<V>(&mut self, value: V) -> Result<()>
    where
        V: TryInto<FlagValue>,
        FlagsError: From<V::Error>,
    {
        self.add(FlagCategory::Cxx, value)
    }

    /// Add to LINKFLAGS.
    pub fn add_link<V>(&mut self, value: V) -> Result<()>
    where
        V: TryInto<FlagValue>,
        FlagsError: From<V::Error>,
    {
        self.add(FlagCategory::Link, value)
    }

    /// Add the same flags to both CFLAGS and CXXFLAGS.
    pub fn add_c_and_cxx<V>(&mut self, value: V) -> Result<()>
    where
        V: TryInto<FlagValue>,
        FlagsError: From<V::Error>,
    {
        let value = value.try_into()?;
        self.push(FlagCategory::C, value.clone());
        self.push(FlagCategory::Cxx, value);
        Ok(())
    }

    /// Apply a validated flag file.
    pub fn add_file(&mut self, file: FlagFile) {
        for (category, value) in file.into_entries() {
            self.push(category, value);
        }
    }

    /// Parse and apply a YAML flag file; nothing is added if any entry is invalid.
    pub fn add_from_yaml_str(&mut self, text: &str) -> Result<()> {
        let file = FlagFile::from_yaml_str(text)?;
        self.add_file(file);
        Ok(())
    }

    /// Parse and apply a JSON flag file; nothing is added if any entry is invalid.
    pub fn add_from_json_str(&mut self, text: &str) -> Result<()> {
        let file = FlagFile::from_json_str(text)?;
        self.add_file(file);
        Ok(())
    }

    /// Load and apply a flag file from disk.
    pub fn add_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = FlagFile::load(path)?;
        self.add_file(file);
        Ok(())
    }

    fn push(&mut self, category: FlagCategory, value: FlagValue) {
        debug!(category = category.as_str(), count = value.len(), "Adding flags");
        self.flags
            .entry(category)
            .or_default()
            .extend(value.into_vec());
    }

    /// Prepend every non-empty bucket onto the same-named environment list.
    ///
    /// Under [`FlushPolicy::Drain`] the buckets are emptied, so flushing twice
    /// applies the flags once.
    pub fn flush(&mut self) {
        let policy = self.config.flush_policy();
        for (category, values) in self.flags.iter_mut() {
            if values.is_empty() {
                trace!(category = category.as_str(), "Nothing to flush");
                continue;
            }
            debug!(
                category = category.as_str(),
                count = values.len(),
                "Flushing flags"
            );
            self.conf.env_mut().prepend_value(category.as_str(), values);
            if policy == FlushPolicy::Drain {
                values.clear();
            }
        }
    }

    /// Report the flags each tool will see, read from the environment.
    ///
    /// Emits one message per tool whose combined list is non-empty.
    pub fn display(&mut self) {
        let style = self.config.report_style;
        for line in collect_report(self.conf.env()) {
            self.conf.msg(line.label, &line.value(), style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configure::{Configure, MsgStyle};
    use crate::env::ConfigEnv;
    use serde_json::json;

    #[test]
    fn test_new_has_all_buckets_empty() {
        let mut conf = Configure::default();
        let flags = FlagSet::new(&mut conf);
        assert!(flags.is_empty());
        for category in FlagCategory::ALL {
            assert!(flags.flags(category).is_empty());
        }
    }

    #[test]
    fn test_add_preserves_order() {
        let mut conf = Configure::default();
        let mut flags = FlagSet::new(&mut conf);
        flags.add_c("-O2").unwrap();
        flags.add_c(vec!["-Wall", "-Wextra"]).unwrap();

        assert_eq!(flags.flags(FlagCategory::C), ["-O2", "-Wall", "-Wextra"]);
        assert!(flags.flags(FlagCategory::Cxx).is_empty());
    }

    #[test]
    fn test_add_rejected_value_leaves_bucket() {
        let mut conf = Configure::default();
        let mut flags = FlagSet::new(&mut conf);
        flags.add_link("-pthread").unwrap();

        let err = flags.add_link(json!(["-lm", 3])).unwrap_err();
        assert!(err.is_type_error());
        let err = flags.add_link(json!(7)).unwrap_err();
        assert!(matches!(err, FlagsError::InvalidValue { type_name: "number" }));

        assert_eq!(flags.flags(FlagCategory::Link), ["-pthread"]);
    }

    #[test]
    fn test_add_named() {
        let mut conf = Configure::default();
        let mut flags = FlagSet::new(&mut conf);
        flags.add_named("CPPFLAGS", "-DNDEBUG").unwrap();
        assert_eq!(flags.flags(FlagCategory::Preprocessor), ["-DNDEBUG"]);

        let err = flags.add_named("ASFLAGS", "-g").unwrap_err();
        assert!(matches!(err, FlagsError::UnknownCategory(_)));

        let err = flags.add_named("CFLAGS", serde_json::json!([1])).unwrap_err();
        assert!(err.is_type_error());
        assert!(flags.flags(FlagCategory::C).is_empty());
    }

    #[test]
    fn test_add_c_and_cxx() {
        let mut conf = Configure::default();
        let mut flags = FlagSet::new(&mut conf);
        flags.add_c_and_cxx("-g").unwrap();

        assert_eq!(flags.flags(FlagCategory::C), ["-g"]);
        assert_eq!(flags.flags(FlagCategory::Cxx), ["-g"]);
    }

    #[test]
    fn test_add_c_and_cxx_rejects_before_either_bucket() {
        let mut conf = Configure::default();
        let mut flags = FlagSet::new(&mut conf);
        assert!(flags.add_c_and_cxx(json!([null])).is_err());
        assert!(flags.is_empty());
    }

    #[test]
    fn test_flush_prepends() {
        let mut conf = Configure::new(ConfigEnv::new().with_list("CFLAGS", ["-Werror"]));
        let mut flags = FlagSet::new(&mut conf);
        flags.add_c("-O2").unwrap();
        flags.flush();

        assert!(flags.is_empty());
        assert_eq!(conf.env().get_list("CFLAGS"), ["-O2", "-Werror"]);
    }

    #[test]
    fn test_flush_empty_leaves_environment() {
        let env = ConfigEnv::new().with_list("CFLAGS", ["-Werror"]);
        let mut conf = Configure::new(env.clone());
        FlagSet::new(&mut conf).flush();

        assert_eq!(conf.env(), &env);
        assert!(!conf.env().contains_key("LINKFLAGS"));
    }

    #[test]
    fn test_conf_sees_flushed_flags() {
        let mut conf = Configure::default();
        let mut flags = FlagSet::new(&mut conf);
        flags.add_link("-pthread").unwrap();
        assert!(flags.conf().env().get_list("LINKFLAGS").is_empty());

        flags.flush();
        assert_eq!(flags.conf().env().get_list("LINKFLAGS"), ["-pthread"]);
    }

    #[test]
    fn test_flush_twice_drains() {
        let mut conf = Configure::default();
        let mut flags = FlagSet::new(&mut conf);
        flags.add_cxx("-fPIC").unwrap();
        flags.flush();
        flags.flush();

        assert_eq!(conf.env().get_list("CXXFLAGS"), ["-fPIC"]);
    }

    #[test]
    fn test_flush_twice_retains() {
        let mut conf = Configure::default();
        let config = FlagSetConfig::new().with_flush_policy(FlushPolicy::Retain);
        let mut flags = FlagSet::with_config(&mut conf, config);
        flags.add_cxx("-fPIC").unwrap();
        flags.flush();
        flags.flush();

        assert_eq!(flags.flags(FlagCategory::Cxx), ["-fPIC"]);
        assert_eq!(conf.env().get_list("CXXFLAGS"), ["-fPIC", "-fPIC"]);
    }

    #[test]
    fn test_display_reads_environment() {
        let mut conf = Configure::new(
            ConfigEnv::new()
                .with_list("CFLAGS", ["-O2"])
                .with_list("CPPFLAGS", Vec::<String>::new()),
        );
        let mut flags = FlagSet::new(&mut conf);
        flags.add_link("-pthread").unwrap();
        flags.display();

        let messages = conf.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].label, "C compiler flags");
        assert_eq!(messages[0].value, "['-O2']");
        assert_eq!(messages[0].style, None);
    }

    #[test]
    fn test_display_uses_report_style() {
        let mut conf = Configure::new(ConfigEnv::new().with_list("LDFLAGS", ["-lm"]));
        let config = FlagSetConfig::new().with_report_style(MsgStyle::Cyan);
        FlagSet::with_config(&mut conf, config).display();

        assert_eq!(conf.messages()[0].label, "Linker flags");
        assert_eq!(conf.messages()[0].style, Some(MsgStyle::Cyan));
    }

    #[test]
    fn test_add_from_yaml_is_all_or_nothing() {
        let mut conf = Configure::default();
        let mut flags = FlagSet::new(&mut conf);
        assert!(flags
            .add_from_yaml_str("CFLAGS: -O2\nCXXFLAGS: [-O2, false]\n")
            .is_err());
        assert!(flags.is_empty());

        flags
            .add_from_json_str(r#"{"CPPFLAGS": ["-I.", "-DX=1"]}"#)
            .unwrap();
        assert_eq!(flags.flags(FlagCategory::Preprocessor), ["-I.", "-DX=1"]);
    }
}
