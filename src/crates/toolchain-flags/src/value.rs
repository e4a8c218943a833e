//! Flag values: a single flag or an ordered list of flags.

use crate::{FlagsError, Result};
use serde_json::Value;

/// A flag value accepted by `FlagSet::add`.
///
/// Typed input converts infallibly. Dynamic input (a `serde_json::Value`, as
/// read from a flag file) is validated in full before anything is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Single(String),
    Many(Vec<String>),
}

impl FlagValue {
    /// Number of flags carried.
    pub fn len(&self) -> usize {
        match self {
            FlagValue::Single(_) => 1,
            FlagValue::Many(flags) => flags.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flags as a slice, in order.
    pub fn as_slice(&self) -> &[String] {
        match self {
            FlagValue::Single(flag) => std::slice::from_ref(flag),
            FlagValue::Many(flags) => flags,
        }
    }

    /// Flags as an owned list, in order.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            FlagValue::Single(flag) => vec![flag],
            FlagValue::Many(flags) => flags,
        }
    }
}

impl From<&str> for FlagValue {
    fn from(flag: &str) -> Self {
        FlagValue::Single(flag.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(flag: String) -> Self {
        FlagValue::Single(flag)
    }
}

impl From<Vec<String>> for FlagValue {
    fn from(flags: Vec<String>) -> Self {
        FlagValue::Many(flags)
    }
}

impl From<Vec<&str>> for FlagValue {
    fn from(flags: Vec<&str>) -> Self {
        FlagValue::Many(flags.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for FlagValue {
    fn from(flags: &[&str]) -> Self {
        FlagValue::Many(flags.iter().map(|flag| flag.to_string()).collect())
    }
}

impl From<&[String]> for FlagValue {
    fn from(flags: &[String]) -> Self {
        FlagValue::Many(flags.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for FlagValue {
    fn from(flags: [&str; N]) -> Self {
        FlagValue::Many(flags.iter().map(|flag| flag.to_string()).collect())
    }
}

impl TryFrom<Value> for FlagValue {
    type Error = FlagsError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(flag) => Ok(FlagValue::Single(flag)),
            Value::Array(items) => {
                let mut flags = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    match item {
                        Value::String(flag) => flags.push(flag),
                        other => {
                            return Err(FlagsError::InvalidElement {
                                index,
                                type_name: json_type_name(&other),
                            })
                        }
                    }
                }
                Ok(FlagValue::Many(flags))
            }
            other => Err(FlagsError::InvalidValue {
                type_name: json_type_name(&other),
            }),
        }
    }
}

impl TryFrom<&Value> for FlagValue {
    type Error = FlagsError;

    fn try_from(value: &Value) -> Result<Self> {
        FlagValue::try_from(value.clone())
    }
}

/// Runtime type name of a dynamic value, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
