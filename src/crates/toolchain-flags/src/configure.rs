//! The host build tool's configuration object.
//!
//! A [`Configuration`] exposes the build environment and a message facility
//! for "label: value" lines during configure. [`Configure`] is the in-memory
//! implementation: it owns a [`ConfigEnv`], records every message and logs it.

use crate::env::{ConfigEnv, Environment};
use crate::FlagsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Column the label of a configuration message is padded to.
pub const LINE_JUST: usize = 40;

/// Display style for a configuration message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MsgStyle {
    Normal,
    Green,
    Yellow,
    Red,
    Cyan,
}

impl MsgStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Red => "RED",
            Self::Cyan => "CYAN",
        }
    }
}

impl FromStr for MsgStyle {
    type Err = FlagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NORMAL" => Ok(Self::Normal),
            "GREEN" => Ok(Self::Green),
            "YELLOW" => Ok(Self::Yellow),
            "RED" => Ok(Self::Red),
            "CYAN" => Ok(Self::Cyan),
            _ => Err(FlagsError::Config(format!("unknown message style: {}", s))),
        }
    }
}

/// A configuration object: an environment plus a message facility.
pub trait Configuration {
    type Env: Environment;

    fn env(&self) -> &Self::Env;

    fn env_mut(&mut self) -> &mut Self::Env;

    /// Report a "label: value" line to the user.
    fn msg(&mut self, label: &str, value: &str, style: Option<MsgStyle>);
}

/// A message emitted through [`Configuration::msg`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub label: String,
    pub value: String,
    pub style: Option<MsgStyle>,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<width$}: {}", self.label, self.value, width = LINE_JUST)
    }
}

/// In-memory configuration object.
#[derive(Debug, Clone, Default)]
pub struct Configure {
    env: ConfigEnv,
    messages: Vec<Message>,
}

impl Configure {
    pub fn new(env: ConfigEnv) -> Self {
        Self {
            env,
            messages: Vec::new(),
        }
    }

    /// Messages emitted so far, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Release the environment, discarding recorded messages.
    pub fn into_env(self) -> ConfigEnv {
        self.env
    }
}

impl Configuration for Configure {
    type Env = ConfigEnv;

    fn env(&self) -> &ConfigEnv {
        &self.env
    }

    fn env_mut(&mut self) -> &mut ConfigEnv {
        &mut self.env
    }

    fn msg(&mut self, label: &str, value: &str, style: Option<MsgStyle>) {
        let message = Message {
            label: label.to_string(),
            value: value.to_string(),
            style,
        };
        info!(style = style.map(|s| s.as_str()), "{}", message);
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_is_recorded() {
        let mut conf = Configure::default();
        conf.msg("Checking for gcc", "yes", Some(MsgStyle::Green));

        assert_eq!(conf.messages().len(), 1);
        assert_eq!(conf.messages()[0].label, "Checking for gcc");
        assert_eq!(conf.messages()[0].style, Some(MsgStyle::Green));
    }

    #[test]
    fn test_message_display_pads_label() {
        let message = Message {
            label: "Linker flags".to_string(),
            value: "['-lm']".to_string(),
            style: None,
        };
        let line = message.to_string();
        assert!(line.starts_with("Linker flags "));
        assert_eq!(line.find(':'), Some(LINE_JUST));
        assert!(line.ends_with(": ['-lm']"));
    }

    #[test]
    fn test_style_parse_case_insensitive() {
        assert_eq!("cyan".parse::<MsgStyle>().unwrap(), MsgStyle::Cyan);
        assert_eq!("YELLOW".parse::<MsgStyle>().unwrap(), MsgStyle::Yellow);
        assert!("blink".parse::<MsgStyle>().is_err());
    }

    #[test]
    fn test_env_access() {
        let mut conf = Configure::new(ConfigEnv::new().with_list("CFLAGS", ["-O2"]));
        conf.env_mut().append_value("CFLAGS", &["-g".to_string()]);
        assert_eq!(conf.env().get_list("CFLAGS"), ["-O2", "-g"]);
        assert_eq!(conf.into_env().get_list("CFLAGS").len(), 2);
    }
}
