//! Human-readable summary of the flags each tool will see.

use crate::category::{FlagCategory, LDFLAGS};
use crate::env::Environment;
use std::fmt;

/// One line of the flag report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub label: &'static str,
    pub flags: Vec<String>,
}

impl ReportLine {
    /// Textual form of the flag list, e.g. `['-O2', '-Wall']`.
    pub fn value(&self) -> String {
        format_flag_list(&self.flags)
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value())
    }
}

/// Compute the report from the environment's current contents.
///
/// Tools whose combined list is empty are left out.
pub fn collect_report<E: Environment + ?Sized>(env: &E) -> Vec<ReportLine> {
    let cppflags = env.get_list(FlagCategory::Preprocessor.as_str());
    let sources: [(&'static str, &[String], &[String]); 3] = [
        (
            "C compiler flags",
            env.get_list(FlagCategory::C.as_str()),
            cppflags,
        ),
        (
            "C++ compiler flags",
            env.get_list(FlagCategory::Cxx.as_str()),
            cppflags,
        ),
        (
            "Linker flags",
            env.get_list(FlagCategory::Link.as_str()),
            env.get_list(LDFLAGS),
        ),
    ];

    sources
        .into_iter()
        .filter_map(|(label, head, tail)| {
            let flags: Vec<String> = head.iter().chain(tail).cloned().collect();
            (!flags.is_empty()).then_some(ReportLine { label, flags })
        })
        .collect()
}

/// Format a flag list as quoted, comma-separated items in brackets.
///
/// Items are single-quoted unless they contain a single quote and no double
/// quote, in which case they are double-quoted. Backslashes and the chosen
/// quote character are escaped.
///
/// # Example
///
/// ```rust
/// use toolchain_flags::report::format_flag_list;
///
/// let flags = vec!["-O2".to_string(), "-DNAME='x'".to_string()];
/// assert_eq!(format_flag_list(&flags), r#"['-O2', "-DNAME='x'"]"#);
/// assert_eq!(format_flag_list(&[]), "[]");
/// ```
pub fn format_flag_list(flags: &[String]) -> String {
    let items: Vec<String> = flags.iter().map(|flag| quote_flag(flag)).collect();
    format!("[{}]", items.join(", "))
}

fn quote_flag(flag: &str) -> String {
    let quote = if flag.contains('\'') && !flag.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut quoted = String::with_capacity(flag.len() + 2);
    quoted.push(quote);
    for c in flag.chars() {
        if c == '\\' || c == quote {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push(quote);
    quoted
}
