//! How a result should be presented, and how that is assembled from
//! hard-coded command defaults, persisted configuration and flags.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_NAME_FIELD: &str = "Name";
pub const DEFAULT_QUIET_FIELD: &str = "Id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputAs {
    #[default]
    Table,
    Quiet,
    Json,
    Yaml,
}

impl OutputAs {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputAs::Table => "table",
            OutputAs::Quiet => "quiet",
            OutputAs::Json => "json",
            OutputAs::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputAs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputAs::Table),
            "quiet" => Ok(OutputAs::Quiet),
            "json" => Ok(OutputAs::Json),
            "yaml" => Ok(OutputAs::Yaml),
            other => Err(Error::InvalidOptions(format!(
                "unknown output type '{}' (expected table, json or yaml)",
                other
            ))),
        }
    }
}

/// Everything the pipeline needs to know about one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationSpec {
    pub format: String,
    pub filter: String,
    pub order_by: String,
    pub output_as: OutputAs,
    /// 0 disables truncation.
    pub name_limit: usize,
    /// Column shortened by the name truncator.
    pub name_field: String,
    /// Column printed in quiet mode.
    pub quiet_field: String,
}

impl Default for PresentationSpec {
    fn default() -> Self {
        Self {
            format: String::new(),
            filter: String::new(),
            order_by: String::new(),
            output_as: OutputAs::Table,
            name_limit: 0,
            name_field: DEFAULT_NAME_FIELD.to_string(),
            quiet_field: DEFAULT_QUIET_FIELD.to_string(),
        }
    }
}

/// Persisted per-command settings, e.g. `device-list.format`.
pub trait OptionSource {
    fn command_option(&self, command: &str, key: &str) -> Option<String>;

    /// Global name-column limit, used when no flag sets one.
    fn name_limit(&self) -> Option<usize> {
        None
    }
}

/// No persisted configuration at all.
impl OptionSource for () {
    fn command_option(&self, _command: &str, _key: &str) -> Option<String> {
        None
    }
}

/// Flat `"<command>.<key>"` map.
impl OptionSource for BTreeMap<String, String> {
    fn command_option(&self, command: &str, key: &str) -> Option<String> {
        self.get(&format!("{}.{}", command, key)).cloned()
    }
}

/// Built-in presentation defaults of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefaults {
    pub command: String,
    pub format: String,
    pub order_by: String,
    pub name_field: String,
    pub quiet_field: String,
}

impl CommandDefaults {
    pub fn new(command: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            format: format.into(),
            order_by: String::new(),
            name_field: DEFAULT_NAME_FIELD.to_string(),
            quiet_field: DEFAULT_QUIET_FIELD.to_string(),
        }
    }

    pub fn with_order(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    pub fn with_name_field(mut self, field: impl Into<String>) -> Self {
        self.name_field = field.into();
        self
    }

    pub fn with_quiet_field(mut self, field: impl Into<String>) -> Self {
        self.quiet_field = field.into();
        self
    }
}

/// Per-invocation flag values. `None` means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub format: Option<String>,
    pub quiet: bool,
    pub output_as: Option<OutputAs>,
    pub name_limit: Option<usize>,
    pub filter: Option<String>,
    pub order_by: Option<String>,
}

impl PresentationSpec {
    /// Merge with precedence flag > configuration > built-in default.
    ///
    /// An empty `--format` or `--orderby` counts as not given.
    pub fn build(
        defaults: &CommandDefaults,
        config: &dyn OptionSource,
        flags: &Overrides,
    ) -> Result<Self> {
        let output_as = match (flags.quiet, flags.output_as) {
            (true, Some(OutputAs::Json | OutputAs::Yaml)) => {
                return Err(Error::InvalidOptions(
                    "--quiet cannot be combined with json or yaml output".to_string(),
                ));
            }
            (true, _) => OutputAs::Quiet,
            (false, Some(o)) => o,
            (false, None) => OutputAs::Table,
        };

        let format = match flags.format.as_deref().filter(|f| !f.is_empty()) {
            Some(f) => unescape_format(f),
            None => config
                .command_option(&defaults.command, "format")
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| defaults.format.clone()),
        };

        let order_by = flags
            .order_by
            .clone()
            .filter(|o| !o.is_empty())
            .or_else(|| config.command_option(&defaults.command, "order"))
            .unwrap_or_else(|| defaults.order_by.clone());

        let name_limit = flags.name_limit.or(config.name_limit()).unwrap_or(0);

        Ok(Self {
            format,
            filter: flags.filter.clone().unwrap_or_default(),
            order_by,
            output_as,
            name_limit,
            name_field: defaults.name_field.clone(),
            quiet_field: defaults.quiet_field.clone(),
        })
    }
}

/// Turn the two-character sequences `\t` and `\n` typed on a shell into a
/// real tab and newline.
pub fn unescape_format(format: &str) -> String {
    format.replace("\\t", "\t").replace("\\n", "\n")
}
