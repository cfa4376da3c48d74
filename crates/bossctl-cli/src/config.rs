use crate::kinds::ResultKind;
use anyhow::{Context, Result, bail};
use bossctl_format::OptionSource;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "BOSSCTL_CONFIG";

/// Resolve the configuration file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. BOSSCTL_CONFIG environment variable (with tilde expansion)
/// 3. Platform config directory (`~/.config/bossctl/config.toml` on Linux)
/// 4. ~/.bossctl/config.toml (fallback for systems without one)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("bossctl").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".bossctl").join("config.toml"));
    }

    bail!("Could not determine config path: no HOME directory or config directory found")
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_limit: Option<usize>,
}

/// Per-command presentation overrides, `[commands.device-list]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub commands: BTreeMap<String, CommandConfig>,
}

impl Config {
    /// Load from `path`; a missing file is an empty configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// This configuration with every built-in command default filled in.
    pub fn effective(&self) -> Self {
        let mut config = self.clone();
        config.output.name_limit.get_or_insert(0);

        for kind in ResultKind::value_variants() {
            let defaults = kind.defaults();
            let entry = config
                .commands
                .entry(kind.command_name().to_string())
                .or_default();
            entry.format.get_or_insert(defaults.format);
            entry.order.get_or_insert(defaults.order_by);
        }
        config
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

impl OptionSource for Config {
    fn command_option(&self, command: &str, key: &str) -> Option<String> {
        let command = self.commands.get(command)?;
        match key {
            "format" => command.format.clone(),
            "order" => command.order.clone(),
            _ => None,
        }
    }

    fn name_limit(&self) -> Option<usize> {
        self.output.name_limit
    }
}
