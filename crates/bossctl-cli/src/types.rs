use bossctl_format::OutputAs;
use clap::ValueEnum;
use std::fmt;

/// Structured or tabular output, `-o/--outputas`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputType {
    Table,
    Json,
    Yaml,
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputType::Table => write!(f, "table"),
            OutputType::Json => write!(f, "json"),
            OutputType::Yaml => write!(f, "yaml"),
        }
    }
}

impl From<OutputType> for OutputAs {
    fn from(output: OutputType) -> Self {
        match output {
            OutputType::Table => OutputAs::Table,
            OutputType::Json => OutputAs::Json,
            OutputType::Yaml => OutputAs::Yaml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
