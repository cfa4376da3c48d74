use crate::kinds::ResultKind;
use crate::types::{LogLevel, OutputType};
use bossctl_format::Overrides;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bossctl")]
#[command(about = "Manage an OLT/ONU access network controller", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: $BOSSCTL_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Render a saved controller response (JSON) as a table, JSON or YAML")]
    Render {
        #[arg(value_enum)]
        kind: ResultKind,

        /// JSON file to read, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    #[command(about = "Print the effective configuration")]
    Config,
}

/// Presentation flags shared by every listing command.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Go-style template, e.g. 'table{{.Id}}\t{{.Type}}'
    #[arg(short, long)]
    pub format: Option<String>,

    /// Only print the identifier column
    #[arg(short, long)]
    pub quiet: bool,

    #[arg(short, long, value_enum)]
    pub outputas: Option<OutputType>,

    /// Truncate the name column to N characters (0 = no limit)
    #[arg(short = 'l', long)]
    pub name_limit: Option<usize>,

    /// Filter rows, e.g. 'OperStatus=ACTIVE AND Type!=openolt'
    #[arg(long)]
    pub filter: Option<String>,

    /// Order rows, e.g. 'Type,-Id'
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    pub orderby: Option<String>,
}

impl OutputArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            format: self.format.clone(),
            quiet: self.quiet,
            output_as: self.outputas.map(Into::into),
            name_limit: self.name_limit,
            filter: self.filter.clone(),
            order_by: self.orderby.clone(),
        }
    }
}
