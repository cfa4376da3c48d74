use crate::align::{PADDING, align_columns};
use crate::args::OutputArgs;
use crate::config::Config;
use crate::kinds::ResultKind;
use anyhow::{Context, Result};
use bossctl_format::{OutputAs, PresentationSpec, ResultPipeline};
use std::io::{self, Read, Write};
use tracing::debug;

pub fn handle(kind: ResultKind, input: &str, args: &OutputArgs, config: &Config) -> Result<()> {
    let spec = PresentationSpec::build(&kind.defaults(), config, &args.overrides())?;
    debug!(kind = kind.command_name(), format = %spec.format, output_as = %spec.output_as, "presentation");

    let raw = read_input(input)?;
    let text = kind.render(&raw, &ResultPipeline::default(), &spec)?;

    let text = match spec.output_as {
        OutputAs::Table => align_columns(&text, PADDING),
        _ => text,
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read input from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read input file {}", input))
}
