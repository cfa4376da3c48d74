use crate::config::Config;
use anyhow::Result;

pub fn handle(config: &Config) -> Result<()> {
    print!("{}", config.effective().to_toml()?);
    Ok(())
}
