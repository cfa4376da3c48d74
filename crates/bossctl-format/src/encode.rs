use crate::error::Result;
use bossctl_types::Value;

/// Structured encodings for `-o json` / `-o yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Yaml,
}

/// Encode `value` completely, ignoring format strings and name truncation.
///
/// Null renders as `null`, an empty list as `[]`. The output always ends with
/// a newline.
pub fn encode(value: &Value, encoding: Encoding) -> Result<String> {
    let mut out = match encoding {
        Encoding::Json => serde_json::to_string_pretty(value)?,
        Encoding::Yaml => serde_yaml::to_string(value)?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
