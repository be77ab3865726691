use std::collections::HashMap;

use anyhow::{anyhow, Result};

/// Trailing CLI arguments split into a rider name and key:value metadata,
/// e.g. `Alex Green s:12 f:1 date:yesterday`.
#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        name_parts.push(arg.as_str());
    }

    ParsedInput {
        name: name_parts.join(" "),
        metadata,
    }
}

/// Expand an abbreviated key against the known set: `s` -> `successful`,
/// `ret` -> `returned`. Ambiguous or unknown prefixes are errors.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Parse a delivery count. Counts are non-negative by construction of u32;
/// the error message names the offending key.
pub fn parse_count(key: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid count for '{}': '{}' (expected a non-negative integer)", key, value))
}
