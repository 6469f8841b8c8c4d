use std::path::Path;

use crate::error::{CheckError, Result};

/// Read a newline-delimited address list. Blank lines are skipped and
/// surrounding whitespace is trimmed; nothing else is validated locally.
pub fn load_addresses(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_addresses(&data))
}

pub fn parse_addresses(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
