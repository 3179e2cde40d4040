use std::collections::HashMap;
use std::path::Path;

/// Loads a `.properties` file (`key=value` or `key: value` per line).
///
/// Lines starting with `#` or `!` are comments. A missing file yields an
/// empty map, so a build without a properties file runs on defaults.
pub fn load_properties(path: &Path) -> miette::Result<HashMap<String, String>> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(keel_util::errors::KeelError::Io)?;
    Ok(parse_properties(&content))
}

/// Parse `.properties` text. Later duplicates win; a key without a separator
/// maps to the empty string.
pub fn parse_properties(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        let split = trimmed.find(['=', ':']);
        let (key, value) = match split {
            Some(idx) => (&trimmed[..idx], &trimmed[idx + 1..]),
            None => (trimmed, ""),
        };
        map.insert(key.trim().to_string(), value.trim().to_string());
    }
    map
}
