//! Name canonicalization shared by column and value repairs.

/// Lowercase a name and keep only its alphanumeric characters.
///
/// `"Col_1"`, `"col 1"` and `" C$O%L^1"` all normalize to `"col1"`.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Normalize a cell; absent normalizes to the empty string.
pub fn normalize_cell(cell: Option<&str>) -> String {
    cell.map(normalize_name).unwrap_or_default()
}
