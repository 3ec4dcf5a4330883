//! Environment variable helpers with warn-level logging for bad values.

/// Parse an environment variable, falling back to `default`.
///
/// An unset variable is the expected case and is silent. A value that is set
/// but does not parse logs a warning and yields `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Returns the first of `vars` that is set to a non-blank value.
#[must_use]
pub fn env_first_non_empty(vars: &[&str]) -> Option<String> {
    vars.iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|v| v.trim().to_owned())
        .find(|v| !v.is_empty())
}

/// Comma-separated list from an environment variable.
///
/// Blank entries are dropped. Unset or all-blank falls back to `default`.
#[must_use]
pub fn env_list_with_default(var: &str, default: &[&str]) -> Vec<String> {
    let parsed: Vec<String> = std::env::var(var)
        .map(|v| split_list(&v))
        .unwrap_or_default();
    if parsed.is_empty() {
        default.iter().map(|s| (*s).to_owned()).collect()
    } else {
        parsed
    }
}

/// Split a comma-separated list, trimming entries and dropping blanks.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(ToOwned::to_owned).collect()
}
