//! Shared helper functions for CLI commands

use miette::Result;

use crate::core::numeric;

/// Parse a command-line value in engineering notation
pub fn parse_value_arg(text: &str) -> Result<f64> {
    let value = numeric::parse(text);
    if value.is_nan() {
        return Err(miette::miette!(
            help = "use a plain (1.5), scientific (1.5e-3) or suffixed (2.2k) value",
            "'{}' is not a number",
            text
        ));
    }
    Ok(value)
}

/// Split a comma-separated list, keeping empty entries
///
/// `G,M,k,,m` yields five items; the empty one stands for "no suffix".
pub fn split_list(text: &str) -> Vec<&str> {
    text.split(',').map(str::trim).collect()
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
