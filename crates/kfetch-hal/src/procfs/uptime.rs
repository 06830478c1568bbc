//! Parsing helpers for `/proc/uptime`.

/// Returns the whole seconds of the leading uptime value.
///
/// Accepts both `12345.67 ...` and bare integers; the fraction is dropped.
pub fn parse_uptime_secs(content: &str) -> Option<u64> {
    let first = content.split_whitespace().next()?;
    let whole = first.split('.').next()?;
    whole.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fractional_seconds() {
        assert_eq!(parse_uptime_secs("7260.42 14000.10\n"), Some(7260));
    }

    #[test]
    fn parses_integer_seconds() {
        assert_eq!(parse_uptime_secs("59\n"), Some(59));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_uptime_secs(""), None);
        assert_eq!(parse_uptime_secs("up 3 days"), None);
        assert_eq!(parse_uptime_secs("-5.0 1.0"), None);
    }
}
