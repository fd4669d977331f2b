/// Escape LIKE wildcards in user-supplied search input so a literal `%` or
/// `_` cannot widen the match.
pub fn escape_like_pattern(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_wildcards() {
        assert_eq!(escape_like_pattern("CS%101"), "CS\\%101");
        assert_eq!(escape_like_pattern("a_b"), "a\\_b");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }

    #[test]
    fn test_escape_backslash_first() {
        assert_eq!(escape_like_pattern("\\%"), "\\\\\\%");
    }
}
