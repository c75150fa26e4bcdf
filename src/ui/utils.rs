//! Utility functions for UI rendering

/// Truncates a string to at most `max_len` characters.
///
/// If the string is cut, the last three characters become "..." so the
/// reader can tell. Never wraps.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// A run of spaces `width` characters wide
#[must_use]
pub fn blank(width: usize) -> String {
    " ".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("explorer.exe", 20), "explorer.exe");
        assert_eq!(truncate_string("explorer.exe", 12), "explorer.exe");
        assert_eq!(truncate_string("explorer.exe", 8), "explo...");
        assert_eq!(truncate_string("explorer.exe", 3), "exp");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_string("プロセス監視ツール", 6), "プロセ...");
    }

    #[test]
    fn test_blank() {
        assert_eq!(blank(3), "   ");
        assert_eq!(blank(0), "");
    }
}
