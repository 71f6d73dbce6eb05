//! String helpers for transcripts and generated text.

/// Shorten text to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters rather than bytes so multi-byte text (CJK, emoji) is
/// never split inside a code point.
pub fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Extract the body of the first fenced code block, if any.
///
/// Accepts both ```` ```json ```` and bare ```` ``` ```` fences. Returns the
/// trimmed input unchanged when no complete fence is present.
pub fn strip_code_fence(s: &str) -> &str {
    let trimmed = s.trim();
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let after_fence = &trimmed[start + 3..];
    // Skip the language tag up to the end of the opening line
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn test_preview_cuts_on_chars() {
        assert_eq!(preview("hello world", 8), "hello...");
        assert_eq!(preview("日本語テスト文字列", 6), "日本語...");
    }

    #[test]
    fn test_strip_json_fence() {
        let text = "Here you go:\n```json\n{\"a\": 1}\n```\nthanks";
        assert_eq!(strip_code_fence(text), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_bare_fence() {
        assert_eq!(strip_code_fence("```\n[1,2]\n```"), "[1,2]");
    }

    #[test]
    fn test_no_fence_returns_trimmed() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_unterminated_fence_returns_trimmed() {
        assert_eq!(strip_code_fence("```json\n{"), "```json\n{");
    }
}
