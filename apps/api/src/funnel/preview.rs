//! Preview shaping for the response payload.

/// Cuts `text` near its middle without splitting a word.
///
/// Starts at the character midpoint and advances to the first whitespace
/// character at or after it, or to the end of the string. Everything before
/// that point is the preview. Indices count characters, not bytes.
pub fn truncate_preview(text: &str) -> &str {
    let midpoint = text.chars().count() / 2;

    let cut = text
        .char_indices()
        .skip(midpoint)
        .find(|(_, c)| c.is_whitespace())
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(text.len());

    &text[..cut]
}

/// Turns literal `\n` escape sequences left in model output into real newlines.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}
