//! Text clipping for tool output and transcript entries.

use std::borrow::Cow;

/// Appended to text cut by [`clip_output`]
pub const TRUNCATION_MARKER: &str = "\n... (output truncated)";

/// Byte length of the longest prefix of `text` that fits in `max_bytes`
/// and ends on a char boundary.
fn prefix_len(text: &str, max_bytes: usize) -> usize {
    text.char_indices()
        .map(|(start, ch)| start + ch.len_utf8())
        .take_while(|end| *end <= max_bytes)
        .last()
        .unwrap_or(0)
}

/// Limit `text` to `max_bytes`, marking the cut with [`TRUNCATION_MARKER`].
///
/// Text that already fits is borrowed unchanged. The marker is not counted
/// against `max_bytes`.
pub fn clip_output(text: &str, max_bytes: usize) -> Cow<'_, str> {
    if text.len() <= max_bytes {
        return Cow::Borrowed(text);
    }
    let kept = &text[..prefix_len(text, max_bytes)];
    Cow::Owned(format!("{kept}{TRUNCATION_MARKER}"))
}
