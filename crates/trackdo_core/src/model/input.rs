//! Character limits applied by host input fields.
//!
//! The store never enforces these; they are exported so every host trims
//! input the same way before calling `TaskStore::add_task`.

/// Maximum characters accepted in the task title field.
pub const TITLE_CHAR_LIMIT: usize = 35;
/// Maximum characters accepted in the task description field.
pub const DESCRIPTION_CHAR_LIMIT: usize = 100;

/// Truncates `text` to at most `limit` characters.
///
/// Counts Unicode scalar values, not bytes, so multi-byte input is never
/// split mid-character.
pub fn limit_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
