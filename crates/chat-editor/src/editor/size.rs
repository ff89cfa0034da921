//! Maps the host's region size onto the text buffer's geometry.

/// Columns reserved for the prompt glyph, its left padding, and one
/// column of right padding.
pub const PROMPT_MARGIN: u16 = 3;
pub const MIN_BUFFER_WIDTH: u16 = 1;

/// Returns `(buffer_width, buffer_height)` for a region of the given size.
pub fn negotiate(total_width: u16, total_height: u16) -> (u16, u16) {
    let width = total_width
        .saturating_sub(PROMPT_MARGIN)
        .max(MIN_BUFFER_WIDTH);
    (width, total_height)
}
