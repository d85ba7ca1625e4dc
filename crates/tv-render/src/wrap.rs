//! Greedy word wrapping for tile labels.
//!
//! There is no font context outside the browser, so widths are estimated
//! from an average glyph advance of `AVG_ADVANCE × font_size`.

/// Average advance of a proportional sans-serif glyph, in ems.
pub const AVG_ADVANCE: f64 = 0.55;

/// Estimated rendered width of `text`.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * AVG_ADVANCE
}

/// Break `text` into lines no wider than `max_width`, on whitespace.
///
/// A word wider than `max_width` gets a line of its own and overflows, as
/// it would in CSS with default `overflow-wrap`. At most `max_lines` lines
/// are returned.
pub fn wrap_words(text: &str, max_width: f64, font_size: f64, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate_width = text_width(&current, font_size)
            + text_width(" ", font_size)
            + text_width(word, font_size);
        if candidate_width <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.truncate(max_lines);
    lines
}
