//! Text wrapping and item height measurement.
//!
//! The renderer draws exactly the lines [`wrap_text`] returns, so the height
//! reported to the engine always matches what is on screen.

use super::constants::{BORDER_COLS, BORDER_ROWS};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Greedy word wrap to `width` display columns.
///
/// - Explicit newlines always break.
/// - Runs of whitespace between words collapse to one space.
/// - A word wider than `width` is split at character boundaries.
/// - An empty paragraph yields one empty line.
///
/// A zero width is treated as one column so wrapping always terminates.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + 1 + word_width
            };

            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                    current_width += 1;
                }
                current.push_str(word);
                current_width += word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            // Hard-break an overlong word.
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        lines.push(current);
    }

    lines
}

/// Inner text width of a bordered item `outer_width` columns wide.
pub fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(BORDER_COLS)
}

/// Height in rows of a bordered item showing `text` at `outer_width`.
pub fn measure_height(text: &str, outer_width: u16) -> u16 {
    let lines = wrap_text(text, inner_width(outer_width)).len();
    u16::try_from(lines)
        .unwrap_or(u16::MAX)
        .saturating_add(BORDER_ROWS)
}
