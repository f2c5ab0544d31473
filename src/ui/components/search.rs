//! Search bar component renderer.
//!
//! ```text
//! [margin] ┌─────────────────────┐ [margin]
//! [margin] │ Search movies: ...  │ [margin]
//! [margin] └─────────────────────┘ [margin]
//!          validation message
//! ```

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 3;

const PROMPT: &str = " Search movies: ";

/// Renders the search box plus its validation line starting at `row`.
///
/// Returns the next free row (`row + 4`) and, when the bar is focused, the
/// `(row, col)` where the terminal cursor should sit after the typed text.
pub fn render_search_bar(
    row: usize,
    search: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
) -> (usize, Option<(usize, usize)>) {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    // Keep the tail of long input visible, it is where typing happens.
    let query_room = inner_width.saturating_sub(PROMPT.chars().count() + 1);
    let query_chars: Vec<char> = search.query.chars().collect();
    let shown: String = query_chars[query_chars.len().saturating_sub(query_room)..]
        .iter()
        .collect();
    let shown_len = shown.chars().count();
    let prompt = truncate(PROMPT, inner_width);
    let padding = inner_width.saturating_sub(prompt.chars().count() + shown_len);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{prompt}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{shown}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    position_cursor(row + 3, 1);
    print!("{}", " ".repeat(cols));
    if let Some(message) = &search.validation {
        position_cursor(row + 3, SEARCH_BOX_MARGIN + 2);
        print!("{}", Theme::fg(&theme.colors.error_fg));
        print!("{}", truncate(message, inner_width));
        print!("{}", Theme::reset());
    }

    let cursor = search.is_focused.then(|| {
        let col = SEARCH_BOX_MARGIN + 2 + prompt.chars().count() + shown_len;
        (row + 1, col.min(cols))
    });
    (row + 4, cursor)
}
