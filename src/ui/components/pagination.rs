//! Pagination bar renderer.
//!
//! ```text
//!            <  1  …  4 [5] 6  …  10  >
//! ```
//!
//! The current page uses the selection colors; disabled arrows are dimmed.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PageItem, PaginationInfo};

enum Style {
    Normal,
    Current,
    Disabled,
}

fn segments(pagination: &PaginationInfo) -> Vec<(String, Style)> {
    let arrow = |label: &str, enabled: bool| {
        let style = if enabled { Style::Normal } else { Style::Disabled };
        (format!(" {label} "), style)
    };

    let mut segments = vec![arrow("<", pagination.has_prev)];
    for item in &pagination.items {
        segments.push(match item {
            PageItem::Page(page) if *page == pagination.current => (format!(" {page} "), Style::Current),
            PageItem::Page(page) => (format!(" {page} "), Style::Normal),
            PageItem::Break => (" … ".to_string(), Style::Disabled),
        });
    }
    segments.push(arrow(">", pagination.has_next));
    segments
}

/// Renders the centered pagination bar at `row`.
pub fn render_pagination(row: usize, pagination: &PaginationInfo, theme: &Theme, cols: usize) {
    let segments = segments(pagination);
    let width: usize = segments.iter().map(|(text, _)| text.chars().count()).sum();
    let padding = cols.saturating_sub(width) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    for (text, style) in &segments {
        match style {
            Style::Normal => print!("{}", Theme::fg(&theme.colors.text_normal)),
            Style::Current => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.selection_fg));
                print!("{}", Theme::bg(&theme.colors.selection_bg));
            }
            Style::Disabled => print!("{}", Theme::fg(&theme.colors.text_dim)),
        }
        print!("{text}");
        print!("{}", Theme::reset());
    }
    print!("{}", " ".repeat(cols.saturating_sub(padding + width)));
}
