//! Results table renderer.
//!
//! Three columns: TITLE (fills the pane), YEAR and RATING (fixed width on the
//! right). The cursor row gets the selection background across the full width.

use crate::app::state::{RATING_COLUMN_WIDTH, YEAR_COLUMN_WIDTH};
use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

fn title_width(cols: usize) -> usize {
    cols.saturating_sub(YEAR_COLUMN_WIDTH + RATING_COLUMN_WIDTH + 1)
}

/// Renders the column headers at `row` and returns the next row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        " {:<title$}{:<year$}{:>rating$}",
        "TITLE",
        "YEAR",
        "RATING",
        title = title_width(cols),
        year = YEAR_COLUMN_WIDTH,
        rating = RATING_COLUMN_WIDTH,
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row` and returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!(" ");
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    let title_len = item.title.chars().count();
    print!("{}", " ".repeat(title_width(cols).saturating_sub(title_len)));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{:<width$}", item.year, width = YEAR_COLUMN_WIDTH);

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.rating_fg));
    }
    print!("{:>width$}", item.rating, width = RATING_COLUMN_WIDTH);

    let line_len = 1 + title_width(cols) + YEAR_COLUMN_WIDTH + RATING_COLUMN_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
