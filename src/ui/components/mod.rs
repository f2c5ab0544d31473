//! Composable UI component renderers.
//!
//! - [`header`]: Title bar
//! - [`search`]: Search box with inline validation
//! - [`table`]: Results table (TITLE, YEAR, RATING)
//! - [`status`]: Idle / loading / empty / error panel
//! - [`pagination`]: Page links under the table
//! - [`modal`]: Movie detail box
//! - [`toast`]: Top-right notification
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line, toast on the right]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Validation line]
//! [Table Headers]
//! [Table Rows or Status panel]
//! [Pagination]
//! [Border]
//! [Footer]
//! ```
//!
//! The detail box and the toast are drawn last, over the rest.

mod footer;
mod header;
mod modal;
mod pagination;
mod search;
mod status;
mod table;
mod toast;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, UIViewModel};

use footer::render_footer;
use header::render_header;
use modal::render_details;
use pagination::render_pagination;
use search::render_search_bar;
use status::render_status;
use table::{render_table_headers, render_table_rows};
use toast::render_toast;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout.
///
/// Returns where the terminal cursor should be left, if anywhere.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> Option<(usize, usize)> {
    let mut current_row = 2; // Row 1 is left for the toast.

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    let (next_row, cursor) = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_table_headers(next_row, theme, cols);

    match &vm.body {
        BodyView::Results { items, .. } => {
            render_table_rows(current_row, items, theme, cols);
        }
        BodyView::Message(message) => render_status(current_row, message, theme, cols),
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    if let Some(pagination) = &vm.pagination {
        render_pagination(border_row.saturating_sub(1), pagination, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(details) = &vm.details {
        render_details(details, theme, rows, cols);
    }
    if let Some(toast) = &vm.toast {
        render_toast(toast, theme, cols);
    }

    if vm.details.is_some() {
        None
    } else {
        cursor
    }
}
