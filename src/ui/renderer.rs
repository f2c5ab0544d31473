//! Top-level rendering coordinator.
//!
//! Two steps: compute the [`UIViewModel`] from [`AppState`], then hand it to
//! the component layout. The terminal cursor is shown in the search bar while
//! typing and hidden otherwise.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

const HIDE_CURSOR: &str = "\u{1b}[?25l";
const SHOW_CURSOR: &str = "\u{1b}[?25h";

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    print!("{HIDE_CURSOR}");
    if let Some((row, col)) = components::render_layout(vm, theme, rows, cols) {
        position_cursor(row, col);
        print!("{SHOW_CURSOR}");
    }
}
