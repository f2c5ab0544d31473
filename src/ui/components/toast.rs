//! Toast renderer, pinned to the top-right corner.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

pub fn render_toast(toast: &ToastInfo, theme: &Theme, cols: usize) {
    let text = truncate(&format!(" ✖ {} ", toast.message), cols.saturating_sub(2));
    let width = text.chars().count();
    let col = cols.saturating_sub(width + 1) + 1;

    position_cursor(1, col);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.toast_fg));
    print!("{}", Theme::bg(&theme.colors.toast_bg));
    print!("{text}");
    print!("{}", Theme::reset());
}
