//! Status panel renderer.
//!
//! Replaces the results table while idle, loading, empty, or failed: a
//! centered message line with a dimmed subtitle below it.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{MessageInfo, MessageTone};

/// Renders the panel with its message two rows below `row`.
pub fn render_status(row: usize, status: &MessageInfo, theme: &Theme, cols: usize) {
    let color = match status.tone {
        MessageTone::Info => &theme.colors.message_fg,
        MessageTone::Loading => &theme.colors.loading_fg,
        MessageTone::Error => &theme.colors.error_fg,
    };

    let message = truncate(&status.message, cols);
    let msg_len = message.chars().count();
    let msg_padding = cols.saturating_sub(msg_len) / 2;

    position_cursor(row + 2, 1);
    print!("{}", Theme::fg(color));
    if status.tone == MessageTone::Error {
        print!("{}", Theme::bold());
    }
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let subtitle = truncate(&status.subtitle, cols);
    let sub_len = subtitle.chars().count();
    let sub_padding = cols.saturating_sub(sub_len) / 2;

    position_cursor(row + 3, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());
}
