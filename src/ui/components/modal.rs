//! Movie detail view, drawn as a bordered box over the results.

use crate::ui::helpers::{position_cursor, truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailsInfo;

const MAX_WIDTH: usize = 76;

/// Lines of the box body, before padding to the box width.
fn body_lines(details: &DetailsInfo, inner_width: usize, max_lines: usize) -> Vec<(String, bool)> {
    let mut lines = vec![
        (details.title.clone(), true),
        (String::new(), false),
        (format!("Release date: {}", details.release), false),
        (format!("Rating: {}", details.rating), false),
        (String::new(), false),
    ];

    let mut links = vec![(String::new(), false)];
    if let Some(url) = &details.poster_url {
        links.push((format!("Poster: {url}"), false));
    }
    if let Some(url) = &details.backdrop_url {
        links.push((format!("Backdrop: {url}"), false));
    }
    if links.len() == 1 {
        links.clear();
    }

    let overview_room = max_lines.saturating_sub(lines.len() + links.len());
    let mut overview = wrap(&details.overview, inner_width);
    if overview.len() > overview_room {
        overview.truncate(overview_room);
        if let Some(last) = overview.last_mut() {
            *last = truncate(&format!("{last} ..."), inner_width);
        }
    }

    lines.extend(overview.into_iter().map(|line| (line, false)));
    lines.extend(links);
    lines.truncate(max_lines);
    lines
}

/// Renders the detail box centered in a `rows` x `cols` pane.
pub fn render_details(details: &DetailsInfo, theme: &Theme, rows: usize, cols: usize) {
    let box_width = cols.saturating_sub(4).min(MAX_WIDTH);
    if box_width < 8 || rows < 6 {
        return;
    }
    let inner_width = box_width - 4;
    let lines = body_lines(details, inner_width, rows.saturating_sub(6));

    let box_height = lines.len() + 2;
    let top = rows.saturating_sub(box_height) / 2 + 1;
    let left = cols.saturating_sub(box_width) / 2 + 1;
    let border = &theme.colors.search_bar_border;

    position_cursor(top, left);
    print!("{}", Theme::fg(border));
    let close_hint = " Esc ";
    print!(
        "┌{}{close_hint}─┐",
        "─".repeat(box_width.saturating_sub(3 + close_hint.len()))
    );

    for (offset, (text, emphasized)) in lines.iter().enumerate() {
        let text = truncate(text, inner_width);
        position_cursor(top + 1 + offset, left);
        print!("{}", Theme::fg(border));
        print!("│ ");
        if *emphasized {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.header_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{text}");
        print!("{}", " ".repeat(inner_width.saturating_sub(text.chars().count())));
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(border));
        print!(" │");
    }

    position_cursor(top + box_height - 1, left);
    print!("└{}┘", "─".repeat(box_width - 2));
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(overview: &str) -> DetailsInfo {
        DetailsInfo {
            title: "Batman".to_string(),
            release: "June 21, 1989".to_string(),
            rating: "7.2/10".to_string(),
            overview: overview.to_string(),
            poster_url: Some("https://image.tmdb.org/t/p/w500/p.jpg".to_string()),
            backdrop_url: None,
        }
    }

    #[test]
    fn body_lists_facts_overview_and_links() {
        let lines: Vec<String> = body_lines(&details("Gotham needs a hero."), 40, 20)
            .into_iter()
            .map(|(text, _)| text)
            .collect();

        assert_eq!(lines[0], "Batman");
        assert_eq!(lines[2], "Release date: June 21, 1989");
        assert_eq!(lines[3], "Rating: 7.2/10");
        assert_eq!(lines[5], "Gotham needs a hero.");
        assert_eq!(lines.last().unwrap(), "Poster: https://image.tmdb.org/t/p/w500/p.jpg");
    }

    #[test]
    fn long_overview_is_cut_to_fit() {
        let overview = "word ".repeat(200);
        let lines = body_lines(&details(&overview), 30, 12);

        assert_eq!(lines.len(), 12);
        assert!(lines.iter().any(|(text, _)| text.ends_with("...")));
        assert!(lines.last().unwrap().0.starts_with("Poster:"));
    }
}
