//! Application state management and view model computation.
//!
//! [`AppState`] wraps the [`SearchSession`] with everything that only exists
//! for the terminal UI: the text being typed, the input mode, the row cursor,
//! the visible toast and the theme. View models are computed on demand from a
//! state snapshot and the terminal size.
//!
//! # Windowing
//!
//! When a page has more movies than fit on screen, the visible window is
//! centered on the cursor and pushed back when it would run past the end, so
//! the table is always as full as possible.

use super::modes::InputMode;
use crate::domain::{MovieSummary, ValidationError};
use crate::search::{Notification, SearchSession, SessionStatus};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyView, DetailsInfo, DisplayItem, FooterInfo, HeaderInfo, MessageInfo, MessageTone,
    PageItem, PaginationInfo, SearchBarInfo, ToastInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Pages shown around the current one in the pagination bar.
pub const PAGE_RANGE_DISPLAYED: u32 = 3;
/// Pages always shown at each end of the pagination bar.
pub const MARGIN_PAGES_DISPLAYED: u32 = 1;

/// Width of the YEAR column including its gap.
pub const YEAR_COLUMN_WIDTH: usize = 6;
/// Width of the RATING column including its gap.
pub const RATING_COLUMN_WIDTH: usize = 8;

/// Rows used by everything except table rows: blank line, header, border,
/// search box (3), validation line, column headers, pagination, border, footer.
const CHROME_ROWS: usize = 11;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Query, page, results and selection.
    pub session: SearchSession,

    pub input_mode: InputMode,

    /// Text in the search bar. Cleared after a valid submission.
    pub input: String,

    /// Inline message under the search bar for the last rejected submission.
    pub validation: Option<ValidationError>,

    /// Zero-based cursor row within the current result page.
    pub cursor: usize,

    /// Notification currently shown as a toast.
    pub toast: Option<Notification>,

    /// Toast timers armed but not yet fired.
    ///
    /// The toast is dismissed when the last one fires, so a newer toast always
    /// gets its full display time.
    pub pending_toast_timers: usize,

    /// How long a toast stays on screen.
    pub toast_seconds: f64,

    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(theme: Theme, toast_seconds: f64) -> Self {
        Self {
            session: SearchSession::new(),
            input_mode: InputMode::Typing,
            input: String::new(),
            validation: None,
            cursor: 0,
            toast: None,
            pending_toast_timers: 0,
            toast_seconds,
            theme,
        }
    }

    /// Number of movies on the displayed page.
    #[must_use]
    pub fn visible_movie_count(&self) -> usize {
        self.session.page().map_or(0, |page| page.movies.len())
    }

    /// Moves the cursor down one row, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        let count = self.visible_movie_count();
        if count == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % count;
    }

    /// Moves the cursor up one row, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        let count = self.visible_movie_count();
        if count == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { count - 1 } else { self.cursor - 1 };
    }

    /// Keeps the cursor inside the displayed page.
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible_movie_count().saturating_sub(1));
    }

    /// Movie under the cursor.
    #[must_use]
    pub fn highlighted_movie(&self) -> Option<&MovieSummary> {
        self.session.page()?.movies.get(self.cursor)
    }

    /// Returns `true` while the detail view is open.
    #[must_use]
    pub fn details_open(&self) -> bool {
        self.session.selected_movie().is_some()
    }

    /// Computes a renderable UI view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            body: self.compute_body(rows, cols),
            pagination: self.compute_pagination(),
            details: self.session.selected_movie().map(compute_details),
            toast: self.toast.map(|notification| ToastInfo {
                message: notification.message(),
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_body(&self, rows: usize, cols: usize) -> BodyView {
        let query = self
            .session
            .current_request()
            .map(|request| request.query().as_str().to_string())
            .unwrap_or_default();

        match self.session.status() {
            SessionStatus::Idle => BodyView::Message(MessageInfo {
                tone: MessageTone::Info,
                message: "Search for a movie".to_string(),
                subtitle: "Type a title and press Enter".to_string(),
            }),
            SessionStatus::Loading => BodyView::Message(MessageInfo {
                tone: MessageTone::Loading,
                message: "Searching…".to_string(),
                subtitle: self
                    .session
                    .current_request()
                    .map(|request| format!("{:?}, page {}", request.query().as_str(), request.page()))
                    .unwrap_or_default(),
            }),
            SessionStatus::Empty => BodyView::Message(MessageInfo {
                tone: MessageTone::Info,
                message: "No movies found".to_string(),
                subtitle: format!("Nothing matches {query:?}"),
            }),
            SessionStatus::Failed(kind) => BodyView::Message(MessageInfo {
                tone: MessageTone::Error,
                message: kind.panel_message().to_string(),
                subtitle: "Submit the query again to retry".to_string(),
            }),
            SessionStatus::Loaded(page) => {
                let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
                let total = page.movies.len();
                let cursor = self.cursor.min(total.saturating_sub(1));

                let mut visible_start = cursor.saturating_sub(available_rows / 2);
                let visible_end = (visible_start + available_rows).min(total);
                if visible_end - visible_start < available_rows && total >= available_rows {
                    visible_start = visible_end.saturating_sub(available_rows);
                }

                let matcher = SkimMatcherV2::default();
                let title_width =
                    cols.saturating_sub(YEAR_COLUMN_WIDTH + RATING_COLUMN_WIDTH + 1);

                let items = page.movies[visible_start..visible_end]
                    .iter()
                    .enumerate()
                    .map(|(offset, movie)| {
                        compute_display_item(
                            movie,
                            visible_start + offset == cursor,
                            &query,
                            title_width,
                            &matcher,
                        )
                    })
                    .collect();

                BodyView::Results {
                    items,
                    selected_index: cursor.saturating_sub(visible_start),
                }
            }
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match (self.session.current_request(), self.session.page()) {
            (Some(request), Some(page)) => format!(
                " Movie Search · {:?} · {} results ",
                request.query().as_str(),
                page.total_results
            ),
            (Some(request), None) => format!(" Movie Search · {:?} ", request.query().as_str()),
            (None, _) => " Movie Search ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.input.clone(),
            is_focused: self.input_mode == InputMode::Typing && !self.details_open(),
            validation: self.validation.map(|error| error.to_string()),
        }
    }

    /// Pagination bar, present once a page count is known and results are
    /// shown or loading.
    fn compute_pagination(&self) -> Option<PaginationInfo> {
        let current = self.session.current_request()?.page().get();
        let total = self.session.total_pages().filter(|total| *total > 0)?;

        if !matches!(
            self.session.status(),
            SessionStatus::Loaded(_) | SessionStatus::Loading
        ) {
            return None;
        }

        Some(PaginationInfo {
            items: page_items(current, total),
            current,
            total,
            has_prev: current > 1,
            has_next: current < total,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.details_open() {
            "Esc/Enter/q: close details"
        } else {
            match self.input_mode {
                InputMode::Typing => "Enter: search  Esc/Tab/↓: results  Type to edit query",
                InputMode::Browsing => {
                    "j/k: move  Enter: details  h/l: page  g/G: first/last  /: search  q: hide"
                }
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

fn compute_display_item(
    movie: &MovieSummary,
    is_selected: bool,
    query: &str,
    title_width: usize,
    matcher: &SkimMatcherV2,
) -> DisplayItem {
    let title = truncate(&movie.title, title_width);
    let visible_chars = if title == movie.title {
        title.chars().count()
    } else {
        title.chars().count().saturating_sub(3)
    };

    let highlight_ranges = compute_highlight_ranges(&movie.title, query, matcher)
        .into_iter()
        .filter(|(start, _)| *start < visible_chars)
        .map(|(start, end)| (start, end.min(visible_chars)))
        .collect();

    DisplayItem {
        title,
        year: movie.release_year(),
        rating: movie.rating_label(),
        is_selected,
        highlight_ranges,
    }
}

/// Character ranges of `text` matched by `query`, coalesced into runs.
///
/// Ranges are `(start, end)` character indices with an exclusive end.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    if query.is_empty() {
        return vec![];
    }
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

fn compute_details(movie: &MovieSummary) -> DetailsInfo {
    DetailsInfo {
        title: movie.title.clone(),
        release: movie.release_label(),
        rating: movie.rating_label(),
        overview: if movie.overview.is_empty() {
            "No overview available.".to_string()
        } else {
            movie.overview.clone()
        },
        poster_url: movie.poster_url(),
        backdrop_url: movie.backdrop_url(),
    }
}

/// Page links for the pagination bar with `…` gaps.
///
/// Always shows the first and last [`MARGIN_PAGES_DISPLAYED`] pages plus a
/// window of [`PAGE_RANGE_DISPLAYED`] pages around `current`; the window
/// slides inward when `current` is near either end.
#[must_use]
pub fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    if total <= PAGE_RANGE_DISPLAYED {
        return (1..=total).map(PageItem::Page).collect();
    }

    // Window bounds in half-pages so an odd range splits evenly around the
    // current page.
    let range = i64::from(PAGE_RANGE_DISPLAYED);
    let total_i = i64::from(total);
    let selected = i64::from(current.clamp(1, total)) - 1;

    let (mut left, mut right) = (range, range);
    if 2 * selected > 2 * total_i - range {
        right = 2 * (total_i - selected);
        left = 2 * range - right;
    } else if 2 * selected < range {
        left = 2 * selected;
        right = 2 * range - left;
    }
    if selected == 0 && range > 1 {
        right -= 2;
    }

    let margin = i64::from(MARGIN_PAGES_DISPLAYED);
    let mut items = Vec::new();
    for index in 0..total_i {
        let page = index + 1;
        let in_margin = page <= margin || page > total_i - margin;
        let in_window = 2 * index >= 2 * selected - left && 2 * index <= 2 * selected + right;

        if in_margin || in_window {
            // `page` is in 1..=total, which came from a u32.
            items.push(PageItem::Page(u32::try_from(page).unwrap_or(total)));
        } else if matches!(items.last(), Some(PageItem::Page(_))) {
            items.push(PageItem::Break);
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FailureKind, ResultPage};
    use crate::search::SearchRequest;
    use crate::ui::viewmodel::PageItem::{Break, Page};

    fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            overview: String::new(),
            release_date: "1989-06-21".to_string(),
            poster_path: String::new(),
            backdrop_path: String::new(),
            vote_average: 7.2,
        }
    }

    fn state_with(titles: &[&str], total_pages: u32) -> (AppState, SearchRequest) {
        let mut state = AppState::new(Theme::default(), 3.0);
        let request = state.session.submit_query("bat").unwrap().unwrap();
        let movies = titles
            .iter()
            .zip(1..)
            .map(|(title, id)| movie(id, title))
            .collect();
        state.session.resolve(
            &request,
            Ok(ResultPage {
                page: 1,
                movies,
                total_results: 42,
                total_pages,
            }),
        );
        (state, request)
    }

    #[test]
    fn page_items_show_all_pages_when_few() {
        assert_eq!(page_items(1, 1), vec![Page(1)]);
        assert_eq!(page_items(2, 3), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn page_items_center_window_with_breaks() {
        assert_eq!(
            page_items(5, 10),
            vec![Page(1), Break, Page(4), Page(5), Page(6), Break, Page(10)]
        );
    }

    #[test]
    fn page_items_slide_window_at_the_edges() {
        assert_eq!(page_items(1, 10), vec![Page(1), Page(2), Page(3), Break, Page(10)]);
        assert_eq!(
            page_items(2, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Break, Page(10)]
        );
        assert_eq!(page_items(10, 10), vec![Page(1), Break, Page(8), Page(9), Page(10)]);
    }

    #[test]
    fn page_items_never_emit_adjacent_breaks() {
        let items = page_items(250, 500);
        assert!(items.windows(2).all(|pair| !matches!(pair, [Break, Break])));
        assert_eq!(items.first(), Some(&Page(1)));
        assert_eq!(items.last(), Some(&Page(500)));
    }

    #[test]
    fn cursor_wraps_within_page() {
        let (mut state, _) = state_with(&["Batman", "Batman Returns", "Batman Forever"], 1);

        state.move_cursor_up();
        assert_eq!(state.cursor, 2);
        state.move_cursor_down();
        assert_eq!(state.cursor, 0);
        assert_eq!(state.highlighted_movie().unwrap().title, "Batman");
    }

    #[test]
    fn cursor_is_inert_without_results() {
        let mut state = AppState::new(Theme::default(), 3.0);
        state.move_cursor_down();
        state.move_cursor_up();
        assert_eq!(state.cursor, 0);
        assert!(state.highlighted_movie().is_none());
    }

    #[test]
    fn idle_viewmodel_prompts_for_a_search() {
        let state = AppState::new(Theme::default(), 3.0);
        let vm = state.compute_viewmodel(24, 80);

        assert!(vm.search_bar.is_focused);
        assert!(vm.pagination.is_none());
        assert!(matches!(
            vm.body,
            BodyView::Message(MessageInfo { tone: MessageTone::Info, .. })
        ));
    }

    #[test]
    fn loaded_viewmodel_lists_movies_with_highlights() {
        let (state, _) = state_with(&["Batman", "The Batman"], 3);
        let vm = state.compute_viewmodel(24, 80);

        let BodyView::Results { items, selected_index } = vm.body else {
            panic!("expected results");
        };
        assert_eq!(selected_index, 0);
        assert_eq!(items[0].title, "Batman");
        assert_eq!(items[0].year, "1989");
        assert_eq!(items[0].rating, "7.2/10");
        assert_eq!(items[0].highlight_ranges, vec![(0, 3)]);
        assert_eq!(items[1].highlight_ranges, vec![(4, 7)]);
        assert!(items[0].is_selected);

        let pagination = vm.pagination.unwrap();
        assert_eq!((pagination.current, pagination.total), (1, 3));
        assert!(!pagination.has_prev);
        assert!(pagination.has_next);
        assert!(vm.header.title.contains("42 results"));
    }

    #[test]
    fn window_follows_cursor_on_short_panes() {
        let titles: Vec<String> = (0..20).map(|i| format!("Movie {i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let (mut state, _) = state_with(&refs, 1);
        state.cursor = 19;

        // 16 rows leave 5 for the table.
        let BodyView::Results { items, selected_index } = state.compute_viewmodel(16, 80).body
        else {
            panic!("expected results");
        };
        assert_eq!(items.len(), 5);
        assert_eq!(items[selected_index].title, "Movie 19");
        assert_eq!(selected_index, 4);
    }

    #[test]
    fn long_titles_are_truncated_with_clipped_highlights() {
        let (state, _) = state_with(&["Lego Batman: The Movie, extended edition"], 1);
        let BodyView::Results { items, .. } = state.compute_viewmodel(24, 25).body else {
            panic!("expected results");
        };
        assert_eq!(items[0].title.chars().count(), 10);
        assert!(items[0].title.ends_with("..."));
        assert!(items[0]
            .highlight_ranges
            .iter()
            .all(|(start, end)| start < end && *end <= 10));
    }

    #[test]
    fn failure_shows_panel_and_hides_pagination() {
        let mut state = AppState::new(Theme::default(), 3.0);
        let request = state.session.submit_query("batman").unwrap().unwrap();
        state.session.resolve(&request, Err(FailureKind::Service));

        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.pagination.is_none());
        let BodyView::Message(message) = vm.body else {
            panic!("expected message");
        };
        assert_eq!(message.tone, MessageTone::Error);
        assert_eq!(message.message, FailureKind::Service.panel_message());
    }

    #[test]
    fn loading_keeps_pagination_for_known_page_count() {
        let (mut state, _) = state_with(&["Batman"], 4);
        state.session.go_to_page(3).unwrap();

        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(
            vm.body,
            BodyView::Message(MessageInfo { tone: MessageTone::Loading, .. })
        ));
        assert_eq!(vm.pagination.unwrap().current, 3);
    }

    #[test]
    fn details_follow_the_selected_movie() {
        let (mut state, _) = state_with(&["Batman"], 1);
        assert!(state.compute_viewmodel(24, 80).details.is_none());

        state.session.select_movie(1);
        let vm = state.compute_viewmodel(24, 80);
        let details = vm.details.unwrap();
        assert_eq!(details.title, "Batman");
        assert_eq!(details.release, "June 21, 1989");
        assert_eq!(details.overview, "No overview available.");
        assert!(details.poster_url.is_none());
        assert!(!vm.search_bar.is_focused);
        assert!(vm.footer.keybindings.contains("close details"));
    }

    #[test]
    fn validation_message_is_shown_under_search_bar() {
        let mut state = AppState::new(Theme::default(), 3.0);
        state.validation = Some(ValidationError::TooShort { min: 2 });
        assert_eq!(
            state.compute_viewmodel(24, 80).search_bar.validation.as_deref(),
            Some("Enter at least 2 characters")
        );
    }
}
