//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! truncated titles, formatted years and ratings, highlight ranges, and the
//! already laid-out pagination links.

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// The search bar is always visible.
    pub search_bar: SearchBarInfo,

    /// Results table or the status panel that replaces it.
    pub body: BodyView,

    /// Present while results are shown or a page of a known query loads.
    pub pagination: Option<PaginationInfo>,

    /// Detail view drawn over everything else.
    pub details: Option<DetailsInfo>,

    /// Toast drawn in the top-right corner.
    pub toast: Option<ToastInfo>,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Text currently typed.
    pub query: String,

    /// Whether keystrokes go to the search bar.
    pub is_focused: bool,

    /// Inline validation message, shown under the box.
    pub validation: Option<String>,
}

/// Main content area.
#[derive(Debug, Clone)]
pub enum BodyView {
    /// A centered status message instead of the table.
    Message(MessageInfo),

    /// The results table.
    Results {
        /// Rows visible in the current window.
        items: Vec<DisplayItem>,
        /// Index of the cursor row within `items`.
        selected_index: usize,
    },
}

/// Status panel content.
#[derive(Debug, Clone)]
pub struct MessageInfo {
    pub tone: MessageTone,
    pub message: String,
    pub subtitle: String,
}

/// Color treatment of a status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    Info,
    Loading,
    Error,
}

/// One row in the results table.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Title, already truncated to the column width.
    pub title: String,

    /// Release year, empty when unknown.
    pub year: String,

    /// Rating label, e.g. `7.2/10`.
    pub rating: String,

    pub is_selected: bool,

    /// Character ranges of `title` matching the query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// One link in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    /// Elided pages, drawn as `…`.
    Break,
}

/// Pagination bar display information.
#[derive(Debug, Clone)]
pub struct PaginationInfo {
    pub items: Vec<PageItem>,
    /// Page of the current request, highlighted.
    pub current: u32,
    pub total: u32,
    /// Whether `<` is enabled.
    pub has_prev: bool,
    /// Whether `>` is enabled.
    pub has_next: bool,
}

/// Detail view content for the selected movie.
#[derive(Debug, Clone)]
pub struct DetailsInfo {
    pub title: String,
    /// Long-form release date.
    pub release: String,
    pub rating: String,
    pub overview: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

/// Toast display information.
#[derive(Debug, Clone)]
pub struct ToastInfo {
    pub message: &'static str,
}
