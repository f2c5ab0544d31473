//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! - [`viewmodel`]: Display-ready state
//! - [`renderer`]: Rendering entry point
//! - [`components`]: Per-widget renderers and the page layout
//! - [`helpers`]: Cursor positioning, truncation, wrapping, highlighting
//! - [`theme`]: Color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    BodyView, DetailsInfo, DisplayItem, FooterInfo, HeaderInfo, MessageInfo, MessageTone, PageItem,
    PaginationInfo, SearchBarInfo, ToastInfo, UIViewModel,
};
