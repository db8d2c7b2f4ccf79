//! Terminal rendering.
//!
//! ```text
//! View::viewmodel ─▶ NavigationRouter::viewmodel ─▶ UIViewModel ─▶ render ─▶ ANSI frame
//! ```
//!
//! - [`viewmodel`]: display-ready data produced by views
//! - [`renderer`]: frame layout and its row constants
//! - [`components`]: per-region renderers
//! - [`helpers`]: cursor, padding, truncation and highlight utilities
//! - [`theme`]: TOML color schemes and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    BannerInfo, BannerKind, Body, DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo,
    InputBarInfo, UIViewModel,
};
