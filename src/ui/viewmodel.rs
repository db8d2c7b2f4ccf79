//! View model types representing renderable UI state.
//!
//! Views compute a [`UIViewModel`] from their own state; the router adds the
//! global banner and the renderer turns the result into a frame. View models
//! carry no behavior, only display-ready data such as highlight ranges and
//! selection flags.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, Default)]
pub struct UIViewModel {
    /// Title and breadcrumb.
    pub header: HeaderInfo,

    /// Transient notice shown under the header, set by the router.
    pub banner: Option<BannerInfo>,

    /// Text input box (filter query or edit draft), when one is open.
    pub input_bar: Option<InputBarInfo>,

    /// Main content area.
    pub body: Body,

    /// Keybinding hints and status text.
    pub footer: FooterInfo,
}

/// Main content of a frame.
#[derive(Debug, Clone)]
pub enum Body {
    /// Nothing fetched yet.
    Loading(String),

    /// Fetched, but nothing to show.
    Empty(EmptyState),

    /// A windowed slice of a list view's items.
    List {
        /// Column captions, title column first.
        columns: (&'static str, &'static str),
        /// Rows inside the visible window.
        items: Vec<DisplayItem>,
    },

    /// Endpoint detail screen.
    Detail(DetailInfo),
}

impl Default for Body {
    fn default() -> Self {
        Self::Loading("Loading...".to_string())
    }
}

/// One row of a list body.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Primary column text.
    pub title: String,

    /// Secondary column text.
    pub subtext: String,

    /// Whether this row is the selection.
    pub is_selected: bool,

    /// Character ranges of `title` matched by the active filter.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, Default)]
pub struct HeaderInfo {
    /// Centered title text.
    pub title: String,

    /// Navigation path, e.g. `Collections > HTTPBin Testing`.
    pub breadcrumb: String,
}

/// Footer display information.
#[derive(Debug, Clone, Default)]
pub struct FooterInfo {
    /// Keybinding hints for the current mode.
    pub keybindings: String,

    /// Right-aligned status, e.g. `Page 2/3 (23 total)`.
    pub status: String,
}

/// Empty state message.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary hint.
    pub subtitle: String,
}

/// Banner severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Error,
}

/// Banner display information.
#[derive(Debug, Clone)]
pub struct BannerInfo {
    pub kind: BannerKind,
    pub message: String,
}

/// Input box display information.
#[derive(Debug, Clone)]
pub struct InputBarInfo {
    /// Caption before the text, e.g. `Filter` or `New collection`.
    pub label: String,

    /// Current text.
    pub text: String,

    /// Inline validation message.
    pub error: Option<String>,
}

/// Endpoint detail body.
#[derive(Debug, Clone, Default)]
pub struct DetailInfo {
    /// Labeled request fields in display order.
    pub fields: Vec<(String, String)>,

    /// Status line of the last response, with a success flag for coloring.
    pub status: Option<(String, bool)>,

    /// Visible slice of the response, headers first then body.
    pub response_lines: Vec<String>,

    /// Placeholder shown instead of a response.
    pub placeholder: Option<String>,
}
