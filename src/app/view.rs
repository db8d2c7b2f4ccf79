//! Capability interface shared by every routable view.

use super::actions::Action;
use super::context::{NavigationContext, ViewId};
use super::keys::{InputContext, Key};
use super::modes::ModeKind;
use super::pagination::PageState;
use crate::domain::error::Result;
use crate::ui::viewmodel::UIViewModel;
use crate::worker::WorkerResponse;

/// A screen the router can focus.
///
/// The router owns views as trait objects and drives them exclusively through
/// these methods. Lifecycle order on navigation is `on_blur` (old view),
/// `set_context`, `on_focus`, `init` (new view).
pub trait View {
    fn id(&self) -> ViewId;

    /// Kicks off the view's initial load. Called after every focus.
    fn init(&mut self) -> Vec<Action>;

    fn handle_key(&mut self, key: Key) -> Vec<Action>;

    /// Applies a worker response addressed to this view.
    ///
    /// Called whether or not the view is focused.
    fn handle_response(&mut self, response: WorkerResponse) -> Vec<Action>;

    fn on_focus(&mut self);

    /// Leaves any typing mode and discards drafts.
    fn on_blur(&mut self);

    /// Scopes the view to a parent item before it is focused.
    ///
    /// `None` means "keep the current scope" and is used on back navigation.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ReqError::InvalidInput`] if the context is of the wrong
    /// kind, or `None` is given to a view that was never scoped.
    fn set_context(&mut self, context: Option<NavigationContext>) -> Result<()>;

    /// Terminal size changed. Never triggers a fetch.
    fn resize(&mut self, width: u16, height: u16);

    /// Which keymap applies right now.
    fn input_context(&self) -> InputContext;

    /// Breadcrumb segment for this view, e.g. a collection name.
    fn breadcrumb(&self) -> String;

    /// Renderable state, without the router's banner.
    fn viewmodel(&self) -> UIViewModel;

    /// Inspection snapshot for logging and tests.
    fn snapshot(&self) -> ViewSnapshot;
}

/// Point-in-time summary of a view's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub loaded: bool,
    pub mode: ModeKind,
    pub selected_index: usize,
    pub filter_active: bool,
    pub has_draft: bool,
    pub page: Option<PageState>,
    pub item_count: usize,
    /// Titles of the items currently shown, in order.
    pub titles: Vec<String>,
}
