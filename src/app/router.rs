//! Navigation router: owns every view, routes events, and runs navigation.
//!
//! # Routing
//!
//! - Keys go to the focused view, except `Quit` and, outside text input,
//!   `Cancel`, which the router handles as "back" (or "exit" at the root).
//! - Worker responses go to the view named in the response, focused or not.
//! - Resizes go to every view.
//!
//! Actions returned by views are processed here: navigation and banners are
//! consumed, everything else is returned to the runtime.
//!
//! # Navigation
//!
//! ```text
//! blur(old) ─▶ set_context(new) ─ok─▶ focus(new) ─▶ init(new)
//!                      │
//!                      └─err─▶ banner, focus(old)
//! ```

use super::actions::{Action, Banner};
use super::context::{NavigationContext, ViewId};
use super::focus::{FocusCoordinator, FocusEvent};
use super::keys::{InputContext, Key};
use super::view::View;
use crate::ui::viewmodel::{BannerInfo, UIViewModel};
use crate::worker::WorkerResponse;
use std::collections::{BTreeMap, VecDeque};

/// Input to [`NavigationRouter::dispatch`].
#[derive(Debug)]
pub enum Event {
    Key(Key),
    Resize { width: u16, height: u16 },
    Worker(WorkerResponse),
}

/// Result of one [`NavigationRouter::dispatch`] call.
#[derive(Debug, Default)]
pub struct Dispatch {
    /// Actions the runtime executes (quit, worker jobs).
    pub actions: Vec<Action>,
    /// Whether the frame changed.
    pub should_render: bool,
}

impl Dispatch {
    fn render(actions: Vec<Action>) -> Self {
        Self {
            actions,
            should_render: true,
        }
    }
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::Resize { .. } => "resize",
            Self::Worker(_) => "worker",
        }
    }
}

/// Owner of all views and the focus state.
pub struct NavigationRouter {
    views: BTreeMap<ViewId, Box<dyn View>>,
    parents: BTreeMap<ViewId, ViewId>,
    root: ViewId,
    focus: FocusCoordinator,
    banner: Option<Banner>,
    size: (u16, u16),
}

impl NavigationRouter {
    /// Creates a router whose root (and initially focused) view is `root`.
    #[must_use]
    pub fn new(root: Box<dyn View>) -> Self {
        let id = root.id();
        let mut views = BTreeMap::new();
        views.insert(id, root);
        Self {
            views,
            parents: BTreeMap::new(),
            root: id,
            focus: FocusCoordinator::new(id),
            banner: None,
            size: (80, 24),
        }
    }

    /// Registers `view`; back navigation from it returns to `parent`.
    #[must_use]
    pub fn with_view(mut self, view: Box<dyn View>, parent: ViewId) -> Self {
        let id = view.id();
        self.parents.insert(id, parent);
        self.views.insert(id, view);
        self
    }

    /// Focuses the root and returns its initial actions.
    pub fn start(&mut self) -> Vec<Action> {
        let root = self.root;
        let Some(view) = self.views.get_mut(&root) else {
            return vec![];
        };
        self.focus.focus(view.as_mut());
        let actions = view.init();
        self.process(root, actions)
    }

    /// Handles one event.
    pub fn dispatch(&mut self, event: Event) -> Dispatch {
        let _span = tracing::debug_span!("dispatch", event = event.name(), focused = %self.focused()).entered();

        match event {
            Event::Key(key) => {
                self.banner = None;
                let current = self.focus.current();
                let actions = match key {
                    Key::Quit if current == self.root => vec![Action::Quit],
                    Key::Quit => self.back(),
                    Key::Cancel if !self.input_context().captures_text() && current != self.root => {
                        self.back()
                    }
                    _ => self
                        .views
                        .get_mut(&current)
                        .map_or_else(Vec::new, |view| view.handle_key(key)),
                };
                Dispatch::render(self.process(current, actions))
            }
            Event::Resize { width, height } => {
                self.size = (width, height);
                for view in self.views.values_mut() {
                    view.resize(width, height);
                }
                Dispatch::render(vec![])
            }
            Event::Worker(response) => {
                let target = response.view();
                let Some(view) = self.views.get_mut(&target) else {
                    tracing::warn!(view = %target, "response for unregistered view");
                    return Dispatch::default();
                };
                let actions = view.handle_response(response);
                Dispatch::render(self.process(target, actions))
            }
        }
    }

    /// Navigates as if the focused view had emitted `Navigate`.
    ///
    /// Returns the runtime actions of the target's `init`; on rejection the
    /// router stays put and shows an error banner.
    pub fn open(&mut self, target: ViewId, context: Option<NavigationContext>) -> Vec<Action> {
        let origin = self.focus.current();
        self.process(origin, vec![Action::Navigate { target, context }])
    }

    /// Currently focused view.
    #[must_use]
    pub const fn focused(&self) -> ViewId {
        self.focus.current()
    }

    /// Keymap for the focused view.
    #[must_use]
    pub fn input_context(&self) -> InputContext {
        self.views
            .get(&self.focus.current())
            .map_or(InputContext::Browsing, |view| view.input_context())
    }

    #[must_use]
    pub fn view(&self, id: ViewId) -> Option<&dyn View> {
        self.views.get(&id).map(AsRef::as_ref)
    }

    #[must_use]
    pub const fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Shows an error banner raised outside any view, e.g. by the runtime.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.banner = Some(Banner::error(message));
    }

    /// Shows an info banner raised outside any view.
    pub fn show_info(&mut self, message: impl Into<String>) {
        self.banner = Some(Banner::info(message));
    }

    /// Transition log of the focus coordinator, oldest first.
    pub fn focus_history(&self) -> impl Iterator<Item = &FocusEvent> {
        self.focus.history()
    }

    /// View model of the focused view with breadcrumb and banner filled in.
    #[must_use]
    pub fn viewmodel(&self) -> UIViewModel {
        let Some(view) = self.views.get(&self.focus.current()) else {
            return UIViewModel::default();
        };
        let mut vm = view.viewmodel();
        vm.header.breadcrumb = self.breadcrumb();
        vm.banner = self.banner.as_ref().map(|banner| BannerInfo {
            kind: banner.kind,
            message: banner.message.clone(),
        });
        vm
    }

    fn breadcrumb(&self) -> String {
        let mut chain = Vec::new();
        let mut cursor = Some(self.focus.current());
        while let Some(id) = cursor {
            if let Some(view) = self.views.get(&id) {
                chain.push(view.breadcrumb());
            }
            cursor = self.parents.get(&id).copied();
        }
        chain.reverse();
        chain.join(" > ")
    }

    fn process(&mut self, origin: ViewId, actions: Vec<Action>) -> Vec<Action> {
        let mut queue: VecDeque<Action> = actions.into();
        let mut out = Vec::new();

        while let Some(action) = queue.pop_front() {
            match action {
                Action::Navigate { .. } | Action::Back if origin != self.focus.current() => {
                    tracing::debug!(view = %origin, "ignoring navigation from unfocused view");
                }
                Action::Navigate { target, context } => queue.extend(self.navigate(target, context)),
                Action::Back => queue.extend(self.back()),
                Action::Banner(banner) => self.banner = Some(banner),
                Action::Quit | Action::PostToWorker(_) => out.push(action),
            }
        }
        out
    }

    fn back(&mut self) -> Vec<Action> {
        let current = self.focus.current();
        match self.parents.get(&current).copied() {
            Some(parent) => self.navigate(parent, None),
            None => vec![],
        }
    }

    fn navigate(&mut self, target: ViewId, context: Option<NavigationContext>) -> Vec<Action> {
        let current = self.focus.current();
        if !self.views.contains_key(&target) {
            tracing::warn!(view = %target, "navigation to unregistered view");
            self.banner = Some(Banner::error(format!("no {target} view")));
            return vec![];
        }
        tracing::info!(from = %current, to = %target, has_context = context.is_some(), "navigating");

        if let Some(old) = self.views.get_mut(&current) {
            self.focus.blur(old.as_mut());
        }

        let accepted = match self.views.get_mut(&target) {
            Some(view) => view.set_context(context),
            None => return vec![],
        };

        if let Err(e) = accepted {
            tracing::warn!(view = %target, error = %e, "context rejected, staying put");
            self.banner = Some(Banner::error(e.to_string()));
            if let Some(old) = self.views.get_mut(&current) {
                self.focus.focus(old.as_mut());
            }
            return vec![];
        }

        match self.views.get_mut(&target) {
            Some(view) => {
                self.focus.focus(view.as_mut());
                view.init()
            }
            None => vec![],
        }
    }
}
