//! Focus bookkeeping for the router.
//!
//! [`FocusCoordinator`] is the only code that calls `on_blur` and `on_focus`.
//! It guarantees the two alternate: a view is blurred before another is
//! focused, and between the two calls nothing is live. The transition log
//! exists for diagnostics and for asserting that ordering in tests.

use super::context::ViewId;
use super::view::View;
use std::collections::VecDeque;

const HISTORY_LIMIT: usize = 64;

/// One lifecycle call made by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    Blurred(ViewId),
    Focused(ViewId),
}

/// Tracks which view is live and records focus transitions.
#[derive(Debug)]
pub struct FocusCoordinator {
    current: ViewId,
    live: bool,
    history: VecDeque<FocusEvent>,
}

impl FocusCoordinator {
    /// Starts with `initial` as the current, but not yet live, view.
    #[must_use]
    pub fn new(initial: ViewId) -> Self {
        Self {
            current: initial,
            live: false,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    /// View that receives keys. During a transition this is the view being
    /// left until [`focus`](Self::focus) is called.
    #[must_use]
    pub const fn current(&self) -> ViewId {
        self.current
    }

    /// Whether a view is focused right now.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.live
    }

    /// Blurs the current view. No-op if nothing is live.
    pub fn blur(&mut self, view: &mut dyn View) {
        if !self.live || view.id() != self.current {
            tracing::debug!(view = %view.id(), current = %self.current, "blur ignored");
            return;
        }
        view.on_blur();
        self.live = false;
        self.record(FocusEvent::Blurred(view.id()));
    }

    /// Focuses `view`, which becomes current.
    ///
    /// If another view is still live it is not blurred here; callers blur
    /// first.
    pub fn focus(&mut self, view: &mut dyn View) {
        if self.live {
            tracing::warn!(view = %view.id(), current = %self.current, "focus while another view is live");
        }
        view.on_focus();
        self.current = view.id();
        self.live = true;
        self.record(FocusEvent::Focused(view.id()));
        tracing::debug!(view = %self.current, "focus moved");
    }

    /// Most recent transitions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &FocusEvent> {
        self.history.iter()
    }

    fn record(&mut self, event: FocusEvent) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(event);
    }
}
