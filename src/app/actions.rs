//! Actions emitted by views and the router.
//!
//! Views never perform side effects. Handling a key or a worker response
//! returns a `Vec<Action>`; the router consumes the navigation and banner
//! actions itself and hands the rest to the terminal runtime.

use super::context::{NavigationContext, ViewId};
use crate::ui::viewmodel::BannerKind;
use crate::worker::WorkerMessage;

/// Side effects requested by a view.
#[derive(Debug)]
pub enum Action {
    /// Terminates the event loop.
    Quit,

    /// Runs blocking work on the worker pool.
    PostToWorker(WorkerMessage),

    /// Asks the router to focus `target`, scoped to `context`.
    Navigate {
        target: ViewId,
        context: Option<NavigationContext>,
    },

    /// Asks the router to return to the focused view's parent.
    Back,

    /// Shows a transient banner until the next keypress.
    Banner(Banner),
}

/// Transient notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

impl Action {
    /// Shorthand for an error banner.
    pub fn error_banner(message: impl Into<String>) -> Self {
        Self::Banner(Banner::error(message))
    }

    /// Shorthand for an info banner.
    pub fn info_banner(message: impl Into<String>) -> Self {
        Self::Banner(Banner::info(message))
    }
}
