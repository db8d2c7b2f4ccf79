//! Application layer: views, navigation, and focus.
//!
//! This layer sits between the terminal runtime (main.rs) and the
//! domain/source/worker layers. All state changes happen on the UI thread in
//! response to an [`Event`]; anything blocking is described as an
//! [`Action::PostToWorker`] and comes back later as a worker response.
//!
//! ```text
//! terminal key ─▶ keymap ─▶ Event ─▶ NavigationRouter ─▶ focused View
//!                                        │    ▲              │
//!                                        │    └── Actions ◀──┘
//!                                        ▼
//!                       runtime: Quit / PostToWorker ─▶ WorkerPool
//!                                                          │
//!                  Event::Worker(WorkerResponse) ◀─────────┘
//! ```
//!
//! # Modules
//!
//! - [`router`]: view registry, event routing, navigation
//! - [`focus`]: blur/focus ordering
//! - [`list`]: the generic paginated list view
//! - [`detail`]: the endpoint detail view
//! - [`screens`]: concrete collection and endpoint lists
//! - [`keys`]: logical keys and the keymap

pub mod actions;
pub mod context;
pub mod detail;
pub mod editor;
pub mod focus;
pub mod keys;
pub mod list;
pub mod modes;
pub mod pagination;
pub mod router;
pub mod screens;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use actions::{Action, Banner};
pub use context::{NavigationContext, ResourceItem, ResourceKind, ViewId};
pub use detail::EndpointDetailView;
pub use focus::{FocusCoordinator, FocusEvent};
pub use keys::{map_key, InputContext, Key};
pub use list::ResourceListView;
pub use modes::{EditDraft, ModeKind, ViewMode};
pub use pagination::{PageState, DEFAULT_PAGE_SIZE};
pub use router::{Dispatch, Event, NavigationRouter};
pub use screens::{collections_view, endpoints_view, CollectionsView, EndpointsView};
pub use view::{View, ViewSnapshot};
