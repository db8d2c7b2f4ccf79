//! Identity types shared by views, the router, and worker messages.

use std::fmt;

/// Identifies one registered view.
///
/// Ordering is the navigation depth, root first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViewId {
    Collections,
    Endpoints,
    EndpointDetail,
}

impl ViewId {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Collections => "collections",
            Self::Endpoints => "endpoints",
            Self::EndpointDetail => "endpoint_detail",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of resource a list view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Collection,
    Endpoint,
}

impl ResourceKind {
    /// Lowercase singular noun for messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Endpoint => "endpoint",
        }
    }

    /// Capitalized singular noun for titles and banners.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Collection => "Collection",
            Self::Endpoint => "Endpoint",
        }
    }
}

/// Display projection of a backend entity.
///
/// List views only ever hold these; the entity itself stays in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceItem {
    pub id: i64,
    pub title: String,
    pub subtext: String,
}

/// Payload handed to a view when it is navigated to.
///
/// Names the parent item the target view should scope itself to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    pub kind: ResourceKind,
    pub item: ResourceItem,
}

impl NavigationContext {
    #[must_use]
    pub const fn new(kind: ResourceKind, item: ResourceItem) -> Self {
        Self { kind, item }
    }
}
