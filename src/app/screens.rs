//! Concrete list views for collections and endpoints.

use super::context::{ResourceItem, ResourceKind, ViewId};
use super::list::ResourceListView;
use crate::domain::{Collection, Endpoint};
use crate::source::{CollectionSource, EndpointSource};
use crate::storage::SharedStorage;
use std::num::NonZeroUsize;

pub type CollectionsView = ResourceListView<CollectionSource>;
pub type EndpointsView = ResourceListView<EndpointSource>;

fn collection_item(collection: &Collection) -> ResourceItem {
    ResourceItem {
        id: collection.id,
        title: collection.name.clone(),
        subtext: collection.updated_ago(),
    }
}

fn endpoint_item(endpoint: &Endpoint) -> ResourceItem {
    ResourceItem {
        id: endpoint.id,
        title: endpoint.name.clone(),
        subtext: endpoint.summary(),
    }
}

/// Root list of all collections; `Enter` opens its endpoints.
#[must_use]
pub fn collections_view(storage: SharedStorage, page_size: NonZeroUsize) -> CollectionsView {
    ResourceListView::root(
        ViewId::Collections,
        ResourceKind::Collection,
        "Collections",
        CollectionSource::new(storage),
        collection_item,
        page_size,
    )
    .with_child(ViewId::Endpoints)
}

/// Endpoints of whichever collection it was navigated to with; `Enter` opens
/// the endpoint detail.
#[must_use]
pub fn endpoints_view(storage: SharedStorage, page_size: NonZeroUsize) -> EndpointsView {
    ResourceListView::scoped(
        ViewId::Endpoints,
        ResourceKind::Endpoint,
        "Endpoints",
        ResourceKind::Collection,
        move |collection| EndpointSource::new(storage.clone(), collection.id),
        endpoint_item,
        page_size,
    )
    .with_child(ViewId::EndpointDetail)
}
