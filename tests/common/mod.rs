//! Drives a real router over a temporary JSON store, running worker jobs on
//! the test thread in a controlled order.

#![allow(dead_code)]

use reqtui::app::{NavigationContext, ResourceItem, ResourceKind, ViewSnapshot};
use reqtui::http::{HttpRequest, HttpResponse, RequestExecutor};
use reqtui::storage::{
    shared, CollectionRecord, EndpointPatch, EndpointRecord, JsonStorage, NewEndpoint, SharedStorage,
    Storage,
};
use reqtui::ui::{BannerKind, UIViewModel};
use reqtui::worker::WorkerMessage;
use reqtui::{build_router, Action, Event, Key, NavigationRouter, ReqError, Result, ViewId};
use std::collections::{BTreeMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub struct Harness {
    pub router: NavigationRouter,
    pub storage: SharedStorage,
    pub executor: Arc<StubExecutor>,
    pending: VecDeque<WorkerMessage>,
    pub quit: bool,
    dir: TempDir,
}

impl Harness {
    /// Store seeded with `collections`, each holding the given endpoint names.
    pub fn seeded(collections: &[(&str, &[&str])], page_size: usize) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStorage::new(dir.path().join(reqtui::STORE_FILE)).unwrap();
        seed(&mut store, collections);
        Self::over(dir, shared(store), page_size)
    }

    /// Store seeded with `count` collections named `c1..=count`.
    pub fn numbered(count: usize, page_size: usize) -> Self {
        let names: Vec<String> = (1..=count).map(|i| format!("c{i}")).collect();
        let collections: Vec<(&str, &[&str])> = names.iter().map(|n| (n.as_str(), &[][..])).collect();
        Self::seeded(&collections, page_size)
    }

    /// Wraps the seeded store so its deletes fail with a storage error while
    /// `fail_deletes` is set.
    pub fn flaky(collections: &[(&str, &[&str])], page_size: usize) -> (Self, Arc<AtomicBool>) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStorage::new(dir.path().join(reqtui::STORE_FILE)).unwrap();
        seed(&mut store, collections);
        let fail = Arc::new(AtomicBool::new(false));
        let flaky = FlakyStorage {
            inner: store,
            fail_deletes: Arc::clone(&fail),
        };
        (Self::over(dir, shared(flaky), page_size), fail)
    }

    fn over(dir: TempDir, storage: SharedStorage, page_size: usize) -> Self {
        let executor = Arc::new(StubExecutor::default());
        let router = build_router(
            storage.clone(),
            executor.clone(),
            NonZeroUsize::new(page_size).unwrap(),
        );
        let mut harness = Self {
            router,
            storage,
            executor,
            pending: VecDeque::new(),
            quit: false,
            dir,
        };
        let actions = harness.router.start();
        harness.absorb(actions);
        harness.settle();
        harness
    }

    /// Dispatches a key and queues its jobs without running them.
    pub fn press(&mut self, key: Key) {
        let dispatch = self.router.dispatch(Event::Key(key));
        self.absorb(dispatch.actions);
    }

    /// Dispatches a key and runs every resulting job.
    pub fn press_settled(&mut self, key: Key) {
        self.press(key);
        self.settle();
    }

    /// Resizes the terminal; resizing never queues work.
    pub fn resize(&mut self, width: u16, height: u16) {
        let dispatch = self.router.dispatch(Event::Resize { width, height });
        assert!(dispatch.should_render);
        self.absorb(dispatch.actions);
    }

    /// Path of the JSON store backing this harness.
    pub fn store_path(&self) -> std::path::PathBuf {
        self.dir.path().join(reqtui::STORE_FILE)
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(Key::Char(c));
        }
    }

    pub fn open(&mut self, target: ViewId, context: Option<NavigationContext>) {
        let actions = self.router.open(target, context);
        self.absorb(actions);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Runs the oldest queued job and returns how many jobs its response queued.
    pub fn step(&mut self) -> usize {
        let Some(message) = self.pending.pop_front() else {
            return 0;
        };
        let before = self.pending.len();
        let response = message.run();
        let dispatch = self.router.dispatch(Event::Worker(response));
        self.absorb(dispatch.actions);
        self.pending.len() - before
    }

    /// Runs jobs until none remain.
    pub fn settle(&mut self) {
        while !self.pending.is_empty() {
            self.step();
        }
    }

    /// Runs the currently queued jobs newest first, then settles.
    pub fn settle_newest_first(&mut self) {
        let queued: Vec<WorkerMessage> = self.pending.drain(..).collect();
        for message in queued.into_iter().rev() {
            let response = message.run();
            let dispatch = self.router.dispatch(Event::Worker(response));
            self.absorb(dispatch.actions);
        }
        self.settle();
    }

    pub fn snapshot(&self, id: ViewId) -> ViewSnapshot {
        self.router.view(id).unwrap().snapshot()
    }

    pub fn focused(&self) -> ViewSnapshot {
        self.snapshot(self.router.focused())
    }

    pub fn viewmodel(&self) -> UIViewModel {
        self.router.viewmodel()
    }

    pub fn banner_kind(&self) -> Option<BannerKind> {
        self.router.banner().map(|b| b.kind)
    }

    pub fn collection_names(&self) -> Vec<String> {
        let store = self.storage.lock().unwrap();
        let (items, _) = store.list_collections(usize::MAX, 0).unwrap();
        items.into_iter().map(|c| c.name).collect()
    }

    fn absorb(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::Quit => self.quit = true,
                Action::PostToWorker(message) => self.pending.push_back(message),
                other => panic!("router leaked {other:?}"),
            }
        }
    }
}

fn seed(store: &mut JsonStorage, collections: &[(&str, &[&str])]) {
    for (name, endpoints) in collections {
        let collection = store.create_collection(name).unwrap();
        for endpoint in *endpoints {
            let mut new = NewEndpoint::named(collection.id, *endpoint);
            new.url = format!("https://api.example.test/{}", endpoint.to_lowercase());
            store.create_endpoint(new).unwrap();
        }
    }
}

pub fn context(kind: ResourceKind, id: i64, title: &str) -> NavigationContext {
    NavigationContext::new(
        kind,
        ResourceItem {
            id,
            title: title.to_string(),
            subtext: String::new(),
        },
    )
}

/// Executor answering every request with `200 OK` and a JSON echo of the URL.
#[derive(Default)]
pub struct StubExecutor {
    pub seen: Mutex<Vec<HttpRequest>>,
}

impl RequestExecutor for StubExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(HttpResponse {
            status: 200,
            status_text: "OK".to_string(),
            headers: BTreeMap::from([("content-type".to_string(), "application/json".to_string())]),
            body: format!("{{\"url\":\"{}\"}}", request.url),
            duration_ms: 7,
        })
    }
}

struct FlakyStorage {
    inner: JsonStorage,
    fail_deletes: Arc<AtomicBool>,
}

impl FlakyStorage {
    fn check(&self) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            Err(ReqError::Storage("disk is read-only".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Storage for FlakyStorage {
    fn create_collection(&mut self, name: &str) -> Result<CollectionRecord> {
        self.inner.create_collection(name)
    }

    fn get_collection(&self, id: i64) -> Result<Option<CollectionRecord>> {
        self.inner.get_collection(id)
    }

    fn rename_collection(&mut self, id: i64, name: &str) -> Result<Option<CollectionRecord>> {
        self.inner.rename_collection(id, name)
    }

    fn delete_collection(&mut self, id: i64) -> Result<bool> {
        self.check()?;
        self.inner.delete_collection(id)
    }

    fn list_collections(&self, limit: usize, offset: usize) -> Result<(Vec<CollectionRecord>, u64)> {
        self.inner.list_collections(limit, offset)
    }

    fn create_endpoint(&mut self, endpoint: NewEndpoint) -> Result<Option<EndpointRecord>> {
        self.inner.create_endpoint(endpoint)
    }

    fn get_endpoint(&self, id: i64) -> Result<Option<EndpointRecord>> {
        self.inner.get_endpoint(id)
    }

    fn update_endpoint(&mut self, id: i64, patch: EndpointPatch) -> Result<Option<EndpointRecord>> {
        self.inner.update_endpoint(id, patch)
    }

    fn delete_endpoint(&mut self, id: i64) -> Result<bool> {
        self.check()?;
        self.inner.delete_endpoint(id)
    }

    fn list_endpoints(
        &self,
        collection_id: i64,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<EndpointRecord>, u64)> {
        self.inner.list_endpoints(collection_id, limit, offset)
    }
}
