//! Endpoint detail screen: shows one saved request, edits its fields, sends
//! it, and displays the last response.

use super::actions::Action;
use super::context::{NavigationContext, ResourceItem, ResourceKind, ViewId};
use super::editor::TextInput;
use super::keys::{InputContext, Key};
use super::modes::ModeKind;
use super::view::{View, ViewSnapshot};
use crate::domain::error::{ReqError, Result};
use crate::domain::validation::{parse_header_line, validate_url};
use crate::domain::Endpoint;
use crate::http::{HttpRequest, HttpResponse, RequestExecutor};
use crate::source::endpoints::{patch_endpoint, read_endpoint};
use crate::storage::{EndpointPatch, SharedStorage};
use crate::ui::helpers::truncate;
use crate::ui::renderer::{CHROME_ROWS, INPUT_BAR_ROWS};
use crate::ui::viewmodel::{Body, DetailInfo, FooterInfo, HeaderInfo, InputBarInfo, UIViewModel};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::fmt::Write as _;
use std::sync::Arc;

const URL_CHAR_LIMIT: usize = 2048;
const BODY_CHAR_LIMIT: usize = 8192;
const HEADER_CHAR_LIMIT: usize = 512;
const FIELD_ROWS: usize = 6;
const VALUE_WIDTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Url,
    Body,
    Header,
}

impl Field {
    const fn label(self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Body => "Body",
            Self::Header => "Header (Name: value, empty value removes)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DetailMode {
    Viewing,
    Editing { field: Field, input: TextInput },
}

/// Detail view for a single endpoint.
pub struct EndpointDetailView {
    storage: SharedStorage,
    executor: Arc<dyn RequestExecutor>,
    target: Option<ResourceItem>,
    endpoint: Option<Endpoint>,
    load_generation: u64,
    send_generation: u64,
    save_generation: u64,
    sending: bool,
    /// A save is in flight; further edits wait in `queued`.
    saving: bool,
    queued: Option<EndpointPatch>,
    response: Option<HttpResponse>,
    response_lines: Vec<String>,
    last_error: Option<String>,
    mode: DetailMode,
    scroll: usize,
    size: (u16, u16),
}

impl EndpointDetailView {
    #[must_use]
    pub fn new(storage: SharedStorage, executor: Arc<dyn RequestExecutor>) -> Self {
        Self {
            storage,
            executor,
            target: None,
            endpoint: None,
            load_generation: 0,
            send_generation: 0,
            save_generation: 0,
            sending: false,
            saving: false,
            queued: None,
            response: None,
            response_lines: Vec::new(),
            last_error: None,
            mode: DetailMode::Viewing,
            scroll: 0,
            size: (80, 24),
        }
    }

    /// Endpoint as last loaded or saved.
    #[must_use]
    pub const fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    #[must_use]
    pub const fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    fn load(&mut self) -> Vec<Action> {
        let Some(id) = self.target.as_ref().map(|t| t.id) else {
            return vec![];
        };
        self.load_generation += 1;
        let generation = self.load_generation;
        let storage = Arc::clone(&self.storage);

        vec![Action::PostToWorker(WorkerMessage::new("read_endpoint", move || {
            WorkerResponse::EndpointLoaded {
                view: ViewId::EndpointDetail,
                generation,
                result: read_endpoint(&storage, id),
            }
        }))]
    }

    /// Shows `patch` immediately and persists it. Saves run one at a time;
    /// edits made while one is in flight are merged and sent after it.
    fn save(&mut self, patch: EndpointPatch) -> Vec<Action> {
        let Some(endpoint) = self.endpoint.as_mut() else {
            return vec![];
        };
        patch.clone().apply_to_endpoint(endpoint);

        if self.saving {
            tracing::debug!(endpoint_id = endpoint.id, "save in flight, queueing edit");
            match &mut self.queued {
                Some(queued) => queued.merge(patch),
                None => self.queued = Some(patch),
            }
            return vec![];
        }
        self.post_save(patch)
    }

    fn post_save(&mut self, patch: EndpointPatch) -> Vec<Action> {
        let Some(id) = self.endpoint.as_ref().map(|e| e.id) else {
            return vec![];
        };
        self.saving = true;
        let generation = self.save_generation;
        let storage = Arc::clone(&self.storage);

        vec![Action::PostToWorker(WorkerMessage::new("patch_endpoint", move || {
            WorkerResponse::EndpointSaved {
                view: ViewId::EndpointDetail,
                generation,
                result: patch_endpoint(&storage, id, patch),
            }
        }))]
    }

    fn send(&mut self) -> Vec<Action> {
        let Some(endpoint) = &self.endpoint else {
            return vec![];
        };
        let request = match HttpRequest::from_endpoint(endpoint) {
            Ok(request) => request,
            Err(e) => {
                // Shown in place of the response rather than as a banner.
                self.last_error = Some(e.to_string());
                return vec![];
            }
        };

        self.send_generation += 1;
        self.sending = true;
        self.last_error = None;
        let generation = self.send_generation;
        let executor = Arc::clone(&self.executor);
        tracing::info!(method = %request.method, url = %request.url, "sending request");

        vec![Action::PostToWorker(WorkerMessage::new("send_request", move || {
            WorkerResponse::ResponseReceived {
                view: ViewId::EndpointDetail,
                generation,
                result: executor.execute(&request),
            }
        }))]
    }

    fn start_edit(&mut self, field: Field) {
        let Some(endpoint) = &self.endpoint else {
            return;
        };
        let input = match field {
            Field::Url => TextInput::with_value(&endpoint.url, URL_CHAR_LIMIT),
            Field::Body => TextInput::with_value(&endpoint.request_body, BODY_CHAR_LIMIT),
            Field::Header => TextInput::new(HEADER_CHAR_LIMIT),
        };
        self.mode = DetailMode::Editing { field, input };
    }

    fn commit_edit(&mut self) -> Vec<Action> {
        let DetailMode::Editing { field, input } = &mut self.mode else {
            return vec![];
        };

        let patch = match *field {
            Field::Url => validate_url(input.value()).map(|url| EndpointPatch {
                url: Some(url),
                ..EndpointPatch::default()
            }),
            Field::Body => Ok(EndpointPatch {
                request_body: Some(input.value().to_string()),
                ..EndpointPatch::default()
            }),
            Field::Header => parse_header_line(input.value()).map(|(name, value)| {
                let mut headers = self
                    .endpoint
                    .as_ref()
                    .map(|e| e.headers.clone())
                    .unwrap_or_default();
                if value.is_empty() {
                    headers.remove(&name);
                } else {
                    headers.insert(name, value);
                }
                EndpointPatch {
                    headers: Some(headers),
                    ..EndpointPatch::default()
                }
            }),
        };

        match patch {
            Ok(patch) => {
                self.mode = DetailMode::Viewing;
                self.save(patch)
            }
            Err(e) => {
                input.set_error(e.to_string());
                vec![]
            }
        }
    }

    fn apply_loaded(&mut self, generation: u64, result: Result<Endpoint>) -> Vec<Action> {
        if generation != self.load_generation {
            tracing::debug!(generation, latest = self.load_generation, "discarding stale endpoint load");
            return vec![];
        }
        match result {
            Ok(_) if self.saving => {
                // The local copy already holds edits the loaded one lacks.
                tracing::debug!("save in flight, keeping local endpoint");
                vec![]
            }
            Ok(endpoint) => {
                self.endpoint = Some(endpoint);
                vec![]
            }
            Err(e) => self.fail(&e),
        }
    }

    fn apply_saved(&mut self, generation: u64, result: Result<Endpoint>) -> Vec<Action> {
        if generation != self.save_generation {
            tracing::debug!(generation, latest = self.save_generation, "discarding save for another endpoint");
            return vec![];
        }
        self.saving = false;

        match result {
            Ok(endpoint) => {
                if let Some(next) = self.queued.take() {
                    return self.post_save(next);
                }
                tracing::debug!(endpoint_id = endpoint.id, "endpoint saved");
                self.endpoint = Some(endpoint);
                vec![Action::info_banner("Saved")]
            }
            Err(e) => {
                self.queued = None;
                let mut actions = self.fail(&e);
                if !e.is_not_found() {
                    // Drop the unsaved local edits.
                    actions.extend(self.load());
                }
                actions
            }
        }
    }

    fn apply_response(&mut self, generation: u64, result: Result<HttpResponse>) -> Vec<Action> {
        if generation != self.send_generation {
            tracing::debug!(generation, latest = self.send_generation, "discarding stale response");
            return vec![];
        }
        self.sending = false;
        match result {
            Ok(response) => {
                tracing::info!(status = response.status, duration_ms = response.duration_ms, "response received");
                self.response_lines = response_lines(&response);
                self.response = Some(response);
                self.last_error = None;
                self.scroll = 0;
                vec![]
            }
            Err(e) => {
                tracing::warn!(error = %e, "request failed");
                self.last_error = Some(e.to_string());
                vec![Action::error_banner(format!("Request failed: {e}"))]
            }
        }
    }

    fn fail(&self, error: &ReqError) -> Vec<Action> {
        if error.is_not_found() {
            tracing::debug!(error = %error, "endpoint vanished, leaving detail view");
            return vec![
                Action::error_banner("Endpoint no longer exists"),
                Action::Back,
            ];
        }
        tracing::warn!(error = %error, "endpoint operation failed");
        vec![Action::error_banner(error.to_string())]
    }

    fn response_rows(&self) -> usize {
        let input = if matches!(self.mode, DetailMode::Editing { .. }) {
            INPUT_BAR_ROWS
        } else {
            0
        };
        usize::from(self.size.1)
            .saturating_sub(CHROME_ROWS + FIELD_ROWS + input)
            .max(1)
    }

    fn detail_info(&self, endpoint: &Endpoint) -> DetailInfo {
        let headers = if endpoint.headers.is_empty() {
            "(none)".to_string()
        } else {
            endpoint
                .headers
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; ")
        };
        let query = if endpoint.query_params.is_empty() {
            "(none)".to_string()
        } else {
            endpoint
                .query_params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&")
        };
        let url = if endpoint.url.is_empty() { "(not set)" } else { endpoint.url.as_str() };
        let body = if endpoint.request_body.is_empty() {
            "(empty)".to_string()
        } else {
            endpoint.request_body.replace('\n', " ")
        };

        let fields = vec![
            ("Method".to_string(), endpoint.method.to_string()),
            ("URL".to_string(), truncate(url, VALUE_WIDTH)),
            ("Headers".to_string(), truncate(&headers, VALUE_WIDTH)),
            ("Query".to_string(), truncate(&query, VALUE_WIDTH)),
            ("Body".to_string(), truncate(&body, VALUE_WIDTH)),
        ];

        let placeholder = if self.sending {
            Some("Sending...".to_string())
        } else if let Some(error) = &self.last_error {
            Some(error.clone())
        } else if self.response.is_none() {
            Some("Press s to send".to_string())
        } else {
            None
        };

        let rows = self.response_rows();
        DetailInfo {
            fields,
            status: self
                .response
                .as_ref()
                .map(|r| (r.status_line(), r.is_success())),
            response_lines: self
                .response_lines
                .iter()
                .skip(self.scroll)
                .take(rows)
                .cloned()
                .collect(),
            placeholder,
        }
    }
}

/// Response headers, a blank line, then the body. JSON bodies are
/// pretty-printed.
fn response_lines(response: &HttpResponse) -> Vec<String> {
    let mut lines: Vec<String> = response
        .headers
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect();
    lines.push(String::new());

    let body = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| response.body.clone());
    lines.extend(body.lines().map(str::to_string));
    lines
}

impl View for EndpointDetailView {
    fn id(&self) -> ViewId {
        ViewId::EndpointDetail
    }

    fn init(&mut self) -> Vec<Action> {
        self.load()
    }

    fn handle_key(&mut self, key: Key) -> Vec<Action> {
        if let DetailMode::Editing { input, .. } = &mut self.mode {
            match key {
                Key::Char(c) => {
                    input.push(c);
                }
                Key::Backspace => {
                    input.pop();
                }
                Key::Cancel => self.mode = DetailMode::Viewing,
                Key::Accept => return self.commit_edit(),
                _ => {}
            }
            return vec![];
        }

        match key {
            Key::SendRequest | Key::Accept => return self.send(),
            Key::CycleMethod => {
                if let Some(method) = self.endpoint.as_ref().map(|e| e.method.next()) {
                    return self.save(EndpointPatch {
                        method: Some(method),
                        ..EndpointPatch::default()
                    });
                }
            }
            Key::EditUrl => self.start_edit(Field::Url),
            Key::EditBody => self.start_edit(Field::Body),
            Key::AddHeader => self.start_edit(Field::Header),
            Key::Refresh => return self.load(),
            Key::MoveDown => {
                if self.scroll + 1 < self.response_lines.len() {
                    self.scroll += 1;
                }
            }
            Key::MoveUp => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
        vec![]
    }

    fn handle_response(&mut self, response: WorkerResponse) -> Vec<Action> {
        match response {
            WorkerResponse::EndpointLoaded {
                generation, result, ..
            } => self.apply_loaded(generation, result),
            WorkerResponse::EndpointSaved {
                generation, result, ..
            } => self.apply_saved(generation, result),
            WorkerResponse::ResponseReceived {
                generation, result, ..
            } => self.apply_response(generation, result),
            other => {
                tracing::warn!(response = ?other, "unexpected response for detail view");
                vec![]
            }
        }
    }

    fn on_focus(&mut self) {
        tracing::debug!(view = %ViewId::EndpointDetail, "focused");
    }

    fn on_blur(&mut self) {
        self.mode = DetailMode::Viewing;
    }

    fn set_context(&mut self, context: Option<NavigationContext>) -> Result<()> {
        let Some(context) = context else {
            return if self.target.is_some() {
                Ok(())
            } else {
                Err(ReqError::invalid("no endpoint selected"))
            };
        };
        if context.kind != ResourceKind::Endpoint {
            return Err(ReqError::invalid(format!(
                "cannot open a {} as an endpoint",
                context.kind.noun()
            )));
        }

        if self.target.as_ref().map(|t| t.id) != Some(context.item.id) {
            self.endpoint = None;
            self.response = None;
            self.response_lines.clear();
            self.last_error = None;
            self.sending = false;
            self.scroll = 0;
            // In-flight loads, sends and saves belong to the previous endpoint.
            self.load_generation += 1;
            self.send_generation += 1;
            self.save_generation += 1;
            self.saving = false;
            self.queued = None;
        }
        self.target = Some(context.item);
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    fn input_context(&self) -> InputContext {
        match self.mode {
            DetailMode::Viewing => InputContext::Detail,
            DetailMode::Editing { .. } => InputContext::Editing,
        }
    }

    fn breadcrumb(&self) -> String {
        self.target
            .as_ref()
            .map_or_else(|| "Endpoint".to_string(), |t| t.title.clone())
    }

    fn viewmodel(&self) -> UIViewModel {
        let title = self
            .endpoint
            .as_ref()
            .map(|e| e.name.clone())
            .or_else(|| self.target.as_ref().map(|t| t.title.clone()))
            .unwrap_or_default();

        let input_bar = match &self.mode {
            DetailMode::Editing { field, input } => Some(InputBarInfo {
                label: field.label().to_string(),
                text: input.value().to_string(),
                error: input.error().map(str::to_string),
            }),
            DetailMode::Viewing => None,
        };

        let body = self.endpoint.as_ref().map_or_else(
            || Body::Loading("Loading endpoint...".to_string()),
            |endpoint| Body::Detail(self.detail_info(endpoint)),
        );

        let keybindings = match self.mode {
            DetailMode::Viewing => {
                "s: send  m: method  u: url  b: body  h: header  j/k: scroll  r: reload  Esc: back"
            }
            DetailMode::Editing { .. } => "Enter: save  Esc: cancel",
        };

        let mut status = String::new();
        if self.sending {
            status.push_str("sending...");
        } else if !self.response_lines.is_empty() {
            let _ = write!(
                status,
                "lines {}-{} of {}",
                self.scroll + 1,
                (self.scroll + self.response_rows()).min(self.response_lines.len()),
                self.response_lines.len()
            );
        }

        UIViewModel {
            header: HeaderInfo {
                title: format!(" {title} "),
                breadcrumb: String::new(),
            },
            banner: None,
            input_bar,
            body,
            footer: FooterInfo {
                keybindings: keybindings.to_string(),
                status,
            },
        }
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            loaded: self.endpoint.is_some(),
            mode: match self.mode {
                DetailMode::Viewing => ModeKind::Browsing,
                DetailMode::Editing { .. } => ModeKind::Editing,
            },
            selected_index: self.scroll,
            filter_active: false,
            has_draft: matches!(self.mode, DetailMode::Editing { .. }),
            page: None,
            item_count: self.response_lines.len(),
            titles: self.endpoint.iter().map(|e| e.name.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::settle;
    use crate::domain::HttpMethod;
    use crate::source::{EndpointSource, PagedCrudSource};
    use crate::storage::{shared, JsonStorage};
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct StubExecutor {
        seen: Mutex<Vec<HttpRequest>>,
        fail: bool,
    }

    impl RequestExecutor for StubExecutor {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
            self.seen.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(ReqError::Http("connection refused".to_string()));
            }
            Ok(HttpResponse {
                status: 201,
                status_text: "Created".to_string(),
                headers: BTreeMap::from([("content-type".to_string(), "application/json".to_string())]),
                body: r#"{"ok":true}"#.to_string(),
                duration_ms: 12,
            })
        }
    }

    struct Fixture {
        _dir: TempDir,
        storage: SharedStorage,
        executor: Arc<StubExecutor>,
        view: EndpointDetailView,
        endpoint_id: i64,
    }

    fn fixture(fail: bool) -> Fixture {
        let dir = TempDir::new().unwrap();
        let storage = shared(JsonStorage::new(dir.path().join("store.json")).unwrap());
        let collection_id = crate::source::lock(&storage)
            .unwrap()
            .create_collection("c")
            .unwrap()
            .id;
        let endpoint = EndpointSource::new(storage.clone(), collection_id)
            .create("ping")
            .unwrap();

        let executor = Arc::new(StubExecutor {
            seen: Mutex::new(Vec::new()),
            fail,
        });
        let mut view = EndpointDetailView::new(storage.clone(), executor.clone());
        view.set_context(Some(context(endpoint.id))).unwrap();
        let actions = view.init();
        settle(&mut view, actions);

        Fixture {
            _dir: dir,
            storage,
            executor,
            view,
            endpoint_id: endpoint.id,
        }
    }

    fn context(id: i64) -> NavigationContext {
        NavigationContext::new(
            ResourceKind::Endpoint,
            ResourceItem {
                id,
                title: "ping".to_string(),
                subtext: String::new(),
            },
        )
    }

    fn press(view: &mut EndpointDetailView, key: Key) -> Vec<Action> {
        let actions = view.handle_key(key);
        settle(view, actions)
    }

    fn type_text(view: &mut EndpointDetailView, text: &str) {
        for c in text.chars() {
            press(view, Key::Char(c));
        }
    }

    #[test]
    fn loads_endpoint_on_init() {
        let f = fixture(false);
        assert_eq!(f.view.endpoint().unwrap().name, "ping");
    }

    #[test]
    fn sending_without_url_shows_inline_error() {
        let mut f = fixture(false);
        let actions = press(&mut f.view, Key::SendRequest);
        assert!(actions.is_empty());
        assert!(f.view.last_error.as_deref().unwrap().contains("URL"));
        assert!(f.executor.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn edit_url_then_send() {
        let mut f = fixture(false);
        press(&mut f.view, Key::EditUrl);
        assert_eq!(f.view.input_context(), InputContext::Editing);
        type_text(&mut f.view, "https://httpbin.org/post");
        press(&mut f.view, Key::Accept);

        assert_eq!(f.view.endpoint().unwrap().url, "https://httpbin.org/post");
        assert_eq!(read_endpoint(&f.storage, f.endpoint_id).unwrap().url, "https://httpbin.org/post");

        press(&mut f.view, Key::SendRequest);
        let response = f.view.response().unwrap();
        assert_eq!(response.status, 201);
        assert!(f.view.response_lines.iter().any(|l| l.contains("\"ok\": true")));
        assert_eq!(f.executor.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn invalid_url_keeps_editor_open() {
        let mut f = fixture(false);
        press(&mut f.view, Key::EditUrl);
        type_text(&mut f.view, "ftp://nope");
        press(&mut f.view, Key::Accept);

        assert_eq!(f.view.input_context(), InputContext::Editing);
        assert!(f.view.endpoint().unwrap().url.is_empty());
    }

    #[test]
    fn method_cycles_and_persists() {
        let mut f = fixture(false);
        press(&mut f.view, Key::CycleMethod);
        assert_eq!(f.view.endpoint().unwrap().method, HttpMethod::Post);
        assert_eq!(read_endpoint(&f.storage, f.endpoint_id).unwrap().method, HttpMethod::Post);
    }

    #[test]
    fn headers_are_added_and_removed() {
        let mut f = fixture(false);
        press(&mut f.view, Key::AddHeader);
        type_text(&mut f.view, "X-Trace: abc");
        press(&mut f.view, Key::Accept);
        assert_eq!(f.view.endpoint().unwrap().headers.get("X-Trace").map(String::as_str), Some("abc"));

        press(&mut f.view, Key::AddHeader);
        type_text(&mut f.view, "X-Trace:");
        press(&mut f.view, Key::Accept);
        assert!(f.view.endpoint().unwrap().headers.is_empty());
    }

    #[test]
    fn transport_failure_is_a_banner() {
        let mut f = fixture(true);
        f.view.endpoint.as_mut().unwrap().url = "https://example.com".to_string();
        let actions = press(&mut f.view, Key::SendRequest);
        assert!(matches!(&actions[..], [Action::Banner(_)]));
        assert!(f.view.response().is_none());
    }

    #[test]
    fn vanished_endpoint_navigates_back() {
        let mut f = fixture(false);
        crate::source::lock(&f.storage)
            .unwrap()
            .delete_endpoint(f.endpoint_id)
            .unwrap();
        let actions = press(&mut f.view, Key::Refresh);
        assert!(matches!(actions.last(), Some(Action::Back)));
    }

    #[test]
    fn context_rules() {
        let mut f = fixture(false);
        let wrong = NavigationContext::new(
            ResourceKind::Collection,
            ResourceItem {
                id: 1,
                title: "c".to_string(),
                subtext: String::new(),
            },
        );
        assert!(f.view.set_context(Some(wrong)).is_err());
        assert!(f.view.set_context(None).is_ok());

        let storage = f.storage.clone();
        let mut fresh = EndpointDetailView::new(storage, f.executor.clone());
        assert!(fresh.set_context(None).is_err());
    }

    /// Submits a header line without running the resulting save.
    fn submit_header(view: &mut EndpointDetailView, line: &str) -> Vec<Action> {
        view.handle_key(Key::AddHeader);
        for c in line.chars() {
            view.handle_key(Key::Char(c));
        }
        view.handle_key(Key::Accept)
    }

    #[test]
    fn repeated_method_cycles_queue_behind_the_first_save() {
        let mut f = fixture(false);
        let first = f.view.handle_key(Key::CycleMethod);
        let second = f.view.handle_key(Key::CycleMethod);

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(f.view.endpoint().unwrap().method, HttpMethod::Put);

        let out = settle(&mut f.view, first);
        assert!(matches!(&out[..], [Action::Banner(_)]));
        assert_eq!(f.view.endpoint().unwrap().method, HttpMethod::Put);
        assert_eq!(read_endpoint(&f.storage, f.endpoint_id).unwrap().method, HttpMethod::Put);
    }

    #[test]
    fn back_to_back_header_edits_are_all_saved() {
        let mut f = fixture(false);
        let mut pending = submit_header(&mut f.view, "A: 1");
        pending.extend(submit_header(&mut f.view, "B: 2"));
        pending.extend(f.view.handle_key(Key::CycleMethod));
        assert_eq!(pending.len(), 1);

        settle(&mut f.view, pending);

        let stored = read_endpoint(&f.storage, f.endpoint_id).unwrap();
        assert_eq!(stored.headers.len(), 2);
        assert_eq!(stored.headers.get("A").map(String::as_str), Some("1"));
        assert_eq!(stored.method, HttpMethod::Post);
        assert_eq!(f.view.endpoint(), Some(&stored));
    }

    #[test]
    fn save_for_a_previous_endpoint_is_ignored() {
        let mut f = fixture(false);
        let collection_id = read_endpoint(&f.storage, f.endpoint_id).unwrap().collection_id;
        let other = EndpointSource::new(f.storage.clone(), collection_id)
            .create("pong")
            .unwrap();

        let stale = f.view.handle_key(Key::CycleMethod);
        f.view.set_context(Some(context(other.id))).unwrap();
        let actions = f.view.init();
        settle(&mut f.view, actions);

        let out = settle(&mut f.view, stale);
        assert!(out.is_empty());
        assert_eq!(f.view.endpoint().unwrap().id, other.id);
        assert_eq!(f.view.endpoint().unwrap().method, HttpMethod::Get);
        assert_eq!(read_endpoint(&f.storage, f.endpoint_id).unwrap().method, HttpMethod::Post);

        // A fresh edit on the new endpoint is not stuck behind the old save.
        let next = f.view.handle_key(Key::CycleMethod);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn blur_discards_edit() {
        let mut f = fixture(false);
        press(&mut f.view, Key::EditBody);
        f.view.on_blur();
        assert_eq!(f.view.input_context(), InputContext::Detail);
    }
}
