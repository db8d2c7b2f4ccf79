//! Generic paginated, filterable, editable resource list.
//!
//! [`ResourceListView`] is written once against [`PagedCrudSource`] and
//! instantiated for collections and endpoints. It owns the page cursor, the
//! selection, the fuzzy filter, and the create/rename draft; the source only
//! answers storage calls, and those always run on a worker.
//!
//! # Fetch ordering
//!
//! Every fetch bumps a generation counter and carries it through the worker.
//! A page result whose generation is not the latest is dropped, so a slow
//! response to an old page never overwrites a newer one. Refetches after a
//! mutation use `cursor_page`, the most recently *requested* page, not the
//! last one displayed.

use super::actions::Action;
use super::context::{NavigationContext, ResourceItem, ResourceKind, ViewId};
use super::editor::TextInput;
use super::keys::{InputContext, Key};
use super::modes::{EditDraft, ViewMode};
use super::pagination::PageState;
use super::view::{View, ViewSnapshot};
use crate::domain::error::{ReqError, Result};
use crate::domain::validation::validate_name;
use crate::source::PagedCrudSource;
use crate::ui::helpers::truncate;
use crate::ui::renderer::{CHROME_ROWS, INPUT_BAR_ROWS, TITLE_COLUMN_WIDTH};
use crate::ui::viewmodel::{
    Body, DisplayItem, EmptyState, FooterInfo, HeaderInfo, InputBarInfo, UIViewModel,
};
use crate::worker::{Mutation, PageData, WorkerMessage, WorkerResponse};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::num::NonZeroUsize;
use std::sync::Arc;

const FILTER_CHAR_LIMIT: usize = 64;

/// Builds a source scoped to a parent item. Used by non-root lists.
pub type Binder<S> = Box<dyn Fn(&ResourceItem) -> S>;

struct Scope<S> {
    accepts: ResourceKind,
    bind: Binder<S>,
}

/// List view over any [`PagedCrudSource`].
pub struct ResourceListView<S: PagedCrudSource> {
    id: ViewId,
    kind: ResourceKind,
    title: &'static str,
    child: Option<ViewId>,
    scope: Option<Scope<S>>,
    parent: Option<ResourceItem>,
    source: Option<Arc<S>>,
    project: fn(&S::Entity) -> ResourceItem,

    page_size: NonZeroUsize,
    cursor_page: usize,
    page: PageState,
    generation: u64,
    /// Bumped on every rebind; mutation results from an older binding are dropped.
    binding: u64,
    loaded: bool,
    loading: bool,

    items: Vec<ResourceItem>,
    visible: Vec<usize>,
    highlights: Vec<Vec<(usize, usize)>>,
    selected_index: usize,

    filter: TextInput,
    mode: ViewMode,
    size: (u16, u16),
}

impl<S: PagedCrudSource> ResourceListView<S> {
    /// A top-level list with a fixed source. Accepts no navigation context.
    pub fn root(
        id: ViewId,
        kind: ResourceKind,
        title: &'static str,
        source: S,
        project: fn(&S::Entity) -> ResourceItem,
        page_size: NonZeroUsize,
    ) -> Self {
        let mut view = Self::blank(id, kind, title, project, page_size);
        view.source = Some(Arc::new(source));
        view
    }

    /// A list whose source is built from a parent item of kind `accepts`
    /// each time it is navigated to with a new parent.
    pub fn scoped(
        id: ViewId,
        kind: ResourceKind,
        title: &'static str,
        accepts: ResourceKind,
        bind: impl Fn(&ResourceItem) -> S + 'static,
        project: fn(&S::Entity) -> ResourceItem,
        page_size: NonZeroUsize,
    ) -> Self {
        let mut view = Self::blank(id, kind, title, project, page_size);
        view.scope = Some(Scope {
            accepts,
            bind: Box::new(bind),
        });
        view
    }

    /// Sets the view that `Enter` on a row navigates to.
    #[must_use]
    pub fn with_child(mut self, child: ViewId) -> Self {
        self.child = Some(child);
        self
    }

    fn blank(
        id: ViewId,
        kind: ResourceKind,
        title: &'static str,
        project: fn(&S::Entity) -> ResourceItem,
        page_size: NonZeroUsize,
    ) -> Self {
        Self {
            id,
            kind,
            title,
            child: None,
            scope: None,
            parent: None,
            source: None,
            project,
            page_size,
            cursor_page: 1,
            page: PageState::empty(page_size),
            generation: 0,
            binding: 0,
            loaded: false,
            loading: false,
            items: Vec::new(),
            visible: Vec::new(),
            highlights: Vec::new(),
            selected_index: 0,
            filter: TextInput::new(FILTER_CHAR_LIMIT),
            mode: ViewMode::Browsing,
            size: (80, 24),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &ViewMode {
        &self.mode
    }

    #[must_use]
    pub const fn page_state(&self) -> PageState {
        self.page
    }

    /// Most recently requested page, which may be ahead of the displayed one.
    #[must_use]
    pub const fn cursor_page(&self) -> usize {
        self.cursor_page
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&ResourceItem> {
        self.visible
            .get(self.selected_index)
            .and_then(|&i| self.items.get(i))
    }

    /// Items passing the filter, in display order.
    pub fn visible_items(&self) -> impl Iterator<Item = &ResourceItem> {
        self.visible.iter().filter_map(|&i| self.items.get(i))
    }

    #[must_use]
    pub const fn parent(&self) -> Option<&ResourceItem> {
        self.parent.as_ref()
    }

    /// Swaps in a source for a different parent and forgets everything
    /// derived from the old one. In-flight results for the old source are
    /// invalidated.
    pub fn rebind(&mut self, source: S) {
        self.source = Some(Arc::new(source));
        self.generation += 1;
        self.binding += 1;
        self.cursor_page = 1;
        self.page = PageState::empty(self.page_size);
        self.items.clear();
        self.visible.clear();
        self.highlights.clear();
        self.selected_index = 0;
        self.filter.clear();
        self.mode = ViewMode::Browsing;
        self.loaded = false;
        self.loading = false;
    }

    fn fetch(&mut self) -> Vec<Action> {
        let Some(source) = self.source.clone() else {
            tracing::debug!(view = %self.id, "fetch skipped, view not bound");
            return vec![];
        };

        self.generation += 1;
        self.loading = true;

        let view = self.id;
        let generation = self.generation;
        let page = self.cursor_page;
        let page_size = self.page_size;
        let project = self.project;
        tracing::debug!(view = %view, generation, page, "fetching page");

        let job = move || {
            let result = source
                .list_page(page_size.get(), PageState::offset_of(page, page_size))
                .map(|fetched| PageData {
                    page,
                    items: fetched.items.iter().map(project).collect(),
                    total: fetched.total,
                });
            WorkerResponse::PageLoaded {
                view,
                generation,
                result,
            }
        };
        vec![Action::PostToWorker(WorkerMessage::new("list_page", job))]
    }

    fn mutate(
        &self,
        op: Mutation,
        title: String,
        apply: impl FnOnce(&S) -> Result<()> + Send + 'static,
    ) -> Vec<Action> {
        let Some(source) = self.source.clone() else {
            return vec![];
        };
        let view = self.id;
        let binding = self.binding;
        let label = match op {
            Mutation::Create => "create",
            Mutation::Update => "update",
            Mutation::Delete => "delete",
        };
        tracing::debug!(view = %view, op = label, title = %title, "mutation requested");

        let job = move || WorkerResponse::Mutated {
            view,
            op,
            title,
            binding,
            result: apply(source.as_ref()),
        };
        vec![Action::PostToWorker(WorkerMessage::new(label, job))]
    }

    fn apply_page(&mut self, generation: u64, result: Result<PageData>) -> Vec<Action> {
        if generation != self.generation {
            tracing::debug!(
                view = %self.id,
                generation,
                latest = self.generation,
                "discarding stale page"
            );
            return vec![];
        }
        self.loading = false;

        match result {
            Ok(data) => {
                let state = PageState::compute(data.total, self.page_size, data.page);
                if state.current_page != data.page {
                    tracing::debug!(
                        view = %self.id,
                        requested = data.page,
                        clamped = state.current_page,
                        "requested page past the end, refetching"
                    );
                    self.cursor_page = state.current_page;
                    return self.fetch();
                }

                self.page = state;
                self.items = data.items;
                self.loaded = true;
                self.refilter();
                tracing::debug!(
                    view = %self.id,
                    page = state.current_page,
                    total = state.total_items,
                    shown = self.visible.len(),
                    "page applied"
                );
                vec![]
            }
            Err(e) => {
                self.loaded = true;
                tracing::warn!(view = %self.id, error = %e, "page fetch failed");
                vec![Action::error_banner(format!(
                    "Failed to load {}s: {e}",
                    self.kind.noun()
                ))]
            }
        }
    }

    fn apply_mutation(
        &mut self,
        op: Mutation,
        title: &str,
        binding: u64,
        result: Result<()>,
    ) -> Vec<Action> {
        if binding != self.binding {
            tracing::debug!(
                view = %self.id,
                op = op.past_tense(),
                title,
                binding,
                latest = self.binding,
                "dropping mutation result for a previous parent"
            );
            return vec![];
        }
        match result {
            Ok(()) => {
                tracing::info!(view = %self.id, op = op.past_tense(), title, "mutation applied");
                let mut actions = vec![Action::info_banner(format!(
                    "{} '{title}' {}",
                    self.kind.label(),
                    op.past_tense()
                ))];
                actions.extend(self.fetch());
                actions
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(view = %self.id, error = %e, "target already gone, refreshing");
                self.fetch()
            }
            Err(e) => {
                tracing::warn!(view = %self.id, error = %e, "mutation failed");
                let mut actions = vec![Action::error_banner(e.to_string())];
                // A failed delete leaves the list as it was.
                if op != Mutation::Delete {
                    actions.extend(self.fetch());
                }
                actions
            }
        }
    }

    fn refilter(&mut self) {
        use fuzzy_matcher::FuzzyMatcher;

        let tokens: Vec<String> = self
            .filter
            .value()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        if tokens.is_empty() {
            self.visible = (0..self.items.len()).collect();
            self.highlights = vec![Vec::new(); self.items.len()];
        } else {
            let matcher = SkimMatcherV2::default();
            self.visible.clear();
            self.highlights.clear();
            for (index, item) in self.items.iter().enumerate() {
                let title = item.title.to_lowercase();
                let mut matched: Vec<usize> = Vec::new();
                let all_match = tokens.iter().all(|token| {
                    matcher.fuzzy_indices(&title, token).is_some_and(|(_, indices)| {
                        matched.extend(indices);
                        true
                    })
                });
                if all_match {
                    self.visible.push(index);
                    self.highlights.push(coalesce(matched));
                }
            }
        }

        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self
            .selected_index
            .min(self.visible.len().saturating_sub(1));
    }

    fn move_down(&mut self) {
        if self.selected_index + 1 < self.visible.len() {
            self.selected_index += 1;
        }
    }

    fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn change_page(&mut self, page: usize) -> Vec<Action> {
        self.cursor_page = page;
        self.selected_index = 0;
        self.fetch()
    }

    fn handle_browsing(&mut self, key: Key) -> Vec<Action> {
        match key {
            Key::MoveDown => self.move_down(),
            Key::MoveUp => self.move_up(),
            Key::NextPage if self.cursor_page < self.page.total_pages => {
                return self.change_page(self.cursor_page + 1);
            }
            Key::PrevPage if self.cursor_page > 1 => {
                return self.change_page(self.cursor_page - 1);
            }
            Key::ActivateFilter => self.mode = ViewMode::Filtering,
            Key::ClearFilter => {
                self.filter.clear();
                self.refilter();
            }
            Key::Refresh => return self.fetch(),
            Key::AddItem => self.mode = ViewMode::Creating(EditDraft::create()),
            Key::EditItem => {
                if let Some(draft) = self.selected_item().map(|item| EditDraft::edit(item.id, &item.title)) {
                    self.mode = ViewMode::Editing(draft);
                }
            }
            Key::DeleteItem => {
                if let Some(item) = self.selected_item() {
                    let id = item.id;
                    return self.mutate(Mutation::Delete, item.title.clone(), move |source| {
                        source.delete(id)
                    });
                }
            }
            Key::Accept => {
                if let (Some(target), Some(item)) = (self.child, self.selected_item()) {
                    return vec![Action::Navigate {
                        target,
                        context: Some(NavigationContext::new(self.kind, item.clone())),
                    }];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_filtering(&mut self, key: Key) -> Vec<Action> {
        match key {
            Key::Char(c) => {
                if self.filter.push(c) {
                    self.selected_index = 0;
                    self.refilter();
                }
            }
            Key::Backspace => {
                if self.filter.pop() {
                    self.refilter();
                }
            }
            Key::MoveDown => self.move_down(),
            Key::MoveUp => self.move_up(),
            Key::Accept => self.mode = ViewMode::Browsing,
            Key::ClearFilter | Key::Cancel => {
                self.filter.clear();
                self.mode = ViewMode::Browsing;
                self.refilter();
            }
            _ => {}
        }
        vec![]
    }

    fn handle_draft(&mut self, key: Key) -> Vec<Action> {
        match key {
            Key::Char(c) => {
                if let Some(draft) = self.mode.draft_mut() {
                    draft.input.push(c);
                }
            }
            Key::Backspace => {
                if let Some(draft) = self.mode.draft_mut() {
                    draft.input.pop();
                }
            }
            Key::Cancel => self.mode = ViewMode::Browsing,
            Key::Accept => return self.submit_draft(),
            _ => {}
        }
        vec![]
    }

    fn submit_draft(&mut self) -> Vec<Action> {
        let Some(draft) = self.mode.draft_mut() else {
            return vec![];
        };

        let name = match validate_name(draft.input.value()) {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!(view = %self.id, error = %e, "draft rejected");
                draft.input.set_error(e.to_string());
                return vec![];
            }
        };

        let target = draft.edit_target_id;
        self.mode = ViewMode::Browsing;

        let title = name.clone();
        match target {
            None => self.mutate(Mutation::Create, title, move |source| {
                source.create(&name).map(drop)
            }),
            Some(id) => self.mutate(Mutation::Update, title, move |source| {
                source.update(id, &name).map(drop)
            }),
        }
    }

    fn available_rows(&self) -> usize {
        let input = if self.input_bar().is_some() {
            INPUT_BAR_ROWS
        } else {
            0
        };
        usize::from(self.size.1)
            .saturating_sub(CHROME_ROWS + input)
            .max(1)
    }

    fn input_bar(&self) -> Option<InputBarInfo> {
        let noun = self.kind.noun();
        match &self.mode {
            ViewMode::Creating(draft) | ViewMode::Editing(draft) => Some(InputBarInfo {
                label: if draft.edit_target_id.is_some() {
                    format!("Rename {noun}")
                } else {
                    format!("New {noun}")
                },
                text: draft.input.value().to_string(),
                error: draft.input.error().map(str::to_string),
            }),
            ViewMode::Filtering => Some(InputBarInfo {
                label: "Filter".to_string(),
                text: self.filter.value().to_string(),
                error: None,
            }),
            ViewMode::Browsing if !self.filter.is_empty() => Some(InputBarInfo {
                label: "Filter".to_string(),
                text: self.filter.value().to_string(),
                error: None,
            }),
            ViewMode::Browsing => None,
        }
    }

    fn body(&self) -> Body {
        let noun = self.kind.noun();
        if !self.loaded {
            return Body::Loading(format!("Loading {noun}s..."));
        }
        if self.items.is_empty() {
            return Body::Empty(EmptyState {
                message: format!("No {noun}s yet"),
                subtitle: format!("Press 'a' to create a {noun}"),
            });
        }
        if self.visible.is_empty() {
            return Body::Empty(EmptyState {
                message: "No matches on this page".to_string(),
                subtitle: "Esc clears the filter".to_string(),
            });
        }

        let rows = self.available_rows();
        let len = self.visible.len();
        let mut start = self.selected_index.saturating_sub(rows / 2);
        let end = (start + rows).min(len);
        if end - start < rows && len >= rows {
            start = end.saturating_sub(rows);
        }

        let items = (start..end)
            .filter_map(|position| {
                let item = self.items.get(*self.visible.get(position)?)?;
                Some(DisplayItem {
                    title: truncate(&item.title, TITLE_COLUMN_WIDTH),
                    subtext: item.subtext.clone(),
                    is_selected: position == self.selected_index,
                    highlight_ranges: self.highlights.get(position).cloned().unwrap_or_default(),
                })
            })
            .collect();

        Body::List {
            columns: ("NAME", if self.kind == ResourceKind::Collection { "UPDATED" } else { "REQUEST" }),
            items,
        }
    }

    fn keybindings(&self) -> String {
        match &self.mode {
            ViewMode::Filtering => "Type to filter  Enter: apply  Esc: clear  ↑/↓: move".to_string(),
            ViewMode::Creating(_) | ViewMode::Editing(_) => "Enter: save  Esc: cancel".to_string(),
            ViewMode::Browsing => {
                let exit = if self.scope.is_some() { "Esc: back" } else { "q: quit" };
                let clear = if self.filter.is_empty() { "" } else { "Esc: clear filter  " };
                format!(
                    "j/k: move  n/p: page  /: filter  {clear}a: add  e: rename  x: delete  Enter: open  {exit}"
                )
            }
        }
    }
}

impl<S: PagedCrudSource> View for ResourceListView<S> {
    fn id(&self) -> ViewId {
        self.id
    }

    fn init(&mut self) -> Vec<Action> {
        self.fetch()
    }

    fn handle_key(&mut self, key: Key) -> Vec<Action> {
        match self.mode {
            ViewMode::Browsing => self.handle_browsing(key),
            ViewMode::Filtering => self.handle_filtering(key),
            ViewMode::Creating(_) | ViewMode::Editing(_) => self.handle_draft(key),
        }
    }

    fn handle_response(&mut self, response: WorkerResponse) -> Vec<Action> {
        match response {
            WorkerResponse::PageLoaded {
                generation, result, ..
            } => self.apply_page(generation, result),
            WorkerResponse::Mutated {
                op,
                title,
                binding,
                result,
                ..
            } => self.apply_mutation(op, &title, binding, result),
            other => {
                tracing::warn!(view = %self.id, response = ?other, "unexpected response for list view");
                vec![]
            }
        }
    }

    fn on_focus(&mut self) {
        tracing::debug!(view = %self.id, "focused");
    }

    fn on_blur(&mut self) {
        if self.mode != ViewMode::Browsing {
            tracing::debug!(view = %self.id, mode = ?self.mode.kind(), "leaving mode on blur");
        }
        self.mode = ViewMode::Browsing;
    }

    fn set_context(&mut self, context: Option<NavigationContext>) -> Result<()> {
        let noun = self.kind.noun();
        let Some(context) = context else {
            return if self.source.is_some() {
                Ok(())
            } else {
                Err(ReqError::invalid(format!("no parent selected for {noun}s")))
            };
        };

        let Some(scope) = &self.scope else {
            return Err(ReqError::invalid(format!(
                "{} list does not take a parent",
                self.kind.label()
            )));
        };
        if context.kind != scope.accepts {
            return Err(ReqError::invalid(format!(
                "cannot show {noun}s of a {}",
                context.kind.noun()
            )));
        }

        if self.parent.as_ref().is_some_and(|p| p.id == context.item.id) {
            self.parent = Some(context.item);
            return Ok(());
        }

        let source = (scope.bind)(&context.item);
        self.rebind(source);
        tracing::debug!(view = %self.id, parent_id = context.item.id, "bound to new parent");
        self.parent = Some(context.item);
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    fn input_context(&self) -> InputContext {
        match self.mode {
            ViewMode::Filtering => InputContext::Filtering,
            ViewMode::Creating(_) | ViewMode::Editing(_) => InputContext::Editing,
            ViewMode::Browsing if !self.filter.is_empty() => InputContext::FilterApplied,
            ViewMode::Browsing => InputContext::Browsing,
        }
    }

    fn breadcrumb(&self) -> String {
        self.parent
            .as_ref()
            .map_or_else(|| self.title.to_string(), |p| p.title.clone())
    }

    fn viewmodel(&self) -> UIViewModel {
        let mut status = self.page.indicator();
        if self.loading {
            status.push_str("  loading...");
        }

        UIViewModel {
            header: HeaderInfo {
                title: format!(" {} ({}) ", self.title, self.page.total_items),
                breadcrumb: String::new(),
            },
            banner: None,
            input_bar: self.input_bar(),
            body: self.body(),
            footer: FooterInfo {
                keybindings: self.keybindings(),
                status,
            },
        }
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            loaded: self.loaded,
            mode: self.mode.kind(),
            selected_index: self.selected_index,
            filter_active: !self.filter.is_empty(),
            has_draft: self.mode.draft().is_some(),
            page: Some(self.page),
            item_count: self.items.len(),
            titles: self.visible_items().map(|item| item.title.clone()).collect(),
        }
    }
}

/// Turns sorted-or-not match indices into `(start, end)` runs.
fn coalesce(mut indices: Vec<usize>) -> Vec<(usize, usize)> {
    indices.sort_unstable();
    indices.dedup();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
