//! In-memory fixtures shared by the app layer's unit tests.

use super::actions::Action;
use super::context::ResourceItem;
use super::view::View;
use crate::domain::error::{ReqError, Result};
use crate::source::{Page, PagedCrudSource};
use crate::worker::WorkerMessage;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Source over `(id, name)` rows named `item-1`, `item-2`, ...
#[derive(Default)]
pub struct FakeSource {
    rows: Mutex<Vec<(i64, String)>>,
    next_id: AtomicI64,
    lists: AtomicUsize,
    pub fail_deletes: AtomicBool,
    pub fail_lists: AtomicBool,
}

impl FakeSource {
    pub fn with_rows(count: usize) -> Self {
        let rows: Vec<(i64, String)> = (1..=count)
            .map(|i| {
                let id = i64::try_from(i).unwrap();
                (id, format!("item-{i}"))
            })
            .collect();
        let next = i64::try_from(count).unwrap() + 1;
        Self {
            rows: Mutex::new(rows),
            next_id: AtomicI64::new(next),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Removes a row behind the view's back.
    pub fn remove(&self, id: i64) {
        self.rows.lock().unwrap().retain(|(row, _)| *row != id);
    }

    pub fn list_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }
}

impl PagedCrudSource for FakeSource {
    type Entity = (i64, String);

    fn list_page(&self, limit: usize, offset: usize) -> Result<Page<(i64, String)>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ReqError::Storage("disk unplugged".to_string()));
        }
        let rows = self.rows.lock().unwrap();
        Ok(Page {
            items: rows.iter().skip(offset).take(limit).cloned().collect(),
            total: rows.len() as u64,
        })
    }

    fn create(&self, name: &str) -> Result<(i64, String)> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = (id, name.to_string());
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    fn read(&self, id: i64) -> Result<(i64, String)> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|(row, _)| *row == id)
            .cloned()
            .ok_or(ReqError::NotFound { kind: "item", id })
    }

    fn update(&self, id: i64, name: &str) -> Result<(i64, String)> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|(row, _)| *row == id)
            .ok_or(ReqError::NotFound { kind: "item", id })?;
        row.1 = name.to_string();
        Ok(row.clone())
    }

    fn delete(&self, id: i64) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(ReqError::Storage("disk unplugged".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(row, _)| *row != id);
        if rows.len() == before {
            Err(ReqError::NotFound { kind: "item", id })
        } else {
            Ok(())
        }
    }
}

pub fn fake_item(row: &(i64, String)) -> ResourceItem {
    ResourceItem {
        id: row.0,
        title: row.1.clone(),
        subtext: format!("#{}", row.0),
    }
}

/// Splits worker jobs from the other actions without running them.
pub fn take_jobs(actions: Vec<Action>) -> (Vec<WorkerMessage>, Vec<Action>) {
    let mut jobs = Vec::new();
    let mut rest = Vec::new();
    for action in actions {
        match action {
            Action::PostToWorker(message) => jobs.push(message),
            other => rest.push(other),
        }
    }
    (jobs, rest)
}

/// Runs every worker job inline, feeding responses back into `view` until no
/// jobs remain. Returns the non-worker actions in emission order.
pub fn settle(view: &mut dyn View, actions: Vec<Action>) -> Vec<Action> {
    let mut queue: VecDeque<Action> = actions.into();
    let mut out = Vec::new();
    while let Some(action) = queue.pop_front() {
        match action {
            Action::PostToWorker(message) => {
                let response = message.run();
                queue.extend(view.handle_response(response));
            }
            other => out.push(other),
        }
    }
    out
}
