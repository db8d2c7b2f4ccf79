//! Background worker threads.
//!
//! The UI thread never blocks on storage or the network. It posts
//! [`WorkerMessage`]s to a [`WorkerPool`]; each worker thread takes the next
//! message off a shared queue, runs it, and sends the [`WorkerResponse`] back
//! over the channel the event loop drains between keypresses.

use crate::domain::error::{ReqError, Result};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::num::NonZeroUsize;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

/// Fixed-size pool of worker threads sharing one job queue.
///
/// Dropping the pool closes the queue; idle workers exit, busy ones finish
/// their current job first. Threads are not joined, so a slow HTTP request
/// never holds up quitting.
#[derive(Debug)]
pub struct WorkerPool {
    jobs: Sender<WorkerMessage>,
    size: usize,
}

impl WorkerPool {
    /// Spawns `threads` workers that report to `responses`.
    ///
    /// # Errors
    ///
    /// [`ReqError::Io`] if the OS refuses to spawn a thread.
    pub fn spawn(threads: NonZeroUsize, responses: Sender<WorkerResponse>) -> Result<Self> {
        let (jobs, queue) = mpsc::channel::<WorkerMessage>();
        let queue = Arc::new(Mutex::new(queue));

        for index in 0..threads.get() {
            let queue = Arc::clone(&queue);
            let responses = responses.clone();
            thread::Builder::new()
                .name(format!("reqtui-worker-{index}"))
                .spawn(move || worker_loop(index, &queue, &responses))?;
        }

        tracing::debug!(threads = threads.get(), "worker pool started");
        Ok(Self {
            jobs,
            size: threads.get(),
        })
    }

    /// Queues a message for the next free worker.
    ///
    /// # Errors
    ///
    /// [`ReqError::Worker`] if every worker has exited.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        let label = message.label;
        self.jobs
            .send(message)
            .map_err(|_| ReqError::Worker(format!("no worker available for {label}")))?;
        tracing::debug!(label, "posted to worker");
        Ok(())
    }

    /// Number of worker threads.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }
}

fn worker_loop(index: usize, queue: &Mutex<Receiver<WorkerMessage>>, responses: &Sender<WorkerResponse>) {
    loop {
        let next = match queue.lock() {
            Ok(receiver) => receiver.recv(),
            Err(_) => {
                tracing::error!(worker = index, "job queue lock poisoned");
                return;
            }
        };

        let Ok(message) = next else {
            tracing::debug!(worker = index, "job queue closed, worker exiting");
            return;
        };

        let response = message.run();
        if responses.send(response).is_err() {
            tracing::debug!(worker = index, "event loop gone, worker exiting");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::context::ViewId;
    use crate::worker::Mutation;
    use std::time::Duration;

    #[test]
    fn runs_posted_jobs_and_returns_responses() {
        let (tx, rx) = mpsc::channel();
        let pool = WorkerPool::spawn(NonZeroUsize::new(2).unwrap(), tx).unwrap();
        assert_eq!(pool.size(), 2);

        for _ in 0..3 {
            pool.post(WorkerMessage::new("noop", || WorkerResponse::Mutated {
                view: ViewId::Collections,
                op: Mutation::Create,
                title: "t".to_string(),
                binding: 0,
                result: Ok(()),
            }))
            .unwrap();
        }

        for _ in 0..3 {
            let response = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_eq!(response.view(), ViewId::Collections);
        }
    }

    #[test]
    fn workers_exit_when_the_receiver_is_gone() {
        let (tx, rx) = mpsc::channel();
        let pool = WorkerPool::spawn(NonZeroUsize::new(1).unwrap(), tx).unwrap();
        drop(rx);

        pool.post(WorkerMessage::new("first", || WorkerResponse::Mutated {
            view: ViewId::Collections,
            op: Mutation::Delete,
            title: String::new(),
            binding: 0,
            result: Ok(()),
        }))
        .unwrap();

        // The lone worker exits after failing to deliver, so the queue closes.
        let mut rejected = false;
        for _ in 0..200 {
            thread::sleep(Duration::from_millis(10));
            let posted = pool.post(WorkerMessage::new("later", || WorkerResponse::Mutated {
                view: ViewId::Collections,
                op: Mutation::Delete,
                title: String::new(),
                binding: 0,
                result: Ok(()),
            }));
            if posted.is_err() {
                rejected = true;
                break;
            }
        }
        assert!(rejected);
    }
}
