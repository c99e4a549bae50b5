//! Background rendering.
//!
//! A [`RenderJob`] owns one worker thread that runs
//! [`RenderTarget::render_to_bytes`] once. The caller keeps the handle and
//! may poll, wait or cancel. There is no retry: a failed job stays failed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use crate::error::{RenderError, RenderResult};
use crate::pdf::RenderTarget;
use crate::tree::DocumentTree;

/// Observable state of a render job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    /// Still running on the worker thread
    Pending,
    /// Bytes are available
    Complete,
    /// The target reported an error
    Failed(String),
    /// Cancelled before or after completion; output discarded
    Cancelled,
}

impl RenderStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RenderStatus::Pending)
    }
}

#[derive(Debug)]
struct Slot {
    status: RenderStatus,
    outcome: Option<RenderResult<Vec<u8>>>,
}

/// Handle to one in-flight render.
#[derive(Debug)]
pub struct RenderJob {
    cancelled: Arc<AtomicBool>,
    slot: Arc<Mutex<Slot>>,
    join: Option<thread::JoinHandle<()>>,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RenderJob {
    /// Start rendering `tree` on a new thread.
    pub fn spawn(target: Arc<dyn RenderTarget>, tree: DocumentTree) -> RenderResult<Self> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let slot = Arc::new(Mutex::new(Slot {
            status: RenderStatus::Pending,
            outcome: None,
        }));

        let worker_cancelled = cancelled.clone();
        let worker_slot = slot.clone();
        let title = tree.title.clone();
        let join = thread::Builder::new()
            .name("render-job".to_string())
            .spawn(move || {
                let result = target.render_to_bytes(&tree);
                let mut slot = lock(&worker_slot);

                if worker_cancelled.load(Ordering::SeqCst) {
                    tracing::debug!(title = %tree.title, "render finished after cancel; output dropped");
                    slot.status = RenderStatus::Cancelled;
                    slot.outcome = None;
                    return;
                }
                match &result {
                    Ok(bytes) => {
                        tracing::debug!(title = %tree.title, bytes = bytes.len(), "render complete");
                        slot.status = RenderStatus::Complete;
                    }
                    Err(err) => {
                        tracing::warn!(title = %tree.title, error = %err, "render failed");
                        slot.status = RenderStatus::Failed(err.to_string());
                    }
                }
                slot.outcome = Some(result);
            })
            .map_err(|err| RenderError::Worker(err.to_string()))?;

        tracing::debug!(title = %title, "render job spawned");

        Ok(Self {
            cancelled,
            slot,
            join: Some(join),
        })
    }

    pub fn status(&self) -> RenderStatus {
        if self.cancelled.load(Ordering::SeqCst) {
            return RenderStatus::Cancelled;
        }
        lock(&self.slot).status.clone()
    }

    /// Stop caring about the result. Any bytes already produced are dropped
    /// and the job reports [`RenderStatus::Cancelled`] from now on.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        let mut slot = lock(&self.slot);
        slot.status = RenderStatus::Cancelled;
        slot.outcome = None;
    }

    /// Non-blocking: the terminal result, handed out at most once.
    pub fn try_take(&self) -> Option<RenderResult<Vec<u8>>> {
        if self.cancelled.load(Ordering::SeqCst) {
            return Some(Err(RenderError::Cancelled));
        }
        lock(&self.slot).outcome.take()
    }

    /// Block until the worker finishes and return its output.
    pub fn wait(mut self) -> RenderResult<Vec<u8>> {
        if let Some(join) = self.join.take() {
            join.join()
                .map_err(|_| RenderError::Worker("render thread panicked".to_string()))?;
        }
        if self.cancelled.load(Ordering::SeqCst) {
            return Err(RenderError::Cancelled);
        }
        lock(&self.slot)
            .outcome
            .take()
            .unwrap_or_else(|| Err(RenderError::Worker("no result reported".to_string())))
    }
}
