//! One user's generate/preview/download lifecycle.

use std::sync::Arc;

use quickbill_invoicing::{Invoice, InvoiceBuilder, OrderInput};

use crate::error::{RenderError, RenderResult};
use crate::job::{RenderJob, RenderStatus};
use crate::pdf::RenderTarget;
use crate::renderer::DocumentRenderer;

/// Where a [`GenerationSession`] is in its lifecycle.
///
/// `Idle → Building → Built → Rendering → Ready`, with `Failed` reachable
/// from building or rendering. `reset` returns to `Idle` from anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Building,
    Built,
    Rendering,
    Ready,
    Failed(String),
}

/// A finished download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Drives build and render for a single editing session.
///
/// At most one render is in flight. Calling [`generate`](Self::generate)
/// again cancels the previous render and starts over with a freshly built
/// invoice; the superseded output is never exposed.
pub struct GenerationSession {
    builder: InvoiceBuilder,
    renderer: DocumentRenderer,
    target: Arc<dyn RenderTarget>,
    state: SessionState,
    invoice: Option<Arc<Invoice>>,
    job: Option<RenderJob>,
    artifact: Option<Artifact>,
}

impl GenerationSession {
    pub fn new(
        builder: InvoiceBuilder,
        renderer: DocumentRenderer,
        target: Arc<dyn RenderTarget>,
    ) -> Self {
        Self {
            builder,
            renderer,
            target,
            state: SessionState::Idle,
            invoice: None,
            job: None,
            artifact: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The invoice currently being rendered or ready, if any.
    pub fn invoice(&self) -> Option<&Arc<Invoice>> {
        self.invoice.as_ref()
    }

    /// The finished file. Only available in [`SessionState::Ready`].
    pub fn artifact(&self) -> Option<&Artifact> {
        match self.state {
            SessionState::Ready => self.artifact.as_ref(),
            _ => None,
        }
    }

    /// Build a new invoice from `order` and start rendering it.
    pub fn generate(&mut self, order: &OrderInput) -> RenderResult<Arc<Invoice>> {
        if let Some(job) = self.job.take() {
            job.cancel();
            tracing::info!("previous render superseded");
        }
        self.artifact = None;
        self.invoice = None;
        self.state = SessionState::Building;

        let invoice = match self.builder.build_checked(order) {
            Ok(invoice) => Arc::new(invoice),
            Err(err) => {
                tracing::warn!(error = %err, "invoice build rejected");
                self.state = SessionState::Failed(err.to_string());
                return Err(RenderError::from(err));
            }
        };
        self.invoice = Some(invoice.clone());
        self.state = SessionState::Built;

        self.start_render(&invoice)?;
        Ok(invoice)
    }

    /// Advance a running render without blocking.
    pub fn poll(&mut self) -> &SessionState {
        let finished = match &self.job {
            Some(job) if self.state == SessionState::Rendering => {
                job.status() != RenderStatus::Pending
            }
            _ => false,
        };
        if finished {
            if let Some(job) = self.job.take() {
                let outcome = job
                    .try_take()
                    .unwrap_or_else(|| Err(RenderError::Worker("result already taken".to_string())));
                self.settle(outcome);
            }
        }
        &self.state
    }

    /// Block until the running render, if any, settles.
    pub fn wait(&mut self) -> &SessionState {
        if self.state == SessionState::Rendering {
            if let Some(job) = self.job.take() {
                let outcome = job.wait();
                self.settle(outcome);
            }
        }
        &self.state
    }

    /// Render the existing invoice again after a failed render.
    ///
    /// The invoice is not rebuilt, so its id stays the same. Returns `false`
    /// when there is nothing to retry.
    pub fn retry_render(&mut self) -> RenderResult<bool> {
        let invoice = match (&self.state, &self.invoice) {
            (SessionState::Failed(_), Some(invoice)) => invoice.clone(),
            _ => return Ok(false),
        };
        tracing::info!(invoice_id = %invoice.id(), "retrying render");
        self.start_render(&invoice)?;
        Ok(true)
    }

    /// Drop everything and return to `Idle`.
    pub fn reset(&mut self) {
        if let Some(job) = self.job.take() {
            job.cancel();
        }
        self.invoice = None;
        self.artifact = None;
        self.state = SessionState::Idle;
        tracing::debug!("generation session reset");
    }

    fn start_render(&mut self, invoice: &Invoice) -> RenderResult<()> {
        let tree = self.renderer.render(invoice);
        match RenderJob::spawn(self.target.clone(), tree) {
            Ok(job) => {
                self.job = Some(job);
                self.state = SessionState::Rendering;
                Ok(())
            }
            Err(err) => {
                self.state = SessionState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    fn settle(&mut self, outcome: RenderResult<Vec<u8>>) {
        match (outcome, &self.invoice) {
            (Ok(bytes), Some(invoice)) => {
                tracing::info!(
                    invoice_id = %invoice.id(),
                    bytes = bytes.len(),
                    "invoice ready"
                );
                self.artifact = Some(Artifact {
                    file_name: invoice.file_name(),
                    bytes,
                });
                self.state = SessionState::Ready;
            }
            (Ok(_), None) => {
                self.state = SessionState::Failed("render finished without an invoice".to_string());
            }
            (Err(err), _) => {
                self.artifact = None;
                self.state = SessionState::Failed(err.to_string());
            }
        }
    }
}

impl core::fmt::Debug for GenerationSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GenerationSession")
            .field("state", &self.state)
            .field("invoice", &self.invoice.as_ref().map(|i| i.id().to_string()))
            .finish_non_exhaustive()
    }
}
