//! Per-job execution context

use crate::dispatch::cancel::CancellationToken;
use crate::dispatch::job::JobId;
use crate::io::error::{Result, SynthError};

/// State owned by exactly one running job
///
/// Replaces any worker-level shared state: everything a job needs besides
/// its request travels through this value.
#[derive(Debug, Clone)]
pub struct JobContext {
    id: JobId,
    cancel: CancellationToken,
}

impl JobContext {
    /// Context for job `id` observing `cancel`
    pub const fn new(id: JobId, cancel: CancellationToken) -> Self {
        Self { id, cancel }
    }

    /// Context that can never be cancelled, for direct synchronous calls
    pub fn detached(id: JobId) -> Self {
        Self::new(id, CancellationToken::new())
    }

    /// Identifier of the job
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Cancellation token of the job
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Fail with [`SynthError::Cancelled`] if cancellation was requested
    ///
    /// # Errors
    ///
    /// Returns an error once the job's token has been cancelled
    pub fn checkpoint(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            tracing::debug!(job = self.id.get(), "cancellation observed");
            return Err(SynthError::Cancelled { job: self.id.get() });
        }
        Ok(())
    }
}
