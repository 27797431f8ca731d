//! Job dispatch between an orchestrator and parallel workers

/// Cooperative cancellation tokens
pub mod cancel;
/// Per-job execution context
pub mod context;
/// Request/response contract and job execution
pub mod job;
/// Bounded worker pool
pub mod pool;

pub use cancel::CancellationToken;
pub use context::JobContext;
pub use job::{Job, JobConfig, JobId, JobKind, JobResponse};
pub use pool::{JobTicket, WorkerPool};
