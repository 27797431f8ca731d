//! Bounded work queue feeding a fixed pool of worker threads
//!
//! Requests travel over a `sync_channel`, so `submit` blocks once the queue
//! is full. Each worker pulls one request, runs it to completion, and pushes
//! exactly one response. Responses arrive in completion order; callers match
//! them to requests by [`JobId`].

use crate::dispatch::cancel::CancellationToken;
use crate::dispatch::context::JobContext;
use crate::dispatch::job::{Job, JobId, JobRequest, JobResponse};
use crate::io::error::{Result, invalid_parameter, pool_error};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Instant;

/// Handle returned for every submitted job
#[derive(Debug, Clone)]
pub struct JobTicket {
    /// Identifier the response will carry
    pub id: JobId,
    /// Cancels the job if it has not finished yet
    pub cancel: CancellationToken,
}

/// Fixed-size pool of worker threads with a bounded request queue
pub struct WorkerPool {
    requests: Option<SyncSender<JobRequest>>,
    responses: Receiver<JobResponse>,
    workers: Vec<JoinHandle<()>>,
    next_id: u64,
    in_flight: usize,
}

impl WorkerPool {
    /// Spawn `workers` threads sharing a queue of `queue_capacity` requests
    ///
    /// # Errors
    ///
    /// Returns an error if `workers` or `queue_capacity` is zero, or a
    /// thread cannot be spawned
    pub fn new(workers: usize, queue_capacity: usize) -> Result<Self> {
        if workers == 0 {
            return Err(invalid_parameter(
                "workers",
                &workers,
                &"at least one worker is required",
            ));
        }
        if queue_capacity == 0 {
            return Err(invalid_parameter(
                "queue_capacity",
                &queue_capacity,
                &"queue must hold at least one request",
            ));
        }

        let (request_tx, request_rx) = mpsc::sync_channel::<JobRequest>(queue_capacity);
        let (response_tx, response_rx) = mpsc::channel::<JobResponse>();
        let request_rx = Arc::new(Mutex::new(request_rx));

        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            let queue = Arc::clone(&request_rx);
            let responses = response_tx.clone();
            let spawned = std::thread::Builder::new()
                .name(format!("texsynth-worker-{index}"))
                .spawn(move || worker_loop(index, &queue, &responses));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    // Closing the queue lets the workers already running exit
                    drop(request_tx);
                    join_all(handles);
                    return Err(pool_error(&format!("failed to spawn worker {index}: {e}")));
                }
            }
        }

        tracing::debug!(workers, queue_capacity, "worker pool started");

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            workers: handles,
            next_id: 0,
            in_flight: 0,
        })
    }

    /// Number of worker threads
    pub const fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Jobs submitted whose responses have not been received yet
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Queue `job`, blocking while the queue is full
    ///
    /// Ownership of any source buffer moves into the queue.
    ///
    /// # Errors
    ///
    /// Returns an error if every worker has exited
    pub fn submit(&mut self, job: Job) -> Result<JobTicket> {
        let sender = self
            .requests
            .as_ref()
            .ok_or_else(|| pool_error(&"pool is shut down"))?;

        self.next_id += 1;
        let id = JobId::new(self.next_id);
        let cancel = CancellationToken::new();
        let kind = job.kind();

        sender
            .send(JobRequest {
                id,
                job,
                cancel: cancel.clone(),
            })
            .map_err(|e| pool_error(&format!("all workers have exited: {e}")))?;

        self.in_flight += 1;
        tracing::debug!(job = id.get(), %kind, "job queued");
        Ok(JobTicket { id, cancel })
    }

    /// Block until the next response arrives
    ///
    /// Returns `None` when nothing is in flight or every worker has exited.
    pub fn recv(&mut self) -> Option<JobResponse> {
        if self.in_flight == 0 {
            return None;
        }
        let response = self.responses.recv().ok()?;
        self.in_flight -= 1;
        Some(response)
    }

    /// Take a response if one is ready, without blocking
    pub fn try_recv(&mut self) -> Option<JobResponse> {
        if self.in_flight == 0 {
            return None;
        }
        let response = self.responses.try_recv().ok()?;
        self.in_flight -= 1;
        Some(response)
    }

    /// Stop accepting jobs, let queued jobs finish, and join every worker
    ///
    /// Responses still unread are discarded.
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        drop(self.requests.take());
        join_all(self.workers.drain(..));
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.close();
    }
}

fn join_all(handles: impl IntoIterator<Item = JoinHandle<()>>) {
    for handle in handles {
        if handle.join().is_err() {
            tracing::warn!("worker thread panicked");
        }
    }
}

fn worker_loop(
    index: usize,
    queue: &Mutex<Receiver<JobRequest>>,
    responses: &mpsc::Sender<JobResponse>,
) {
    loop {
        // The lock is held only while waiting for the next request
        let next = {
            let guard = match queue.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.recv()
        };
        let Ok(request) = next else {
            break;
        };

        let JobRequest { id, job, cancel } = request;
        let kind = job.kind();
        let ctx = JobContext::new(id, cancel);
        let started = Instant::now();
        let result = job.execute(&ctx);
        let elapsed = started.elapsed();

        match &result {
            Ok(_) => tracing::info!(worker = index, job = id.get(), %kind, ?elapsed, "job finished"),
            Err(error) => tracing::warn!(worker = index, job = id.get(), %kind, %error, "job failed"),
        }

        let response = JobResponse {
            id,
            kind,
            elapsed,
            result,
        };
        if responses.send(response).is_err() {
            break;
        }
    }
    tracing::debug!(worker = index, "worker stopped");
}
