//! Non-blocking transition dispatch with request/response correlation.
//!
//! Submissions return immediately with a fresh [`RequestId`]; the transition
//! runs on a Rayon pool and its result comes back over a channel tagged with
//! that id. There is no cancellation. A caller that submits again before an
//! earlier result arrives simply ignores the earlier result on arrival (see
//! [`classify`]).
//!
//! Requests and responses move by value, so the worker never shares mutable
//! memory with the caller.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use serde::Deserialize;
use tracing::{debug, warn};

use super::grid::{Extents, Generation};
use super::stepping::{transition, Rules};
use crate::error::EngineError;

/// Token correlating a response with its submission. Monotonic per dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A generation handed to the worker.
#[derive(Clone, Debug)]
pub struct TransitionRequest {
    pub request_id: RequestId,
    pub generation: Generation,
    pub extents: Extents,
}

/// A computed generation, echoing the id of the request that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionResponse {
    pub request_id: RequestId,
    pub generation: Generation,
}

/// What the worker delivers: a response, or a `ComputationFault` carrying the
/// failed request's id.
pub type TransitionResult = Result<TransitionResponse, EngineError>;

/// Signature of the function run on the worker.
pub type StepFn = fn(&Generation, Rules) -> Result<Generation, EngineError>;

/// Whether a delivery still matches the caller's current interest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

/// Compare a delivered id against the id the caller last asked for.
/// With no interest recorded, every delivery is stale.
#[inline]
pub fn classify(delivered: RequestId, interest: Option<RequestId>) -> Freshness {
    if interest == Some(delivered) {
        Freshness::Fresh
    } else {
        Freshness::Stale
    }
}

/// Worker pool settings.
///
/// The transition's per-cell map runs inside this pool, so `worker_threads`
/// bounds both how many requests compute at once and how many threads one
/// transition spreads its cells over. With the default of 1 each transition
/// evaluates its cells sequentially on the single worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Rayon threads (0 is treated as 1).
    pub worker_threads: u8,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig { worker_threads: 1 }
    }
}

/// Runs transitions off the caller's thread and correlates their results.
pub struct Dispatcher {
    rules: Rules,
    step: StepFn,

    /// Next id to hand out.
    next_id: u64,

    /// Most recently issued id.
    latest: Option<RequestId>,

    /// Submitted computations that have not yet delivered.
    in_flight: Arc<AtomicUsize>,

    sender: Sender<TransitionResult>,
    receiver: Receiver<TransitionResult>,

    thread_pool: rayon::ThreadPool,
}

impl Dispatcher {
    /// Create a dispatcher running [`transition`] on `config.worker_threads`.
    pub fn new(rules: Rules, config: DispatchConfig) -> Result<Self, EngineError> {
        Self::with_step_fn(rules, config, transition)
    }

    /// Create a dispatcher running a custom step function.
    pub fn with_step_fn(rules: Rules, config: DispatchConfig, step: StepFn) -> Result<Self, EngineError> {
        rules.validate()?;

        let num_threads = config.worker_threads.max(1) as usize;
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("voxel-life-worker-{i}"))
            .build()
            .map_err(|e| EngineError::WorkerPool(e.to_string()))?;

        let (sender, receiver) = crossbeam_channel::unbounded();

        Ok(Dispatcher {
            rules,
            step,
            next_id: 1,
            latest: None,
            in_flight: Arc::new(AtomicUsize::new(0)),
            sender,
            receiver,
            thread_pool,
        })
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// The most recently issued request id.
    pub fn latest(&self) -> Option<RequestId> {
        self.latest
    }

    /// Number of computations submitted but not yet delivered.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate `generation` against `extents` and schedule its transition.
    ///
    /// Returns immediately. An invalid generation is rejected here, before
    /// anything is scheduled and without consuming a request id.
    pub fn submit(&mut self, generation: Generation, extents: Extents) -> Result<RequestId, EngineError> {
        generation.validate(extents)?;

        let request_id = RequestId(self.next_id);
        self.next_id += 1;
        self.latest = Some(request_id);

        debug!(%request_id, cells = generation.len(), "transition submitted");
        self.schedule(TransitionRequest {
            request_id,
            generation,
            extents,
        });
        Ok(request_id)
    }

    fn schedule(&self, request: TransitionRequest) {
        let sender = self.sender.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let rules = self.rules;
        let step = self.step;

        in_flight.fetch_add(1, Ordering::AcqRel);
        self.thread_pool.spawn(move || {
            let TransitionRequest {
                request_id,
                generation,
                ..
            } = request;

            let result = match panic::catch_unwind(AssertUnwindSafe(|| step(&generation, rules))) {
                Ok(Ok(next)) => Ok(TransitionResponse {
                    request_id,
                    generation: next,
                }),
                Ok(Err(err)) => Err(EngineError::ComputationFault {
                    request_id,
                    reason: err.to_string(),
                }),
                Err(payload) => Err(EngineError::ComputationFault {
                    request_id,
                    reason: panic_message(payload.as_ref()),
                }),
            };
            if let Err(err) = &result {
                warn!(%request_id, error = %err, "transition failed");
            }

            // Receiver gone means the dispatcher was dropped; nobody is listening.
            let _ = sender.send(result);
            in_flight.fetch_sub(1, Ordering::AcqRel);
        });
    }

    /// Take one ready result without blocking.
    pub fn poll(&self) -> Option<TransitionResult> {
        self.receiver.try_recv().ok()
    }

    /// Block up to `timeout` for the next result. `Ok(None)` on timeout.
    pub fn wait(&self, timeout: Duration) -> Result<Option<TransitionResult>, EngineError> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Ok(Some(result)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::Disconnected),
        }
    }

    /// Hand every ready result to `callback`, each exactly once.
    /// Returns how many were delivered.
    pub fn on_result(&self, mut callback: impl FnMut(TransitionResult)) -> usize {
        let mut delivered = 0;
        while let Some(result) = self.poll() {
            callback(result);
            delivered += 1;
        }
        delivered
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
