//! Caller-side driver: owns the current generation and pipelines transitions
//! through a [`Dispatcher`] without ever blocking its tick.
//!
//! Per run the driver moves `Idle -> Requested -> Idle`. A delivery is adopted
//! only if its id matches the request the driver is still interested in;
//! anything else is dropped without touching state. At most one request is
//! outstanding from `tick`, so slow workers never build a queue.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, trace};

use crate::automaton::dispatch::{classify, Dispatcher, Freshness, RequestId, TransitionResult};
use crate::automaton::grid::{Extents, Generation};
use crate::automaton::seed::{self, SeedConfig};
use crate::config::SimulationConfig;
use crate::error::EngineError;

/// Whether the driver is waiting on a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Requested(RequestId),
}

/// What happened during one [`Simulation::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Request whose generation became current.
    pub adopted: Option<RequestId>,
    /// Deliveries dropped as stale.
    pub stale: usize,
    /// Failure of the current request. The next tick resubmits.
    pub fault: Option<EngineError>,
    /// The current generation was extinct and has been replaced.
    pub reseeded: bool,
    /// Request issued at the end of the tick.
    pub submitted: Option<RequestId>,
}

pub struct Simulation {
    extents: Extents,
    seed: SeedConfig,
    rng: StdRng,
    dispatcher: Dispatcher,
    current: Generation,
    state: RequestState,
    generations_adopted: u64,
}

impl Simulation {
    /// Start a run with a randomly seeded generation.
    pub fn new(config: &SimulationConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = match config.seed.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let current = seed::random(config.extents, &config.seed, &mut rng);
        let dispatcher = Dispatcher::new(config.rules, config.dispatch)?;
        Self::assemble(config, rng, dispatcher, current)
    }

    /// Start a run from a given generation and dispatcher.
    pub fn with_parts(
        config: &SimulationConfig,
        dispatcher: Dispatcher,
        generation: Generation,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let rng = match config.seed.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::assemble(config, rng, dispatcher, generation)
    }

    fn assemble(
        config: &SimulationConfig,
        rng: StdRng,
        dispatcher: Dispatcher,
        current: Generation,
    ) -> Result<Self, EngineError> {
        current.validate(config.extents)?;
        Ok(Simulation {
            extents: config.extents,
            seed: config.seed,
            rng,
            dispatcher,
            current,
            state: RequestState::Idle,
            generations_adopted: 0,
        })
    }

    pub fn generation(&self) -> &Generation {
        &self.current
    }

    pub fn extents(&self) -> Extents {
        self.extents
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Generations adopted since the run started (reseeds do not reset it).
    pub fn generations_adopted(&self) -> u64 {
        self.generations_adopted
    }

    /// The request whose result the driver will accept.
    pub fn interest(&self) -> Option<RequestId> {
        match self.state {
            RequestState::Idle => None,
            RequestState::Requested(id) => Some(id),
        }
    }

    /// Submit the current generation now, superseding any outstanding request.
    pub fn request_transition(&mut self) -> Result<RequestId, EngineError> {
        let id = self.dispatcher.submit(self.current.clone(), self.extents)?;
        self.state = RequestState::Requested(id);
        Ok(id)
    }

    /// Apply one delivery.
    ///
    /// A fresh response becomes the current generation. A fresh fault clears
    /// the interest and is returned as the error. Stale deliveries of either
    /// kind change nothing.
    pub fn accept(&mut self, result: TransitionResult) -> Result<Freshness, EngineError> {
        match result {
            Ok(response) => match classify(response.request_id, self.interest()) {
                Freshness::Fresh => {
                    self.current = response.generation;
                    self.state = RequestState::Idle;
                    self.generations_adopted += 1;
                    Ok(Freshness::Fresh)
                }
                Freshness::Stale => {
                    trace!(request_id = %response.request_id, "stale result dropped");
                    Ok(Freshness::Stale)
                }
            },
            Err(err) => match err.request_id() {
                Some(id) if classify(id, self.interest()) == Freshness::Fresh => {
                    self.state = RequestState::Idle;
                    Err(err)
                }
                _ => {
                    trace!(error = %err, "stale failure dropped");
                    Ok(Freshness::Stale)
                }
            },
        }
    }

    /// One non-blocking step of the caller loop.
    ///
    /// Drains ready results, then reseeds an extinct generation or, if idle,
    /// submits the current one.
    pub fn tick(&mut self) -> Result<TickReport, EngineError> {
        let mut report = TickReport::default();

        while let Some(result) = self.dispatcher.poll() {
            let delivered = match &result {
                Ok(response) => Some(response.request_id),
                Err(err) => err.request_id(),
            };
            match self.accept(result) {
                Ok(Freshness::Fresh) => report.adopted = delivered,
                Ok(Freshness::Stale) => report.stale += 1,
                Err(err) => report.fault = Some(err),
            }
        }

        if report.fault.is_some() {
            return Ok(report);
        }

        if self.current.is_extinct() {
            self.reseed();
            report.reseeded = true;
        } else if self.state == RequestState::Idle {
            report.submitted = Some(self.request_transition()?);
        }

        Ok(report)
    }

    /// Block until the current request is adopted. Returns false on timeout
    /// or when nothing is outstanding.
    pub fn wait_for_current(&mut self, timeout: Duration) -> Result<bool, EngineError> {
        let deadline = Instant::now() + timeout;
        while self.state != RequestState::Idle {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(false);
            }
            match self.dispatcher.wait(remaining)? {
                Some(result) => {
                    if self.accept(result)? == Freshness::Fresh {
                        return Ok(true);
                    }
                }
                None => return Ok(false),
            }
        }
        Ok(false)
    }

    /// Blocking full step (request + wait).
    pub fn step_blocking(&mut self, timeout: Duration) -> Result<bool, EngineError> {
        self.request_transition()?;
        self.wait_for_current(timeout)
    }

    /// Replace the current generation with one supplied by the caller.
    /// In-flight results become stale.
    pub fn replace_generation(&mut self, generation: Generation) -> Result<(), EngineError> {
        generation.validate(self.extents)?;
        self.state = RequestState::Idle;
        self.current = generation;
        Ok(())
    }

    /// External reset: forget any outstanding request and reseed.
    pub fn reset(&mut self) {
        self.reseed();
    }

    /// Replace the current generation. In-flight results become stale.
    fn reseed(&mut self) {
        self.state = RequestState::Idle;
        self.current = seed::random(self.extents, &self.seed, &mut self.rng);
        info!(alive = self.current.alive_count(), "reseeded");
    }
}
