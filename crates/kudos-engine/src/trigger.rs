//! Completion-event consumer.
//!
//! Raw payloads arrive on a bounded channel. Each accepted event is
//! evaluated on a blocking worker and its result handed to the award sink.
//!
//! - Concurrency is capped by a semaphore of `workers` permits
//! - Transient collaborator failures are retried with exponential backoff
//! - Cancelling the shutdown token stops intake and drains in-flight work

use kudos_core::ErrorCode;
use kudos_core::config::TriggerConfig;
use kudos_core::model::{CompletionEvent, EventError};
use kudos_rules::RuleResult;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::award::{AwardError, AwardSink};
use crate::engine::{Engine, EngineError};

#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error(transparent)]
    MalformedEvent(#[from] EventError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Award(#[from] AwardError),

    #[error("evaluation worker failed: {0}")]
    Worker(String),

    #[error("shutdown interrupted retry")]
    Shutdown,
}

impl TriggerError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedEvent(err) => err.code(),
            Self::Engine(err) => err.code(),
            Self::Award(err) => err.code(),
            Self::Worker(_) => ErrorCode::InternalUnexpected,
            Self::Shutdown => ErrorCode::WorkerPoolClosed,
        }
    }

    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Engine(err) => err.is_transient(),
            Self::Award(err) => err.is_transient(),
            Self::MalformedEvent(_) | Self::Worker(_) | Self::Shutdown => false,
        }
    }
}

/// Counters for one [`TriggerAdapter::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TriggerStats {
    /// Payloads taken off the channel.
    pub received: u64,
    /// Events evaluated and forwarded.
    pub evaluated: u64,
    /// Events that failed for good, including those shutdown dropped before
    /// a worker took them.
    pub failed: u64,
    /// Payloads that never reached the evaluator.
    pub rejected: u64,
}

impl TriggerStats {
    fn record(&mut self, joined: Result<Result<RuleResult, TriggerError>, JoinError>) {
        match joined {
            Ok(Ok(_)) => self.evaluated += 1,
            Ok(Err(err)) => {
                self.failed += 1;
                warn!(code = %err.code(), error = %err, "completion event dropped");
            }
            Err(err) => {
                self.failed += 1;
                warn!(error = %err, "evaluation task aborted");
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
}

/// Bridges completion events to the engine and the award sink.
#[derive(Clone)]
pub struct TriggerAdapter {
    engine: Arc<Engine>,
    sink: Arc<dyn AwardSink>,
    config: TriggerConfig,
}

impl std::fmt::Debug for TriggerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerAdapter")
            .field("engine", &self.engine)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TriggerAdapter {
    #[must_use]
    pub fn new(engine: Arc<Engine>, sink: Arc<dyn AwardSink>, config: TriggerConfig) -> Self {
        Self {
            engine,
            sink,
            config,
        }
    }

    /// Bounded payload channel sized by `queue_capacity`.
    #[must_use]
    pub fn channel(&self) -> (mpsc::Sender<String>, mpsc::Receiver<String>) {
        mpsc::channel(self.config.queue_capacity.max(1))
    }

    /// Decode a raw JSON payload into an event.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MalformedEvent`] for payloads that are not
    /// JSON or lack a non-blank id.
    pub fn accept_payload(payload: &str) -> Result<CompletionEvent, TriggerError> {
        Ok(CompletionEvent::from_json(payload)?)
    }

    const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: if self.config.max_attempts == 0 {
                1
            } else {
                self.config.max_attempts
            },
            initial_backoff: self.config.initial_backoff(),
        }
    }

    /// Evaluate one event with retries and forward its result.
    ///
    /// # Errors
    ///
    /// Returns the last error once attempts are exhausted, the first
    /// permanent error, or [`TriggerError::Shutdown`] if `shutdown` fires
    /// during a backoff.
    pub async fn process(
        &self,
        event: CompletionEvent,
        shutdown: &CancellationToken,
    ) -> Result<RuleResult, TriggerError> {
        process_with_retry(
            Arc::clone(&self.engine),
            Arc::clone(&self.sink),
            event,
            self.retry_policy(),
            shutdown.clone(),
        )
        .await
    }

    /// Consume payloads until the channel closes or `shutdown` fires.
    ///
    /// Never panics on event failures; they are counted in the returned
    /// stats. In-flight evaluations always finish before this returns.
    #[instrument(skip_all, fields(workers = self.config.workers))]
    pub async fn run(
        &self,
        mut events: mpsc::Receiver<String>,
        shutdown: CancellationToken,
    ) -> TriggerStats {
        let permits = Arc::new(Semaphore::new(self.config.workers.max(1)));
        let retry = self.retry_policy();
        let mut in_flight: JoinSet<Result<RuleResult, TriggerError>> = JoinSet::new();
        let mut stats = TriggerStats::default();

        info!(
            workers = self.config.workers,
            max_attempts = retry.max_attempts,
            "trigger adapter started"
        );

        loop {
            while let Some(joined) = in_flight.try_join_next() {
                stats.record(joined);
            }

            let payload = tokio::select! {
                biased;
                () = shutdown.cancelled() => {
                    info!("shutdown requested, stopping intake");
                    break;
                }
                payload = events.recv() => match payload {
                    Some(payload) => payload,
                    None => {
                        debug!("event channel closed");
                        break;
                    }
                },
            };
            stats.received += 1;

            let event = match Self::accept_payload(&payload) {
                Ok(event) => event,
                Err(err) => {
                    stats.rejected += 1;
                    warn!(code = %err.code(), error = %err, "rejected completion payload");
                    continue;
                }
            };

            // Every worker may be busy; shutdown must not wait for a slot.
            let permit = tokio::select! {
                biased;
                () = shutdown.cancelled() => {
                    stats.failed += 1;
                    warn!(task = %event.task_id, "shutdown before dispatch, event dropped");
                    break;
                }
                permit = Arc::clone(&permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => {
                        stats.failed += 1;
                        warn!(task = %event.task_id, "worker pool closed, event dropped");
                        break;
                    }
                },
            };

            debug!(task = %event.task_id, user = %event.user_id, "dispatching evaluation");
            let engine = Arc::clone(&self.engine);
            let sink = Arc::clone(&self.sink);
            let token = shutdown.clone();
            in_flight.spawn(async move {
                let outcome = process_with_retry(engine, sink, event, retry, token).await;
                drop(permit);
                outcome
            });
        }

        if !in_flight.is_empty() {
            info!(count = in_flight.len(), "waiting for in-flight evaluations");
        }
        while let Some(joined) = in_flight.join_next().await {
            stats.record(joined);
        }

        info!(
            received = stats.received,
            evaluated = stats.evaluated,
            failed = stats.failed,
            rejected = stats.rejected,
            "trigger adapter stopped"
        );
        stats
    }
}

async fn process_with_retry(
    engine: Arc<Engine>,
    sink: Arc<dyn AwardSink>,
    event: CompletionEvent,
    retry: RetryPolicy,
    shutdown: CancellationToken,
) -> Result<RuleResult, TriggerError> {
    let mut backoff = retry.initial_backoff;
    let mut attempt = 1;

    loop {
        let outcome =
            evaluate_and_forward(Arc::clone(&engine), Arc::clone(&sink), event.clone()).await;
        match outcome {
            Ok(result) => return Ok(result),
            Err(err) if err.is_transient() && attempt < retry.max_attempts => {
                warn!(
                    task = %event.task_id,
                    attempt,
                    backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient failure, retrying"
                );
                tokio::select! {
                    () = shutdown.cancelled() => return Err(TriggerError::Shutdown),
                    () = tokio::time::sleep(backoff) => {}
                }
                backoff = backoff.saturating_mul(2);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn evaluate_and_forward(
    engine: Arc<Engine>,
    sink: Arc<dyn AwardSink>,
    event: CompletionEvent,
) -> Result<RuleResult, TriggerError> {
    tokio::task::spawn_blocking(move || -> Result<RuleResult, TriggerError> {
        let result = engine.evaluate_event(&event)?;
        sink.forward(&event, &result)?;
        Ok(result)
    })
    .await
    .map_err(|err| TriggerError::Worker(err.to_string()))?
}
