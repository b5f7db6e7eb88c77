//! Timeout-bounded refresh cache
//!
//! Each named data source gets one [`RefreshCache`]: a producer is invoked on
//! a fixed interval and readers always get the last published snapshot, even
//! while a refresh is in flight or wedged. A refresh that outlives its budget
//! abandons the producer task and publishes an error sentinel instead; under
//! periodic operation the deadman switch turns that timeout into a process
//! abort, because a crash-restart is cheaper than serving stale data forever.
//!
//! # Snapshot states
//!
//! | Slot value | Served as | Meaning |
//! |------------|-----------|---------|
//! | `None` | `{"unknown": "!?"}` | No successful update yet |
//! | payload bytes | payload bytes | Last produced data |
//! | error sentinel | `{"err": "..."}` | Last update failed |

pub mod command;

pub use command::{run_command, CommandSpec};

use crate::error::{SensordError, SensordResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, warn};

/// Value served before the first successful update.
pub const UNKNOWN_VALUE: &str = r#"{"unknown": "!?"}"#;

/// Render an error as the JSON sentinel payload.
///
/// The template matches the wire format monitoring clients scrape; error
/// messages are crate-controlled and contain no quotes to escape.
pub fn format_error(err: &SensordError) -> Bytes {
    Bytes::from(format!(r#"{{"err": "{}"}}"#, err))
}

/// Produces a fresh snapshot payload for a cache.
///
/// Implementations take no input, may block for arbitrarily long, and may be
/// abandoned mid-flight by a cache that already gave up on them. A payload of
/// `None` is a valid success and is stored verbatim.
#[async_trait]
pub trait Producer: Send + Sync + 'static {
    async fn produce(&self) -> SensordResult<Option<Bytes>>;
}

/// Terminal action taken when a deadman-armed update times out.
type DeadmanAction = Box<dyn Fn() + Send + Sync>;

/// A refresh cache for one named data source.
///
/// The snapshot slot is a single swappable refcounted buffer: readers clone
/// the `Bytes` handle and can never observe a partial write. The lock is held
/// only for the pointer clone or swap.
pub struct RefreshCache {
    name: String,
    producer: Arc<dyn Producer>,
    snapshot: RwLock<Option<Bytes>>,
    interval: Duration,
    deadman: DeadmanAction,
}

impl RefreshCache {
    /// Create a cache. The producer is not run; the snapshot starts empty
    /// and reads as the unknown sentinel until [`start`](Self::start) or
    /// [`update_with_timeout`](Self::update_with_timeout) publishes one.
    ///
    /// `interval` is both the refresh period and the per-update budget.
    pub fn new(name: impl Into<String>, producer: Arc<dyn Producer>, interval: Duration) -> Self {
        Self::with_deadman_action(name, producer, interval, Box::new(abort_process))
    }

    /// Create a cache with a custom deadman action.
    ///
    /// This is the one policy point where a timed-out background refresh
    /// becomes fatal; deployments that prefer restarting a single cache over
    /// crashing the process substitute their action here.
    pub fn with_deadman_action(
        name: impl Into<String>,
        producer: Arc<dyn Producer>,
        interval: Duration,
        deadman: DeadmanAction,
    ) -> Self {
        Self {
            name: name.into(),
            producer,
            snapshot: RwLock::new(None),
            interval,
            deadman,
        }
    }

    /// Name of the data source this cache fronts.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Refresh period and per-update budget.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Return the current snapshot. Never blocks on I/O, never fails.
    pub fn read(&self) -> Bytes {
        let guard = self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        match &*guard {
            Some(payload) => payload.clone(),
            None => Bytes::from_static(UNKNOWN_VALUE.as_bytes()),
        }
    }

    fn publish(&self, payload: Option<Bytes>) {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = payload;
    }

    /// Run one producer invocation bounded by the cache interval.
    ///
    /// The producer runs as an independent task and is never canceled; if the
    /// budget elapses first the task is abandoned (one leaked task per
    /// timeout, bounded by the deadman policy) and its eventual result is
    /// discarded. Exactly one race outcome publishes the snapshot.
    ///
    /// With `deadman` set, a timeout triggers the cache's deadman action
    /// before returning. Pass `false` for the bootstrap update, where a
    /// timeout must surface as an ordinary error.
    pub async fn update_with_timeout(&self, deadman: bool) -> SensordResult<()> {
        let producer = Arc::clone(&self.producer);
        let work = tokio::spawn(async move { producer.produce().await });

        match tokio::time::timeout(self.interval, work).await {
            Ok(Ok(Ok(payload))) => {
                self.publish(payload);
                Ok(())
            }
            Ok(Ok(Err(err))) => {
                self.publish(Some(format_error(&err)));
                warn!(cache = %self.name, %err, "update failed");
                Err(err)
            }
            Ok(Err(join_err)) => {
                let err = SensordError::TaskFailed(join_err.to_string());
                self.publish(Some(format_error(&err)));
                warn!(cache = %self.name, %err, "producer task died");
                Err(err)
            }
            Err(_elapsed) => {
                let err = SensordError::Timeout;
                self.publish(Some(format_error(&err)));
                warn!(cache = %self.name, "update timed out");
                if deadman {
                    error!(cache = %self.name, "deadman switch tripped");
                    (self.deadman)();
                }
                Err(err)
            }
        }
    }

    /// Bring the cache live: one synchronous bootstrap update, then a
    /// periodic refresh loop for the life of the process.
    ///
    /// If the bootstrap update fails the cache is not started and `None` is
    /// returned, so sources that cannot run on this host drop out quietly
    /// instead of erroring on every tick. On success the loop refreshes the
    /// cache every interval with the deadman armed, ignoring update errors:
    /// they are already visible in the snapshot, and a hung producer is
    /// handled by the deadman abort.
    pub async fn start(self: Arc<Self>) -> Option<Arc<RefreshCache>> {
        if let Err(err) = self.update_with_timeout(false).await {
            warn!(cache = %self.name, %err, "bootstrap update failed, cache not started");
            return None;
        }

        let cache = Arc::clone(&self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cache.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the bootstrap update
            // already covered it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let _ = cache.update_with_timeout(true).await;
            }
        });

        Some(self)
    }
}

/// Default deadman action: crash so the supervisor restarts us.
fn abort_process() {
    error!("deadman switch enabled, aborting");
    std::process::abort();
}
