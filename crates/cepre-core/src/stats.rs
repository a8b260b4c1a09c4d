// ── Statistics refresh controller ──
//
// Owns the lifecycle of the statistics fetch: Idle → Loading →
// Success/Error, observable through a watch channel. A failed fetch
// keeps the previous snapshot in place so the host can render stale
// data behind an error banner.
//
// refresh() is re-entrant. Each call takes a new generation; a
// completion whose generation is no longer current is discarded, so an
// older response can never overwrite a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;
use tokio::sync::watch;
use tracing::{debug, warn};

use cepre_api::{ApiClient, EnrollmentStats};

use crate::error::CoreError;

// ── State ───────────────────────────────────────────────────────────

/// Fetch lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Observable statistics state. One instance per dashboard session,
/// mutated only by its controller.
#[derive(Debug, Clone)]
pub struct StatsState {
    pub phase: StatsPhase,
    /// Latest successfully fetched snapshot. Retained across errors.
    pub snapshot: Option<Arc<EnrollmentStats>>,
    pub error: Option<String>,
    /// Local wall-clock time of the last successful fetch (HH:MM:SS).
    pub last_updated: Option<String>,
}

impl StatsState {
    fn initial() -> Self {
        Self {
            phase: StatsPhase::Idle,
            snapshot: None,
            error: None,
            last_updated: None,
        }
    }
}

/// Which statistics feed this controller refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dataset {
    #[default]
    Estudiantes,
    Vacantes,
}

// ── Controller ──────────────────────────────────────────────────────

/// Statistics refresh controller.
///
/// Cheaply cloneable. The host triggers the first `refresh()` at
/// startup; there is no automatic polling and no retry -- failures are
/// surfaced once and wait for an explicit user-triggered refresh.
#[derive(Clone)]
pub struct StatsController {
    inner: Arc<StatsInner>,
}

struct StatsInner {
    api: ApiClient,
    dataset: Dataset,
    state: watch::Sender<StatsState>,
    generation: AtomicU64,
}

impl StatsController {
    pub fn new(api: ApiClient, dataset: Dataset) -> Self {
        let (state, _) = watch::channel(StatsState::initial());
        Self {
            inner: Arc::new(StatsInner {
                api,
                dataset,
                state,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<StatsState> {
        self.inner.state.subscribe()
    }

    /// A clone of the current state.
    pub fn state(&self) -> StatsState {
        self.inner.state.borrow().clone()
    }

    /// Fetch a fresh snapshot.
    ///
    /// Callable any time, including while a fetch is in flight: the new
    /// call supersedes the old one, and the superseded completion is
    /// dropped when it eventually resolves. No request is cancelled on
    /// the wire; a hung request simply never publishes.
    pub async fn refresh(&self) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.inner.state.send_modify(|s| {
            s.phase = StatsPhase::Loading;
            s.error = None;
        });

        let result = match self.inner.dataset {
            Dataset::Estudiantes => self.inner.api.student_statistics().await,
            Dataset::Vacantes => self.inner.api.vacancy_statistics().await,
        };

        if self.inner.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding superseded statistics response");
            return;
        }

        match result {
            Ok(stats) => {
                debug!(total = stats.total, "statistics refresh complete");
                self.inner.state.send_modify(|s| {
                    s.snapshot = Some(Arc::new(stats));
                    s.last_updated = Some(Local::now().format("%H:%M:%S").to_string());
                    s.error = None;
                    s.phase = StatsPhase::Success;
                });
            }
            Err(err) => {
                let err = CoreError::from(err);
                warn!(error = %err, "statistics refresh failed");
                self.inner.state.send_modify(|s| {
                    // snapshot intentionally retained
                    s.error = Some(err.user_message());
                    s.phase = StatsPhase::Error;
                });
            }
        }
    }
}
