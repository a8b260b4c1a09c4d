// ── Ficha download controller ──
//
// Owns the lifecycle of the on-demand ficha generation: DNI input
// normalization, validation, a single in-flight request, and a
// self-expiring status message. The phase field itself is the mutual
// exclusion: submit() refuses to run while a previous submit is still
// Submitting.
//
// The controller never opens the document itself. It publishes the
// download locator on a broadcast channel and leaves the side effect
// to the host layer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use cepre_api::{ApiClient, FichaRecord};

use crate::error::CoreError;

/// Required DNI length, digits only.
pub const DNI_LEN: usize = 8;

/// How long a status message stays visible without interaction.
pub const MESSAGE_TTL: Duration = Duration::from_millis(5000);

/// Fixed message for a client-side rejected DNI. No request is issued.
pub const VALIDATION_MESSAGE: &str = "DNI must be exactly 8 digits";

/// Message when the service answered 2xx without a usable locator.
pub const NO_DOWNLOAD_LINK: &str = "no valid download link received";

const NAME_FALLBACK: &str = "the student";
const DOWNLOAD_CHANNEL_SIZE: usize = 8;

// ── State ───────────────────────────────────────────────────────────

/// Submit lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FichaPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Observable ficha state, mutated only by its controller.
#[derive(Debug, Clone)]
pub struct FichaState {
    /// Normalized DNI input: at most 8 characters, all digits.
    pub dni: String,
    pub phase: FichaPhase,
    /// Transient status message; self-clears after [`MESSAGE_TTL`].
    pub message: Option<String>,
}

impl FichaState {
    fn initial() -> Self {
        Self {
            dni: String::new(),
            phase: FichaPhase::Idle,
            message: None,
        }
    }
}

// ── Controller ──────────────────────────────────────────────────────

/// Ficha generation controller. Cheaply cloneable; fully independent of
/// the statistics controller.
#[derive(Clone)]
pub struct FichaController {
    inner: Arc<FichaInner>,
}

struct FichaInner {
    api: ApiClient,
    state: watch::Sender<FichaState>,
    download_tx: broadcast::Sender<String>,
    /// Handle of the pending auto-dismiss timer. Replacing or dropping
    /// it always aborts the old task first, so at most one timer exists.
    dismiss: Mutex<Option<JoinHandle<()>>>,
    /// Current timer generation. A timer task only clears state while
    /// its generation is still current; abort alone cannot stop a task
    /// that already finished sleeping and is mid-poll.
    dismiss_gen: AtomicU64,
}

impl Drop for FichaInner {
    fn drop(&mut self) {
        if let Ok(guard) = self.dismiss.get_mut() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }
}

impl FichaController {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(FichaState::initial());
        let (download_tx, _) = broadcast::channel(DOWNLOAD_CHANNEL_SIZE);
        Self {
            inner: Arc::new(FichaInner {
                api,
                state,
                download_tx,
                dismiss: Mutex::new(None),
                dismiss_gen: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<FichaState> {
        self.inner.state.subscribe()
    }

    /// A clone of the current state.
    pub fn state(&self) -> FichaState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to download locators the host should open.
    pub fn subscribe_downloads(&self) -> broadcast::Receiver<String> {
        self.inner.download_tx.subscribe()
    }

    /// Update the DNI field from raw input.
    ///
    /// Non-digits are stripped and the result is hard-capped at
    /// [`DNI_LEN`] characters before it is stored. Editing while a
    /// status message is displayed clears the message immediately and
    /// invalidates the pending dismiss timer; an in-flight submit is
    /// not affected.
    pub fn set_dni(&self, value: &str) {
        let normalized: String = value
            .chars()
            .filter(char::is_ascii_digit)
            .take(DNI_LEN)
            .collect();

        self.cancel_dismiss();
        self.inner.state.send_modify(|s| {
            s.dni = normalized;
            if s.message.take().is_some()
                && matches!(s.phase, FichaPhase::Succeeded | FichaPhase::Failed)
            {
                s.phase = FichaPhase::Idle;
            }
        });
    }

    /// Submit the current DNI for ficha generation.
    ///
    /// At most one submit is in flight at a time; a call while
    /// Submitting is rejected outright rather than queued. An invalid
    /// DNI fails locally with [`VALIDATION_MESSAGE`] and never reaches
    /// the network.
    pub async fn submit(&self) {
        if self.inner.state.borrow().phase == FichaPhase::Submitting {
            debug!("submit rejected: a ficha request is already in flight");
            return;
        }

        self.cancel_dismiss();

        let dni = self.inner.state.borrow().dni.clone();
        if dni.len() != DNI_LEN || !dni.chars().all(|c| c.is_ascii_digit()) {
            self.fail(VALIDATION_MESSAGE.to_owned());
            return;
        }

        self.inner.state.send_modify(|s| {
            s.phase = FichaPhase::Submitting;
            s.message = None;
        });

        match self.inner.api.request_ficha(&dni).await {
            Ok(resp) => match resp.download_url.as_deref().filter(|u| !u.is_empty()) {
                Some(url) => {
                    let name = display_name(resp.estudiante.as_ref());
                    debug!(%name, "ficha generated");
                    let _ = self.inner.download_tx.send(url.to_owned());
                    self.inner.state.send_modify(|s| {
                        s.dni.clear();
                        s.phase = FichaPhase::Succeeded;
                        s.message = Some(format!("Ficha generated for {name}"));
                    });
                    self.schedule_dismiss();
                }
                None => self.fail(NO_DOWNLOAD_LINK.to_owned()),
            },
            Err(err) => {
                let err = CoreError::from(err);
                warn!(error = %err, "ficha request failed");
                self.fail(err.user_message());
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Enter the Failed phase with `message` and arm the dismiss timer.
    fn fail(&self, message: String) {
        self.inner.state.send_modify(|s| {
            s.phase = FichaPhase::Failed;
            s.message = Some(message);
        });
        self.schedule_dismiss();
    }

    /// Invalidate and drop any outstanding dismiss timer.
    fn cancel_dismiss(&self) {
        self.inner.dismiss_gen.fetch_add(1, Ordering::SeqCst);
        self.swap_dismiss(None);
    }

    /// Arm a fresh auto-dismiss timer, superseding any outstanding one.
    fn schedule_dismiss(&self) {
        let generation = self.inner.dismiss_gen.fetch_add(1, Ordering::SeqCst) + 1;
        let weak: Weak<FichaInner> = Arc::downgrade(&self.inner);
        // Anchor the deadline now, not at the task's first poll.
        let ttl = tokio::time::sleep(MESSAGE_TTL);
        let handle = tokio::spawn(async move {
            ttl.await;
            if let Some(inner) = weak.upgrade() {
                // Superseded while mid-poll: a newer timer or an edit
                // owns the message now.
                if inner.dismiss_gen.load(Ordering::SeqCst) == generation {
                    inner.state.send_modify(|s| {
                        s.message = None;
                        s.phase = FichaPhase::Idle;
                    });
                }
            }
        });
        self.swap_dismiss(Some(handle));
    }

    /// Replace the stored timer handle, aborting the previous one.
    fn swap_dismiss(&self, new: Option<JoinHandle<()>>) {
        let mut guard = self
            .inner
            .dismiss
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(old) = std::mem::replace(&mut *guard, new) {
            old.abort();
        }
    }
}

/// Full display name from the nested student record, or a placeholder
/// when any name field is missing.
fn display_name(record: Option<&FichaRecord>) -> String {
    let Some(persona) = record.and_then(|r| r.estudiante.as_ref()) else {
        return NAME_FALLBACK.to_owned();
    };

    match (&persona.nombres, &persona.paterno, &persona.materno) {
        (Some(nombres), Some(paterno), Some(materno)) => {
            format!("{nombres} {paterno} {materno}").trim().to_owned()
        }
        _ => NAME_FALLBACK.to_owned(),
    }
}
