//! Fetch → extract → reconcile cycles over an owned snapshot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use folio_core::{StatField, StatSnapshot};
use serde::Serialize;

use crate::display::StatDisplay;
use crate::extract::extract_stats;
use crate::notify::{
    FAILURE_MESSAGE, LOADING_MESSAGE, NotificationKind, Notifier, SUCCESS_MESSAGE,
    UNCHANGED_MESSAGE,
};
use crate::source::DocumentSource;
use crate::transition::{AnimationTimings, pause, run_transition};

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// At least one count changed and was applied.
    Updated { changed: Vec<StatField> },
    /// Fetched and extracted, nothing differed.
    Unchanged,
    /// The document could not be fetched.
    Failed { reason: String },
    /// Another cycle was already running; nothing was fetched.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    /// Snapshot after the cycle.
    pub snapshot: StatSnapshot,
}

impl CycleReport {
    #[must_use]
    pub const fn applied(&self) -> bool {
        matches!(self.outcome, CycleOutcome::Updated { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileResult {
    pub applied: bool,
    pub changed: Vec<StatField>,
    /// Another cycle held the guard; nothing was compared or written.
    pub skipped: bool,
}

impl ReconcileResult {
    const fn skipped() -> Self {
        Self {
            applied: false,
            changed: Vec::new(),
            skipped: true,
        }
    }
}

/// Clears the in-progress flag on every exit path.
struct CycleGuard<'a>(&'a AtomicBool);

impl<'a> CycleGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the snapshot, the display and the at-most-one-cycle flag.
pub struct Synchronizer<S, D, N> {
    source: S,
    display: tokio::sync::Mutex<D>,
    notifier: N,
    timings: AnimationTimings,
    snapshot: Mutex<StatSnapshot>,
    in_progress: AtomicBool,
}

impl<S, D, N> Synchronizer<S, D, N>
where
    S: DocumentSource,
    D: StatDisplay,
    N: Notifier,
{
    pub fn new(
        source: S,
        display: D,
        notifier: N,
        timings: AnimationTimings,
        baseline: StatSnapshot,
    ) -> Self {
        Self {
            source,
            display: tokio::sync::Mutex::new(display),
            notifier,
            timings,
            snapshot: Mutex::new(baseline),
            in_progress: AtomicBool::new(false),
        }
    }

    /// Last applied snapshot.
    #[must_use]
    pub fn snapshot(&self) -> StatSnapshot {
        self.lock_snapshot().clone()
    }

    #[must_use]
    pub fn is_updating(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Exclusive access to the display, e.g. for operator checks or saving.
    pub async fn display(&self) -> tokio::sync::MutexGuard<'_, D> {
        self.display.lock().await
    }

    fn lock_snapshot(&self) -> MutexGuard<'_, StatSnapshot> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one full cycle. A call made while another cycle is running
    /// returns immediately with [`CycleOutcome::Skipped`].
    pub async fn run_cycle(&self) -> CycleReport {
        let Some(_guard) = CycleGuard::acquire(&self.in_progress) else {
            tracing::info!("update already in progress");
            return CycleReport {
                outcome: CycleOutcome::Skipped,
                snapshot: self.snapshot(),
            };
        };

        tracing::info!("starting profile stat sync");
        self.notifier
            .notify(NotificationKind::Loading, LOADING_MESSAGE);
        let outcome = self.fetch_and_reconcile().await;
        self.notifier.dismiss(NotificationKind::Loading);

        CycleReport {
            outcome,
            snapshot: self.snapshot(),
        }
    }

    async fn fetch_and_reconcile(&self) -> CycleOutcome {
        let document = match self.source.fetch().await {
            Ok(document) => document,
            Err(error) => {
                tracing::error!(%error, "profile stat sync failed");
                self.notifier.notify(NotificationKind::Error, FAILURE_MESSAGE);
                return CycleOutcome::Failed {
                    reason: error.to_string(),
                };
            }
        };

        let candidate = extract_stats(&document, &self.snapshot());
        let result = self.apply_candidate(candidate).await;
        if result.applied {
            CycleOutcome::Updated {
                changed: result.changed,
            }
        } else {
            CycleOutcome::Unchanged
        }
    }

    /// Apply `candidate` if any count differs from the current snapshot.
    ///
    /// Equal counts leave the display untouched. Otherwise the snapshot is
    /// replaced in one step and each changed field is transitioned in display
    /// order, spaced by the configured pause. Shares the in-progress guard
    /// with [`Self::run_cycle`]: while a cycle runs this returns a skipped
    /// result without touching the snapshot or the display.
    pub async fn reconcile(&self, candidate: StatSnapshot) -> ReconcileResult {
        let Some(_guard) = CycleGuard::acquire(&self.in_progress) else {
            tracing::info!("update already in progress");
            return ReconcileResult::skipped();
        };
        self.apply_candidate(candidate).await
    }

    async fn apply_candidate(&self, candidate: StatSnapshot) -> ReconcileResult {
        let current = self.snapshot();
        let changed = current.changed_fields(&candidate);

        if changed.is_empty() {
            tracing::info!("stats already up to date");
            self.notifier
                .notify(NotificationKind::Info, UNCHANGED_MESSAGE);
            return ReconcileResult {
                applied: false,
                changed,
                skipped: false,
            };
        }

        let next = candidate.stamped(Utc::now());
        tracing::info!(
            publications = %next.publications,
            citations = %next.citations,
            reads = %next.reads,
            ?changed,
            "new stats detected"
        );
        *self.lock_snapshot() = next.clone();

        let mut display = self.display.lock().await;
        for (index, field) in changed.iter().enumerate() {
            if index > 0 {
                pause(self.timings.field_spacing).await;
            }
            run_transition(&mut *display, *field, next.get(*field), &self.timings).await;
        }
        drop(display);

        self.notifier
            .notify(NotificationKind::Success, SUCCESS_MESSAGE);
        ReconcileResult {
            applied: true,
            changed,
            skipped: false,
        }
    }
}
