//! Periodic cycle driver.
//!
//! One cycle runs shortly after start, then on a fixed period anchored at
//! the moment the schedule started. Each cycle runs in its own task, so
//! stopping ends the timer but never a cycle that is already running;
//! restarting is stop-then-start.

use std::sync::Arc;
use std::time::Duration;

use folio_config::ScheduleConfig;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::display::StatDisplay;
use crate::notify::Notifier;
use crate::source::DocumentSource;
use crate::synchronizer::{CycleReport, Synchronizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTiming {
    pub initial_delay: Duration,
    pub interval: Duration,
}

impl From<&ScheduleConfig> for ScheduleTiming {
    fn from(config: &ScheduleConfig) -> Self {
        Self {
            initial_delay: config.initial_delay(),
            interval: config.interval(),
        }
    }
}

/// Handle to the recurring update task.
#[derive(Debug, Default)]
pub struct AutoUpdate {
    handle: Option<JoinHandle<()>>,
}

impl AutoUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the schedule, replacing any running one. Every finished cycle
    /// is sent on the returned channel; dropping the receiver is fine.
    pub fn start<S, D, N>(
        &mut self,
        sync: Arc<Synchronizer<S, D, N>>,
        timing: ScheduleTiming,
    ) -> mpsc::UnboundedReceiver<CycleReport>
    where
        S: DocumentSource + 'static,
        D: StatDisplay + 'static,
        N: Notifier + 'static,
    {
        self.stop();

        let (tx, rx) = mpsc::unbounded_channel();
        let interval_minutes = timing.interval.as_secs() / 60;
        tracing::info!(interval_minutes, "starting automatic profile sync");

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let mut ticker = tokio::time::interval_at(started + timing.interval, timing.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tokio::time::sleep(timing.initial_delay).await;
            run_detached(&sync, &tx).await;

            loop {
                ticker.tick().await;
                run_detached(&sync, &tx).await;
            }
        });
        self.handle = Some(handle);
        rx
    }

    /// Stop then start again, e.g. after the interval was changed.
    pub fn restart<S, D, N>(
        &mut self,
        sync: Arc<Synchronizer<S, D, N>>,
        timing: ScheduleTiming,
    ) -> mpsc::UnboundedReceiver<CycleReport>
    where
        S: DocumentSource + 'static,
        D: StatDisplay + 'static,
        N: Notifier + 'static,
    {
        self.start(sync, timing)
    }

    /// Stop the timer. A cycle already running finishes and still reports
    /// on the channel, which closes once it is done.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::info!("automatic profile sync stopped");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

/// Run one cycle in its own task and wait for it. Aborting the timer task
/// while it waits drops only the join handle, which leaves the cycle running.
async fn run_detached<S, D, N>(sync: &Arc<Synchronizer<S, D, N>>, tx: &UnboundedSender<CycleReport>)
where
    S: DocumentSource + 'static,
    D: StatDisplay + 'static,
    N: Notifier + 'static,
{
    let sync = Arc::clone(sync);
    let tx = tx.clone();
    let cycle = tokio::spawn(async move {
        let _ = tx.send(sync.run_cycle().await);
    });
    if let Err(error) = cycle.await {
        tracing::error!(%error, "sync cycle task failed");
    }
}

impl Drop for AutoUpdate {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_core::{StatField, StatSnapshot};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::display::{ElementStyle, MemoryDisplay};
    use crate::notify::RecordingNotifier;
    use crate::source::StaticSource;
    use crate::synchronizer::CycleOutcome;
    use crate::transition::AnimationTimings;

    fn sync() -> Arc<Synchronizer<StaticSource, MemoryDisplay, RecordingNotifier>> {
        let baseline = StatSnapshot::baseline();
        Arc::new(Synchronizer::new(
            StaticSource::new("<p>77 Citations</p>"),
            MemoryDisplay::seeded(&baseline),
            RecordingNotifier::new(),
            AnimationTimings::instant(),
            baseline,
        ))
    }

    fn timing() -> ScheduleTiming {
        ScheduleTiming {
            initial_delay: Duration::from_secs(2),
            interval: Duration::from_secs(30 * 60),
        }
    }

    #[test]
    fn timing_from_config() {
        let timing = ScheduleTiming::from(&ScheduleConfig::default());
        assert_eq!(timing, self::timing());
    }

    #[tokio::test(start_paused = true)]
    async fn first_cycle_after_initial_delay_then_periodic() {
        let sync = sync();
        let mut auto = AutoUpdate::new();
        let started = Instant::now();
        let mut reports = auto.start(Arc::clone(&sync), timing());

        let first = reports.recv().await.unwrap();
        assert_eq!(first.outcome, CycleOutcome::Unchanged);
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert!(started.elapsed() < Duration::from_secs(60));

        reports.recv().await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(30 * 60));

        reports.recv().await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(60 * 60));
        assert_eq!(sync.source().fetch_count(), 3);
        assert!(auto.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_the_schedule() {
        let sync = sync();
        let mut auto = AutoUpdate::new();
        let mut reports = auto.start(Arc::clone(&sync), timing());
        reports.recv().await.unwrap();

        auto.stop();
        assert!(!auto.is_running());
        assert!(reports.recv().await.is_none());
        assert_eq!(sync.source().fetch_count(), 1);
    }

    fn sync_with_changes() -> Arc<Synchronizer<StaticSource, MemoryDisplay, RecordingNotifier>> {
        let baseline = StatSnapshot::baseline();
        Arc::new(Synchronizer::new(
            StaticSource::new("<p>30 Publications</p><p>90 Citations</p><p>2,000 Reads</p>"),
            MemoryDisplay::seeded(&baseline),
            RecordingNotifier::new(),
            AnimationTimings {
                fade_out: Duration::from_millis(300),
                fade_in: Duration::from_millis(400),
                field_spacing: Duration::from_millis(200),
            },
            baseline,
        ))
    }

    async fn assert_display_matches_snapshot(
        sync: &Synchronizer<StaticSource, MemoryDisplay, RecordingNotifier>,
    ) {
        let snapshot = sync.snapshot();
        let display = sync.display().await;
        for field in StatField::ALL {
            assert_eq!(display.read(field).as_deref(), Some(snapshot.get(field)));
            assert_eq!(display.style(field), Some(ElementStyle::Resting));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stop_mid_transition_lets_the_cycle_finish() {
        let sync = sync_with_changes();
        let mut auto = AutoUpdate::new();
        let mut reports = auto.start(Arc::clone(&sync), timing());

        tokio::time::sleep(Duration::from_millis(2_100)).await;
        assert!(sync.is_updating());
        auto.stop();

        let report = reports.recv().await.unwrap();
        assert_eq!(
            report.outcome,
            CycleOutcome::Updated {
                changed: vec![StatField::Publications, StatField::Citations, StatField::Reads]
            }
        );
        assert!(reports.recv().await.is_none());
        assert!(!sync.is_updating());
        assert_display_matches_snapshot(&sync).await;
        assert_eq!(sync.snapshot().reads, "2000");
    }

    #[tokio::test(start_paused = true)]
    async fn restart_mid_transition_keeps_page_and_snapshot_in_step() {
        let sync = sync_with_changes();
        let mut auto = AutoUpdate::new();
        let mut old = auto.start(Arc::clone(&sync), timing());

        tokio::time::sleep(Duration::from_millis(2_100)).await;
        let later = ScheduleTiming {
            initial_delay: Duration::from_secs(5),
            ..timing()
        };
        let mut new = auto.restart(Arc::clone(&sync), later);

        assert!(old.recv().await.unwrap().applied());
        assert!(old.recv().await.is_none());
        assert_display_matches_snapshot(&sync).await;

        let next = new.recv().await.unwrap();
        assert_eq!(next.outcome, CycleOutcome::Unchanged);
        assert_display_matches_snapshot(&sync).await;
        assert!(auto.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_the_running_schedule() {
        let sync = sync();
        let mut auto = AutoUpdate::new();
        let mut old = auto.start(Arc::clone(&sync), timing());
        let later = ScheduleTiming {
            initial_delay: Duration::from_secs(5),
            ..timing()
        };
        let mut new = auto.restart(Arc::clone(&sync), later);

        assert!(old.recv().await.is_none());
        new.recv().await.unwrap();
        assert_eq!(sync.source().fetch_count(), 1);
    }
}
