//! # folio-sync
//!
//! Keeps the portfolio page's publication, citation and read counts in step
//! with the external research profile.
//!
//! A cycle fetches the profile document through a [`DocumentSource`], pulls
//! the three counts out of it with a fixed pattern table, and reconciles the
//! result against the last applied [`folio_core::StatSnapshot`]. Only fields
//! that actually changed are rewritten on the [`StatDisplay`], each through a
//! short fade-out/swap/fade-in transition. [`AutoUpdate`] drives cycles on a
//! schedule; the functions in [`diagnostics`] back the operator checks.

pub mod diagnostics;
pub mod display;
pub mod extract;
pub mod notify;
pub mod schedule;
pub mod source;
pub mod synchronizer;
pub mod transition;

pub use diagnostics::{
    ComplianceReport, FieldCompliance, FieldIssue, ValidationReport, apply_manual,
    check_for_updates, format_compliance, validate_display,
};
pub use display::{DisplayError, DisplayMutation, ElementStyle, HtmlPage, MemoryDisplay, StatDisplay};
pub use extract::{FieldMatch, extract_stats, match_field};
pub use notify::{Notification, NotificationKind, Notifier, RecordingNotifier, TracingNotifier};
pub use schedule::{AutoUpdate, ScheduleTiming};
pub use source::{DocumentSource, ProfileSource, StaticSource};
pub use synchronizer::{CycleOutcome, CycleReport, ReconcileResult, Synchronizer};
pub use transition::{AnimationTimings, TransitionPhase, run_transition};
