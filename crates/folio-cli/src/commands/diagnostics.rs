//! Operator checks against the page, all relative to the configured baseline.

use anyhow::bail;
use folio_config::FolioConfig;
use folio_core::StatField;
use folio_sync::{apply_manual, check_for_updates, format_compliance, validate_display};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::PageDisplay;
use crate::output::output;

#[derive(Debug, Serialize)]
struct UpdateCheck {
    outdated: Vec<StatField>,
    up_to_date: bool,
}

#[derive(Debug, Serialize)]
struct ApplyResponse {
    written: Vec<StatField>,
    saved: bool,
}

/// Handle `folio validate`.
pub fn validate(config: &FolioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let expected = config.baseline.snapshot();
    let display = PageDisplay::open(flags, &expected)?;

    let report = validate_display(&display, &expected);
    output(&report, flags.format)?;
    if !report.is_valid() {
        bail!("{} displayed count(s) differ from the baseline", report.issues.len());
    }
    Ok(())
}

/// Handle `folio check-format`.
pub fn check_format(config: &FolioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let expected = config.baseline.snapshot();
    let display = PageDisplay::open(flags, &expected)?;

    let report = format_compliance(&display, &expected);
    output(&report, flags.format)?;
    if !report.compliant {
        bail!("displayed counts are not plain decimals matching the baseline");
    }
    Ok(())
}

/// Handle `folio check-updates`.
pub fn check_updates(config: &FolioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let latest = config.baseline.snapshot();
    let display = PageDisplay::open(flags, &latest)?;

    let outdated = check_for_updates(&display, &latest);
    output(
        &UpdateCheck {
            up_to_date: outdated.is_empty(),
            outdated,
        },
        flags.format,
    )
}

/// Handle `folio apply-baseline`.
pub fn apply_baseline(config: &FolioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let latest = config.baseline.snapshot();
    let mut display = PageDisplay::open(flags, &latest)?;

    let written = apply_manual(&mut display, &latest);
    let saved = display.persist(flags.dry_run)?;
    output(&ApplyResponse { written, saved }, flags.format)
}
