use std::path::Path;

use anyhow::Context;
use folio_config::FolioConfig;
use folio_core::{StatField, StatSnapshot};
use folio_sync::{FieldMatch, extract_stats, match_field};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExtractReport {
    matches: Vec<FieldMatch>,
    /// Fields no pattern matched; they keep the baseline value.
    unmatched: Vec<StatField>,
    snapshot: StatSnapshot,
}

fn extract_report(html: &str, prior: &StatSnapshot) -> ExtractReport {
    let (matches, unmatched): (Vec<_>, Vec<_>) = StatField::ALL
        .into_iter()
        .map(|field| (field, match_field(html, field)))
        .partition(|(_, hit)| hit.is_some());

    ExtractReport {
        matches: matches.into_iter().filter_map(|(_, hit)| hit).collect(),
        unmatched: unmatched.into_iter().map(|(field, _)| field).collect(),
        snapshot: extract_stats(html, prior),
    }
}

/// Handle `folio extract`.
pub fn handle(input: &Path, config: &FolioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let html = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    output(
        &extract_report(&html, &config.baseline.snapshot()),
        flags.format,
    )
}
