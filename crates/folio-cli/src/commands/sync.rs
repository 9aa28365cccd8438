use anyhow::bail;
use folio_config::FolioConfig;
use folio_sync::{CycleOutcome, CycleReport};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct SyncResponse<'a> {
    #[serde(flatten)]
    report: &'a CycleReport,
    saved: bool,
}

/// Handle `folio sync`.
pub async fn handle(config: &FolioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let sync = context::synchronizer(config, flags)?;

    let progress = Progress::spinner(flags, "Fetching profile stats...");
    let report = sync.run_cycle().await;
    progress.finish_clear();

    let saved = if report.applied() {
        sync.display().await.persist(flags.dry_run)?
    } else {
        false
    };
    output(
        &SyncResponse {
            report: &report,
            saved,
        },
        flags.format,
    )?;

    if let CycleOutcome::Failed { reason } = &report.outcome {
        bail!("sync failed: {reason}");
    }
    Ok(())
}
