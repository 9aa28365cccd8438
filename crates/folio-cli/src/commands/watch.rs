use std::sync::Arc;

use anyhow::Context;
use folio_config::FolioConfig;
use folio_sync::{AutoUpdate, ScheduleTiming, format_compliance};

use crate::cli::GlobalFlags;
use crate::context;
use crate::output::output;

/// Handle `folio watch`: run the schedule until Ctrl-C.
pub async fn handle(config: &FolioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let sync = Arc::new(context::synchronizer(config, flags)?);
    let mut auto = AutoUpdate::new();
    let mut reports = auto.start(Arc::clone(&sync), ScheduleTiming::from(&config.schedule));

    let format_check = tokio::time::sleep(config.schedule.format_check_delay());
    tokio::pin!(format_check);
    let mut format_checked = false;

    loop {
        tokio::select! {
            () = &mut format_check, if !format_checked => {
                format_checked = true;
                let expected = sync.snapshot();
                let report = format_compliance(&*sync.display().await, &expected);
                output(&report, flags.format)?;
            }
            report = reports.recv() => {
                let Some(report) = report else { break };
                if report.applied() {
                    sync.display().await.persist(flags.dry_run)?;
                }
                output(&report, flags.format)?;
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for ctrl-c")?;
                tracing::info!("interrupt received, stopping");
                break;
            }
        }
    }

    auto.stop();
    // A cycle that was running when the timer stopped still reports here.
    while let Some(report) = reports.recv().await {
        if report.applied() {
            sync.display().await.persist(flags.dry_run)?;
        }
        output(&report, flags.format)?;
    }
    Ok(())
}
