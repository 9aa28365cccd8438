use folio_config::FolioConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &FolioConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Sync => commands::sync::handle(config, flags).await,
        Commands::Watch => commands::watch::handle(config, flags).await,
        Commands::Validate => commands::diagnostics::validate(config, flags),
        Commands::CheckFormat => commands::diagnostics::check_format(config, flags),
        Commands::CheckUpdates => commands::diagnostics::check_updates(config, flags),
        Commands::ApplyBaseline => commands::diagnostics::apply_baseline(config, flags),
        Commands::Extract { input } => commands::extract::handle(&input, config, flags),
        Commands::Config => commands::config::handle(config, flags),
    }
}
