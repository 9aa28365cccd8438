//! Wiring shared by the command handlers.

use anyhow::Context;
use folio_config::FolioConfig;
use folio_core::{StatField, StatSnapshot};
use folio_fetch::ProxyChain;
use folio_sync::{
    AnimationTimings, ElementStyle, HtmlPage, MemoryDisplay, ProfileSource, StatDisplay,
    Synchronizer, TracingNotifier,
};

use crate::cli::GlobalFlags;

pub type AppSynchronizer = Synchronizer<ProfileSource, PageDisplay, TracingNotifier>;

/// The page file given with `--page`, or an in-memory page seeded with the
/// baseline.
#[derive(Debug)]
pub enum PageDisplay {
    File(HtmlPage),
    Memory(MemoryDisplay),
}

impl PageDisplay {
    pub fn open(flags: &GlobalFlags, baseline: &StatSnapshot) -> anyhow::Result<Self> {
        match &flags.page {
            Some(path) => {
                let page = HtmlPage::load(path)
                    .with_context(|| format!("failed to open page {}", path.display()))?;
                Ok(Self::File(page))
            }
            None => Ok(Self::Memory(MemoryDisplay::seeded(baseline))),
        }
    }

    /// Write pending changes back to the page file. Returns whether the file
    /// was written; in-memory pages and dry runs never are.
    pub fn persist(&mut self, dry_run: bool) -> anyhow::Result<bool> {
        match self {
            Self::File(page) if dry_run => {
                if page.is_dirty() {
                    tracing::info!("dry run: page changes not saved");
                }
                Ok(false)
            }
            Self::File(page) => Ok(page.save()?),
            Self::Memory(_) => Ok(false),
        }
    }
}

impl StatDisplay for PageDisplay {
    fn read(&self, field: StatField) -> Option<String> {
        match self {
            Self::File(page) => page.read(field),
            Self::Memory(memory) => memory.read(field),
        }
    }

    fn write(&mut self, field: StatField, text: &str) -> bool {
        match self {
            Self::File(page) => page.write(field, text),
            Self::Memory(memory) => memory.write(field, text),
        }
    }

    fn apply_style(&mut self, field: StatField, style: ElementStyle) {
        match self {
            Self::File(page) => page.apply_style(field, style),
            Self::Memory(memory) => memory.apply_style(field, style),
        }
    }
}

/// Build a synchronizer over the live profile.
pub fn synchronizer(config: &FolioConfig, flags: &GlobalFlags) -> anyhow::Result<AppSynchronizer> {
    let baseline = config.baseline.snapshot();
    let chain = ProxyChain::from_config(&config.proxy).context("failed to build relay client")?;
    let display = PageDisplay::open(flags, &baseline)?;

    Ok(Synchronizer::new(
        ProfileSource::new(chain, config.profile.url.clone()),
        display,
        TracingNotifier,
        AnimationTimings::from(&config.animation),
        baseline,
    ))
}
