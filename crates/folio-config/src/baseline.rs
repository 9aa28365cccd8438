//! Counts the page starts from before any cycle succeeds.

use folio_core::StatSnapshot;
use serde::{Deserialize, Serialize};

fn default_publications() -> String {
    "23".to_string()
}

fn default_citations() -> String {
    "77".to_string()
}

fn default_reads() -> String {
    "1243".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BaselineConfig {
    #[serde(default = "default_publications")]
    pub publications: String,

    #[serde(default = "default_citations")]
    pub citations: String,

    #[serde(default = "default_reads")]
    pub reads: String,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            publications: default_publications(),
            citations: default_citations(),
            reads: default_reads(),
        }
    }
}

impl BaselineConfig {
    #[must_use]
    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot::new(&*self.publications, &*self.citations, &*self.reads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_core_baseline() {
        assert_eq!(BaselineConfig::default().snapshot(), StatSnapshot::baseline());
    }
}
