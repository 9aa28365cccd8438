//! Last-known profile counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::field::StatField;
use crate::normalize::is_plain_count;

/// The three mirrored counts plus the moment they were last applied.
///
/// Counts are plain decimal strings. A snapshot is replaced wholesale when a
/// reconciliation cycle detects a difference; it is never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSnapshot {
    pub publications: String,
    pub citations: String,
    pub reads: String,
    /// `None` until a reconciliation cycle applies a change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for StatSnapshot {
    fn default() -> Self {
        Self::baseline()
    }
}

impl StatSnapshot {
    #[must_use]
    pub fn new(
        publications: impl Into<String>,
        citations: impl Into<String>,
        reads: impl Into<String>,
    ) -> Self {
        Self {
            publications: publications.into(),
            citations: citations.into(),
            reads: reads.into(),
            last_updated: None,
        }
    }

    /// Hardcoded counts the page ships with.
    #[must_use]
    pub fn baseline() -> Self {
        Self::new("23", "77", "1243")
    }

    #[must_use]
    pub fn get(&self, field: StatField) -> &str {
        match field {
            StatField::Publications => &self.publications,
            StatField::Citations => &self.citations,
            StatField::Reads => &self.reads,
        }
    }

    /// Copy of this snapshot with one field replaced.
    #[must_use]
    pub fn with_field(mut self, field: StatField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            StatField::Publications => self.publications = value,
            StatField::Citations => self.citations = value,
            StatField::Reads => self.reads = value,
        }
        self
    }

    #[must_use]
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = Some(at);
        self
    }

    /// Fields whose count differs from `other`, in display order.
    #[must_use]
    pub fn changed_fields(&self, other: &Self) -> Vec<StatField> {
        StatField::ALL
            .into_iter()
            .filter(|field| self.get(*field) != other.get(*field))
            .collect()
    }

    /// Count equality, ignoring `last_updated`.
    #[must_use]
    pub fn same_counts(&self, other: &Self) -> bool {
        self.changed_fields(other).is_empty()
    }

    /// Check that every count is a plain decimal.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        for field in StatField::ALL {
            let value = self.get(field);
            if !is_plain_count(value) {
                return Err(CoreError::Validation(format!(
                    "{field} must be a plain decimal count, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}
