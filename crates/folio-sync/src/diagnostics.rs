//! Operator checks against what the page currently shows.
//!
//! These back the interactive entry points: comparing the displayed counts
//! with an expected snapshot, verifying the plain-decimal format, and pushing
//! a known snapshot onto the page without touching the network.

use folio_core::{StatField, StatSnapshot, is_plain_count};
use serde::Serialize;

use crate::display::{StatDisplay, read_or_zero};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: StatField,
    pub displayed: String,
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<FieldIssue>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Compare each displayed count with `expected`.
pub fn validate_display<D>(display: &D, expected: &StatSnapshot) -> ValidationReport
where
    D: StatDisplay + ?Sized,
{
    let issues: Vec<FieldIssue> = StatField::ALL
        .into_iter()
        .filter_map(|field| {
            let displayed = read_or_zero(display, field);
            let wanted = expected.get(field);
            (displayed != wanted).then(|| FieldIssue {
                field,
                displayed,
                expected: wanted.to_string(),
            })
        })
        .collect();

    for issue in &issues {
        tracing::warn!(
            field = %issue.field,
            displayed = %issue.displayed,
            expected = %issue.expected,
            "displayed count differs"
        );
    }
    ValidationReport { issues }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCompliance {
    pub field: StatField,
    pub displayed: String,
    pub expected: String,
    /// Displayed text is a plain decimal (no separators, no `+`).
    pub plain: bool,
    pub matches: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    pub fields: Vec<FieldCompliance>,
    pub compliant: bool,
}

/// Check that every displayed count is a plain decimal equal to `expected`.
pub fn format_compliance<D>(display: &D, expected: &StatSnapshot) -> ComplianceReport
where
    D: StatDisplay + ?Sized,
{
    let fields: Vec<FieldCompliance> = StatField::ALL
        .into_iter()
        .map(|field| {
            let displayed = read_or_zero(display, field);
            let wanted = expected.get(field);
            FieldCompliance {
                field,
                plain: is_plain_count(&displayed),
                matches: displayed == wanted,
                displayed,
                expected: wanted.to_string(),
            }
        })
        .collect();
    let compliant = fields.iter().all(|f| f.plain && f.matches);
    if !compliant {
        tracing::warn!("displayed counts are not in plain decimal format");
    }
    ComplianceReport { fields, compliant }
}

/// Fields where the page differs from `latest`.
pub fn check_for_updates<D>(display: &D, latest: &StatSnapshot) -> Vec<StatField>
where
    D: StatDisplay + ?Sized,
{
    StatField::ALL
        .into_iter()
        .filter(|field| read_or_zero(display, *field) != latest.get(*field))
        .collect()
}

/// Write `latest` onto the page for every differing field. Returns the
/// fields that were written.
pub fn apply_manual<D>(display: &mut D, latest: &StatSnapshot) -> Vec<StatField>
where
    D: StatDisplay + ?Sized,
{
    let written: Vec<StatField> = check_for_updates(display, latest)
        .into_iter()
        .filter(|field| display.write(*field, latest.get(*field)))
        .collect();
    tracing::info!(?written, "applied counts manually");
    written
}
