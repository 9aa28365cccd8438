//! Stat extraction from raw profile markup.
//!
//! Each field owns an ordered list of patterns. Markup-specific patterns
//! come before generic text scans; the first pattern whose capture
//! normalizes to a count wins. The profile site's markup is outside our
//! control, so this is best effort: a field with no usable match keeps its
//! previous value instead of dropping to zero.

use std::sync::LazyLock;

use folio_core::{StatField, StatSnapshot, normalize_count};
use regex::Regex;
use serde::Serialize;

/// Pattern sources per field, in priority order. Capture group 1 holds the count.
const PATTERN_TABLE: [(StatField, &[&str]); 3] = [
    (
        StatField::Publications,
        &[
            r"(?i)(\d+)\s*Publications",
            r"(?i)Publications\s*\((\d+)\)",
            r#"(?i)"publications"[^>]*>(\d+)<"#,
            r#"(?i)class="[^"]*publications[^"]*"[^>]*>(\d+)<"#,
        ],
    ),
    (
        StatField::Citations,
        &[
            r"(?i)(\d+)\s*Citations",
            r"(?i)Citations\s*(\d+)",
            r#"(?i)"citations"[^>]*>(\d+)<"#,
            r#"(?i)class="[^"]*citations[^"]*"[^>]*>(\d+)<"#,
        ],
    ),
    (
        StatField::Reads,
        &[
            r"(?i)([\d,]+)\s*Reads",
            r"(?i)(\d{1,3}(?:,\d{3})*)\s*Reads",
            r#"(?i)"reads"[^>]*>([\d,]+)<"#,
            r#"(?i)class="[^"]*reads[^"]*"[^>]*>([\d,]+)<"#,
            r"(?i)Reads\s*.*?(\d{1,3}(?:,\d{3})*)",
        ],
    ),
];

static COMPILED: LazyLock<Vec<(StatField, Vec<Regex>)>> = LazyLock::new(|| {
    PATTERN_TABLE
        .iter()
        .map(|(field, sources)| {
            let patterns = sources
                .iter()
                .map(|source| Regex::new(source).expect("extraction pattern should compile"))
                .collect();
            (*field, patterns)
        })
        .collect()
});

/// A successful pattern hit for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMatch {
    pub field: StatField,
    /// Index into the field's pattern list.
    pub pattern_index: usize,
    /// Text captured by the pattern, before normalization.
    pub raw: String,
    /// Normalized plain decimal count.
    pub value: String,
}

fn patterns_for(field: StatField) -> &'static [Regex] {
    COMPILED
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, patterns)| patterns.as_slice())
        .unwrap_or_default()
}

/// Number of patterns configured for `field`.
#[must_use]
pub fn pattern_count(field: StatField) -> usize {
    patterns_for(field).len()
}

/// Find the first pattern for `field` whose capture normalizes to a count.
#[must_use]
pub fn match_field(html: &str, field: StatField) -> Option<FieldMatch> {
    patterns_for(field)
        .iter()
        .enumerate()
        .find_map(|(pattern_index, pattern)| {
            let raw = pattern.captures(html)?.get(1)?.as_str();
            let value = normalize_count(raw)?;
            Some(FieldMatch {
                field,
                pattern_index,
                raw: raw.to_string(),
                value,
            })
        })
}

/// Build a candidate snapshot from raw profile markup.
///
/// Fields without a usable match keep the value from `prior`, as does
/// `last_updated`. Running this twice on the same input with the same prior
/// yields the same candidate.
#[must_use]
pub fn extract_stats(html: &str, prior: &StatSnapshot) -> StatSnapshot {
    let mut candidate = prior.clone();
    for field in StatField::ALL {
        match match_field(html, field) {
            Some(found) => {
                tracing::debug!(
                    %field,
                    pattern = found.pattern_index,
                    raw = %found.raw,
                    value = %found.value,
                    "extracted stat"
                );
                candidate = candidate.with_field(field, found.value);
            }
            None => {
                tracing::debug!(%field, kept = prior.get(field), "no pattern matched");
            }
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn prior() -> StatSnapshot {
        StatSnapshot::baseline()
    }

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(pattern_count(StatField::Publications), 4);
        assert_eq!(pattern_count(StatField::Citations), 4);
        assert_eq!(pattern_count(StatField::Reads), 5);
    }

    #[test]
    fn citations_from_plain_text() {
        let candidate = extract_stats("<span>77 Citations</span>", &prior());
        assert_eq!(candidate.citations, "77");
    }

    #[test]
    fn reads_drop_thousands_separators() {
        let candidate = extract_stats("<div>1,243 Reads</div>", &prior());
        assert_eq!(candidate.reads, "1243");
    }

    #[test]
    fn unmatched_field_keeps_prior_value() {
        let prior = StatSnapshot::new("19", "50", "900");
        let candidate = extract_stats("<p>88 Citations</p>", &prior);
        assert_eq!(candidate.publications, "19");
        assert_eq!(candidate.reads, "900");
        assert_eq!(candidate.citations, "88");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let candidate = extract_stats("31 publications, 104 CITATIONS", &prior());
        assert_eq!(candidate.publications, "31");
        assert_eq!(candidate.citations, "104");
    }

    #[test]
    fn parenthesised_publication_count() {
        let found = match_field("<h2>Publications (42)</h2>", StatField::Publications).unwrap();
        assert_eq!(found.pattern_index, 1);
        assert_eq!(found.value, "42");
    }

    #[test]
    fn markup_patterns_are_fallbacks() {
        let html = r#"<li data-key="publications" class="nova">12</li>"#;
        let found = match_field(html, StatField::Publications).unwrap();
        assert_eq!(found.pattern_index, 2);
        assert_eq!(found.value, "12");

        let html = r#"<b class="profile-citations-count">64</b>"#;
        let found = match_field(html, StatField::Citations).unwrap();
        assert_eq!(found.pattern_index, 3);
        assert_eq!(found.value, "64");
    }

    #[test]
    fn earlier_pattern_wins_over_later_one() {
        let html = r#"Publications (5) <em class="publications">9</em> 7 Publications"#;
        let found = match_field(html, StatField::Publications).unwrap();
        assert_eq!(found.pattern_index, 0);
        assert_eq!(found.value, "7");
    }

    #[test]
    fn separator_only_capture_falls_through() {
        let html = "Citations, Reads: 2,048 total";
        let found = match_field(html, StatField::Reads).unwrap();
        assert_eq!(found.pattern_index, 4);
        assert_eq!(found.raw, "2,048");
        assert_eq!(found.value, "2048");
    }

    #[test]
    fn leading_zeros_are_normalized() {
        let candidate = extract_stats("007 Citations", &prior());
        assert_eq!(candidate.citations, "7");
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = "<p>23 Publications</p><p>1,300 Reads</p>";
        let prior = prior();
        assert_eq!(extract_stats(html, &prior), extract_stats(html, &prior));
    }

    #[test]
    fn garbage_input_yields_prior_snapshot() {
        let prior = prior();
        assert_eq!(extract_stats("\u{0}<<<>>>", &prior), prior);
        assert_eq!(extract_stats("", &prior), prior);
    }
}
