use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use folio_core::StatField;
use folio_core::field::STAT_ATTRIBUTE;
use regex::Regex;

use super::{DisplayError, ElementStyle, StatDisplay};

/// One regex per field matching `<tag ... data-rg-stat="field" ...>text<`.
/// Group 1 is the element's text content.
static ELEMENTS: LazyLock<Vec<(StatField, Regex)>> = LazyLock::new(|| {
    StatField::ALL
        .into_iter()
        .map(|field| {
            let pattern = format!(
                r#"<[A-Za-z][A-Za-z0-9-]*\s[^>]*?\b{attr}\s*=\s*["']{value}["'][^>]*>([^<]*)<"#,
                attr = regex::escape(STAT_ATTRIBUTE),
                value = regex::escape(field.attribute_value()),
            );
            (
                field,
                Regex::new(&pattern).expect("element pattern should compile"),
            )
        })
        .collect()
});

fn element_pattern(field: StatField) -> Option<&'static Regex> {
    ELEMENTS.iter().find(|(f, _)| *f == field).map(|(_, re)| re)
}

/// A static portfolio page used as the display surface.
///
/// Text writes edit the markup in place. Styles are transient: they are
/// tracked for the duration of a transition but never serialized.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    path: Option<PathBuf>,
    source: String,
    dirty: bool,
    styles: BTreeMap<StatField, ElementStyle>,
}

impl HtmlPage {
    #[must_use]
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            path: None,
            source: source.into(),
            dirty: false,
            styles: BTreeMap::new(),
        }
    }

    /// Load a page from disk.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::Io`] when the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DisplayError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| DisplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut page = Self::from_source(source);
        page.path = Some(path.to_path_buf());

        let missing: Vec<&str> = StatField::ALL
            .into_iter()
            .filter(|field| page.read(*field).is_none())
            .map(StatField::as_str)
            .collect();
        if !missing.is_empty() {
            tracing::warn!(path = %path.display(), ?missing, "page lacks stat elements");
        }
        Ok(page)
    }

    /// Write the page back to the file it was loaded from, if it changed.
    /// Returns whether anything was written.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::Detached`] for a page built from a string and
    /// [`DisplayError::Io`] when the write fails.
    pub fn save(&mut self) -> Result<bool, DisplayError> {
        if !self.dirty {
            return Ok(false);
        }
        let path = self.path.clone().ok_or(DisplayError::Detached)?;
        std::fs::write(&path, &self.source).map_err(|source| DisplayError::Io {
            path: path.clone(),
            source,
        })?;
        self.dirty = false;
        tracing::info!(path = %path.display(), "page saved");
        Ok(true)
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn style(&self, field: StatField) -> Option<ElementStyle> {
        self.styles.get(&field).copied()
    }

    fn text_range(&self, field: StatField) -> Option<std::ops::Range<usize>> {
        element_pattern(field)?
            .captures(&self.source)?
            .get(1)
            .map(|m| m.range())
    }
}

impl StatDisplay for HtmlPage {
    fn read(&self, field: StatField) -> Option<String> {
        self.text_range(field)
            .map(|range| self.source[range].trim().to_string())
    }

    fn write(&mut self, field: StatField, text: &str) -> bool {
        let Some(range) = self.text_range(field) else {
            return false;
        };
        // Only the visible text is replaced; surrounding whitespace stays.
        let current = &self.source[range.clone()];
        let start = range.start + (current.len() - current.trim_start().len());
        let visible = start..start + current.trim().len();
        if self.source[visible.clone()] != *text {
            self.source.replace_range(visible, text);
            self.dirty = true;
        }
        true
    }

    fn apply_style(&mut self, field: StatField, style: ElementStyle) {
        if self.text_range(field).is_none() {
            return;
        }
        tracing::trace!(%field, css = style.css(), "element style");
        if style == ElementStyle::Resting {
            self.styles.remove(&field);
        } else {
            self.styles.insert(field, style);
        }
    }
}
