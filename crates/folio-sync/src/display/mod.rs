//! Display surface for the mirrored counts.
//!
//! The page carries one element per [`StatField`], located by its
//! `data-rg-stat` attribute. The synchronizer only reads and writes the text
//! of those elements and toggles transient styles on them; it never creates
//! or removes elements. A missing element is skipped, not an error.

mod html;
mod memory;

pub use html::HtmlPage;
pub use memory::{DisplayMutation, MemoryDisplay};

use std::path::PathBuf;

use folio_core::StatField;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisplayError {
    /// Reading or writing the page file failed.
    #[error("page I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The page has no backing file to save to.
    #[error("page has no backing file")]
    Detached,
}

/// Transient visual state of a stat element during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementStyle {
    Resting,
    FadedOut,
    Highlighted,
}

impl ElementStyle {
    /// Inline CSS declarations this style stands for.
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Resting => "transform: scale(1)",
            Self::FadedOut => "opacity: 0.3; transform: scale(0.8) rotateY(90deg)",
            Self::Highlighted => {
                "opacity: 1; transform: scale(1.1); color: var(--accent-color); \
                 text-shadow: 0 0 20px rgba(0, 212, 255, 0.8)"
            }
        }
    }
}

/// Element access the synchronizer needs from a page.
pub trait StatDisplay: Send {
    /// Current text of the element for `field`, or `None` if absent.
    fn read(&self, field: StatField) -> Option<String>;

    /// Replace the element's text. Returns `false` when the element is absent.
    fn write(&mut self, field: StatField, text: &str) -> bool;

    /// Apply a transient style to the element. No-op when absent.
    fn apply_style(&mut self, field: StatField, style: ElementStyle);
}

/// Read a field the way operator checks do: a missing element reads as `"0"`.
pub(crate) fn read_or_zero<D: StatDisplay + ?Sized>(display: &D, field: StatField) -> String {
    display.read(field).unwrap_or_else(|| "0".to_string())
}
