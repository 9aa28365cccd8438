//! The three mirrored profile counters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Attribute carried by every display element on the portfolio page.
pub const STAT_ATTRIBUTE: &str = "data-rg-stat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatField {
    Publications,
    Citations,
    Reads,
}

impl StatField {
    /// All fields in display order. Updates are applied in this order.
    pub const ALL: [Self; 3] = [Self::Publications, Self::Citations, Self::Reads];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Publications => "publications",
            Self::Citations => "citations",
            Self::Reads => "reads",
        }
    }

    /// Value of the `data-rg-stat` attribute on the display element.
    #[must_use]
    pub const fn attribute_value(self) -> &'static str {
        self.as_str()
    }

    /// CSS attribute selector locating the display element,
    /// e.g. `[data-rg-stat="citations"]`.
    #[must_use]
    pub fn selector(self) -> String {
        format!("[{STAT_ATTRIBUTE}=\"{}\"]", self.attribute_value())
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "publications" => Ok(Self::Publications),
            "citations" => Ok(Self::Citations),
            "reads" => Ok(Self::Reads),
            other => Err(CoreError::UnknownField(other.to_string())),
        }
    }
}
