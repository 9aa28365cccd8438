use std::collections::BTreeMap;

use folio_core::{StatField, StatSnapshot};

use super::{ElementStyle, StatDisplay};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMutation {
    Text { field: StatField, value: String },
    Style { field: StatField, style: ElementStyle },
}

#[derive(Debug, Clone)]
struct Element {
    text: String,
    style: ElementStyle,
}

/// In-memory page with a journal of every mutation applied to it.
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    elements: BTreeMap<StatField, Element>,
    journal: Vec<DisplayMutation>,
}

impl MemoryDisplay {
    /// Page with all three elements showing `snapshot`.
    #[must_use]
    pub fn seeded(snapshot: &StatSnapshot) -> Self {
        let elements = StatField::ALL
            .into_iter()
            .map(|field| {
                (
                    field,
                    Element {
                        text: snapshot.get(field).to_string(),
                        style: ElementStyle::Resting,
                    },
                )
            })
            .collect();
        Self {
            elements,
            journal: Vec::new(),
        }
    }

    /// Same page without the element for `field`.
    #[must_use]
    pub fn without(mut self, field: StatField) -> Self {
        self.elements.remove(&field);
        self
    }

    #[must_use]
    pub fn mutations(&self) -> &[DisplayMutation] {
        &self.journal
    }

    /// Fields whose text was written, in write order.
    #[must_use]
    pub fn text_writes(&self) -> Vec<StatField> {
        self.journal
            .iter()
            .filter_map(|m| match m {
                DisplayMutation::Text { field, .. } => Some(*field),
                DisplayMutation::Style { .. } => None,
            })
            .collect()
    }

    #[must_use]
    pub fn style(&self, field: StatField) -> Option<ElementStyle> {
        self.elements.get(&field).map(|e| e.style)
    }
}

impl StatDisplay for MemoryDisplay {
    fn read(&self, field: StatField) -> Option<String> {
        self.elements.get(&field).map(|e| e.text.clone())
    }

    fn write(&mut self, field: StatField, text: &str) -> bool {
        let Some(element) = self.elements.get_mut(&field) else {
            return false;
        };
        element.text = text.to_string();
        self.journal.push(DisplayMutation::Text {
            field,
            value: text.to_string(),
        });
        true
    }

    fn apply_style(&mut self, field: StatField, style: ElementStyle) {
        if let Some(element) = self.elements.get_mut(&field) {
            element.style = style;
            self.journal.push(DisplayMutation::Style { field, style });
        }
    }
}
