//! Domain types representing expense categories.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Tags expenses for grouping. Names are unique ignoring case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    /// `#RRGGBB`, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, color: Option<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            color,
            created_at: DateTime::<Utc>::default(),
        }
    }

    /// Case-insensitive name comparison used for uniqueness checks.
    pub fn has_name(&self, candidate: &str) -> bool {
        self.name.trim().to_lowercase() == candidate.trim().to_lowercase()
    }
}

impl Record for Category {
    const KIND: RecordKind = RecordKind::Category;
    const ORDER_FIELD: DateField = DateField::CreatedAt;

    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_identity(&mut self, id: RecordId, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }

    fn date_value(&self, field: DateField) -> Option<NaiveDateTime> {
        match field {
            DateField::CreatedAt => Some(self.created_at.naive_utc()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_match_ignores_case_and_padding() {
        let category = Category::new("Groceries", None);
        assert!(category.has_name("groceries"));
        assert!(category.has_name("  GROCERIES "));
        assert!(!category.has_name("Grocery"));
    }
}
