//! # Worksheets
//!
//! A `Worksheet` is a saved, ordered list of calculation requests together
//! with the settings used to evaluate them. Worksheets serialize to `.cws`
//! files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Worksheet
//! ├── meta: WorksheetMetadata (version, author, title, timestamps)
//! ├── settings: CalcSettings (derivative step, intervals, reading speed, rows)
//! └── items: Vec<WorksheetItem> (id, label, request), in insertion order
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::CalculationRequest;
//! use calc_core::worksheet::Worksheet;
//!
//! let mut sheet = Worksheet::new("Ana", "Household budget");
//! sheet.add_item("Rent increase", CalculationRequest::Increase { value: 750.0, percentage: 3.0 });
//!
//! let outcomes = sheet.evaluate_all();
//! assert!(outcomes[0].outcome.is_ok());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculations::{evaluate, CalculationOutcome, CalculationRequest};
use crate::errors::CalcError;
use crate::settings::CalcSettings;

/// Current schema version for .cws files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// File extension for saved worksheets
pub const WORKSHEET_EXTENSION: &str = "cws";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    pub meta: WorksheetMetadata,

    /// Defaults applied to requests that leave tuning fields unset
    #[serde(default)]
    pub settings: CalcSettings,

    /// Calculation items in the order they were added
    pub items: Vec<WorksheetItem>,
}

/// A labelled request stored in a worksheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetItem {
    pub id: Uuid,
    pub label: String,
    pub request: CalculationRequest,
}

/// Result of evaluating one worksheet item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub id: Uuid,
    pub label: String,
    pub outcome: Result<CalculationOutcome, CalcError>,
}

impl Worksheet {
    /// Create a new empty worksheet.
    ///
    /// ```rust
    /// use calc_core::worksheet::Worksheet;
    ///
    /// let sheet = Worksheet::new("Ana", "Budget");
    /// assert_eq!(sheet.meta.author, "Ana");
    /// assert_eq!(sheet.item_count(), 0);
    /// ```
    pub fn new(author: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Worksheet {
            meta: WorksheetMetadata {
                version: SCHEMA_VERSION.to_string(),
                author: author.into(),
                title: title.into(),
                created: now,
                modified: now,
            },
            settings: CalcSettings::default(),
            items: Vec::new(),
        }
    }

    /// Append a request. Returns the UUID assigned to the item.
    pub fn add_item(&mut self, label: impl Into<String>, request: CalculationRequest) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(WorksheetItem {
            id,
            label: label.into(),
            request,
        });
        self.touch();
        id
    }

    /// Remove an item by UUID, returning it if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<WorksheetItem> {
        let index = self.items.iter().position(|item| item.id == *id)?;
        let item = self.items.remove(index);
        self.touch();
        Some(item)
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&WorksheetItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Evaluate every item with the worksheet settings.
    ///
    /// A failing item does not stop the batch; its error is reported in
    /// place of the outcome.
    pub fn evaluate_all(&self) -> Vec<ItemOutcome> {
        debug!(items = self.items.len(), title = %self.meta.title, "evaluating worksheet");
        self.items
            .iter()
            .map(|item| ItemOutcome {
                id: item.id,
                label: item.label.clone(),
                outcome: evaluate(&item.request, &self.settings),
            })
            .collect()
    }
}

impl Default for Worksheet {
    fn default() -> Self {
        Worksheet::new("", "")
    }
}

/// Worksheet metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub author: String,
    pub title: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worksheet_creation() {
        let sheet = Worksheet::new("Ana", "Budget");
        assert_eq!(sheet.meta.author, "Ana");
        assert_eq!(sheet.meta.title, "Budget");
        assert_eq!(sheet.meta.version, SCHEMA_VERSION);
        assert_eq!(sheet.settings, CalcSettings::default());
    }

    #[test]
    fn test_add_remove_item() {
        let mut sheet = Worksheet::new("Ana", "Budget");
        let id = sheet.add_item("Tip", CalculationRequest::PercentageOfNumber { percentage: 15.0, base: 80.0 });
        assert_eq!(sheet.item_count(), 1);
        assert_eq!(sheet.get_item(&id).unwrap().label, "Tip");

        let removed = sheet.remove_item(&id);
        assert!(removed.is_some());
        assert_eq!(sheet.item_count(), 0);
        assert!(sheet.remove_item(&id).is_none());
    }

    #[test]
    fn test_add_item_touches_modified() {
        let mut sheet = Worksheet::new("Ana", "Budget");
        let created = sheet.meta.modified;
        sheet.add_item("Grade", CalculationRequest::GradeScale { score: 18.0, max_score: 20.0 });
        assert!(sheet.meta.modified >= created);
    }

    #[test]
    fn test_evaluate_all_keeps_order_and_isolates_failures() {
        let mut sheet = Worksheet::new("Ana", "Mixed");
        sheet.add_item("ok", CalculationRequest::Increase { value: 100.0, percentage: 20.0 });
        sheet.add_item("bad", CalculationRequest::PercentageOf { x: 1.0, y: 0.0 });
        sheet.add_item("roman", CalculationRequest::ArabicToRoman { arabic: 2024 });

        let outcomes = sheet.evaluate_all();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].label, "ok");
        assert!(outcomes[0].outcome.is_ok());
        assert_eq!(outcomes[1].outcome.as_ref().unwrap_err().error_code(), "DIVISION_BY_ZERO");
        assert_eq!(outcomes[2].outcome.as_ref().unwrap().summary(), "2024 = MMXXIV");
    }

    #[test]
    fn test_worksheet_serialization() {
        let mut sheet = Worksheet::new("Ana", "Budget");
        sheet.add_item("Fuel", CalculationRequest::FuelCost {
            distance_km: 120.0,
            consumption_per_100km: 5.5,
            price_per_liter: 1.7,
        });
        let json = serde_json::to_string_pretty(&sheet).unwrap();
        assert!(json.contains("\"FuelCost\""));

        let roundtrip: Worksheet = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.item_count(), 1);
        assert_eq!(roundtrip.items[0].label, "Fuel");
    }
}
