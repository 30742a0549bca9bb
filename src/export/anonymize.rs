use crate::convert::Row;
use crate::metric::CellValue;
use std::cell::RefCell;
use std::collections::HashMap;

/// Rewrites identifying content before serialization.
///
/// Notes are dropped outright. Every distinct text value maps to a stable
/// positional placeholder, so the anonymized tables keep their correlation
/// structure without leaking the original labels. In blank-values mode every
/// metric cell is emptied instead.
#[derive(Debug, Default)]
pub struct Anonymizer {
    blank_values: bool,

    // Shared across categories so the same label anonymizes identically
    // wherever it appears.
    replacements: RefCell<HashMap<String, String>>,
}

impl Anonymizer {
    #[must_use]
    pub fn new(blank_values: bool) -> Self {
        Self {
            blank_values,
            replacements: RefCell::new(HashMap::new()),
        }
    }

    /// Produce the anonymized copy of one row.
    #[must_use]
    pub fn apply(&self, _category: &str, row: &Row) -> Row {
        let mut out = row.clone();
        out.notes = None;

        for value in out.cells.values_mut() {
            if self.blank_values {
                *value = CellValue::Absent;
            } else if let CellValue::Text(text) = value {
                *text = self.replacement_for(text);
            }
        }

        out
    }

    fn replacement_for(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut map = self.replacements.borrow_mut();
        let next = map.len() + 1;
        map.entry(text.to_string()).or_insert_with(|| format!("Entry {next}")).clone()
    }
}
