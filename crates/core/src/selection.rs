//! Row selection over the currently displayed page of a table.
//!
//! Selection is transient client state keyed by [`RecordKey`]. Which
//! gesture toggles a row is a per-table [`TogglePolicy`].

use std::collections::BTreeSet;

use crate::models::Record;
use crate::types::RecordKey;

/// Gesture that toggles a row's selection in a given table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TogglePolicy {
    /// Plain clicks are ignored; Alt+Click toggles.
    AltClick,
    /// Double-click toggles.
    DoubleClick,
}

impl TogglePolicy {
    /// Hint shown next to the selection menu.
    pub fn hint(self) -> &'static str {
        match self {
            Self::AltClick => "Select with Alt + Click",
            Self::DoubleClick => "Select with double-click",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    keys: BTreeSet<RecordKey>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `key`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, key: &RecordKey) -> bool {
        if self.keys.remove(key) {
            false
        } else {
            self.keys.insert(key.clone());
            true
        }
    }

    /// Replace the selection with every row currently rendered.
    pub fn select_all_visible(&mut self, rows: &[Record]) {
        self.keys = rows.iter().map(|r| r.key.clone()).collect();
    }

    /// Select none.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, key: &RecordKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Selected keys in stable order, ready for a bulk request body.
    pub fn keys(&self) -> Vec<RecordKey> {
        self.keys.iter().cloned().collect()
    }
}

impl FromIterator<RecordKey> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = RecordKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
