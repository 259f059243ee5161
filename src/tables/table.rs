//! Sparse ordered rate table with floor lookup
//!
//! Government factor tables are published as step functions: a factor is
//! given at certain month breakpoints and holds constant until the next
//! one. `floor` models that directly. The same structure also backs the
//! ARA-by-year table, which only ever uses exact lookups.

use serde::{Deserialize, Serialize};

/// Sparse mapping from an integer key (scheme-year-end or whole months)
/// to a decimal rate or factor. Keys are unique and kept sorted so floor
/// lookups can binary search.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RateTable {
    entries: Vec<(i32, f64)>,
}

impl RateTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Build a table from key/value pairs; later duplicates win
    pub fn from_pairs<I: IntoIterator<Item = (i32, f64)>>(pairs: I) -> Self {
        let mut table = Self::new();
        for (key, value) in pairs {
            table.insert(key, value);
        }
        table
    }

    /// Exact-key lookup
    pub fn get(&self, key: i32) -> Option<f64> {
        self.entries
            .binary_search_by_key(&key, |&(k, _)| k)
            .ok()
            .map(|idx| self.entries[idx].1)
    }

    /// Exact-key rate lookup; a missing key means no revaluation (0.0)
    pub fn rate(&self, key: i32) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    /// Floor lookup: the value at the largest key less than or equal to
    /// `key`. Below every breakpoint, or on an empty table, the neutral
    /// factor 1.0 applies (no adjustment).
    pub fn floor(&self, key: i32) -> f64 {
        match self.entries.binary_search_by_key(&key, |&(k, _)| k) {
            Ok(idx) => self.entries[idx].1,
            Err(0) => 1.0,
            Err(idx) => self.entries[idx - 1].1,
        }
    }

    /// Insert or overwrite a key
    pub fn insert(&mut self, key: i32, value: f64) {
        match self.entries.binary_search_by_key(&key, |&(k, _)| k) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (key, value)),
        }
    }

    /// Remove a key; returns the value if it was present
    pub fn remove(&mut self, key: i32) -> Option<f64> {
        match self.entries.binary_search_by_key(&key, |&(k, _)| k) {
            Ok(idx) => Some(self.entries.remove(idx).1),
            Err(_) => None,
        }
    }

    /// Per-key merge: values from `override_table` win, keys present only
    /// in `self` survive.
    pub fn merged_with(&self, override_table: &RateTable) -> RateTable {
        let mut merged = self.clone();
        for &(key, value) in override_table.entries() {
            merged.insert(key, value);
        }
        merged
    }

    /// Wholesale substitution, used when a complete table is imported
    pub fn replace(&mut self, new_table: RateTable) {
        self.entries = new_table.entries;
    }

    /// Entries in ascending key order
    pub fn entries(&self) -> &[(i32, f64)] {
        &self.entries
    }

    /// Largest key in the table, if any
    pub fn last_key(&self) -> Option<i32> {
        self.entries.last().map(|&(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn erf_table() -> RateTable {
        RateTable::from_pairs([(0, 1.0), (12, 0.9236), (24, 0.8598)])
    }

    #[test]
    fn test_exact_rate_lookup() {
        let table = RateTable::from_pairs([(2023, 0.116), (2024, 0.082)]);

        assert_eq!(table.rate(2023), 0.116);
        assert_eq!(table.rate(2024), 0.082);
        // Missing year means no revaluation that year
        assert_eq!(table.rate(2025), 0.0);
    }

    #[test]
    fn test_floor_lookup_holds_until_next_breakpoint() {
        let table = erf_table();

        assert_eq!(table.floor(0), 1.0);
        assert_eq!(table.floor(11), 1.0);
        assert_eq!(table.floor(12), 0.9236);
        assert_eq!(table.floor(18), 0.9236);
        assert_eq!(table.floor(24), 0.8598);
        assert_eq!(table.floor(100), 0.8598);
    }

    #[test]
    fn test_floor_lookup_neutral_default() {
        let empty = RateTable::new();
        assert_eq!(empty.floor(36), 1.0);

        let sparse = RateTable::from_pairs([(12, 0.9236)]);
        // Below every published breakpoint, no adjustment applies
        assert_eq!(sparse.floor(5), 1.0);
    }

    #[test]
    fn test_insert_keeps_keys_sorted_and_unique() {
        let mut table = RateTable::new();
        table.insert(24, 0.8598);
        table.insert(0, 1.0);
        table.insert(12, 0.9);
        table.insert(12, 0.9236);

        assert_eq!(table.entries(), &[(0, 1.0), (12, 0.9236), (24, 0.8598)]);
    }

    #[test]
    fn test_merge_override_wins_per_key() {
        let base = RateTable::from_pairs([(2023, 0.116), (2024, 0.082)]);
        let override_table = RateTable::from_pairs([(2024, 0.09), (2025, 0.032)]);

        let merged = base.merged_with(&override_table);

        assert_eq!(merged.rate(2023), 0.116); // base fills gaps
        assert_eq!(merged.rate(2024), 0.09); // override wins
        assert_eq!(merged.rate(2025), 0.032);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut table = erf_table();
        table.replace(RateTable::from_pairs([(0, 1.0)]));

        assert_eq!(table.len(), 1);
        assert_eq!(table.floor(18), 1.0);
    }
}
