//! Key-value persistence boundary for rate-table overrides
//!
//! The calculation functions never touch storage; a hosting application
//! injects whatever store its environment provides (browser storage, a
//! file, a database row) behind [`KvStore`] and moves tables across the
//! boundary here. A malformed stored table is logged and the built-in
//! defaults kept, never a failure.

use std::collections::HashMap;

use crate::tables::{import, RateTable, RateTables, TableKind};

/// Store key for the ARA override table
pub const ARA_KEY: &str = "care_ara";
/// Store key for the ERF override table
pub const ERF_KEY: &str = "care_erf";
/// Store key for the LRF override table
pub const LRF_KEY: &str = "care_lrf";

/// Minimal injected key-value store
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and the CLI
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

fn store_key(kind: TableKind) -> &'static str {
    match kind {
        TableKind::Ara => ARA_KEY,
        TableKind::Erf => ERF_KEY,
        TableKind::Lrf => LRF_KEY,
    }
}

/// Load the three tables, starting from the NHS defaults and replacing
/// each with its stored copy where one exists and parses.
pub fn load_rate_tables(store: &dyn KvStore) -> RateTables {
    let mut tables = RateTables::nhs_defaults();
    for kind in [TableKind::Ara, TableKind::Erf, TableKind::Lrf] {
        load_table(store, kind, tables.table_mut(kind));
    }
    tables
}

fn load_table(store: &dyn KvStore, kind: TableKind, table: &mut RateTable) {
    let Some(text) = store.get(store_key(kind)) else {
        return;
    };
    match import::parse_table_json(&text) {
        Ok(stored) => table.replace(stored),
        Err(err) => {
            log::warn!(
                "keeping default {} table, stored copy rejected: {}",
                kind.as_str(),
                err
            );
        }
    }
}

/// Persist all three tables under their store keys
pub fn save_rate_tables(store: &mut dyn KvStore, tables: &RateTables) {
    for kind in [TableKind::Ara, TableKind::Erf, TableKind::Lrf] {
        store.set(store_key(kind), &import::table_to_json(tables.table(kind)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entries_fall_back_to_defaults() {
        let store = MemoryStore::new();
        let tables = load_rate_tables(&store);

        assert_eq!(tables, RateTables::nhs_defaults());
    }

    #[test]
    fn test_stored_table_replaces_default() {
        let mut store = MemoryStore::new();
        store.set(ERF_KEY, r#"{"0": 1.0, "12": 0.9236}"#);

        let tables = load_rate_tables(&store);

        assert_eq!(tables.erf.floor(18), 0.9236);
        // Other tables untouched
        assert_eq!(tables.ara.rate(2023), 0.116);
    }

    #[test]
    fn test_malformed_stored_table_keeps_defaults() {
        let mut store = MemoryStore::new();
        store.set(ARA_KEY, "not json at all");
        store.set(LRF_KEY, r#"["wrong", "shape"]"#);

        let tables = load_rate_tables(&store);

        assert_eq!(tables.ara.rate(2023), 0.116);
        assert_eq!(tables.lrf.floor(12), 1.0);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut tables = RateTables::nhs_defaults();
        tables.erf.insert(12, 0.9236);
        tables.erf.insert(24, 0.8598);

        let mut store = MemoryStore::new();
        save_rate_tables(&mut store, &tables);
        let reloaded = load_rate_tables(&store);

        assert_eq!(reloaded, tables);
    }
}
