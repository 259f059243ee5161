//! Rate tables: annual revaluation amounts and early/late retirement factors

mod table;
pub mod import;

pub use import::{parse_table_json, table_to_json, TableImportError};
pub use table::RateTable;

/// Which of the three scheme tables an import or store key refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Annual Revaluation Amount by scheme-year-end
    Ara,
    /// Early Retirement Factor by whole months before NPA
    Erf,
    /// Late Retirement Factor by whole months past NPA
    Lrf,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Ara => "ARA",
            TableKind::Erf => "ERF",
            TableKind::Lrf => "LRF",
        }
    }
}

/// Container for the three sparse scheme tables
#[derive(Debug, Clone, PartialEq)]
pub struct RateTables {
    pub ara: RateTable,
    pub erf: RateTable,
    pub lrf: RateTable,
}

impl RateTables {
    /// NHS 2015-scheme defaults: published ARA for scheme years ending
    /// 2016-2025, and neutral single-breakpoint factor tables.
    pub fn nhs_defaults() -> Self {
        Self {
            ara: RateTable::from_pairs([
                (2016, 0.014),
                (2017, 0.025),
                (2018, 0.045),
                (2019, 0.039),
                (2020, 0.032),
                (2021, 0.020),
                (2022, 0.046),
                (2023, 0.116),
                (2024, 0.082),
                (2025, 0.032),
            ]),
            erf: RateTable::from_pairs([(0, 1.0)]),
            lrf: RateTable::from_pairs([(0, 1.0)]),
        }
    }

    /// Empty tables: zero revaluation, neutral factors everywhere
    pub fn empty() -> Self {
        Self {
            ara: RateTable::new(),
            erf: RateTable::new(),
            lrf: RateTable::new(),
        }
    }

    pub fn table(&self, kind: TableKind) -> &RateTable {
        match kind {
            TableKind::Ara => &self.ara,
            TableKind::Erf => &self.erf,
            TableKind::Lrf => &self.lrf,
        }
    }

    pub fn table_mut(&mut self, kind: TableKind) -> &mut RateTable {
        match kind {
            TableKind::Ara => &mut self.ara,
            TableKind::Erf => &mut self.erf,
            TableKind::Lrf => &mut self.lrf,
        }
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::nhs_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nhs_defaults_seeded() {
        let tables = RateTables::nhs_defaults();

        assert_eq!(tables.ara.rate(2023), 0.116);
        assert_eq!(tables.ara.rate(2025), 0.032);
        assert_eq!(tables.ara.rate(2026), 0.0); // not yet published
        assert_eq!(tables.erf.floor(60), 1.0);
        assert_eq!(tables.lrf.floor(60), 1.0);
    }

    #[test]
    fn test_kind_routing() {
        let mut tables = RateTables::empty();
        tables.table_mut(TableKind::Erf).insert(12, 0.9236);

        assert_eq!(tables.table(TableKind::Erf).floor(14), 0.9236);
        assert!(tables.table(TableKind::Lrf).is_empty());
    }
}
