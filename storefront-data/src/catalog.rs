use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;
use storefront_core::Pattern;
use thiserror::Error;

/// Errors that can occur when loading a pattern catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Duplicate pattern id {id} on row {row}")]
    DuplicateId { id: u32, row: usize },

    #[error("Pattern {id} on row {row} has an empty name")]
    EmptyName { id: u32, row: usize },
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        CatalogError::CsvParse(err.to_string())
    }
}

/// A single record from the pattern catalog CSV file.
///
/// - `id`: numeric pattern id as served by the pattern library
/// - `name`: display name
/// - `category`: category slug (e.g. `header`, `intro`, `footer`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PatternRecord {
    pub id: u32,
    pub name: String,
    pub category: String,
}

/// Patterns available to the assembler, keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternCatalog {
    patterns: BTreeMap<u32, Pattern>,
}

impl PatternCatalog {
    pub fn get(
        &self,
        id: u32,
    ) -> Option<&Pattern> {
        self.patterns.get(&id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.values()
    }
}

/// Loader for pattern catalog data from CSV files.
pub struct PatternCatalogLoader;

impl PatternCatalogLoader {
    /// Parse a catalog from a CSV reader.
    ///
    /// Whitespace around values is ignored. Row numbers in errors are
    /// 1-based, not counting the header.
    pub fn parse<R: Read>(reader: R) -> Result<PatternCatalog, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut catalog = PatternCatalog::default();

        for (idx, result) in csv_reader.deserialize().enumerate() {
            let record: PatternRecord = result?;
            let row = idx + 1;

            if record.name.is_empty() {
                return Err(CatalogError::EmptyName { id: record.id, row });
            }
            if catalog.patterns.contains_key(&record.id) {
                return Err(CatalogError::DuplicateId { id: record.id, row });
            }

            catalog.patterns.insert(
                record.id,
                Pattern::new(record.id, record.name, record.category),
            );
        }

        Ok(catalog)
    }
}
