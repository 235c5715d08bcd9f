#![forbid(unsafe_code)]

//! AI-safety risk taxonomy model (headless).
//!
//! Turns the flat CSV export into an immutable Category → Subcategory → Item tree with
//! per-framework coverage statistics. Layout and rendering live in `taxoburst-render`.

pub mod builder;
pub mod config;
pub mod csv;
pub mod error;
pub mod model;

pub use builder::TreeBuilder;
pub use config::TaxoburstConfig;
pub use csv::{RawRecord, parse_records, split_csv_line};
pub use error::{Error, Result};
pub use model::{
    Category, Coverage, Framework, FrameworkSet, Item, NodeKey, NodeRef, Subcategory,
    TaxonomyTree, item_id,
};

use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: TaxoburstConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: TaxoburstConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TaxoburstConfig {
        &self.config
    }

    /// Parses CSV text into a tree. Fails with [`Error::DataEmpty`] when no row survives
    /// validation.
    pub fn parse_taxonomy_sync(&self, text: &str) -> Result<TaxonomyTree> {
        let records = parse_records(text);
        TreeBuilder::from_config(&self.config).build(records)
    }

    pub async fn parse_taxonomy(&self, text: &str) -> Result<TaxonomyTree> {
        self.parse_taxonomy_sync(text)
    }

    /// One-shot load of the CSV file. I/O failures surface as [`Error::DataFetchFailed`]; there
    /// is no retry since the source is a static file.
    pub fn load_taxonomy_sync(&self, path: impl AsRef<Path>) -> Result<TaxonomyTree> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::DataFetchFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded taxonomy source");
        self.parse_taxonomy_sync(&text)
    }

    pub async fn load_taxonomy(&self, path: impl AsRef<Path>) -> Result<TaxonomyTree> {
        self.load_taxonomy_sync(path)
    }
}

#[cfg(test)]
mod tests;
