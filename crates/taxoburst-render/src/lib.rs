#![forbid(unsafe_code)]

//! Headless sunburst layout for risk taxonomies.
//!
//! Pipeline: hierarchy → weighting → radial partition (full circle, then zoom re-layout when a
//! node is selected) → highlight classification → label layout. Search visibility is applied as a
//! final mask. Every stage is a pure function of (tree, config, selection, query, viewport).

pub mod chart;
pub mod config;
pub mod details;
pub mod hierarchy;
pub mod highlight;
pub mod label;
pub mod model;
pub mod partition;
pub mod search;
pub mod state;
pub mod svg;
pub mod text;
pub mod weight;

pub use chart::{BaseLayout, ViewState, layout_chart};
pub use config::ChartConfig;
pub use model::ChartLayout;
pub use state::ChartState;
pub use weight::WeightingPolicy;

use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use std::sync::Arc;
use taxoburst_core::TaxoburstConfig;

/// Violations of layout invariants. Under valid input these indicate a programming error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("selection `{key}` does not resolve to a top-level category")]
    UnresolvedSelection { key: String },
    #[error("children of `{node}` weigh {sum}, expected {expected}")]
    WeightInvariant {
        node: String,
        sum: f64,
        expected: f64,
    },
    #[error("children of `{node}` do not tile [{start}, {end})")]
    TilingInvariant { node: String, start: f64, end: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout invariant violated: {0}")]
    Layout(#[from] LayoutError),
    #[error("invalid chart configuration: {message}")]
    InvalidConfig { message: String },
    #[error(transparent)]
    Core(#[from] taxoburst_core::Error),
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub config: ChartConfig,
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        let config = ChartConfig::default();
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer {
                char_width_factor: config.label.char_width_factor,
                line_height_factor: 0.0,
            }),
            config,
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LayoutOptions {
    pub fn from_config(config: &TaxoburstConfig) -> Result<Self> {
        let config = ChartConfig::from_config(config)?;
        Ok(Self {
            text_measurer: Arc::new(DeterministicTextMeasurer {
                char_width_factor: config.label.char_width_factor,
                line_height_factor: 0.0,
            }),
            config,
        })
    }

    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.text_measurer = measurer;
        self
    }
}
