//! Comparison figures for IAM indicator tables
//!
//! Figures are described with a small, renderer-agnostic model ([`figure::Figure`]) that
//! serialises to plotly.js JSON. Rendering and image export are left to the consumer.
//!
//! - [`general`]: the shared model comparison panel and legend helpers
//! - [`figures`]: one figure per indicator

pub mod errors;
pub mod figure;
pub mod figures;
pub mod general;

pub use errors::{PlotError, PlotResult};
pub use figure::Figure;
pub use general::{add_legend_item, add_model_comparison, ComparisonOptions, GRIDCOLOR};
