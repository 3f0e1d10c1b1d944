//! Core data structures for comparing integrated assessment model (IAM) scenarios.
//!
//! The crate is organised around three tables:
//!
//! - [`panel::Panel`]: the (Model, Scenario, Variable) × Year input panel
//! - [`meta::MetaTable`]: one row per model version, accumulating indicator columns
//! - [`models::ModelsTable`]: one row per model family, used for plotting order and colours
//!
//! Plus the [`preprocessing`] pipeline that turns raw records into a clean panel and the
//! [`stats`] helpers (quantiles, confidence ellipse) used by the figures.

pub mod config;
pub mod errors;
pub mod meta;
pub mod models;
pub mod panel;
pub mod preprocessing;
pub mod standard_variables;
pub mod stats;
pub mod units;

/// Floating point type used for all panel values
pub type FloatValue = f64;

/// Calendar year on the panel's year axis
pub type Year = i32;
