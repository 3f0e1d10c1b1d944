//! Standard IAM variable names used by the indicators.
//!
//! Variable names follow the IAMC convention using `|` as a hierarchical separator:
//! - `Emissions|CO2|Energy and Industrial Processes` - fossil fuel and industrial CO2
//! - `Primary Energy|Fossil|w/ CCS` - fossil primary energy with carbon capture
//!
//! GDP, policy cost and the emissions used for the cost-abatement value differ between
//! models, so they are not listed here; the variable name for those is read per model
//! from the meta table (see [`crate::meta::MetricColumn`]).

// ============================================================================
// Emissions
// ============================================================================

/// CO2 emissions from fossil fuels and industry (CO2 FFI), Mt CO2/yr
pub const VAR_CO2_FFI: &str = "Emissions|CO2|Energy and Industrial Processes";

/// Total Kyoto gases, Mt CO2-equiv/yr
pub const VAR_KYOTO_GASES: &str = "Emissions|Kyoto Gases";

// ============================================================================
// Energy
// ============================================================================

/// Final energy, EJ/yr
pub const VAR_FINAL_ENERGY: &str = "Final Energy";

/// Total primary energy, EJ/yr
pub const VAR_PRIMARY_ENERGY: &str = "Primary Energy";

/// Fossil primary energy (with and without CCS), EJ/yr
pub const VAR_PRIMARY_ENERGY_FOSSIL: &str = "Primary Energy|Fossil";

/// Biomass primary energy (with and without CCS), EJ/yr
pub const VAR_PRIMARY_ENERGY_BIOMASS: &str = "Primary Energy|Biomass";

// ============================================================================
// Prices
// ============================================================================

/// Carbon price, 2010$/t CO2
pub const VAR_CARBON_PRICE: &str = "Price|Carbon";

// ============================================================================
// Units
// ============================================================================

/// Unit label of emission rows reported in kilotonnes
pub const UNIT_KT: &str = "Kt";

/// Unit label assigned to emission rows after conversion from kilotonnes
pub const UNIT_MT_CO2_PER_YEAR: &str = "Mt CO2/yr";
