//! Indicator parameters
//!
//! Each parameter struct provides defaults matching the diagnostic scenario comparison
//! and can be partially overridden from configuration files (`#[serde(default)]`).

mod carbint_over_enerint;
mod cost_abat_value;
mod fossil_fuel_reduction;
mod relative_abatement_index;

pub use carbint_over_enerint::CarbonEnergyIntensityParameters;
pub use cost_abat_value::{CarbonPricePoint, CostAbatementParameters};
pub use fossil_fuel_reduction::FossilFuelReductionParameters;
pub use relative_abatement_index::{
    AbatementVariable, PolicyScenario, RelativeAbatementParameters,
};

use iamcompare_core::Year;

/// Years reported by default for every indicator
pub(crate) fn default_years() -> Vec<Year> {
    vec![2050, 2100]
}
