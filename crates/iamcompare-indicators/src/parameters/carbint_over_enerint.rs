//! Carbon and energy intensity parameters

use super::default_years;
use iamcompare_core::config::ScenarioSet;
use iamcompare_core::standard_variables::{VAR_CO2_FFI, VAR_FINAL_ENERGY};
use iamcompare_core::Year;
use serde::{Deserialize, Serialize};

/// Parameters for the carbon over energy intensity indicator.
///
/// Carbon intensity is emissions per unit of final energy, energy intensity is final energy
/// per unit of GDP:
///
/// $$CI = \frac{E_{CO2}}{FE}, \quad EI = \frac{FE}{GDP}$$
///
/// Both are compared between the policy and the baseline scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbonEnergyIntensityParameters {
    /// Years for which the indicator is calculated.
    ///
    /// Default: 2050, 2100
    pub years: Vec<Year>,

    /// Baseline and policy scenario names.
    pub scenarios: ScenarioSet,

    /// Emissions variable in the numerator of the carbon intensity.
    ///
    /// Default: CO2 from energy and industrial processes
    pub emissions_variable: String,

    /// Energy variable shared by both intensities.
    ///
    /// Default: "Final Energy"
    pub energy_variable: String,
}

impl Default for CarbonEnergyIntensityParameters {
    fn default() -> Self {
        Self {
            years: default_years(),
            scenarios: ScenarioSet::default(),
            emissions_variable: VAR_CO2_FFI.to_string(),
            energy_variable: VAR_FINAL_ENERGY.to_string(),
        }
    }
}
