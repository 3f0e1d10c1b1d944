//! Fossil fuel reduction parameters

use super::default_years;
use iamcompare_core::config::ScenarioSet;
use iamcompare_core::standard_variables::VAR_PRIMARY_ENERGY_FOSSIL;
use iamcompare_core::Year;
use serde::{Deserialize, Serialize};

/// Parameters for the fossil fuel reduction (FFR).
///
/// $$FFR = \frac{PE_{fossil}^{base}(t_{ref}) - PE_{fossil}^{pol}(t)}{PE_{fossil}^{base}(t_{ref})}$$
///
/// i.e. the reduction of fossil primary energy in the policy scenario relative to the
/// baseline level in the reference year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FossilFuelReductionParameters {
    /// Years for which the indicator is calculated.
    ///
    /// Default: 2050, 2100
    pub years: Vec<Year>,

    /// Baseline and policy scenario names.
    pub scenarios: ScenarioSet,

    /// Baseline year the reduction is measured against.
    ///
    /// Default: 2020
    pub reference_year: Year,

    /// Fossil primary energy variable.
    ///
    /// Default: "Primary Energy|Fossil"
    pub fossil_variable: String,
}

impl Default for FossilFuelReductionParameters {
    fn default() -> Self {
        Self {
            years: default_years(),
            scenarios: ScenarioSet::default(),
            reference_year: 2020,
            fossil_variable: VAR_PRIMARY_ENERGY_FOSSIL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = FossilFuelReductionParameters::default();
        assert_eq!(params.reference_year, 2020);
        assert!(params.years.iter().all(|y| *y > params.reference_year));
    }
}
