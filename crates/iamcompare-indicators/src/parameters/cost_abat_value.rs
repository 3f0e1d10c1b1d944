//! Cost-abatement value parameters

use iamcompare_core::config::ScenarioSet;
use iamcompare_core::{FloatValue, Year};
use serde::{Deserialize, Serialize};

/// Carbon price used to value the abatement in a given year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbonPricePoint {
    pub year: Year,
    /// Carbon price (2010$/t CO2)
    pub price: FloatValue,
}

/// Parameters for the cost-abatement value (CAV).
///
/// The CAV compares the policy cost with the value of the abated emissions at a fixed
/// carbon price:
///
/// $$CAV = \frac{cost}{(E_{base} - E_{pol}) \cdot p_{CO2}}$$
///
/// with emissions in Gt CO2/yr. Values outside the plausible range are treated as
/// reporting errors and removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostAbatementParameters {
    /// Years and the carbon price used for each.
    ///
    /// Default: 130.3 in 2050, 1441.3 in 2100
    pub carbon_prices: Vec<CarbonPricePoint>,

    /// Baseline and policy scenario names.
    pub scenarios: ScenarioSet,

    /// Smallest plausible CAV.
    ///
    /// Default: 0.0
    pub min_cav: FloatValue,

    /// Largest plausible CAV.
    ///
    /// Default: 2.5
    pub max_cav: FloatValue,

    /// Largest plausible policy cost as a fraction of GDP.
    ///
    /// Default: 0.15
    pub max_cost_per_gdp: FloatValue,

    /// Largest plausible absolute policy cost (billion US$2010/yr).
    ///
    /// Default: 50000
    pub max_cost: FloatValue,
}

impl Default for CostAbatementParameters {
    fn default() -> Self {
        Self {
            carbon_prices: vec![
                CarbonPricePoint {
                    year: 2050,
                    price: 130.3,
                },
                CarbonPricePoint {
                    year: 2100,
                    price: 1441.3,
                },
            ],
            scenarios: ScenarioSet::default(),
            min_cav: 0.0,
            max_cav: 2.5,
            max_cost_per_gdp: 0.15,
            max_cost: 50000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = CostAbatementParameters::default();
        assert_eq!(params.carbon_prices.len(), 2);
        assert!(params.carbon_prices.iter().all(|p| p.price > 0.0));
        assert!(params.min_cav < params.max_cav);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let params = CostAbatementParameters::default();
        let json = serde_json::to_string(&params).unwrap();
        let restored: CostAbatementParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, restored);
    }
}
