//! Relative abatement index parameters

use super::default_years;
use iamcompare_core::standard_variables::{VAR_CARBON_PRICE, VAR_CO2_FFI, VAR_KYOTO_GASES};
use iamcompare_core::Year;
use serde::{Deserialize, Serialize};

/// A policy scenario and the short tag used in column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyScenario {
    /// e.g. "c80"
    pub tag: String,
    /// e.g. "diag-c80-gr5"
    pub scenario: String,
}

impl PolicyScenario {
    pub fn new(tag: impl Into<String>, scenario: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            scenario: scenario.into(),
        }
    }
}

/// An emissions variable and its label in column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbatementVariable {
    pub variable: String,
    pub label: String,
}

impl AbatementVariable {
    pub fn new(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            label: label.into(),
        }
    }
}

/// Parameters for the relative abatement index (RAI).
///
/// $$RAI = \frac{E_{base} - E_{pol}}{E_{base}}$$
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelativeAbatementParameters {
    /// Years for which the indicator is calculated.
    ///
    /// Default: 2050, 2100
    pub years: Vec<Year>,

    /// Reference scenario.
    ///
    /// Default: "diag-base"
    pub baseline: String,

    /// Policy scenarios compared against the baseline.
    ///
    /// Default: c30 (diag-c30-gr5) and c80 (diag-c80-gr5)
    pub policies: Vec<PolicyScenario>,

    /// Emission variables for which an index is calculated.
    ///
    /// Default: CO2 FFI and Kyoto gases
    pub variables: Vec<AbatementVariable>,

    /// Carbon price variable reported next to the index.
    ///
    /// Default: "Price|Carbon"
    pub carbon_price_variable: String,
}

impl Default for RelativeAbatementParameters {
    fn default() -> Self {
        Self {
            years: default_years(),
            baseline: "diag-base".to_string(),
            policies: vec![
                PolicyScenario::new("c30", "diag-c30-gr5"),
                PolicyScenario::new("c80", "diag-c80-gr5"),
            ],
            variables: vec![
                AbatementVariable::new(VAR_CO2_FFI, "CO2 FFI"),
                AbatementVariable::new(VAR_KYOTO_GASES, "Kyoto"),
            ],
            carbon_price_variable: VAR_CARBON_PRICE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = RelativeAbatementParameters::default();
        let tags: Vec<&str> = params.policies.iter().map(|p| p.tag.as_str()).collect();
        assert_eq!(tags, vec!["c30", "c80"]);
        assert_eq!(params.variables[0].label, "CO2 FFI");
        assert_eq!(params.variables[1].variable, "Emissions|Kyoto Gases");
    }

    #[test]
    fn test_toml_override() {
        let params: RelativeAbatementParameters = toml::from_str(
            r#"
            years = [2030]

            [[variables]]
            variable = "Emissions|CO2"
            label = "CO2"
            "#,
        )
        .unwrap();
        assert_eq!(params.years, vec![2030]);
        assert_eq!(params.variables.len(), 1);
        assert_eq!(params.policies.len(), 2);
    }
}
