//! Configuration for preprocessing, scenario selection and plotting colours.
//!
//! Every struct implements [`Default`] with the values used for the diagnostic
//! (`diag-*`) scenario comparison and is `#[serde(default)]`, so a TOML file only has
//! to list the values it overrides.
//!
//! ```
//! use iamcompare_core::config::{from_toml_str, PreprocessConfig};
//!
//! let config: PreprocessConfig = from_toml_str(
//!     r#"
//!     only_world = true
//!
//!     [model_renames]
//!     "MESSAGE-GLOBIOM_1.0" = "MESSAGE-GLOBIOM 1.0"
//!     "#,
//! )
//! .unwrap();
//! assert!(config.only_world);
//! assert_eq!(config.start_year, 2010);
//! ```

use crate::errors::IamResult;
use crate::panel::YearAxis;
use crate::Year;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parse any configuration struct from a TOML string.
pub fn from_toml_str<T: DeserializeOwned>(input: &str) -> IamResult<T> {
    Ok(toml::from_str(input)?)
}

/// Options for turning raw records into a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// First year kept from the raw records.
    ///
    /// Default: 2010
    pub start_year: Year,

    /// Last year kept from the raw records (inclusive).
    ///
    /// Default: 2100
    pub end_year: Year,

    /// Spacing of the reported years.
    ///
    /// Default: 10 (decadal data)
    pub step: Year,

    /// Only keep rows of [`PreprocessConfig::world_region`].
    ///
    /// Default: false
    pub only_world: bool,

    /// Name of the global region.
    ///
    /// Default: "World"
    pub world_region: String,

    /// Lowercase all scenario names so that scenario lookups are case-insensitive.
    ///
    /// Default: true
    pub lowercase_scenarios: bool,

    /// Model names in the data that need renaming to match the model versions table.
    pub model_renames: BTreeMap<String, String>,

    /// Insert the intermediate 5-yearly steps.
    ///
    /// Default: true
    pub interpolate_missing_years: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            start_year: 2010,
            end_year: 2100,
            step: 10,
            only_world: false,
            world_region: "World".to_string(),
            lowercase_scenarios: true,
            model_renames: BTreeMap::new(),
            interpolate_missing_years: true,
        }
    }
}

impl PreprocessConfig {
    /// The reported (pre-interpolation) year axis
    pub fn year_axis(&self) -> IamResult<YearAxis> {
        YearAxis::regular(self.start_year, self.end_year, self.step)
    }
}

/// Names of the scenarios that are compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSet {
    /// Reference scenario without climate policy.
    ///
    /// Default: "diag-base"
    pub baseline: String,

    /// Stringent carbon price scenario.
    ///
    /// Default: "diag-c80-gr5"
    pub policy: String,

    /// Moderate carbon price scenario.
    ///
    /// Default: "diag-c30-gr5"
    pub weak_policy: String,
}

impl Default for ScenarioSet {
    fn default() -> Self {
        Self {
            baseline: "diag-base".to_string(),
            policy: "diag-c80-gr5".to_string(),
            weak_policy: "diag-c30-gr5".to_string(),
        }
    }
}

/// Colours assigned to model families, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new(colors: Vec<String>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour for the `i`-th model, wrapping around when the palette is exhausted.
    ///
    /// Returns `None` only for an empty palette.
    pub fn color(&self, i: usize) -> Option<&str> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[i % self.colors.len()].as_str())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            [
                "#0c2c84", "#bc7fcd", "#225ea8", "#1d91c0", "#41b6c4", "#86469c", "#7fcdbb",
                "#fbcfe8", "#ed66b2", "#c7e9b4", "#FF7F0E", "#BCBD22", "#FBE426", "#D62728",
                "#AF0033", "#E48F72", "#F89C74",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preprocess_config() {
        let config = PreprocessConfig::default();
        let axis = config.year_axis().unwrap();
        assert_eq!(axis.years().first(), Some(&2010));
        assert_eq!(axis.years().last(), Some(&2100));
        assert_eq!(axis.len(), 10);
        assert!(!config.only_world);
        assert!(config.lowercase_scenarios);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let scenarios: ScenarioSet = from_toml_str(r#"policy = "diag-c80-gr2""#).unwrap();
        assert_eq!(scenarios.policy, "diag-c80-gr2");
        assert_eq!(scenarios.baseline, "diag-base");
        assert_eq!(scenarios.weak_policy, "diag-c30-gr5");
    }

    #[test]
    fn test_invalid_toml() {
        let res: IamResult<ScenarioSet> = from_toml_str("policy = ");
        assert!(res.is_err());
    }

    #[test]
    fn test_palette_wraps() {
        let palette = Palette::new(vec!["#000".to_string(), "#fff".to_string()]);
        assert_eq!(palette.color(0), Some("#000"));
        assert_eq!(palette.color(3), Some("#fff"));
        assert_eq!(Palette::new(vec![]).color(0), None);
        assert_eq!(Palette::default().len(), 17);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = PreprocessConfig {
            only_world: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: PreprocessConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
