//! Comparison of integrated assessment model (IAM) scenario ensembles.
//!
//! The workspace is split into three crates which are re-exported here:
//!
//! - [`core`]: the scenario panel, preprocessing, the meta and models tables and statistics
//! - [`indicators`]: the CoEI, CAV, RAI and FFR indicators
//! - [`plot`]: figure descriptions that serialise to plotly JSON
//!
//! [`AnalysisConfig`] bundles the configuration of all three so that an analysis can be
//! described by a single TOML file.

pub use iamcompare_core as core;
pub use iamcompare_indicators as indicators;
pub use iamcompare_plot as plot;

use iamcompare_core::config::{Palette, PreprocessConfig, ScenarioSet};
use iamcompare_core::errors::{IamError, IamResult};
use iamcompare_core::meta::MetaTable;
use iamcompare_core::models::ModelsTable;
use iamcompare_core::panel::Panel;
use iamcompare_core::Year;
use iamcompare_indicators::parameters::{
    CarbonEnergyIntensityParameters, CostAbatementParameters, FossilFuelReductionParameters,
    RelativeAbatementParameters,
};
use iamcompare_indicators::{
    apply_all, CarbonEnergyIntensity, CostAbatementValue, FossilFuelReduction, Indicator,
    IndicatorResult, RelativeAbatementIndex,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configuration of a complete analysis.
///
/// `scenarios` and `years` are shared by every indicator and replace the values in the
/// indicator tables. The CAV years follow its carbon prices instead.
///
/// ```
/// use iamcompare::AnalysisConfig;
///
/// let config = AnalysisConfig::from_toml_str(
///     r#"
///     years = [2030, 2050]
///
///     [preprocess]
///     only_world = true
///
///     [cost_abatement]
///     max_cav = 3.0
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.carbon_energy_intensity().years, vec![2030, 2050]);
/// assert_eq!(config.cost_abatement.max_cav, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub preprocess: PreprocessConfig,

    /// Baseline and policy scenarios.
    pub scenarios: ScenarioSet,

    /// Years for which the indicators are calculated.
    ///
    /// Default: 2050, 2100
    pub years: Vec<Year>,

    /// Colours of the model families.
    pub palette: Palette,

    pub carbon_energy_intensity: CarbonEnergyIntensityParameters,
    pub cost_abatement: CostAbatementParameters,
    pub relative_abatement: RelativeAbatementParameters,
    pub fossil_fuel_reduction: FossilFuelReductionParameters,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            scenarios: ScenarioSet::default(),
            years: vec![2050, 2100],
            palette: Palette::default(),
            carbon_energy_intensity: CarbonEnergyIntensityParameters::default(),
            cost_abatement: CostAbatementParameters::default(),
            relative_abatement: RelativeAbatementParameters::default(),
            fossil_fuel_reduction: FossilFuelReductionParameters::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(input: &str) -> IamResult<Self> {
        let config: Self = iamcompare_core::config::from_toml_str(input)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> IamResult<()> {
        if self.years.is_empty() {
            return Err(IamError::InvalidConfig("no years selected".to_string()));
        }
        if self.palette.is_empty() {
            return Err(IamError::InvalidConfig("the palette has no colours".to_string()));
        }
        if self.preprocess.start_year > self.preprocess.end_year {
            return Err(IamError::InvalidConfig(format!(
                "start_year {} is after end_year {}",
                self.preprocess.start_year, self.preprocess.end_year
            )));
        }
        Ok(())
    }

    pub fn carbon_energy_intensity(&self) -> CarbonEnergyIntensityParameters {
        CarbonEnergyIntensityParameters {
            years: self.years.clone(),
            scenarios: self.scenarios.clone(),
            ..self.carbon_energy_intensity.clone()
        }
    }

    pub fn cost_abatement(&self) -> CostAbatementParameters {
        CostAbatementParameters {
            scenarios: self.scenarios.clone(),
            ..self.cost_abatement.clone()
        }
    }

    /// The policy scenarios keep their tags, only the baseline is shared.
    pub fn relative_abatement(&self) -> RelativeAbatementParameters {
        RelativeAbatementParameters {
            years: self.years.clone(),
            baseline: self.scenarios.baseline.clone(),
            ..self.relative_abatement.clone()
        }
    }

    pub fn fossil_fuel_reduction(&self) -> FossilFuelReductionParameters {
        FossilFuelReductionParameters {
            years: self.years.clone(),
            scenarios: self.scenarios.clone(),
            ..self.fossil_fuel_reduction.clone()
        }
    }

    /// Calculate every indicator, in the order CoEI, CAV, RAI, FFR.
    ///
    /// CAV reuses the GDP columns written by CoEI.
    pub fn apply_indicators(&self, panel: &Panel, meta: &MetaTable) -> IndicatorResult<MetaTable> {
        let coei = CarbonEnergyIntensity::from_parameters(self.carbon_energy_intensity());
        let cav = CostAbatementValue::from_parameters(self.cost_abatement());
        let rai = RelativeAbatementIndex::from_parameters(self.relative_abatement());
        let ffr = FossilFuelReduction::from_parameters(self.fossil_fuel_reduction());
        let indicators: [&dyn Indicator; 4] = [&coei, &cav, &rai, &ffr];

        let meta = apply_all(&indicators, panel, meta)?;
        info!(
            models = meta.len(),
            columns = meta.column_names().len(),
            "Calculated indicators"
        );
        Ok(meta)
    }

    pub fn models_table(&self, meta: &MetaTable) -> ModelsTable {
        ModelsTable::create(meta, &self.palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.years, vec![2050, 2100]);
        assert_eq!(config.scenarios.policy, "diag-c80-gr5");
        assert_eq!(config.cost_abatement().carbon_prices.len(), 2);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_shared_settings() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            years = [2100]

            [scenarios]
            baseline = "npi"

            [fossil_fuel_reduction]
            reference_year = 2010
            "#,
        )
        .unwrap();

        let ffr = config.fossil_fuel_reduction();
        assert_eq!(ffr.years, vec![2100]);
        assert_eq!(ffr.scenarios.baseline, "npi");
        assert_eq!(ffr.reference_year, 2010);
        // Only the shared baseline changes for RAI
        let rai = config.relative_abatement();
        assert_eq!(rai.baseline, "npi");
        assert_eq!(rai.policies[1].scenario, "diag-c80-gr5");
        assert_eq!(config.cost_abatement().scenarios.policy, "diag-c80-gr5");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            AnalysisConfig::from_toml_str("years = []"),
            Err(IamError::InvalidConfig(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("palette = []"),
            Err(IamError::InvalidConfig(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("years = 2050"),
            Err(IamError::ConfigParse(_))
        ));
    }
}
