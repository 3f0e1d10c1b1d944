//! Carbon intensity over energy intensity (CoEI)
//!
//! Splits the emission reduction of the policy scenario into a part coming from
//! decarbonising energy (carbon intensity) and a part coming from using less energy per unit
//! of GDP (energy intensity). Reductions are expressed relative to the baseline:
//!
//! $$\Delta CI = 1 - \frac{CI_{pol}}{CI_{base}}, \quad \Delta EI = 1 - \frac{EI_{pol}}{EI_{base}}$$
//!
//! $$CoEI = \frac{\Delta CI}{\Delta CI + \Delta EI}$$

use crate::columns;
use crate::errors::IndicatorResult;
use crate::parameters::CarbonEnergyIntensityParameters;
use crate::Indicator;
use iamcompare_core::meta::{MetaTable, MetricColumn};
use iamcompare_core::panel::Panel;
use iamcompare_core::{FloatValue, Year};
use ndarray::Array1;

/// Carbon and energy intensity of a scenario, aligned with the meta table rows
#[derive(Debug, Clone, PartialEq)]
pub struct Intensities {
    pub carbon: Array1<FloatValue>,
    pub energy: Array1<FloatValue>,
}

#[derive(Debug, Clone, Default)]
pub struct CarbonEnergyIntensity {
    parameters: CarbonEnergyIntensityParameters,
}

impl CarbonEnergyIntensity {
    pub fn from_parameters(parameters: CarbonEnergyIntensityParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &CarbonEnergyIntensityParameters {
        &self.parameters
    }

    /// Carbon and energy intensity for one scenario and year.
    ///
    /// Stores the GDP used (`GDP {year} {scenario}`) in the meta table as a side product.
    pub fn intensities(
        &self,
        panel: &Panel,
        meta: &mut MetaTable,
        year: Year,
        scenario: &str,
    ) -> IndicatorResult<Intensities> {
        let gdp_column = columns::gdp(year, scenario);
        meta.set_value_from_var_column(
            panel,
            MetricColumn::GdpMetric,
            &gdp_column,
            year,
            scenario,
        )?;

        let models = meta.models();
        let emissions =
            panel.aligned(&models, scenario, &self.parameters.emissions_variable, year)?;
        let energy = panel.aligned(&models, scenario, &self.parameters.energy_variable, year)?;
        let gdp = meta.require_column(&gdp_column)?;

        Ok(Intensities {
            carbon: &emissions / &energy,
            energy: &energy / gdp,
        })
    }

    /// Policy intensities divided by the baseline intensities.
    pub fn normalised_intensities(
        &self,
        panel: &Panel,
        meta: &mut MetaTable,
        year: Year,
    ) -> IndicatorResult<Intensities> {
        let scenarios = &self.parameters.scenarios;
        let policy = self.intensities(panel, meta, year, &scenarios.policy)?;
        let baseline = self.intensities(panel, meta, year, &scenarios.baseline)?;
        Ok(Intensities {
            carbon: &policy.carbon / &baseline.carbon,
            energy: &policy.energy / &baseline.energy,
        })
    }
}

impl Indicator for CarbonEnergyIntensity {
    fn name(&self) -> &'static str {
        "CoEI"
    }

    fn create_columns(&self, panel: &Panel, meta: &mut MetaTable) -> IndicatorResult<Vec<String>> {
        let mut created = Vec::new();

        for &year in &self.parameters.years {
            let ratios = self.normalised_intensities(panel, meta, year)?;
            let carbon_reduction = 1.0 - &ratios.carbon;
            let energy_reduction = 1.0 - &ratios.energy;
            let coei = &carbon_reduction / &(&carbon_reduction + &energy_reduction);

            let col_ci = columns::carbon_intensity(year);
            let col_ei = columns::energy_intensity(year);
            let col_coei = columns::coei(year);
            meta.set_column(&col_ci, carbon_reduction)?;
            meta.set_column(&col_ei, energy_reduction)?;
            meta.set_column(&col_coei, coei)?;
            created.extend([col_ci, col_ei, col_coei]);
        }

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use iamcompare_core::meta::ModelVersion;
    use iamcompare_core::panel::{PanelRow, YearAxis};
    use iamcompare_core::standard_variables::{VAR_CO2_FFI, VAR_FINAL_ENERGY};
    use ndarray::array;

    fn row(model: &str, scenario: &str, variable: &str, value: FloatValue) -> PanelRow {
        PanelRow::new(model, scenario, "World", variable, "", array![value])
    }

    fn setup() -> (Panel, MetaTable) {
        let panel = Panel::with_rows(
            YearAxis::new(vec![2050]).unwrap(),
            vec![
                row("M1", "diag-base", VAR_CO2_FFI, 40000.0),
                row("M1", "diag-base", VAR_FINAL_ENERGY, 500.0),
                row("M1", "diag-base", "GDP|PPP", 250.0),
                row("M1", "diag-c80-gr5", VAR_CO2_FFI, 10000.0),
                row("M1", "diag-c80-gr5", VAR_FINAL_ENERGY, 400.0),
                row("M1", "diag-c80-gr5", "GDP|PPP", 240.0),
            ],
        )
        .unwrap();
        let meta = MetaTable::from_versions(vec![
            ModelVersion::new("M1", "M", "Recursive", 1).with_gdp_metric("GDP|PPP"),
            ModelVersion::new("M2", "N", "Recursive", 1).with_gdp_metric("GDP|PPP"),
        ]);
        (panel, meta)
    }

    #[test]
    fn test_intensities() {
        let (panel, mut meta) = setup();
        let indicator = CarbonEnergyIntensity::default();
        let base = indicator
            .intensities(&panel, &mut meta, 2050, "diag-base")
            .unwrap();
        assert_relative_eq!(base.carbon[0], 80.0);
        assert_relative_eq!(base.energy[0], 2.0);
        // No data for the second model
        assert!(base.carbon[1].is_nan());
        assert!(meta.has_column("GDP 2050 diag-base"));
    }

    #[test]
    fn test_create_columns() {
        let (panel, mut meta) = setup();
        let created = CarbonEnergyIntensity::default()
            .create_columns(&panel, &mut meta)
            .unwrap_err();
        // 2100 is not on the test panel's axis
        assert!(created.to_string().contains("2100"));

        let indicator = CarbonEnergyIntensity::from_parameters(CarbonEnergyIntensityParameters {
            years: vec![2050],
            ..Default::default()
        });
        let created = indicator.create_columns(&panel, &mut meta).unwrap();
        assert_eq!(
            created,
            vec!["Carbon intensity 2050", "Energy intensity 2050", "CoEI 2050"]
        );

        // CI: 25 / 80, EI: (400/240) / 2
        let ci_reduction = 1.0 - 25.0 / 80.0;
        let ei_reduction = 1.0 - (400.0 / 240.0) / 2.0;
        assert_relative_eq!(
            meta.value("M1", "Carbon intensity 2050").unwrap().unwrap(),
            ci_reduction
        );
        assert_relative_eq!(
            meta.value("M1", "Energy intensity 2050").unwrap().unwrap(),
            ei_reduction
        );
        assert_relative_eq!(
            meta.value("M1", "CoEI 2050").unwrap().unwrap(),
            ci_reduction / (ci_reduction + ei_reduction)
        );
        assert_eq!(meta.value("M2", "CoEI 2050").unwrap(), None);
    }
}
