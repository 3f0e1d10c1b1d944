//! Fossil fuel reduction (FFR)
//!
//! Reduction of fossil primary energy in the policy scenario relative to the baseline level
//! in a reference year. Alongside the indicator the policy scenario's primary energy mix is
//! copied into the meta table, which is what the stacked bar figure shows.

use crate::columns;
use crate::errors::IndicatorResult;
use crate::parameters::FossilFuelReductionParameters;
use crate::Indicator;
use iamcompare_core::meta::MetaTable;
use iamcompare_core::panel::Panel;
use iamcompare_core::{FloatValue, Year};
use ndarray::{Array1, Zip};

/// Primary energy carriers, as suffixes of `Primary Energy|`
pub const PRIMARY_ENERGY_SUFFIXES: [&str; 6] = [
    "Fossil|w/o CCS",
    "Fossil|w/ CCS",
    "Nuclear",
    "Biomass|w/o CCS",
    "Biomass|w/ CCS",
    "Non-Biomass Renewables",
];

/// Display labels for [`PRIMARY_ENERGY_SUFFIXES`]
pub const PRIMARY_ENERGY_LABELS: [&str; 6] = [
    "Fossil<br>w/o CCS",
    "Fossil<br>w. CCS",
    "Nuclear",
    "Biomass<br>w/o CCS",
    "Biomass<br>w. CCS",
    "Renewables",
];

/// Carriers that are split into a with and without CCS part
const CCS_FUELS: [&str; 2] = ["Fossil", "Biomass"];

/// Reduction of `variable` in `policy` at `year` relative to `baseline` at `reference_year`.
pub fn calc_fossil_fuel_reduction<S: AsRef<str>>(
    panel: &Panel,
    models: &[S],
    year: Year,
    reference_year: Year,
    variable: &str,
    policy: &str,
    baseline: &str,
) -> IndicatorResult<Array1<FloatValue>> {
    let reference = panel.aligned(models, baseline, variable, reference_year)?;
    let pol = panel.aligned(models, policy, variable, year)?;
    Ok((&reference - &pol) / &reference)
}

#[derive(Debug, Clone, Default)]
pub struct FossilFuelReduction {
    parameters: FossilFuelReductionParameters,
}

impl FossilFuelReduction {
    pub fn from_parameters(parameters: FossilFuelReductionParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &FossilFuelReductionParameters {
        &self.parameters
    }

    /// Copy the policy scenario's primary energy mix for `year` into the meta table.
    ///
    /// Models that do not split a fuel into a with and without CCS part get the fuel total
    /// in the "w/o CCS" column.
    fn create_energy_columns(
        &self,
        panel: &Panel,
        meta: &mut MetaTable,
        models: &[String],
        year: Year,
    ) -> IndicatorResult<Vec<String>> {
        let policy = self.parameters.scenarios.policy.as_str();
        let mut created = Vec::with_capacity(PRIMARY_ENERGY_SUFFIXES.len() + CCS_FUELS.len());

        for suffix in PRIMARY_ENERGY_SUFFIXES {
            let variable = format!("Primary Energy|{suffix}");
            let values = panel.aligned(models, policy, &variable, year)?;
            let column = columns::primary_energy(suffix, year);
            meta.set_column(&column, values)?;
            created.push(column);
        }

        for fuel in CCS_FUELS {
            let variable = format!("Primary Energy|{fuel}");
            let total = panel.aligned(models, policy, &variable, year)?;

            let with_ccs_column = columns::primary_energy(&format!("{fuel}|w/ CCS"), year);
            let with_ccs = meta.require_column(&with_ccs_column)?;
            let without_ccs_column = columns::primary_energy(&format!("{fuel}|w/o CCS"), year);
            let mut without_ccs = meta.require_column(&without_ccs_column)?.clone();
            Zip::from(&mut without_ccs)
                .and(with_ccs)
                .and(&total)
                .for_each(|without, &with, &fuel_total| {
                    if with.is_nan() {
                        *without = fuel_total;
                    }
                });
            meta.set_column(&without_ccs_column, without_ccs)?;

            let column = columns::primary_energy(fuel, year);
            meta.set_column(&column, total)?;
            created.push(column);
        }

        Ok(created)
    }
}

impl Indicator for FossilFuelReduction {
    fn name(&self) -> &'static str {
        "FFR"
    }

    fn create_columns(&self, panel: &Panel, meta: &mut MetaTable) -> IndicatorResult<Vec<String>> {
        let p = &self.parameters;
        let models: Vec<String> = meta.models().into_iter().map(String::from).collect();

        let mut created = Vec::new();
        for &year in &p.years {
            created.extend(self.create_energy_columns(panel, meta, &models, year)?);

            let ffr = calc_fossil_fuel_reduction(
                panel,
                &models,
                year,
                p.reference_year,
                &p.fossil_variable,
                &p.scenarios.policy,
                &p.scenarios.baseline,
            )?;
            let column = columns::ffr(year);
            meta.set_column(&column, ffr)?;
            created.push(column);
        }

        Ok(created)
    }
}
