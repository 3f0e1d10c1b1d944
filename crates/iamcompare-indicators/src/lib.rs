//! Comparative indicators for IAM scenario ensembles
//!
//! Each indicator reads values from the scenario [`Panel`] and adds columns to the
//! [`MetaTable`], one value per model version.
//!
//! # Indicators
//!
//! - [`carbint_over_enerint`]: carbon intensity vs energy intensity reduction (CoEI)
//! - [`cost_abat_value`]: policy cost relative to abatement (CAV)
//! - [`relative_abatement_index`]: emission reduction relative to baseline (RAI)
//! - [`fossil_fuel_reduction`]: primary energy decomposition and fossil fuel reduction (FFR)
//!
//! # Parameters
//!
//! Each indicator has an associated parameters struct in the [`parameters`] module with
//! defaults matching the diagnostic scenario comparison (`diag-base`, `diag-c30-gr5`,
//! `diag-c80-gr5` in 2050 and 2100).

use iamcompare_core::meta::MetaTable;
use iamcompare_core::panel::Panel;
use tracing::info;

pub mod carbint_over_enerint;
pub mod columns;
pub mod cost_abat_value;
pub mod errors;
pub mod fossil_fuel_reduction;
pub mod parameters;
pub mod relative_abatement_index;

pub use carbint_over_enerint::CarbonEnergyIntensity;
pub use cost_abat_value::CostAbatementValue;
pub use errors::{IndicatorError, IndicatorResult};
pub use fossil_fuel_reduction::FossilFuelReduction;
pub use relative_abatement_index::RelativeAbatementIndex;

/// An indicator that derives meta table columns from the scenario panel.
pub trait Indicator {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Add this indicator's columns to `meta`, returning the names of the created columns.
    fn create_columns(&self, panel: &Panel, meta: &mut MetaTable) -> IndicatorResult<Vec<String>>;
}

/// Apply an indicator to a copy of the meta table.
pub fn apply<I>(indicator: &I, panel: &Panel, meta: &MetaTable) -> IndicatorResult<MetaTable>
where
    I: Indicator + ?Sized,
{
    let mut new_meta = meta.clone();
    let created = indicator.create_columns(panel, &mut new_meta)?;
    info!(
        indicator = indicator.name(),
        columns = ?created,
        "Created columns"
    );
    Ok(new_meta)
}

/// Apply several indicators in order, each one seeing the columns of the previous ones.
pub fn apply_all(
    indicators: &[&dyn Indicator],
    panel: &Panel,
    meta: &MetaTable,
) -> IndicatorResult<MetaTable> {
    let mut current = meta.clone();
    for indicator in indicators {
        current = apply(*indicator, panel, &current)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iamcompare_core::meta::ModelVersion;
    use iamcompare_core::panel::YearAxis;
    use ndarray::array;

    struct Constant;

    impl Indicator for Constant {
        fn name(&self) -> &'static str {
            "Constant"
        }

        fn create_columns(
            &self,
            _panel: &Panel,
            meta: &mut MetaTable,
        ) -> IndicatorResult<Vec<String>> {
            meta.set_column("Constant", array![1.0])?;
            Ok(vec!["Constant".to_string()])
        }
    }

    #[test]
    fn test_apply_adds_columns_to_a_copy() {
        let panel = Panel::new(YearAxis::new(vec![2050]).unwrap());
        let meta = MetaTable::from_versions(vec![ModelVersion::new("M 1.0", "M", "Recursive", 1)]);

        let new_meta = apply(&Constant, &panel, &meta).unwrap();
        assert_eq!(new_meta.value("M 1.0", "Constant").unwrap(), Some(1.0));
        assert!(!meta.has_column("Constant"));

        let chained = apply_all(&[&Constant, &Constant], &panel, &meta).unwrap();
        assert_eq!(chained, new_meta);
    }
}
