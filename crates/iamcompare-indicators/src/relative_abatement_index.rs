//! Relative abatement index (RAI)
//!
//! Emission reduction of a policy scenario relative to the baseline emissions in the same
//! year. The carbon price of each policy scenario is stored next to the index so the two can
//! be plotted against each other.

use crate::columns;
use crate::errors::IndicatorResult;
use crate::parameters::{PolicyScenario, RelativeAbatementParameters};
use crate::Indicator;
use iamcompare_core::meta::MetaTable;
use iamcompare_core::panel::Panel;
use iamcompare_core::{FloatValue, Year};
use ndarray::Array1;

/// Relative abatement of `variable` in `policy` compared to `baseline`, one value per model.
pub fn calc_relative_abatement_index<S: AsRef<str>>(
    panel: &Panel,
    models: &[S],
    year: Year,
    variable: &str,
    policy: &str,
    baseline: &str,
) -> IndicatorResult<Array1<FloatValue>> {
    let base = panel.aligned(models, baseline, variable, year)?;
    let pol = panel.aligned(models, policy, variable, year)?;
    Ok((&base - &pol) / &base)
}

#[derive(Debug, Clone, Default)]
pub struct RelativeAbatementIndex {
    parameters: RelativeAbatementParameters,
}

impl RelativeAbatementIndex {
    pub fn from_parameters(parameters: RelativeAbatementParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &RelativeAbatementParameters {
        &self.parameters
    }

    /// Carbon price of a policy scenario. A zero price means no price was set.
    fn carbon_price(
        &self,
        panel: &Panel,
        models: &[String],
        policy: &PolicyScenario,
        year: Year,
    ) -> IndicatorResult<Array1<FloatValue>> {
        let prices = panel.aligned(
            models,
            &policy.scenario,
            &self.parameters.carbon_price_variable,
            year,
        )?;
        Ok(prices.mapv(|p| if p == 0.0 { FloatValue::NAN } else { p }))
    }
}

impl Indicator for RelativeAbatementIndex {
    fn name(&self) -> &'static str {
        "RAI"
    }

    fn create_columns(&self, panel: &Panel, meta: &mut MetaTable) -> IndicatorResult<Vec<String>> {
        let p = &self.parameters;
        // Owned names, the meta table is modified while iterating
        let models: Vec<String> = meta.models().into_iter().map(String::from).collect();

        let mut created = Vec::new();
        for variable in &p.variables {
            for &year in &p.years {
                let mut rai_columns = Vec::with_capacity(p.policies.len());
                let mut price_columns = Vec::with_capacity(p.policies.len());

                for policy in &p.policies {
                    let rai = calc_relative_abatement_index(
                        panel,
                        &models,
                        year,
                        &variable.variable,
                        &policy.scenario,
                        &p.baseline,
                    )?;
                    let col_rai = columns::rai(&policy.tag, year, &variable.label);
                    meta.set_column(&col_rai, rai)?;
                    rai_columns.push(col_rai);

                    let prices = self.carbon_price(panel, &models, policy, year)?;
                    let col_price = columns::carbon_price(&policy.tag, year);
                    meta.set_column(&col_price, prices)?;
                    price_columns.push(col_price);
                }

                created.extend(rai_columns);
                created.extend(price_columns);
            }
        }

        Ok(created)
    }
}
