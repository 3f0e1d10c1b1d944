//! Cost-abatement value (CAV)
//!
//! Relates the reported policy cost to the value of the abated emissions at a fixed carbon
//! price. A CAV of 1 means the policy costs exactly as much as the abated emissions are
//! worth at that price.
//!
//! Which variable holds the policy cost (e.g. GDP loss or area under the marginal abatement
//! cost curve) and which emissions variable is used differs per model and is read from the
//! meta table.

use crate::columns;
use crate::errors::{IndicatorError, IndicatorResult};
use crate::parameters::{CarbonPricePoint, CostAbatementParameters};
use crate::Indicator;
use iamcompare_core::meta::{MetaTable, MetricColumn};
use iamcompare_core::panel::Panel;
use iamcompare_core::units::MassPrefix;
use iamcompare_core::FloatValue;
use ndarray::{Array1, Zip};

#[derive(Debug, Clone, Default)]
pub struct CostAbatementValue {
    parameters: CostAbatementParameters,
}

impl CostAbatementValue {
    pub fn from_parameters(parameters: CostAbatementParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &CostAbatementParameters {
        &self.parameters
    }

    /// Policy cost divided by the value of the abated emissions.
    ///
    /// Emissions are in Mt CO2/yr and converted to Gt before applying the carbon price.
    pub fn calculate_cav(
        costs: &Array1<FloatValue>,
        emissions_base: &Array1<FloatValue>,
        emissions_policy: &Array1<FloatValue>,
        carbon_price: FloatValue,
    ) -> Array1<FloatValue> {
        let abated = (emissions_base - emissions_policy)
            .mapv(|mt| MassPrefix::Mega.convert(mt, MassPrefix::Giga));
        costs / &(abated * carbon_price)
    }

    /// Rows with an implausible CAV, cost share or absolute cost.
    ///
    /// A missing CAV counts as implausible.
    fn outliers(
        &self,
        cav: &Array1<FloatValue>,
        cost_per_gdp: &Array1<FloatValue>,
        costs: &Array1<FloatValue>,
    ) -> Vec<bool> {
        let p = &self.parameters;
        let mut mask = Vec::with_capacity(cav.len());
        Zip::from(cav)
            .and(cost_per_gdp)
            .and(costs)
            .for_each(|&cav, &share, &cost| {
                let plausible = cav >= p.min_cav && cav <= p.max_cav;
                mask.push(!plausible || share > p.max_cost_per_gdp || cost > p.max_cost);
            });
        mask
    }

    fn validate(&self) -> IndicatorResult<()> {
        if let Some(point) = self.parameters.carbon_prices.iter().find(|p| p.price <= 0.0) {
            return Err(IndicatorError::InvalidParameters {
                indicator: self.name(),
                reason: format!(
                    "carbon price for {} must be positive, got {}",
                    point.year, point.price
                ),
            });
        }
        Ok(())
    }

    fn create_year_columns(
        &self,
        panel: &Panel,
        meta: &mut MetaTable,
        point: &CarbonPricePoint,
    ) -> IndicatorResult<Vec<String>> {
        let year = point.year;
        let policy = self.parameters.scenarios.policy.as_str();
        let baseline = self.parameters.scenarios.baseline.as_str();

        let col_costs = columns::policy_cost(year);
        let col_emiss = columns::emissions_cav(year);
        let col_emiss_base = columns::emissions_cav_base(year);
        let col_per_gdp = columns::policy_cost_per_gdp(year);
        let col_cav = columns::cav(year);

        meta.set_value_from_var_column(
            panel,
            MetricColumn::PolicyCostVariable,
            &col_costs,
            year,
            policy,
        )?;
        meta.set_value_from_var_column(
            panel,
            MetricColumn::EmissionsForCav,
            &col_emiss,
            year,
            policy,
        )?;
        meta.set_value_from_var_column(
            panel,
            MetricColumn::EmissionsForCav,
            &col_emiss_base,
            year,
            baseline,
        )?;

        // Some models report costs as negative values
        let costs = meta.require_column(&col_costs)?.mapv(FloatValue::abs);
        meta.set_column(&col_costs, costs.clone())?;

        let gdp_column = columns::gdp(year, policy);
        if !meta.has_column(&gdp_column) {
            meta.set_value_from_var_column(
                panel,
                MetricColumn::GdpMetric,
                &gdp_column,
                year,
                policy,
            )?;
        }
        let cost_per_gdp = &costs / meta.require_column(&gdp_column)?;

        let cav = Self::calculate_cav(
            &costs,
            meta.require_column(&col_emiss_base)?,
            meta.require_column(&col_emiss)?,
            point.price,
        );

        let mask = self.outliers(&cav, &cost_per_gdp, &costs);
        meta.set_column(&col_per_gdp, cost_per_gdp)?;
        meta.set_column(&col_cav, cav)?;
        meta.mask(
            &mask,
            &[col_costs.as_str(), col_per_gdp.as_str(), col_cav.as_str()],
        )?;

        Ok(vec![
            col_costs,
            col_emiss,
            col_emiss_base,
            col_per_gdp,
            col_cav,
        ])
    }
}

impl Indicator for CostAbatementValue {
    fn name(&self) -> &'static str {
        "CAV"
    }

    fn create_columns(&self, panel: &Panel, meta: &mut MetaTable) -> IndicatorResult<Vec<String>> {
        self.validate()?;

        let mut created = Vec::new();
        for point in &self.parameters.carbon_prices {
            created.extend(self.create_year_columns(panel, meta, point)?);
        }

        Ok(created)
    }
}
