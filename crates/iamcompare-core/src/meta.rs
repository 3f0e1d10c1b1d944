//! The meta table: one row per model version.
//!
//! Each row carries the static information about a model version (model family, model
//! type, age and which variables to use for GDP, policy cost and the cost-abatement
//! emissions). Indicators then add numeric columns to the table, one value per row.
//!
//! Columns are plain [`Array1`]s aligned with the rows, so indicator formulas are written as
//! element-wise array arithmetic and missing values (`NaN`) propagate through them.

use crate::errors::{IamError, IamResult};
use crate::panel::Panel;
use crate::{FloatValue, Year};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

/// Static information about a model version, as listed in the model versions sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVersion {
    /// Full model version name as used in the panel
    #[serde(alias = "Model_versionname", alias = "Model")]
    pub model: String,
    /// Model family without version information
    #[serde(alias = "Model_name", alias = "Stripped model")]
    pub stripped_model: String,
    /// Model type, used to group models in the figures
    #[serde(alias = "Type")]
    pub model_type: String,
    /// 1 for the newest version of a model family, larger for older versions
    #[serde(alias = "Age (1 = newest)", alias = "Age")]
    pub age: u32,
    /// GDP variable reported by this model (e.g. `GDP|PPP` or `GDP|MER`)
    #[serde(default, alias = "GDP_metric")]
    pub gdp_metric: Option<String>,
    /// Variable holding this model's policy cost
    #[serde(default, alias = "Policy cost variable")]
    pub policy_cost_variable: Option<String>,
    /// Emissions variable used for the cost-abatement value
    #[serde(default, alias = "Emissions_for_CAV")]
    pub emissions_for_cav: Option<String>,
}

impl ModelVersion {
    pub fn new(
        model: impl Into<String>,
        stripped_model: impl Into<String>,
        model_type: impl Into<String>,
        age: u32,
    ) -> Self {
        Self {
            model: model.into(),
            stripped_model: stripped_model.into(),
            model_type: model_type.into(),
            age,
            gdp_metric: None,
            policy_cost_variable: None,
            emissions_for_cav: None,
        }
    }

    pub fn with_gdp_metric(mut self, variable: impl Into<String>) -> Self {
        self.gdp_metric = Some(variable.into());
        self
    }

    pub fn with_policy_cost_variable(mut self, variable: impl Into<String>) -> Self {
        self.policy_cost_variable = Some(variable.into());
        self
    }

    pub fn with_emissions_for_cav(mut self, variable: impl Into<String>) -> Self {
        self.emissions_for_cav = Some(variable.into());
        self
    }

    pub fn is_newest(&self) -> bool {
        self.age == 1
    }

    /// The variable name stored in a per-model metric attribute
    pub fn metric(&self, metric: MetricColumn) -> Option<&str> {
        match metric {
            MetricColumn::GdpMetric => self.gdp_metric.as_deref(),
            MetricColumn::PolicyCostVariable => self.policy_cost_variable.as_deref(),
            MetricColumn::EmissionsForCav => self.emissions_for_cav.as_deref(),
        }
    }
}

/// Per-model attributes that name which panel variable to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricColumn {
    GdpMetric,
    PolicyCostVariable,
    EmissionsForCav,
}

/// A named numeric column of the meta table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaColumn {
    pub name: String,
    pub values: Array1<FloatValue>,
}

/// Per model version table of static information and derived indicator values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MetaTableData")]
pub struct MetaTable {
    rows: Vec<ModelVersion>,
    columns: Vec<MetaColumn>,
}

/// Unchecked serialised form of a [`MetaTable`]
#[derive(Deserialize)]
struct MetaTableData {
    rows: Vec<ModelVersion>,
    columns: Vec<MetaColumn>,
}

impl TryFrom<MetaTableData> for MetaTable {
    type Error = IamError;

    fn try_from(data: MetaTableData) -> IamResult<Self> {
        let mut table = Self::from_versions(data.rows);
        for column in data.columns {
            table.set_column(column.name, column.values)?;
        }
        Ok(table)
    }
}

impl MetaTable {
    /// Build a meta table from the model versions, without any indicator columns.
    pub fn from_versions(rows: Vec<ModelVersion>) -> Self {
        Self {
            rows,
            columns: Vec::new(),
        }
    }

    /// Create the meta table for a panel.
    ///
    /// Models only present in one of the two inputs are logged. Only the model versions that
    /// appear in the panel are kept.
    pub fn create(panel: &Panel, versions: Vec<ModelVersion>) -> Self {
        let in_data = panel.models();
        let in_meta: BTreeSet<&str> = versions.iter().map(|v| v.model.as_str()).collect();

        let meta_only: Vec<&str> = in_meta.difference(&in_data).copied().collect();
        if !meta_only.is_empty() {
            warn!(models = ?meta_only, "In meta, but not in data");
        }
        let data_only: Vec<&str> = in_data.difference(&in_meta).copied().collect();
        if !data_only.is_empty() {
            warn!(models = ?data_only, "In data, but not in meta");
        }

        let rows = versions
            .into_iter()
            .filter(|v| in_data.contains(v.model.as_str()))
            .collect();
        Self::from_versions(rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ModelVersion] {
        &self.rows
    }

    /// Model version names in row order
    pub fn models(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.model.as_str()).collect()
    }

    pub fn position(&self, model: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.model == model)
    }

    pub fn row(&self, model: &str) -> Option<&ModelVersion> {
        self.rows.iter().find(|row| row.model == model)
    }

    /// Names of the indicator columns, in insertion order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Array1<FloatValue>> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.values)
    }

    /// Like [`MetaTable::column`] but reports a missing column as an error.
    pub fn require_column(&self, name: &str) -> IamResult<&Array1<FloatValue>> {
        self.column(name)
            .ok_or_else(|| IamError::MissingColumn(name.to_string()))
    }

    /// Add a column, or replace the values of an existing column with the same name.
    pub fn set_column(
        &mut self,
        name: impl Into<String>,
        values: Array1<FloatValue>,
    ) -> IamResult<()> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(IamError::ColumnLength {
                column: name,
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => column.values = values,
            None => self.columns.push(MetaColumn { name, values }),
        }
        Ok(())
    }

    /// Value of a column for a model. `None` if missing.
    pub fn value(&self, model: &str, column: &str) -> IamResult<Option<FloatValue>> {
        let position = self
            .position(model)
            .ok_or_else(|| IamError::UnknownModel(model.to_string()))?;
        let values = self.require_column(column)?;
        Ok(Some(values[position]).filter(|v| !v.is_nan()))
    }

    /// Set the given columns to missing on every row where `mask` is true.
    pub fn mask(&mut self, mask: &[bool], columns: &[&str]) -> IamResult<()> {
        if mask.len() != self.rows.len() {
            return Err(IamError::ColumnLength {
                column: "mask".to_string(),
                expected: self.rows.len(),
                actual: mask.len(),
            });
        }
        for name in columns {
            let column = self
                .columns
                .iter_mut()
                .find(|c| c.name == *name)
                .ok_or_else(|| IamError::MissingColumn(name.to_string()))?;
            for (value, &masked) in column.values.iter_mut().zip(mask) {
                if masked {
                    *value = FloatValue::NAN;
                }
            }
        }
        Ok(())
    }

    /// Fill a column from the panel using a per-model variable name.
    ///
    /// For each model the variable named in its `metric` attribute is looked up for
    /// `scenario` and `year`. GDP, for example, is `GDP|PPP` for some models and `GDP|MER`
    /// for others. Models without a metric or without matching data get `NaN`.
    pub fn set_value_from_var_column(
        &mut self,
        panel: &Panel,
        metric: MetricColumn,
        column: impl Into<String>,
        year: Year,
        scenario: &str,
    ) -> IamResult<()> {
        let index = panel.years().require_index(year)?;

        let mut lookup: HashMap<(&str, &str), FloatValue> = HashMap::new();
        for row in panel.rows().iter().filter(|row| row.scenario == scenario) {
            lookup
                .entry((row.model.as_str(), row.variable.as_str()))
                .or_insert(row.values[index]);
        }

        let values: Array1<FloatValue> = self
            .rows
            .iter()
            .map(|row| {
                row.metric(metric)
                    .and_then(|variable| lookup.get(&(row.model.as_str(), variable)))
                    .copied()
                    .unwrap_or(FloatValue::NAN)
            })
            .collect();
        self.set_column(column, values)
    }

    /// Rows accepted by `keep`, with all columns.
    pub fn filter<F>(&self, mut keep: F) -> MetaTable
    where
        F: FnMut(&ModelVersion) -> bool,
    {
        let selected: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|&(_, row)| keep(row))
            .map(|(i, _)| i)
            .collect();
        self.take_rows(&selected)
    }

    /// Rows where none of `columns` are missing.
    pub fn complete_rows(&self, columns: &[&str]) -> IamResult<MetaTable> {
        let selected_columns: Vec<&Array1<FloatValue>> = columns
            .iter()
            .map(|name| self.require_column(name))
            .collect::<IamResult<_>>()?;
        let selected: Vec<usize> = (0..self.rows.len())
            .filter(|&i| selected_columns.iter().all(|c| !c[i].is_nan()))
            .collect();
        Ok(self.take_rows(&selected))
    }

    fn take_rows(&self, selected: &[usize]) -> MetaTable {
        MetaTable {
            rows: selected.iter().map(|&i| self.rows[i].clone()).collect(),
            columns: self
                .columns
                .iter()
                .map(|c| MetaColumn {
                    name: c.name.clone(),
                    values: selected.iter().map(|&i| c.values[i]).collect(),
                })
                .collect(),
        }
    }
}
