//! The scenario panel: one row per (Model, Scenario, Variable) with a value per year.
//!
//! All rows share a single [`YearAxis`]. Missing values are stored as `NaN` so that
//! arithmetic on aligned columns propagates gaps the same way the reporting templates do.
//!
//! # Examples
//!
//! ```rust
//! use iamcompare_core::panel::{Panel, PanelRow, YearAxis};
//! use ndarray::array;
//!
//! let years = YearAxis::new(vec![2010, 2020]).unwrap();
//! let mut panel = Panel::new(years);
//! panel
//!     .push(PanelRow::new("MESSAGE", "diag-base", "World", "Final Energy", "EJ/yr", array![400.0, 450.0]))
//!     .unwrap();
//!
//! let values = panel.get("diag-base", "Final Energy", 2020).unwrap();
//! assert_eq!(values["MESSAGE"], 450.0);
//! ```

use crate::errors::{IamError, IamResult};
use crate::{FloatValue, Year};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Ordered set of years shared by every row of a [`Panel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "YearAxisData")]
pub struct YearAxis {
    years: Vec<Year>,
}

/// Unchecked serialised form of a [`YearAxis`]
#[derive(Deserialize)]
struct YearAxisData {
    years: Vec<Year>,
}

impl TryFrom<YearAxisData> for YearAxis {
    type Error = IamError;

    fn try_from(data: YearAxisData) -> IamResult<Self> {
        Self::new(data.years)
    }
}

impl YearAxis {
    /// Create a year axis, checking that the years are strictly increasing.
    pub fn new(years: Vec<Year>) -> IamResult<Self> {
        if years.windows(2).any(|w| w[0] >= w[1]) {
            return Err(IamError::InvalidYearAxis(years));
        }
        Ok(Self { years })
    }

    /// Regularly spaced axis from `start` to `end` (inclusive) every `step` years.
    pub fn regular(start: Year, end: Year, step: Year) -> IamResult<Self> {
        if step <= 0 || start > end {
            return Err(IamError::InvalidConfig(format!(
                "cannot build a year axis from {start} to {end} with step {step}"
            )));
        }
        Ok(Self {
            years: (start..=end).step_by(step as usize).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn years(&self) -> &[Year] {
        &self.years
    }

    /// Position of `year` on the axis
    pub fn index_of(&self, year: Year) -> Option<usize> {
        self.years.binary_search(&year).ok()
    }

    /// Like [`YearAxis::index_of`] but reports unknown years as an error.
    pub fn require_index(&self, year: Year) -> IamResult<usize> {
        self.index_of(year).ok_or(IamError::UnknownYear(year))
    }

    pub fn iter(&self) -> impl Iterator<Item = Year> + '_ {
        self.years.iter().copied()
    }
}

/// Identity of a panel row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelKey {
    pub model: String,
    pub scenario: String,
    pub variable: String,
}

/// A single timeseries of the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRow {
    pub model: String,
    pub scenario: String,
    pub region: String,
    pub variable: String,
    pub unit: String,
    /// One value per year of the owning panel's axis, `NaN` where not reported
    pub values: Array1<FloatValue>,
}

impl PanelRow {
    pub fn new(
        model: impl Into<String>,
        scenario: impl Into<String>,
        region: impl Into<String>,
        variable: impl Into<String>,
        unit: impl Into<String>,
        values: Array1<FloatValue>,
    ) -> Self {
        Self {
            model: model.into(),
            scenario: scenario.into(),
            region: region.into(),
            variable: variable.into(),
            unit: unit.into(),
            values,
        }
    }

    /// Model and scenario joined by a space, the run identifier used in duplicate reports
    pub fn name(&self) -> String {
        format!("{} {}", self.model, self.scenario)
    }

    pub fn key(&self) -> PanelKey {
        PanelKey {
            model: self.model.clone(),
            scenario: self.scenario.clone(),
            variable: self.variable.clone(),
        }
    }

    fn matches(&self, scenario: &str, variable: &str) -> bool {
        self.scenario == scenario && self.variable == variable
    }
}

/// A record as delivered by the external reader, before any preprocessing.
///
/// Years that were not reported are simply absent from `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(alias = "Model")]
    pub model: String,
    #[serde(alias = "Scenario")]
    pub scenario: String,
    #[serde(alias = "Region")]
    pub region: String,
    #[serde(alias = "Variable")]
    pub variable: String,
    #[serde(alias = "Unit")]
    pub unit: String,
    #[serde(default)]
    pub values: BTreeMap<Year, FloatValue>,
}

/// Wide-format panel of IAM scenario data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PanelData")]
pub struct Panel {
    years: YearAxis,
    rows: Vec<PanelRow>,
}

/// Unchecked serialised form of a [`Panel`]
#[derive(Deserialize)]
struct PanelData {
    years: YearAxis,
    rows: Vec<PanelRow>,
}

impl TryFrom<PanelData> for Panel {
    type Error = IamError;

    fn try_from(data: PanelData) -> IamResult<Self> {
        Self::with_rows(data.years, data.rows)
    }
}

impl Panel {
    pub fn new(years: YearAxis) -> Self {
        Self {
            years,
            rows: Vec::new(),
        }
    }

    /// Build a panel from existing rows, checking every row against the axis length.
    pub fn with_rows(years: YearAxis, rows: Vec<PanelRow>) -> IamResult<Self> {
        let mut panel = Self::new(years);
        for row in rows {
            panel.push(row)?;
        }
        Ok(panel)
    }

    /// Append a row.
    ///
    /// Duplicated (model, scenario, variable) keys are accepted here; they are reported and
    /// removed during preprocessing.
    pub fn push(&mut self, row: PanelRow) -> IamResult<()> {
        if row.values.len() != self.years.len() {
            return Err(IamError::RowLength {
                model: row.model,
                scenario: row.scenario,
                variable: row.variable,
                expected: self.years.len(),
                actual: row.values.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn years(&self) -> &YearAxis {
        &self.years
    }

    pub fn rows(&self) -> &[PanelRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<PanelRow> {
        &mut self.rows
    }

    pub(crate) fn replace(&mut self, years: YearAxis, rows: Vec<PanelRow>) {
        self.years = years;
        self.rows = rows;
    }

    /// Distinct model names in the panel
    pub fn models(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|row| row.model.as_str()).collect()
    }

    /// Number of rows per region
    pub fn regions(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.region.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// All rows for a scenario and variable.
    pub fn select<'a>(
        &'a self,
        scenario: &'a str,
        variable: &'a str,
    ) -> impl Iterator<Item = &'a PanelRow> + 'a {
        self.rows
            .iter()
            .filter(move |row| row.matches(scenario, variable))
    }

    /// Value per model for a scenario, variable and year.
    ///
    /// Only the first row of each model is used. Missing values are returned as `NaN`.
    pub fn get(
        &self,
        scenario: &str,
        variable: &str,
        year: Year,
    ) -> IamResult<BTreeMap<String, FloatValue>> {
        let index = self.years.require_index(year)?;
        let mut values = BTreeMap::new();
        for row in self.select(scenario, variable) {
            values
                .entry(row.model.clone())
                .or_insert(row.values[index]);
        }
        Ok(values)
    }

    /// Every year from `from_year` onwards, per model, for a scenario and variable.
    pub fn get_years(
        &self,
        scenario: &str,
        variable: &str,
        from_year: Year,
    ) -> BTreeMap<String, BTreeMap<Year, FloatValue>> {
        let mut values = BTreeMap::new();
        for row in self.select(scenario, variable) {
            values.entry(row.model.clone()).or_insert_with(|| {
                self.years
                    .iter()
                    .zip(row.values.iter())
                    .filter(|(year, _)| *year >= from_year)
                    .map(|(year, value)| (year, *value))
                    .collect()
            });
        }
        values
    }

    /// Single value lookup. `None` if no row matches or the value is missing.
    pub fn value(
        &self,
        model: &str,
        scenario: &str,
        variable: &str,
        year: Year,
    ) -> IamResult<Option<FloatValue>> {
        let index = self.years.require_index(year)?;
        Ok(self
            .select(scenario, variable)
            .find(|row| row.model == model)
            .map(|row| row.values[index])
            .filter(|value| !value.is_nan()))
    }

    /// [`Panel::get`] aligned to the given model order, `NaN` for models without data.
    ///
    /// This is the join used to move panel values into meta table columns.
    pub fn aligned<S: AsRef<str>>(
        &self,
        models: &[S],
        scenario: &str,
        variable: &str,
        year: Year,
    ) -> IamResult<Array1<FloatValue>> {
        let index = self.years.require_index(year)?;
        let mut by_model: HashMap<&str, FloatValue> = HashMap::new();
        for row in self.select(scenario, variable) {
            by_model
                .entry(row.model.as_str())
                .or_insert(row.values[index]);
        }
        Ok(models
            .iter()
            .map(|model| {
                by_model
                    .get(model.as_ref())
                    .copied()
                    .unwrap_or(FloatValue::NAN)
            })
            .collect())
    }
}
