//! Turning raw records into a clean, 5-yearly [`Panel`].
//!
//! [`import_data`] runs the whole pipeline:
//!
//! 1. [`prepare_data`]: keep the reported decadal years, optionally only the world region,
//!    lowercase scenario names and apply manual model renames
//! 2. report multiple regions and duplicated variables
//! 3. [`convert_kt_to_mt`]: rescale emissions reported in kilotonnes
//! 4. [`drop_duplicates`]: keep one row per (model, scenario, variable)
//! 5. [`interpolate_missing_5years`]: insert the midpoint years

use crate::config::PreprocessConfig;
use crate::errors::IamResult;
use crate::panel::{Panel, PanelKey, PanelRow, RawRecord, YearAxis};
use crate::standard_variables::{UNIT_KT, UNIT_MT_CO2_PER_YEAR};
use crate::units::MassPrefix;
use crate::FloatValue;
use ndarray::Array1;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Number of duplicated variables per run (model and scenario).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    pub duplicated_variables: BTreeMap<String, usize>,
}

impl DuplicateReport {
    pub fn is_empty(&self) -> bool {
        self.duplicated_variables.is_empty()
    }
}

/// Build a panel from raw records, keeping only the configured reported years.
///
/// Years missing from a record become `NaN`; years outside the axis are dropped.
pub fn prepare_data<I>(records: I, config: &PreprocessConfig) -> IamResult<Panel>
where
    I: IntoIterator<Item = RawRecord>,
{
    let years = config.year_axis()?;
    let mut panel = Panel::new(years.clone());

    for record in records {
        if config.only_world && record.region != config.world_region {
            continue;
        }
        let values: Array1<FloatValue> = years
            .iter()
            .map(|year| {
                record
                    .values
                    .get(&year)
                    .copied()
                    .unwrap_or(FloatValue::NAN)
            })
            .collect();

        let scenario = if config.lowercase_scenarios {
            record.scenario.to_lowercase()
        } else {
            record.scenario
        };
        let model = config
            .model_renames
            .get(&record.model)
            .cloned()
            .unwrap_or(record.model);

        panel.push(PanelRow {
            model,
            scenario,
            region: record.region,
            variable: record.variable,
            unit: record.unit,
            values,
        })?;
    }
    Ok(panel)
}

/// Full import pipeline from raw records to the analysis panel.
pub fn import_data<I>(records: I, config: &PreprocessConfig) -> IamResult<Panel>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut panel = prepare_data(records, config)?;

    let regions = panel.regions();
    if regions.len() > 1 {
        warn!(?regions, "More than one region present in the data");
    }

    let report = duplicated_variables(&panel);
    if !report.is_empty() {
        warn!(
            duplicated = ?report.duplicated_variables,
            "Runs with duplicated variables; keeping the first occurrence"
        );
    }

    let converted = convert_kt_to_mt(&mut panel);
    debug!(rows = converted, "Converted Kt rows to {}", UNIT_MT_CO2_PER_YEAR);

    drop_duplicates(&mut panel);

    if config.interpolate_missing_years {
        interpolate_missing_5years(&mut panel)?;
    }
    Ok(panel)
}

/// Count, per run, the variables that appear on more than one row.
pub fn duplicated_variables(panel: &Panel) -> DuplicateReport {
    let mut counts: HashMap<PanelKey, usize> = HashMap::new();
    for row in panel.rows() {
        *counts.entry(row.key()).or_insert(0) += 1;
    }

    let mut duplicated_variables = BTreeMap::new();
    for (key, count) in counts {
        if count > 1 {
            *duplicated_variables
                .entry(format!("{} {}", key.model, key.scenario))
                .or_insert(0) += 1;
        }
    }
    DuplicateReport {
        duplicated_variables,
    }
}

/// Rescale rows reported in `Kt` to `Mt CO2/yr`.
///
/// The unit is relabelled, so applying this twice leaves already converted rows untouched.
/// Returns the number of converted rows.
pub fn convert_kt_to_mt(panel: &mut Panel) -> usize {
    let mut converted = 0;
    for row in panel.rows_mut().iter_mut().filter(|row| row.unit == UNIT_KT) {
        row.values
            .mapv_inplace(|v| MassPrefix::Kilo.convert(v, MassPrefix::Mega));
        row.unit = UNIT_MT_CO2_PER_YEAR.to_string();
        converted += 1;
    }
    converted
}

/// Keep one row per (model, scenario, variable).
///
/// The first occurrence is kept in place. Years it does not report are filled with the
/// first reported value among the later duplicates. Returns the number of removed rows.
pub fn drop_duplicates(panel: &mut Panel) -> usize {
    let rows = std::mem::take(panel.rows_mut());
    let before = rows.len();

    let mut kept: Vec<PanelRow> = Vec::with_capacity(before);
    let mut positions: HashMap<PanelKey, usize> = HashMap::new();
    for row in rows {
        let key = row.key();
        match positions.get(&key).copied() {
            Some(position) => {
                let first = &mut kept[position];
                first
                    .values
                    .zip_mut_with(&row.values, |current, &candidate| {
                        if current.is_nan() {
                            *current = candidate;
                        }
                    });
            }
            None => {
                positions.insert(key, kept.len());
                kept.push(row);
            }
        }
    }

    let removed = before - kept.len();
    *panel.rows_mut() = kept;
    removed
}

/// Insert a midpoint year between each pair of reported years.
///
/// For decadal data this adds 2015, 2025, ..., 2095. The inserted value is the mean of
/// its two neighbours, ignoring a missing neighbour; it is missing only when both are.
/// Pairs whose spacing is odd (e.g. already 5-yearly) are left alone.
pub fn interpolate_missing_5years(panel: &mut Panel) -> IamResult<()> {
    let old_years = panel.years().years().to_vec();
    if old_years.len() < 2 {
        return Ok(());
    }

    // (index into the old axis, whether this is an inserted midpoint after that index)
    let mut layout: Vec<(usize, bool)> = Vec::with_capacity(2 * old_years.len());
    let mut new_years = Vec::with_capacity(2 * old_years.len());
    for (i, pair) in old_years.windows(2).enumerate() {
        layout.push((i, false));
        new_years.push(pair[0]);
        let gap = pair[1] - pair[0];
        if gap > 1 && gap % 2 == 0 {
            layout.push((i, true));
            new_years.push(pair[0] + gap / 2);
        }
    }
    layout.push((old_years.len() - 1, false));
    if let Some(last) = old_years.last() {
        new_years.push(*last);
    }

    if new_years.len() == old_years.len() {
        return Ok(());
    }
    let axis = YearAxis::new(new_years)?;

    let rows = std::mem::take(panel.rows_mut())
        .into_iter()
        .map(|row| {
            let values = layout
                .iter()
                .map(|&(i, inserted)| {
                    if inserted {
                        nan_mean_pair(row.values[i], row.values[i + 1])
                    } else {
                        row.values[i]
                    }
                })
                .collect();
            PanelRow { values, ..row }
        })
        .collect();

    panel.replace(axis, rows);
    Ok(())
}

fn nan_mean_pair(a: FloatValue, b: FloatValue) -> FloatValue {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => (a + b) / 2.0,
        (true, false) => b,
        (false, true) => a,
        (true, true) => FloatValue::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn row(model: &str, variable: &str, unit: &str, values: Array1<FloatValue>) -> PanelRow {
        PanelRow::new(model, "diag-base", "World", variable, unit, values)
    }

    fn decadal_panel(rows: Vec<PanelRow>) -> Panel {
        Panel::with_rows(YearAxis::new(vec![2010, 2020, 2030]).unwrap(), rows).unwrap()
    }

    #[test]
    fn test_kt_to_mt_once_per_row() {
        let mut panel = decadal_panel(vec![
            row("GCAM", "Emissions|CO2", "Kt", array![1000.0, 2500.0, f64::NAN]),
            row("GCAM", "Final Energy", "EJ/yr", array![1000.0, 2000.0, 3000.0]),
        ]);

        assert_eq!(convert_kt_to_mt(&mut panel), 1);
        let emissions = &panel.rows()[0];
        assert_eq!(emissions.unit, "Mt CO2/yr");
        assert_eq!(emissions.values[0], 1.0);
        assert_eq!(emissions.values[1], 2.5);
        assert!(emissions.values[2].is_nan());
        assert_eq!(panel.rows()[1].values[0], 1000.0);

        // Second application is a no-op
        assert_eq!(convert_kt_to_mt(&mut panel), 0);
        assert_eq!(panel.rows()[0].values[0], 1.0);
    }

    #[test]
    fn test_kt_to_mt_divides_by_1000() {
        let mut panel = decadal_panel(vec![row(
            "GCAM",
            "Emissions|CO2",
            "Kt",
            array![6.5, 3.7, 1999.9],
        )]);
        convert_kt_to_mt(&mut panel);
        let values = &panel.rows()[0].values;
        assert_eq!(values[0], 0.0065);
        assert_eq!(values[1], 3.7 / 1000.0);
        assert_eq!(values[2], 1999.9 / 1000.0);
    }

    #[test]
    fn test_drop_duplicates_keeps_first() {
        let mut panel = decadal_panel(vec![
            row("GCAM", "Final Energy", "EJ/yr", array![1.0, f64::NAN, 3.0]),
            row("GCAM", "Primary Energy", "EJ/yr", array![5.0, 5.0, 5.0]),
            row("GCAM", "Final Energy", "EJ/yr", array![10.0, 20.0, 30.0]),
            row("GCAM", "Final Energy", "EJ/yr", array![100.0, 200.0, 300.0]),
        ]);

        let report = duplicated_variables(&panel);
        assert_eq!(report.duplicated_variables["GCAM diag-base"], 1);

        assert_eq!(drop_duplicates(&mut panel), 2);
        assert_eq!(panel.len(), 2);
        let first = &panel.rows()[0];
        assert_eq!(first.variable, "Final Energy");
        assert_eq!(first.values, array![1.0, 20.0, 3.0]);
        assert_eq!(panel.rows()[1].variable, "Primary Energy");
        assert!(duplicated_variables(&panel).is_empty());
    }

    #[test]
    fn test_interpolate_midpoints() {
        let mut panel = decadal_panel(vec![
            row("GCAM", "Final Energy", "EJ/yr", array![10.0, 20.0, 40.0]),
            row("AIM", "Final Energy", "EJ/yr", array![10.0, f64::NAN, f64::NAN]),
        ]);
        interpolate_missing_5years(&mut panel).unwrap();

        assert_eq!(panel.years().years(), &[2010, 2015, 2020, 2025, 2030]);
        assert_eq!(panel.rows()[0].values, array![10.0, 15.0, 20.0, 30.0, 40.0]);

        let aim = &panel.rows()[1].values;
        // One missing neighbour: the other neighbour is used
        assert_eq!(aim[1], 10.0);
        assert!(aim[3].is_nan());
    }

    #[test]
    fn test_interpolate_twice_is_stable() {
        let mut panel = decadal_panel(vec![row(
            "GCAM",
            "Final Energy",
            "EJ/yr",
            array![10.0, 20.0, 40.0],
        )]);
        interpolate_missing_5years(&mut panel).unwrap();
        let once = panel.clone();
        interpolate_missing_5years(&mut panel).unwrap();
        assert_eq!(once, panel);
    }

    #[test]
    fn test_prepare_data() {
        let records = vec![
            RawRecord {
                model: "MESSAGE_1.0".to_string(),
                scenario: "DIAG-Base".to_string(),
                region: "World".to_string(),
                variable: "Final Energy".to_string(),
                unit: "EJ/yr".to_string(),
                values: BTreeMap::from([(2005, 1.0), (2010, 2.0), (2015, 2.5), (2020, 3.0)]),
            },
            RawRecord {
                model: "AIM".to_string(),
                scenario: "diag-base".to_string(),
                region: "R5ASIA".to_string(),
                variable: "Final Energy".to_string(),
                unit: "EJ/yr".to_string(),
                values: BTreeMap::from([(2010, 1.0)]),
            },
        ];
        let config = PreprocessConfig {
            only_world: true,
            model_renames: BTreeMap::from([(
                "MESSAGE_1.0".to_string(),
                "MESSAGE 1.0".to_string(),
            )]),
            ..Default::default()
        };

        let panel = prepare_data(records, &config).unwrap();
        assert_eq!(panel.len(), 1);
        assert_eq!(panel.years().len(), 10);

        let message = &panel.rows()[0];
        assert_eq!(message.model, "MESSAGE 1.0");
        assert_eq!(message.scenario, "diag-base");
        assert_eq!(message.name(), "MESSAGE 1.0 diag-base");
        assert_eq!(message.values[0], 2.0);
        assert_eq!(message.values[1], 3.0);
        assert!(message.values[2].is_nan());
    }
}
