//! One figure per indicator.
//!
//! Each figure pairs an indicator specific panel on the left with the model comparison of
//! [`crate::general::add_model_comparison`] on the right.

pub mod carbint_over_enerint;
pub mod cost_abat_value;
pub mod fossil_fuel_reduction;
pub mod relative_abatement_index;

use crate::errors::{PlotError, PlotResult};
use crate::figure::{Annotation, Figure, Line, Marker, Mode, OneOrMany, Scatter};
use iamcompare_core::meta::{MetaTable, ModelVersion};
use iamcompare_core::models::ModelsTable;
use iamcompare_core::stats::{confidence_ellipse, DEFAULT_ELLIPSE_POINTS};
use iamcompare_core::{FloatValue, Year};

/// Confidence level of the background ellipses, in standard deviations
const ELLIPSE_NSIGMA: FloatValue = 2.0;

/// Figure years shown as connected points in the left panels
pub(crate) const FIGURE_YEARS: [Year; 2] = [2050, 2100];

/// Where to put the year label of an ellipse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LabelPosition {
    Bottom,
    Top,
}

/// Shade the 2-sigma confidence ellipse of two meta columns in column 1.
pub(crate) fn add_ellipse(
    fig: &mut Figure,
    meta: &MetaTable,
    col_x: &str,
    col_y: &str,
    label: &str,
    position: LabelPosition,
) -> PlotResult<()> {
    let selection = meta.complete_rows(&[col_x, col_y])?;
    let x = selection.require_column(col_x)?.to_vec();
    let y = selection.require_column(col_y)?.to_vec();
    let ellipse = confidence_ellipse(&x, &y, ELLIPSE_NSIGMA, DEFAULT_ELLIPSE_POINTS)?;

    let label_x = ellipse.x_max();
    let label_y = match position {
        LabelPosition::Bottom => ellipse.y_min(),
        LabelPosition::Top => ellipse.y_max(),
    };
    let (Some(label_x), Some(label_y)) = (label_x, label_y) else {
        return Err(PlotError::EmptySelection(format!("{col_x} / {col_y}")));
    };

    fig.add_trace(
        1,
        Scatter::new(ellipse.x.iter().copied(), ellipse.y.iter().copied())
            .with_fill("rgba(0,0,0,.08)")
            .with_line(Line::default().with_width(0.0))
            .with_showlegend(false),
    )?;
    fig.add_annotation(
        1,
        Annotation::new(label, label_x, label_y).with_font_color("#999"),
    )
}

/// Model versions of the families in `models`, older versions first so the newest are drawn
/// on top.
pub(crate) fn versions_by_age<'a>(
    meta: &'a MetaTable,
    models: &ModelsTable,
) -> Vec<(usize, &'a ModelVersion)> {
    let mut versions: Vec<(usize, &ModelVersion)> = meta
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| models.contains(&row.stripped_model))
        .collect();
    versions.sort_by_key(|(_, row)| row.is_newest());
    versions
}

/// Draw each model version as two connected points, one per [`FIGURE_YEARS`].
///
/// The first point is filled, the second one hollow. Missing values become gaps in the
/// trace. Older versions are drawn in `older_color`.
pub(crate) fn add_connected_points(
    fig: &mut Figure,
    meta: &MetaTable,
    models: &ModelsTable,
    cols_x: [&str; 2],
    cols_y: [&str; 2],
    older_color: &str,
) -> PlotResult<()> {
    let xs = [
        meta.require_column(cols_x[0])?,
        meta.require_column(cols_x[1])?,
    ];
    let ys = [
        meta.require_column(cols_y[0])?,
        meta.require_column(cols_y[1])?,
    ];

    for (i, row) in versions_by_age(meta, models) {
        let Some(entry) = models.get(&row.stripped_model) else {
            continue;
        };
        let color = if row.is_newest() {
            entry.color.as_str()
        } else {
            older_color
        };
        let marker = Marker {
            color: Some(OneOrMany::Many(vec![color.to_string(), "#FFF".to_string()])),
            size: Some(OneOrMany::One(8.0)),
            line: Some(Line::new(color).with_width(2.0)),
            ..Default::default()
        };
        fig.add_trace(
            1,
            Scatter::new([xs[0][i], xs[1][i]], [ys[0][i], ys[1][i]])
                .with_marker(marker)
                .with_line(Line::new(color).with_width(1.0).with_dash("solid"))
                .with_mode(Mode::MarkersLines)
                .with_name(row.stripped_model.as_str())
                .with_showlegend(false),
        )?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use iamcompare_core::config::Palette;
    use iamcompare_core::meta::{MetaTable, ModelVersion};
    use iamcompare_core::models::ModelsTable;
    use ndarray::Array1;

    /// Four model versions of three families with the given columns
    pub(crate) fn tables(columns: &[(&str, [f64; 4])]) -> (MetaTable, ModelsTable) {
        let mut meta = MetaTable::from_versions(vec![
            ModelVersion::new("REMIND 1.7", "REMIND", "Intertemporal", 1),
            ModelVersion::new("REMIND 1.5", "REMIND", "Intertemporal", 2),
            ModelVersion::new("GCAM 4.2", "GCAM", "Recursive", 1),
            ModelVersion::new("IMAGE 3.0", "IMAGE", "Recursive", 1),
        ]);
        for (name, values) in columns {
            meta.set_column(*name, Array1::from(values.to_vec()))
                .unwrap();
        }
        let models = ModelsTable::create(&meta, &Palette::default());
        (meta, models)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::tables;
    use super::*;

    #[test]
    fn test_versions_by_age() {
        let (meta, models) = tables(&[]);
        let order: Vec<&str> = versions_by_age(&meta, &models)
            .into_iter()
            .map(|(_, row)| row.model.as_str())
            .collect();
        assert_eq!(order, vec!["REMIND 1.5", "REMIND 1.7", "GCAM 4.2", "IMAGE 3.0"]);

        let models = models.excluding("GCAM");
        assert_eq!(versions_by_age(&meta, &models).len(), 3);
    }

    #[test]
    fn test_add_ellipse() {
        let (meta, _) = tables(&[
            ("x", [0.1, 0.2, 0.4, f64::NAN]),
            ("y", [0.2, 0.1, 0.3, 0.5]),
        ]);
        let mut fig = Figure::subplots(2, &[0.4, 0.6], 0.02, &[], false).unwrap();
        add_ellipse(&mut fig, &meta, "x", "y", "2050", LabelPosition::Bottom).unwrap();

        let value = fig.to_value().unwrap();
        assert_eq!(value["data"][0]["x"].as_array().unwrap().len(), 600);
        assert_eq!(value["data"][0]["fill"], "toself");
        assert_eq!(value["layout"]["annotations"][0]["text"], "2050");
    }

    #[test]
    fn test_add_ellipse_needs_spread() {
        let (meta, _) = tables(&[("x", [0.1, 0.1, 0.1, 0.1]), ("y", [0.2, 0.1, 0.3, 0.5])]);
        let mut fig = Figure::subplots(2, &[0.4, 0.6], 0.02, &[], false).unwrap();
        assert!(matches!(
            add_ellipse(&mut fig, &meta, "x", "y", "2050", LabelPosition::Top),
            Err(PlotError::Core(_))
        ));
    }

    #[test]
    fn test_connected_points() {
        let (meta, models) = tables(&[
            ("x50", [0.1, 0.2, 0.4, f64::NAN]),
            ("x00", [0.3, 0.4, 0.6, 0.7]),
            ("y50", [0.2, 0.1, 0.3, 0.5]),
            ("y00", [0.4, 0.3, 0.5, 0.6]),
        ]);
        let mut fig = Figure::subplots(2, &[0.4, 0.6], 0.02, &[], false).unwrap();
        add_connected_points(&mut fig, &meta, &models, ["x50", "x00"], ["y50", "y00"], "#BBB")
            .unwrap();

        let value = fig.to_value().unwrap();
        let data = value["data"].as_array().unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data[0]["name"], "REMIND");
        assert_eq!(data[0]["line"]["color"], "#BBB");
        assert_eq!(data[0]["mode"], "markers+lines");
        assert_eq!(data[1]["marker"]["color"][1], "#FFF");
        assert_eq!(data[2]["x"][1], 0.6);
        // IMAGE is drawn with a gap for its missing value
        assert_eq!(data[3]["name"], "IMAGE");
        assert!(data[3]["x"][0].is_null());
        assert_eq!(data[3]["x"][1], 0.7);
    }

    #[test]
    fn test_connected_points_complete_rows() {
        let (meta, models) = tables(&[
            ("x50", [0.1, 0.2, 0.4, f64::NAN]),
            ("x00", [0.3, 0.4, 0.6, 0.7]),
            ("y50", [0.2, 0.1, 0.3, 0.5]),
            ("y00", [0.4, 0.3, 0.5, 0.6]),
        ]);
        let complete = meta.complete_rows(&["x50", "x00", "y50", "y00"]).unwrap();
        let mut fig = Figure::subplots(2, &[0.4, 0.6], 0.02, &[], false).unwrap();
        add_connected_points(
            &mut fig,
            &complete,
            &models,
            ["x50", "x00"],
            ["y50", "y00"],
            "#BBB",
        )
        .unwrap();

        let value = fig.to_value().unwrap();
        let data = value["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert!(data.iter().all(|t| t["name"] != "IMAGE"));
    }
}
