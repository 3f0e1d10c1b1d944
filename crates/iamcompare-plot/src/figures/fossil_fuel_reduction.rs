//! Primary energy decomposition, and the FFR per model.

use crate::errors::PlotResult;
use crate::figure::{Annotation, Bar, Figure, Marker, OneOrMany, Shape};
use crate::general::{add_model_comparison, apply_standard_layout, tick_range, ComparisonOptions};
use iamcompare_core::meta::MetaTable;
use iamcompare_core::models::ModelsTable;
use iamcompare_core::{FloatValue, Year};
use iamcompare_indicators::columns;
use iamcompare_indicators::fossil_fuel_reduction::{
    PRIMARY_ENERGY_LABELS, PRIMARY_ENERGY_SUFFIXES,
};

/// Bar colours, in the order of [`PRIMARY_ENERGY_SUFFIXES`]
pub const ENERGY_COLORS: [&str; 6] = [
    "#d62728", "#d67a7a", "#ff7f0e", "#2ca02c", "#96d096", "#1f77b4",
];

/// Horizontal room taken by each legend entry, in paper coordinates
const LEGEND_WIDTHS: [FloatValue; 6] = [0.09, 0.09, 0.1, 0.11, 0.11, 0.1];

pub fn create_fig(
    meta: &MetaTable,
    models: &ModelsTable,
    year: Year,
    xrange: Option<[FloatValue; 2]>,
    exclude_models: Option<&str>,
) -> PlotResult<Figure> {
    let models = match exclude_models {
        Some(pattern) => models.excluding(pattern),
        None => models.clone(),
    };

    let mut fig = Figure::subplots(
        2,
        &[0.45, 0.55],
        0.0,
        &[
            format!("<b>a.</b> Primary Energy decomposition ({year}) <br> "),
            format!("<b>b.</b> FFR per model ({year})<br> "),
        ],
        true,
    )?;

    let positions: Vec<FloatValue> = models.iter().map(|e| e.i as FloatValue).collect();

    // Legend squares below the figure
    let height = 0.04;
    let width = 0.04 * 400.0 / 840.0;
    let ypos = -0.1;
    let mut xpos = -0.05;

    for (((suffix, label), color), legend_width) in PRIMARY_ENERGY_SUFFIXES
        .iter()
        .zip(PRIMARY_ENERGY_LABELS)
        .zip(ENERGY_COLORS)
        .zip(LEGEND_WIDTHS)
    {
        let column = meta.require_column(&columns::primary_energy(suffix, year))?;
        // One bar per model family, using the family's full model version
        let values = models.iter().map(|entry| {
            meta.position(&entry.full_model)
                .map_or(FloatValue::NAN, |row| column[row])
        });
        fig.add_trace(
            1,
            Bar {
                name: Some(label.to_string()),
                marker: Some(Marker {
                    color: Some(OneOrMany::One(color.to_string())),
                    ..Default::default()
                }),
                showlegend: Some(false),
                ..Bar::horizontal(values, positions.iter().copied())
            },
        )?;

        fig.add_shape(Shape::paper_rect(
            xpos - width / 2.0,
            xpos + width / 2.0,
            ypos - height / 2.0,
            ypos + height / 2.0,
            color,
        ));
        fig.add_annotation(
            1,
            Annotation {
                xref: Some("paper".to_string()),
                yref: Some("paper".to_string()),
                yanchor: Some("top".to_string()),
                yshift: Some(12.0),
                xanchor: Some("left".to_string()),
                align: Some("left".to_string()),
                ..Annotation::new(label, xpos + 0.6 * width, ypos)
            },
        )?;
        xpos += legend_width;
    }

    let options = ComparisonOptions {
        narrative_left: Some("Small fossil fuel red.".to_string()),
        narrative_right: Some("Large fossil fuel red.".to_string()),
        shared_yaxes: true,
        showlegendlines: false,
        ..Default::default()
    };
    add_model_comparison(&mut fig, meta, &models, 2, &columns::ffr(year), &options)?;

    fig.xaxis_mut(1)?
        .set_title(format!("Primary Energy (EJ in {year})"), Some(40.0));
    let x2 = fig.xaxis_mut(2)?;
    x2.tickvals = Some(tick_range(-0.2, 2.0, 0.2));
    x2.range = xrange;
    x2.set_title("FFR", Some(40.0));

    fig.layout.barmode = Some("stack".to_string());
    apply_standard_layout(&mut fig);
    Ok(fig)
}
