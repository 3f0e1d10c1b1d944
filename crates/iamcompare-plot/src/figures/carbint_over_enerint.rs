//! Energy intensity vs carbon intensity reduction, and the CoEI per model.

use super::{add_connected_points, add_ellipse, LabelPosition, FIGURE_YEARS};
use crate::errors::PlotResult;
use crate::figure::{Annotation, Figure, Line, Mode, Scatter};
use crate::general::{
    add_model_comparison, apply_standard_layout, tick_range, ComparisonOptions, GRIDCOLOR,
};
use iamcompare_core::meta::MetaTable;
use iamcompare_core::models::ModelsTable;
use iamcompare_core::{FloatValue, Year};
use iamcompare_indicators::columns;

/// Upper end of the diagonal and of the energy intensity axis
const DIAGONAL_END: FloatValue = 0.4490;

pub fn create_fig(
    meta: &MetaTable,
    models: &ModelsTable,
    year: Year,
    xrange: Option<[FloatValue; 2]>,
    options: ComparisonOptions,
) -> PlotResult<Figure> {
    let mut fig = Figure::subplots(
        2,
        &[0.4, 0.6],
        0.02,
        &[
            "<b>a.</b> Energy Intensity vs Carbon Intensity<br> ".to_string(),
            format!("<b>b.</b> ERT per model ({year})<br> "),
        ],
        false,
    )?;

    let cols_ci = FIGURE_YEARS.map(columns::carbon_intensity);
    let cols_ei = FIGURE_YEARS.map(columns::energy_intensity);

    for ((col_ci, col_ei), figure_year) in cols_ci.iter().zip(&cols_ei).zip(FIGURE_YEARS) {
        add_ellipse(
            &mut fig,
            meta,
            col_ci,
            col_ei,
            &figure_year.to_string(),
            LabelPosition::Bottom,
        )?;
    }

    add_connected_points(
        &mut fig,
        meta,
        models,
        [cols_ci[0].as_str(), cols_ci[1].as_str()],
        [cols_ei[0].as_str(), cols_ei[1].as_str()],
        "#BBB",
    )?;

    let options = ComparisonOptions {
        narrative_left: Some("More via demand red.".to_string()),
        narrative_right: Some("More via decarbon.".to_string()),
        labelshift: 1.2,
        ..options
    };
    add_model_comparison(&mut fig, meta, models, 2, &columns::coei(year), &options)?;

    fig.add_trace(
        1,
        Scatter::new([0.0, DIAGONAL_END], [0.0, DIAGONAL_END])
            .with_showlegend(false)
            .with_mode(Mode::Lines)
            .with_line(Line::new("#DDD").with_dash("dot")),
    )?;
    for (text, xshift) in [("Demand red. dominant", -12.0), ("Decarb. dominant", 10.0)] {
        fig.add_annotation(
            1,
            Annotation {
                textangle: Some(-75.0),
                xshift: Some(xshift),
                ..Annotation::new(text, 0.35, 0.35).with_font_color("#888")
            },
        )?;
    }

    let x1 = fig.xaxis_mut(1)?;
    x1.gridcolor = Some(GRIDCOLOR.to_string());
    x1.set_title("Carbon intensity (red. from baseline)", Some(40.0));

    let y1 = fig.yaxis_mut(1)?;
    y1.gridcolor = Some(GRIDCOLOR.to_string());
    y1.set_title("Energy intensity (red. from baseline)", None);
    y1.range = Some([-0.0113, DIAGONAL_END]);

    let x2 = fig.xaxis_mut(2)?;
    x2.tickvals = Some(tick_range(0.5, 0.901, 0.1));
    x2.range = xrange;
    x2.set_title("CI over (EI+CI) (red. from baseline)", Some(40.0));

    apply_standard_layout(&mut fig);
    Ok(fig)
}
