//! Policy costs vs abatement, and the CAV per model.

use super::{add_connected_points, add_ellipse, LabelPosition, FIGURE_YEARS};
use crate::errors::PlotResult;
use crate::figure::Figure;
use crate::general::{
    add_model_comparison, apply_standard_layout, tick_range, ComparisonOptions, GRIDCOLOR,
};
use iamcompare_core::meta::MetaTable;
use iamcompare_core::models::ModelsTable;
use iamcompare_core::{FloatValue, Year};
use iamcompare_indicators::columns;

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
            "<b>a.</b> Costs vs abatement<br> ".to_string(),
            format!("<b>b.</b> CAV per model ({year})<br> "),
        ],
        false,
    )?;

    let cols_x = FIGURE_YEARS.map(columns::policy_cost_per_gdp);
    let cols_y = FIGURE_YEARS.map(|y| columns::rai("c80", y, "CO2 FFI"));

    for ((col_x, col_y), figure_year) in cols_x.iter().zip(&cols_y).zip(FIGURE_YEARS) {
        // The 2100 ellipse lies above the 2050 one
        let position = if figure_year == 2100 {
            LabelPosition::Top
        } else {
            LabelPosition::Bottom
        };
        add_ellipse(
            &mut fig,
            meta,
            col_x,
            col_y,
            &figure_year.to_string(),
            position,
        )?;
    }

    // Only model versions with a cost and CAV in both years are connected
    let required = [
        cols_x[0].as_str(),
        cols_x[1].as_str(),
        cols_y[0].as_str(),
        cols_y[1].as_str(),
    ];
    let complete = meta.complete_rows(&required)?;
    add_connected_points(
        &mut fig,
        &complete,
        models,
        [cols_x[0].as_str(), cols_x[1].as_str()],
        [cols_y[0].as_str(), cols_y[1].as_str()],
        "#BBB",
    )?;

    let options = ComparisonOptions {
        narrative_left: Some("Less expensive".to_string()),
        narrative_right: Some("More expensive".to_string()),
        ..options
    };
    add_model_comparison(&mut fig, meta, models, 2, &columns::cav(year), &options)?;

    let x1 = fig.xaxis_mut(1)?;
    x1.gridcolor = Some(GRIDCOLOR.to_string());
    x1.set_title("Policy cost (% of GDP)", None);
    x1.rangemode = Some("tozero".to_string());
    x1.tickformat = Some(".0%".to_string());

    let y1 = fig.yaxis_mut(1)?;
    y1.gridcolor = Some(GRIDCOLOR.to_string());
    y1.set_title("Rel. abatement index", Some(40.0));
    y1.rangemode = Some("tozero".to_string());

    let x2 = fig.xaxis_mut(2)?;
    x2.tickvals = Some(tick_range(0.0, 1.81, 0.4));
    x2.range = xrange;
    x2.set_title("CAV", Some(40.0));

    apply_standard_layout(&mut fig);
    Ok(fig)
}
