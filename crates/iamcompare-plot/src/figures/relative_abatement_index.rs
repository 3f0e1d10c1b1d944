//! Carbon price vs RAI, and the RAI per model.

use super::versions_by_age;
use crate::errors::PlotResult;
use crate::figure::{Figure, Line, Mode, Scatter};
use crate::general::{
    add_model_comparison, apply_standard_layout, tick_range, ComparisonOptions, GRIDCOLOR,
};
use iamcompare_core::meta::MetaTable;
use iamcompare_core::models::ModelsTable;
use iamcompare_core::{FloatValue, Year};
use iamcompare_indicators::columns;

/// Carbon prices (2010$/tCO2) of the baseline, c30 and c80 scenarios in 2050.
///
/// The left panel plots against these protocol values, not the prices reported per model.
pub const PROTOCOL_CARBON_PRICES: [FloatValue; 3] = [0.0, 48.86, 130.31];

const OLDER_COLOR: &str = "#DDD";

pub fn create_fig(
    meta: &MetaTable,
    models: &ModelsTable,
    year: Year,
    var_label: &str,
    xrange: Option<[FloatValue; 2]>,
    options: ComparisonOptions,
) -> PlotResult<Figure> {
    let col_c30_rai = columns::rai("c30", year, var_label);
    let col_c80_rai = columns::rai("c80", year, var_label);
    let col_c30_price = columns::carbon_price("c30", year);
    let col_c80_price = columns::carbon_price("c80", year);

    let mut fig = Figure::subplots(
        2,
        &[0.4, 0.6],
        0.02,
        &[
            "<b>a.</b> Carbon price vs RAI<br> ".to_string(),
            "<b>b.</b> RAI per model<br> ".to_string(),
        ],
        false,
    )?;

    let complete = meta.complete_rows(&[
        col_c30_rai.as_str(),
        col_c80_rai.as_str(),
        col_c30_price.as_str(),
        col_c80_price.as_str(),
    ])?;
    let c30 = complete.require_column(&col_c30_rai)?;
    let c80 = complete.require_column(&col_c80_rai)?;
    for (i, row) in versions_by_age(&complete, models) {
        let Some(entry) = models.get(&row.stripped_model) else {
            continue;
        };
        let (color, label) = if row.is_newest() {
            (entry.color.as_str(), entry.stripped_model.as_str())
        } else {
            (OLDER_COLOR, "Older model version")
        };
        fig.add_trace(
            1,
            Scatter::new([0.0, c30[i], c80[i]], PROTOCOL_CARBON_PRICES)
                .with_line(Line::new(color).with_dash("solid"))
                .with_mode(Mode::Lines)
                .with_name(label)
                .with_legendgroup(label)
                .with_showlegend(false),
        )?;
    }

    let options = ComparisonOptions {
        narrative_left: options
            .narrative_left
            .or_else(|| Some("Less CO<sub>2</sub> reduction".to_string())),
        narrative_right: options
            .narrative_right
            .or_else(|| Some("More CO<sub>2</sub> reduction".to_string())),
        ..options
    };
    add_model_comparison(&mut fig, meta, models, 2, &col_c80_rai, &options)?;

    for col in 1..=2 {
        let axis = fig.xaxis_mut(col)?;
        axis.set_title(format!("Relative Abatement Index in {year}"), Some(40.0));
        axis.gridcolor = Some(GRIDCOLOR.to_string());
        axis.tickvals = Some(tick_range(0.0, 2.0, 0.2));
        axis.zeroline = Some(true);
    }
    fig.xaxis_mut(2)?.range = xrange;
    fig.yaxis_mut(1)?
        .set_title(format!("Carbon price in {year} (2010$/tCO<sub>2</sub>)"), None);

    apply_standard_layout(&mut fig);
    Ok(fig)
}
