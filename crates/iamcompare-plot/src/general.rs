//! Building blocks shared by the indicator figures.
//!
//! Every indicator figure has the same right-hand panel: the indicator value per model,
//! with one row per model family, the 16-84th percentile band and median of the ensemble,
//! model labels and brackets grouping the models by type. [`add_model_comparison`] draws
//! that panel.

use crate::errors::{PlotError, PlotResult};
use crate::figure::{
    Annotation, Axis, Figure, Legend, Line, Margin, Marker, Mode, OneOrMany, Scatter,
};
use iamcompare_core::meta::MetaTable;
use iamcompare_core::models::ModelsTable;
use iamcompare_core::stats::{nan_max, nan_min, quantile};
use iamcompare_core::FloatValue;
use tracing::debug;

pub const GRIDCOLOR: &str = "rgba(.2,.2,.2,.1)";

/// Horizontal length of the narrative arrows, in pixels
const ARROW_LENGTH: FloatValue = 65.0;

/// Half height of the model type brackets, in rows
const BRACKET_DY: FloatValue = 0.3;

/// Options for [`add_model_comparison`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonOptions {
    /// x position of the model labels, by default derived from the spread of the values
    pub label_posx: Option<FloatValue>,
    /// Length of the coloured legend lines, by default 15% of the spread of the values
    pub label_width: Option<FloatValue>,
    /// Text of the arrow pointing left from the median
    pub narrative_left: Option<String>,
    /// Text of the arrow pointing right from the median
    pub narrative_right: Option<String>,
    /// Apply the y axis layout to every subplot
    pub shared_yaxes: bool,
    /// Draw a coloured line next to each model label
    pub showlegendlines: bool,
    /// Moves the labels further to the left (> 1) or closer to the values (< 1)
    pub labelshift: FloatValue,
    /// Leave out model families whose full model name contains this text
    pub exclude_models: Option<String>,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            label_posx: None,
            label_width: None,
            narrative_left: None,
            narrative_right: None,
            shared_yaxes: false,
            showlegendlines: true,
            labelshift: 1.0,
            exclude_models: None,
        }
    }
}

/// Add a legend entry that is not attached to any visible data.
pub fn add_legend_item(
    fig: &mut Figure,
    name: &str,
    marker: Marker,
    legendgroup: Option<&str>,
) -> PlotResult<()> {
    let mut item = Scatter::new([FloatValue::NAN], [FloatValue::NAN])
        .with_name(name)
        .with_mode(Mode::Markers)
        .with_marker(marker);
    if let Some(group) = legendgroup {
        item = item.with_legendgroup(group);
    }
    fig.add_trace(1, item)
}

/// Width, height, margins and hover mode shared by the indicator figures
pub(crate) fn apply_standard_layout(fig: &mut Figure) {
    fig.layout.width = Some(860);
    fig.layout.height = Some(400);
    fig.layout.margin = Some(Margin {
        l: 60.0,
        r: 30.0,
        t: 50.0,
        b: 70.0,
    });
    fig.layout.hovermode = Some("closest".to_string());
}

/// `start, start + step, ...` up to but excluding `stop`
pub(crate) fn tick_range(start: FloatValue, stop: FloatValue, step: FloatValue) -> Vec<FloatValue> {
    (0..)
        .map(|i| start + i as FloatValue * step)
        .take_while(|v| *v < stop)
        .collect()
}

/// Draw the per-model comparison of `meta_col` in column `col` of `fig`.
///
/// Each model family gets a row (its `i` in `models`). The newest version of a family is
/// drawn as a star, older versions as circles. The 16-84th percentile band and the median
/// are calculated over every model version of the selected families.
pub fn add_model_comparison(
    fig: &mut Figure,
    meta: &MetaTable,
    models: &ModelsTable,
    col: usize,
    meta_col: &str,
    options: &ComparisonOptions,
) -> PlotResult<()> {
    let models = match &options.exclude_models {
        Some(pattern) => models.excluding(pattern),
        None => models.clone(),
    };
    let n = models
        .max_index()
        .ok_or_else(|| PlotError::EmptySelection("models".to_string()))? as FloatValue;

    let selection = meta.filter(|row| models.contains(&row.stripped_model));
    let values = selection.require_column(meta_col)?.to_vec();

    for (name, symbol, size) in [("Newest", "star", 8.0), ("Older version", "circle", 4.0)] {
        add_legend_item(
            fig,
            name,
            Marker::uniform(symbol, size, "black"),
            Some("Age"),
        )?;
    }

    let band = (
        quantile(&values, 0.16),
        quantile(&values, 0.5),
        quantile(&values, 0.84),
    );
    let (Some(q0), Some(median), Some(q1)) = band else {
        return Err(PlotError::EmptySelection(meta_col.to_string()));
    };
    let (Some(vmin), Some(vmax)) = (nan_min(&values), nan_max(&values)) else {
        return Err(PlotError::EmptySelection(meta_col.to_string()));
    };
    debug!(column = meta_col, q0, median, q1, "Model comparison band");

    fig.add_trace(
        col,
        Scatter::new([q0, q0, q1, q1], [-1.0, n + 1.0, n + 1.0, -1.0])
            .with_fill("rgba(0,0,0,.1)")
            .with_line(Line::default().with_width(0.0))
            .with_mode(Mode::Lines)
            .with_name("16-84th perc."),
    )?;
    fig.add_trace(
        col,
        Scatter::new([median, median], [-1.0, n + 1.0])
            .with_mode(Mode::Lines)
            .with_line(Line::new("#888").with_width(2.0))
            .with_name("Median"),
    )?;

    let spread = vmax - vmin;
    let label_posx = options
        .label_posx
        .unwrap_or(vmin - 0.66 * options.labelshift * spread);
    let label_width = options.label_width.unwrap_or(0.15 * spread);

    for entry in models.iter() {
        let y = entry.i as FloatValue;
        let versions: Vec<(FloatValue, bool)> = selection
            .rows()
            .iter()
            .zip(values.iter())
            .filter(|(row, _)| row.stripped_model == entry.stripped_model)
            .map(|(row, &value)| (value, row.is_newest()))
            .collect();

        let marker = Marker {
            color: Some(OneOrMany::One(entry.color.clone())),
            symbol: Some(OneOrMany::Many(
                versions
                    .iter()
                    .map(|&(_, newest)| if newest { "star" } else { "circle" }.to_string())
                    .collect(),
            )),
            size: Some(OneOrMany::Many(
                versions
                    .iter()
                    .map(|&(_, newest)| if newest { 12.0 } else { 7.0 })
                    .collect(),
            )),
            opacity: Some(1.0),
            line: Some(Line::new("#FFF").with_width(1.0)),
        };
        fig.add_trace(
            col,
            Scatter::new(versions.iter().map(|&(value, _)| value), vec![y; versions.len()])
                .with_marker(marker)
                .with_mode(Mode::Markers)
                .with_showlegend(false),
        )?;

        if options.showlegendlines {
            fig.add_trace(
                col,
                Scatter::new([label_posx - label_width, label_posx], [y, y])
                    .with_mode(Mode::Lines)
                    .with_line(Line::new(entry.color.as_str()).with_width(3.0))
                    .with_showlegend(false),
            )?;
        }

        fig.add_annotation(
            col,
            Annotation {
                xanchor: Some("left".to_string()),
                bgcolor: Some("#FFF".to_string()),
                ..Annotation::new(entry.stripped_model.as_str(), label_posx, y)
            },
        )?;
    }

    // Model type brackets to the right of the largest value
    let x_right = 0.05 * spread + vmax;
    let x_width = 0.03 * spread;
    for (model_type, entries) in models.by_type() {
        let first = entries.iter().map(|e| e.i).min().unwrap_or(0) as FloatValue;
        let last = entries.iter().map(|e| e.i).max().unwrap_or(0) as FloatValue;
        fig.add_trace(
            col,
            Scatter::new(
                [x_right, x_right + x_width, x_right + x_width, x_right],
                [
                    first - BRACKET_DY,
                    first - BRACKET_DY,
                    last + BRACKET_DY,
                    last + BRACKET_DY,
                ],
            )
            .with_mode(Mode::Lines)
            .with_line(Line::new("#999"))
            .with_showlegend(false),
        )?;
        fig.add_annotation(
            col,
            Annotation {
                textangle: Some(90.0),
                bgcolor: Some("#FFF".to_string()),
                xanchor: Some("left".to_string()),
                yanchor: Some("middle".to_string()),
                ..Annotation::new(model_type, x_right + 1.25 * x_width, (first + last) / 2.0)
            },
        )?;
    }

    for (label, to_left) in [
        (&options.narrative_left, true),
        (&options.narrative_right, false),
    ] {
        let Some(label) = label else {
            continue;
        };
        let direction = if to_left { -1.0 } else { 1.0 };
        fig.add_annotation(
            col,
            Annotation {
                yref: Some("paper".to_string()),
                xanchor: Some("center".to_string()),
                yanchor: Some("top".to_string()),
                ax: Some(ARROW_LENGTH * direction),
                ay: Some(0.0),
                xshift: Some(5.0 * direction),
                width: Some(2.0 * ARROW_LENGTH),
                align: Some(if to_left { "right" } else { "left" }.to_string()),
                showarrow: true,
                arrowside: Some("start".to_string()),
                ..Annotation::new(label.as_str(), median, -0.08)
            },
        )?;
    }

    let tickvals: Vec<FloatValue> = models.iter().map(|e| e.i as FloatValue).collect();
    let update = |axis: &mut Axis| {
        axis.gridcolor = Some(GRIDCOLOR.to_string());
        axis.tickvals = Some(tickvals.clone());
        axis.range = Some([n + 1.0, -1.0]);
        axis.zeroline = Some(false);
        axis.showticklabels = Some(false);
    };
    if options.shared_yaxes {
        fig.yaxes_mut().for_each(update);
    } else {
        update(fig.yaxis_mut(col)?);
    }

    fig.layout.legend = Some(Legend {
        tracegroupgap: Some(0.0),
        y: Some(0.5),
    });
    Ok(())
}
