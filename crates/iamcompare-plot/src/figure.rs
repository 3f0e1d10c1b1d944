//! Renderer-agnostic figure description.
//!
//! The structures follow the plotly.js figure schema (`data` and `layout`), so a serialised
//! [`Figure`] can be passed to any plotly front end as is. Only the attributes used by the
//! comparison figures are modelled; unset attributes are left out of the JSON.

use crate::errors::{PlotError, PlotResult};
use iamcompare_core::FloatValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// A single value shared by all points, or one value per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "markers+lines")]
    MarkersLines,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

impl Line {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: FloatValue) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_dash(mut self, dash: impl Into<String>) -> Self {
        self.dash = Some(dash.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<OneOrMany<FloatValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

impl Marker {
    /// Marker with a single symbol, size and colour for all points
    pub fn uniform(symbol: &str, size: FloatValue, color: &str) -> Self {
        Self {
            color: Some(OneOrMany::One(color.to_string())),
            symbol: Some(OneOrMany::One(symbol.to_string())),
            size: Some(OneOrMany::One(size)),
            ..Default::default()
        }
    }
}

/// Coordinates with missing values (`NaN`) replaced by `null`, which plotly skips.
fn points<I: IntoIterator<Item = FloatValue>>(values: I) -> Vec<Option<FloatValue>> {
    values
        .into_iter()
        .map(|v| if v.is_nan() { None } else { Some(v) })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scatter {
    pub x: Vec<Option<FloatValue>>,
    pub y: Vec<Option<FloatValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Scatter {
    pub fn new<X, Y>(x: X, y: Y) -> Self
    where
        X: IntoIterator<Item = FloatValue>,
        Y: IntoIterator<Item = FloatValue>,
    {
        Self {
            x: points(x),
            y: points(y),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Fill the area enclosed by the trace
    pub fn with_fill(mut self, fillcolor: impl Into<String>) -> Self {
        self.fill = Some("toself".to_string());
        self.fillcolor = Some(fillcolor.into());
        self
    }

    pub fn with_line(mut self, line: Line) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_showlegend(mut self, showlegend: bool) -> Self {
        self.showlegend = Some(showlegend);
        self
    }

    pub fn with_legendgroup(mut self, group: impl Into<String>) -> Self {
        self.legendgroup = Some(group.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bar {
    pub x: Vec<Option<FloatValue>>,
    pub y: Vec<Option<FloatValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Bar {
    /// Horizontal bars of length `x` at positions `y`
    pub fn horizontal<X, Y>(x: X, y: Y) -> Self
    where
        X: IntoIterator<Item = FloatValue>,
        Y: IntoIterator<Item = FloatValue>,
    {
        Self {
            x: points(x),
            y: points(y),
            orientation: Some("h".to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(Scatter),
    Bar(Bar),
}

impl Trace {
    fn place(&mut self, col: usize) {
        let (xaxis, yaxis) = match self {
            Trace::Scatter(s) => (&mut s.xaxis, &mut s.yaxis),
            Trace::Bar(b) => (&mut b.xaxis, &mut b.yaxis),
        };
        *xaxis = Some(axis_ref('x', col));
        *yaxis = Some(axis_ref('y', col));
    }
}

impl From<Scatter> for Trace {
    fn from(value: Scatter) -> Self {
        Trace::Scatter(value)
    }
}

impl From<Bar> for Trace {
    fn from(value: Bar) -> Self {
        Trace::Bar(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Text placed on the figure, optionally with an arrow.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrowside: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ax: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ay: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xshift: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yshift: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textangle: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Annotation {
    /// Text without an arrow at `(x, y)`
    pub fn new(text: impl Into<String>, x: FloatValue, y: FloatValue) -> Self {
        Self {
            text: text.into(),
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn with_font_color(mut self, color: impl Into<String>) -> Self {
        self.font = Some(Font {
            color: Some(color.into()),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: String,
    pub xref: String,
    pub yref: String,
    pub x0: FloatValue,
    pub x1: FloatValue,
    pub y0: FloatValue,
    pub y1: FloatValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

impl Shape {
    /// Filled rectangle without border in paper coordinates
    pub fn paper_rect(
        x0: FloatValue,
        x1: FloatValue,
        y0: FloatValue,
        y1: FloatValue,
        fillcolor: impl Into<String>,
    ) -> Self {
        Self {
            kind: "rect".to_string(),
            xref: "paper".to_string(),
            yref: "paper".to_string(),
            x0,
            x1,
            y0,
            y1,
            fillcolor: Some(fillcolor.into()),
            line: Some(Line::default().with_width(0.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standoff: Option<FloatValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[FloatValue; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<FloatValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickformat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[FloatValue; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangemode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
}

impl Axis {
    pub fn set_title(&mut self, text: impl Into<String>, standoff: Option<FloatValue>) {
        self.title = Some(AxisTitle {
            text: text.into(),
            standoff,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub l: FloatValue,
    pub r: FloatValue,
    pub t: FloatValue,
    pub b: FloatValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracegroupgap: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<FloatValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    /// Axes by plotly name (`xaxis`, `xaxis2`, `yaxis`, ...)
    #[serde(flatten)]
    pub axes: BTreeMap<String, Axis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

/// Axis reference used by traces and annotations: `x`, `x2`, ...
pub fn axis_ref(letter: char, col: usize) -> String {
    if col <= 1 {
        letter.to_string()
    } else {
        format!("{letter}{col}")
    }
}

/// Axis name in the layout: `xaxis`, `xaxis2`, ...
fn axis_key(letter: char, col: usize) -> String {
    if col <= 1 {
        format!("{letter}axis")
    } else {
        format!("{letter}axis{col}")
    }
}

/// A figure with a single row of subplots.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
    #[serde(skip)]
    columns: usize,
}

impl Figure {
    /// Create a figure with `columns` subplots next to each other.
    ///
    /// `widths` are relative column widths and `spacing` the horizontal gap between
    /// columns, as a fraction of the figure width. Titles are placed above each column. With
    /// `shared_yaxes` every column uses the y axis of the first one.
    pub fn subplots(
        columns: usize,
        widths: &[FloatValue],
        spacing: FloatValue,
        titles: &[String],
        shared_yaxes: bool,
    ) -> PlotResult<Self> {
        if columns == 0 || widths.len() != columns {
            return Err(PlotError::InvalidLayout(format!(
                "expected {columns} column widths, got {}",
                widths.len()
            )));
        }
        if widths.iter().any(|w| w.is_nan() || *w <= 0.0) {
            return Err(PlotError::InvalidLayout(
                "column widths must be positive".to_string(),
            ));
        }
        let available = 1.0 - spacing * (columns - 1) as FloatValue;
        if spacing.is_nan() || spacing < 0.0 || available <= 0.0 {
            return Err(PlotError::InvalidLayout(format!(
                "spacing {spacing} leaves no room for {columns} columns"
            )));
        }

        let total: FloatValue = widths.iter().sum();
        let mut layout = Layout::default();
        let mut start = 0.0;
        for (i, width) in widths.iter().enumerate() {
            let col = i + 1;
            let end = start + width / total * available;

            layout.axes.insert(
                axis_key('x', col),
                Axis {
                    domain: Some([start, end]),
                    anchor: Some(axis_ref('y', col)),
                    ..Default::default()
                },
            );
            let shared = shared_yaxes && col > 1;
            layout.axes.insert(
                axis_key('y', col),
                Axis {
                    domain: Some([0.0, 1.0]),
                    anchor: Some(axis_ref('x', col)),
                    matches: shared.then(|| axis_ref('y', 1)),
                    showticklabels: shared.then_some(false),
                    ..Default::default()
                },
            );

            if let Some(title) = titles.get(i) {
                layout.annotations.push(Annotation {
                    xref: Some("paper".to_string()),
                    yref: Some("paper".to_string()),
                    xanchor: Some("center".to_string()),
                    yanchor: Some("bottom".to_string()),
                    ..Annotation::new(title.clone(), (start + end) / 2.0, 1.0)
                });
            }
            start = end + spacing;
        }

        Ok(Self {
            data: Vec::new(),
            layout,
            columns,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn check_column(&self, col: usize) -> PlotResult<()> {
        if col == 0 || col > self.columns {
            return Err(PlotError::UnknownSubplot(col));
        }
        Ok(())
    }

    /// Add a trace to the subplot in column `col` (starting at 1).
    pub fn add_trace(&mut self, col: usize, trace: impl Into<Trace>) -> PlotResult<()> {
        self.check_column(col)?;
        let mut trace = trace.into();
        trace.place(col);
        self.data.push(trace);
        Ok(())
    }

    /// Add an annotation positioned on the axes of column `col`.
    ///
    /// References that are already set (e.g. `paper`) are kept.
    pub fn add_annotation(&mut self, col: usize, mut annotation: Annotation) -> PlotResult<()> {
        self.check_column(col)?;
        annotation.xref.get_or_insert_with(|| axis_ref('x', col));
        annotation.yref.get_or_insert_with(|| axis_ref('y', col));
        self.layout.annotations.push(annotation);
        Ok(())
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.layout.shapes.push(shape);
    }

    pub fn xaxis_mut(&mut self, col: usize) -> PlotResult<&mut Axis> {
        self.layout
            .axes
            .get_mut(&axis_key('x', col))
            .ok_or(PlotError::UnknownSubplot(col))
    }

    pub fn yaxis_mut(&mut self, col: usize) -> PlotResult<&mut Axis> {
        self.layout
            .axes
            .get_mut(&axis_key('y', col))
            .ok_or(PlotError::UnknownSubplot(col))
    }

    /// All y axes of the figure
    pub fn yaxes_mut(&mut self) -> impl Iterator<Item = &mut Axis> {
        self.layout
            .axes
            .iter_mut()
            .filter(|(name, _)| name.starts_with("yaxis"))
            .map(|(_, axis)| axis)
    }

    pub fn to_value(&self) -> PlotResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> PlotResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
