//! Whole charts described in TOML.
//!
//! ```toml
//! kind = "line"
//!
//! [document]
//! path = "/tmp/out.png"
//! type = "png"
//! auto_legend = true
//!
//! [[series]]
//! y = [1, 3, 2, 5, 4]
//! options = { color = "red", line_type = "dashed" }
//!
//! [[titles]]
//! position = "top"
//! title = "Measurements"
//! ```

use serde::Deserialize;

use crate::error::{PlotError, PlotResult};
use crate::params::value::{Fields, Value};
use crate::plot::bar::BarPlot;
use crate::plot::document::{CommandBuckets, PlotDocument};
use crate::plot::histogram::Histogram;
use crate::plot::line::LinePlot;
use crate::plot::Chart;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Histogram,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesEntry {
    pub y: toml::Value,
    pub x: Option<toml::Value>,
    #[serde(default)]
    pub options: toml::Table,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleEntry {
    pub position: toml::Value,
    pub title: toml::Value,
    #[serde(default)]
    pub options: toml::Table,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegendEntry {
    pub position: toml::Value,
    pub names: toml::Value,
    #[serde(default)]
    pub options: toml::Table,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextEntry {
    pub text: toml::Value,
    pub location: toml::Value,
    #[serde(default)]
    pub options: toml::Table,
}

/// A chart as read from a description file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChartDescription {
    pub kind: ChartKind,
    /// Document args.
    pub document: toml::Table,
    pub series: Vec<SeriesEntry>,
    pub titles: Vec<TitleEntry>,
    pub legends: Vec<LegendEntry>,
    pub texts: Vec<TextEntry>,
    pub reference_lines: Vec<toml::Table>,
    pub lines: Vec<toml::Table>,
    pub axes: Vec<toml::Table>,
}

impl ChartDescription {
    pub fn from_toml(source: &str) -> PlotResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Replay the description onto a new chart of its kind.
    pub fn build(self) -> PlotResult<AnyChart> {
        let args = Fields::from(self.document);
        let mut chart = match self.kind {
            ChartKind::Line => AnyChart::Line(LinePlot::new(args)?),
            ChartKind::Bar => AnyChart::Bar(BarPlot::new(args)?),
            ChartKind::Histogram => AnyChart::Histogram(Histogram::new(args)?),
        };

        for s in self.series {
            chart.add_series(s.y.into(), s.x.map(Value::from), s.options.into())?;
        }
        for t in self.titles {
            chart.add_title(t.position.into(), t.title.into(), t.options.into())?;
        }
        for l in self.legends {
            chart.add_legend(l.position.into(), l.names.into(), l.options.into())?;
        }
        for t in self.texts {
            chart.add_text(t.text.into(), t.location.into(), t.options.into())?;
        }
        for options in self.reference_lines {
            chart.add_reference_line(options.into())?;
        }
        for options in self.lines {
            chart.add_line(options.into())?;
        }
        for options in self.axes {
            chart.add_axis(options.into())?;
        }
        Ok(chart)
    }
}

/// A chart of any kind.
#[derive(Debug, Clone)]
pub enum AnyChart {
    Line(LinePlot),
    Bar(BarPlot),
    Histogram(Histogram),
}

impl AnyChart {
    pub fn kind(&self) -> ChartKind {
        match self {
            AnyChart::Line(_) => ChartKind::Line,
            AnyChart::Bar(_) => ChartKind::Bar,
            AnyChart::Histogram(_) => ChartKind::Histogram,
        }
    }

    /// Only line plots take explicit x values.
    pub fn add_series(&mut self, y: Value, x: Option<Value>, options: Fields) -> PlotResult<()> {
        match (self, x) {
            (AnyChart::Line(p), x) => p.add_series(y, x, options),
            (AnyChart::Bar(p), None) => p.add_series(y, options),
            (AnyChart::Histogram(p), None) => p.add_series(y, options),
            (_, Some(_)) => Err(PlotError::validation(
                "x",
                "only line plots take x values",
            )),
        }
    }
}

impl Chart for AnyChart {
    fn document(&self) -> &PlotDocument {
        match self {
            AnyChart::Line(p) => p.document(),
            AnyChart::Bar(p) => p.document(),
            AnyChart::Histogram(p) => p.document(),
        }
    }

    fn document_mut(&mut self) -> &mut PlotDocument {
        match self {
            AnyChart::Line(p) => p.document_mut(),
            AnyChart::Bar(p) => p.document_mut(),
            AnyChart::Histogram(p) => p.document_mut(),
        }
    }

    fn assemble(&self) -> PlotResult<CommandBuckets> {
        match self {
            AnyChart::Line(p) => p.assemble(),
            AnyChart::Bar(p) => p.assemble(),
            AnyChart::Histogram(p) => p.assemble(),
        }
    }
}
