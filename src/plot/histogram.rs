use crate::error::{PlotError, PlotResult};
use crate::params::commands::Hist;
use crate::params::value::{Fields, Value};
use crate::params::CommandSchema;
use crate::plot::document::{Category, CommandBuckets, PlotDocument};
use crate::plot::Chart;

/// Histogram of a single series.
#[derive(Debug, Clone)]
pub struct Histogram {
    document: PlotDocument,
}

impl Histogram {
    pub fn new(args: Fields) -> PlotResult<Self> {
        Ok(Self {
            document: PlotDocument::new(args)?,
        })
    }

    /// Set the series. Options understand `color`, `bins`, `x_range` and `y_range`.
    pub fn add_series(&mut self, values: Value, options: Fields) -> PlotResult<()> {
        self.document.ensure_open()?;
        if !self.document.series().is_empty() {
            return Err(PlotError::state("a histogram takes exactly one series"));
        }
        self.document.push_series(values, None, options).map(|_| ())
    }
}

impl Chart for Histogram {
    fn document(&self) -> &PlotDocument {
        &self.document
    }

    fn document_mut(&mut self) -> &mut PlotDocument {
        &mut self.document
    }

    fn assemble(&self) -> PlotResult<CommandBuckets> {
        let series = self
            .document
            .series()
            .first()
            .ok_or_else(|| PlotError::state("a histogram needs a series"))?;
        let input = series.options.clone().with("series", series.y.clone());

        let mut commands = self.document.commands().clone();
        commands.push(Category::PlotFrame, Hist.build(&input)?);
        Ok(commands)
    }
}
