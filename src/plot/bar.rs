use crate::domain::BarStyle;
use crate::error::{PlotError, PlotResult};
use crate::params::commands::{Barplot, Matrix};
use crate::params::value::{Fields, Value};
use crate::params::CommandSchema;
use crate::plot::document::{Category, CommandBuckets, PlotDocument};
use crate::plot::series::collect_option;
use crate::plot::Chart;

/// Bar plot of equally long series, one matrix row per series.
#[derive(Debug, Clone)]
pub struct BarPlot {
    document: PlotDocument,
}

impl BarPlot {
    /// `style` in `args` is `grouped` or `stacked`; only `stacked` sets `beside`.
    pub fn new(args: Fields) -> PlotResult<Self> {
        if let Some(style) = args.get("style") {
            BarStyle::new(style).map_err(|e| e.into_validation("style"))?;
        }
        Ok(Self {
            document: PlotDocument::new(args)?,
        })
    }

    /// Add a row of bars. Options understand `color`, `border` and `name`.
    pub fn add_series(&mut self, values: Value, options: Fields) -> PlotResult<()> {
        self.document.push_series(values, None, options).map(|_| ())
    }
}

impl Chart for BarPlot {
    fn document(&self) -> &PlotDocument {
        &self.document
    }

    fn document_mut(&mut self) -> &mut PlotDocument {
        &mut self.document
    }

    fn assemble(&self) -> PlotResult<CommandBuckets> {
        let series = self.document.series();
        let width = series
            .first()
            .ok_or_else(|| PlotError::state("a bar plot needs at least one series"))?
            .len();
        for (i, s) in series.iter().enumerate() {
            if s.len() != width {
                return Err(PlotError::validation(
                    format!("series[{}]", i),
                    format!("has {} values but the first series has {}", s.len(), width),
                ));
            }
        }

        let values = series.iter().flat_map(|s| s.y.iter().copied()).collect();
        let mut input = Fields::new()
            .with("matrix", Matrix::value(values, series.len(), width)?)
            .with("color", collect_option(series, "color"))
            .with("border_color", collect_option(series, "border"));
        if let Some(style) = self.document.args().get("style") {
            input.set("style", style.clone());
        }

        let mut commands = self.document.commands().clone();
        commands.push(Category::PlotFrame, Barplot.build(&input)?);
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    fn bars(style: Option<&str>) -> BarPlot {
        let mut args = fields! { "path" => "out.png", "type" => Value::sym("png") };
        if let Some(style) = style {
            args.set("style", Value::sym(style));
        }
        BarPlot::new(args).unwrap()
    }

    #[test]
    fn test_matrix_is_row_major_per_series() {
        let mut p = bars(Some("stacked"));
        p.add_series(Value::from(vec![1, 2, 3]), fields! { "color" => Value::sym("red") })
            .unwrap();
        p.add_series(Value::from(vec![4, 5, 6]), fields! { "border" => Value::sym("gray") })
            .unwrap();
        let commands = p.assemble().unwrap();
        assert_eq!(
            commands.get(Category::PlotFrame)[0].to_r(),
            "barplot(matrix(c(1, 2, 3, 4, 5, 6), 2, 3, byrow=TRUE), beside=TRUE, \
             col=c('red', 'black'), border='gray')"
        );
    }

    #[test]
    fn test_series_lengths_must_match() {
        let mut p = bars(None);
        p.add_series(Value::from(vec![1, 2]), Fields::new()).unwrap();
        p.add_series(Value::from(vec![3]), Fields::new()).unwrap();
        let err = p.assemble().unwrap_err();
        assert!(matches!(err, PlotError::Validation { ref field, .. } if field == "series[1]"));
    }

    #[test]
    fn test_style_is_checked_up_front() {
        let args = fields! { "path" => "out.png", "type" => Value::sym("png"), "style" => Value::sym("tiled") };
        assert!(BarPlot::new(args).is_err());
        assert!(bars(None).assemble().unwrap_err().is_state());
    }
}
