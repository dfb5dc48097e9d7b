use crate::error::{PlotError, PlotResult};
use crate::params::commands::{Frame, Legend, Points, Text};
use crate::params::mapping::numeric_pair;
use crate::params::value::{Fields, Value};
use crate::params::CommandSchema;
use crate::plot::document::{Category, CommandBuckets, PlotDocument};
use crate::plot::series::{auto_range, collect_option, Axis, Series};
use crate::plot::Chart;
use crate::rscript::Number;

/// How one axis range is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeSpec {
    /// Span every series on the axis.
    Auto,
    Fixed(Number, Number),
}

impl RangeSpec {
    /// Read `field` from document args. Absent or `auto` means [`RangeSpec::Auto`].
    pub fn from_args(args: &Fields, field: &str) -> PlotResult<Self> {
        match args.get(field) {
            None => Ok(RangeSpec::Auto),
            Some(v) if v.as_name() == Some("auto") => Ok(RangeSpec::Auto),
            Some(v) => {
                let (lo, hi) = numeric_pair(v, field)?;
                if lo.as_f64() >= hi.as_f64() {
                    return Err(PlotError::validation(
                        field,
                        format!("minimum {} must be below maximum {}", lo, hi),
                    ));
                }
                Ok(RangeSpec::Fixed(lo, hi))
            }
        }
    }

    fn resolve(self, series: &[Series], axis: Axis) -> Option<(Number, Number)> {
        match self {
            RangeSpec::Auto => auto_range(series, axis),
            RangeSpec::Fixed(lo, hi) => Some((lo, hi)),
        }
    }
}

/// Line plot: one `points` command per series over a shared frame.
///
/// Document args additionally understand `x_range`, `y_range` and `auto_legend`.
#[derive(Debug, Clone)]
pub struct LinePlot {
    document: PlotDocument,
    x_range: RangeSpec,
    y_range: RangeSpec,
    auto_legend: bool,
}

impl LinePlot {
    pub fn new(args: Fields) -> PlotResult<Self> {
        let x_range = RangeSpec::from_args(&args, "x_range")?;
        let y_range = RangeSpec::from_args(&args, "y_range")?;
        let auto_legend = args.flag("auto_legend")?;
        Ok(Self {
            document: PlotDocument::new(args)?,
            x_range,
            y_range,
            auto_legend,
        })
    }

    /// Add a series. Without `x`, points are placed at `0..y.len()`.
    pub fn add_series(&mut self, y: Value, x: Option<Value>, options: Fields) -> PlotResult<()> {
        self.document.push_series(y, x, options).map(|_| ())
    }

    /// The ranges the frame will use, resolving `auto` against the current series.
    pub fn ranges(&self) -> Option<((Number, Number), (Number, Number))> {
        let series = self.document.series();
        Some((
            self.x_range.resolve(series, Axis::X)?,
            self.y_range.resolve(series, Axis::Y)?,
        ))
    }

    fn annotate(series: &Series, commands: &mut CommandBuckets) -> PlotResult<()> {
        let Some(annotations) = series.option("annotations") else {
            return Ok(());
        };
        if annotations.is_empty() {
            return Ok(());
        }
        let location: Vec<Value> = series
            .x
            .iter()
            .zip(&series.y)
            .map(|(x, y)| Value::from(vec![*x, *y]))
            .collect();
        let mut input = Fields::new()
            .with("text", annotations.clone())
            .with("location", location);
        match series.option("annotation_options") {
            None => {}
            Some(Value::Map(options)) => input.merge(options),
            Some(other) => {
                return Err(PlotError::validation(
                    "annotation_options",
                    format!("expected a table, got {}", other.type_name()),
                ))
            }
        }
        commands.push(Category::TextAnnotations, Text.build(&input)?);
        Ok(())
    }

    fn legend(series: &[Series], corner: (Number, Number)) -> Fields {
        Fields::new()
            .with("position", vec![corner.0, corner.1])
            .with("name", collect_option(series, "name"))
            .with("color", collect_option(series, "color"))
            .with("line_type", collect_option(series, "line_type"))
            .with("line_weight", collect_option(series, "line_weight"))
            .with("point_type", collect_option(series, "point_type"))
            .with("box_type", Value::sym("none"))
    }
}

impl Chart for LinePlot {
    fn document(&self) -> &PlotDocument {
        &self.document
    }

    fn document_mut(&mut self) -> &mut PlotDocument {
        &mut self.document
    }

    fn assemble(&self) -> PlotResult<CommandBuckets> {
        let series = self.document.series();
        let first = series
            .first()
            .ok_or_else(|| PlotError::state("a line plot needs at least one series"))?;
        let ((x_min, x_max), (y_min, y_max)) = self
            .ranges()
            .ok_or_else(|| PlotError::state("a line plot needs at least one series"))?;

        let mut commands = self.document.commands().clone();

        let frame = self
            .document
            .args()
            .clone()
            .with("x", first.x[0])
            .with("y", first.y[0])
            .with("line_type", Value::sym("none"))
            .with("point_type", Value::sym("none"))
            .with("x_range", vec![x_min, x_max])
            .with("y_range", vec![y_min, y_max]);
        commands.push(Category::PlotFrame, Frame.build(&frame)?);

        for s in series {
            let input = s
                .options
                .clone()
                .with("x", s.x.clone())
                .with("y", s.y.clone());
            commands.push(Category::Points, Points.build(&input)?);
        }

        for s in series {
            Self::annotate(s, &mut commands)?;
        }

        if self.auto_legend {
            let legend = Self::legend(series, (x_min, y_max));
            commands.push(Category::Legends, Legend.build(&legend)?);
        }

        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    fn plot(extra: Fields) -> LinePlot {
        let args = fields! { "path" => "out.png", "type" => Value::sym("png") }.merged(&extra);
        LinePlot::new(args).unwrap()
    }

    #[test]
    fn test_range_spec() {
        assert_eq!(RangeSpec::from_args(&Fields::new(), "x_range").unwrap(), RangeSpec::Auto);
        let auto = fields! { "x_range" => Value::sym("auto") };
        assert_eq!(RangeSpec::from_args(&auto, "x_range").unwrap(), RangeSpec::Auto);
        let fixed = fields! { "x_range" => vec![0, 10] };
        assert_eq!(
            RangeSpec::from_args(&fixed, "x_range").unwrap(),
            RangeSpec::Fixed(Number::Int(0), Number::Int(10))
        );
        assert!(RangeSpec::from_args(&fields! { "x_range" => vec![3, 3] }, "x_range").is_err());
        assert!(RangeSpec::from_args(&fields! { "x_range" => "wide" }, "x_range").is_err());
    }

    #[test]
    fn test_frame_uses_first_point_and_ranges() {
        let mut p = plot(Fields::new());
        p.add_series(Value::from(vec![1, 3, 2, 5, 4]), None, Fields::new()).unwrap();
        p.add_series(Value::from(vec![2, 6, 3, 8, 1]), None, Fields::new()).unwrap();
        let commands = p.assemble().unwrap();
        assert_eq!(
            commands.get(Category::PlotFrame)[0].to_r(),
            "plot(0, 1, lty=0, pch='.', xlim=c(0, 4), ylim=c(1, 8), type='o', ann=FALSE)"
        );
        assert_eq!(commands.get(Category::Points).len(), 2);
    }

    #[test]
    fn test_supplied_x_values_drive_the_range() {
        let mut p = plot(Fields::new());
        p.add_series(
            Value::from(vec![1, 3]),
            Some(Value::from(vec![2.5, 7.0])),
            Fields::new(),
        )
        .unwrap();
        p.add_series(Value::from(vec![2, 6, 3]), None, Fields::new()).unwrap();
        let ((x_min, x_max), _) = p.ranges().unwrap();
        assert_eq!((x_min, x_max), (Number::Int(0), Number::Float(7.0)));
    }

    #[test]
    fn test_annotations() {
        let mut p = plot(Fields::new());
        p.add_series(
            Value::from(vec![5, 6]),
            None,
            fields! {
                "annotations" => vec!["a", "b"],
                "annotation_options" => fields! { "position" => Value::sym("above") },
            },
        )
        .unwrap();
        p.add_series(
            Value::from(vec![1]),
            None,
            fields! { "annotations" => Vec::<Value>::new() },
        )
        .unwrap();
        let commands = p.assemble().unwrap();
        let texts = commands.get(Category::TextAnnotations);
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].to_r(), "text(c(0, 1), c(5, 6), c('a', 'b'), pos=3)");
    }

    #[test]
    fn test_auto_legend() {
        let mut p = plot(fields! { "auto_legend" => true, "y_range" => vec![0, 10] });
        p.add_series(
            Value::from(vec![1, 2]),
            None,
            fields! { "color" => Value::sym("red"), "line_type" => Value::sym("dashed") },
        )
        .unwrap();
        p.add_series(Value::from(vec![3, 4]), None, fields! { "name" => "b" }).unwrap();
        let commands = p.assemble().unwrap();
        assert_eq!(
            commands.get(Category::Legends)[0].to_r(),
            "legend(0, 10, c('series[0]', 'b'), bty='n', col=c('red', 'black'), lty=2)"
        );
    }

    #[test]
    fn test_assemble_does_not_touch_the_document() {
        let mut p = plot(Fields::new());
        p.add_series(Value::from(vec![1, 2]), None, Fields::new()).unwrap();
        let before = p.document().commands().clone();
        let first = p.script().unwrap();
        assert_eq!(p.script().unwrap(), first);
        assert_eq!(p.document().commands(), &before);
    }
}
