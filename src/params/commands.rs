//! One schema per generated R command.
//!
//! Each command is a unit struct implementing [`CommandSchema`]. The schema
//! itself is built once from the shared fragments in [`crate::params::schema`].

use log::debug;
use once_cell::sync::Lazy;

use crate::domain::{DomainValue, OutputType, TitlePosition};
use crate::error::{PlotError, PlotResult};
use crate::params::mapping::{map_fields, numeric_pair, ArgSet};
use crate::params::schema::{FieldSpec, FieldType, Schema, LINE_PARAMS, XY_POINTS, XY_RANGE};
use crate::params::value::{Fields, Value};
use crate::rscript::{Command, Literal, Number};

/// A declarative R command: field schema, function name, extra validation.
pub trait CommandSchema {
    fn schema(&self) -> &Schema;

    fn function_name(&self, _args: &ArgSet) -> PlotResult<String> {
        Ok(self.schema().name.to_string())
    }

    /// Cross-field checks and derived arguments, run after field mapping.
    fn post_validate(&self, _input: &Fields, _args: &mut ArgSet) -> PlotResult<()> {
        Ok(())
    }

    fn build(&self, input: &Fields) -> PlotResult<Command> {
        let mut args = map_fields(self.schema(), input)?;
        self.post_validate(input, &mut args)?;
        let name = self.function_name(&args)?;
        let command = args.into_command(name)?;
        debug!("built {}", command);
        Ok(command)
    }
}

fn len_of(args: &ArgSet, field: &str) -> usize {
    args.value(field).map_or(0, Literal::len)
}

fn check_xy(args: &ArgSet) -> PlotResult<()> {
    let (x, y) = (len_of(args, "x"), len_of(args, "y"));
    if x != y {
        return Err(PlotError::validation(
            "y",
            format!("has {} values but x has {}", y, x),
        ));
    }
    Ok(())
}

fn check_range(args: &ArgSet, field: &str) -> PlotResult<()> {
    let Some(range) = args.value(field) else {
        return Ok(());
    };
    let bounds = match range {
        Literal::Seq(items) if items.len() == 2 => (items[0].as_number(), items[1].as_number()),
        _ => (None, None),
    };
    match bounds {
        (Some(lo), Some(hi)) if lo.as_f64() < hi.as_f64() => Ok(()),
        (Some(lo), Some(hi)) => Err(PlotError::validation(
            field,
            format!("minimum {} must be below maximum {}", lo, hi),
        )),
        _ => Err(PlotError::validation(
            field,
            format!("expected [min, max], got {}", range),
        )),
    }
}

static OUTPUT: Lazy<Schema> = Lazy::new(|| {
    Schema::new("output").with(&[
        FieldSpec::pos("path", 0, FieldType::Text),
        FieldSpec::unrouted("type", FieldType::OutputType).auto().required(),
        FieldSpec::unrouted("size", FieldType::OutputSize).auto().array(),
    ])
});

/// Opens the graphics device. The function name is the output type's tag.
pub struct Output;

impl Output {
    fn output_type(args: &ArgSet) -> PlotResult<OutputType> {
        match args.value("type").and_then(Literal::as_object) {
            Some(DomainValue::OutputType(t)) => Ok(*t),
            _ => Err(PlotError::validation("type", "expected a single output type")),
        }
    }
}

impl CommandSchema for Output {
    fn schema(&self) -> &Schema {
        &OUTPUT
    }

    fn function_name(&self, args: &ArgSet) -> PlotResult<String> {
        Ok(Self::output_type(args)?.tag().to_string())
    }

    fn post_validate(&self, _input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        let output_type = Self::output_type(args)?;
        let size = match args.value("size").and_then(Literal::as_object) {
            Some(DomainValue::OutputSize(size)) => Some(*size),
            _ => None,
        };
        if let Some(size) = size {
            if !output_type.is_vector() {
                args.set_named("width", Literal::int(size.width));
                args.set_named("height", Literal::int(size.height));
            }
        }
        Ok(())
    }
}

static PAR: Lazy<Schema> = Lazy::new(|| {
    Schema::new("par").with(&[
        FieldSpec::key("global_scale", "cex", FieldType::Numeric),
        FieldSpec::key("axis_font_scale", "cex.axis", FieldType::Numeric),
        FieldSpec::key("axis_font_color", "col.axis", FieldType::Color).auto(),
        FieldSpec::key("background", "bg", FieldType::Color).auto(),
        FieldSpec::key("foreground", "fg", FieldType::Color).auto(),
        FieldSpec::key("margin", "mar", FieldType::Numeric),
    ])
});

/// Global graphics parameters.
pub struct Par;

impl CommandSchema for Par {
    fn schema(&self) -> &Schema {
        &PAR
    }

    fn post_validate(&self, _input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        if args.value("margin").is_some() && len_of(args, "margin") != 4 {
            return Err(PlotError::validation(
                "margin",
                format!("expected 4 values, got {}", len_of(args, "margin")),
            ));
        }
        Ok(())
    }
}

static FRAME: Lazy<Schema> = Lazy::new(|| {
    Schema::new("plot")
        .with(&[FieldSpec::key("axes", "axes", FieldType::Boolean)])
        .with(LINE_PARAMS)
        .with(XY_POINTS)
        .with(XY_RANGE)
});

/// The `plot` call that sets up axes and ranges.
pub struct Frame;

impl CommandSchema for Frame {
    fn schema(&self) -> &Schema {
        &FRAME
    }

    fn post_validate(&self, _input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        check_xy(args)?;
        check_range(args, "x_range")?;
        check_range(args, "y_range")?;
        args.set_named("type", Literal::text("o"));
        args.set_named("ann", Literal::Bool(false));
        Ok(())
    }
}

static POINTS: Lazy<Schema> =
    Lazy::new(|| Schema::new("points").with(LINE_PARAMS).with(XY_POINTS));

pub struct Points;

impl CommandSchema for Points {
    fn schema(&self) -> &Schema {
        &POINTS
    }

    fn post_validate(&self, _input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        check_xy(args)?;
        args.set_named("type", Literal::text("o"));
        Ok(())
    }
}

static LINES: Lazy<Schema> = Lazy::new(|| Schema::new("lines").with(LINE_PARAMS).with(XY_POINTS));

pub struct Lines;

impl CommandSchema for Lines {
    fn schema(&self) -> &Schema {
        &LINES
    }

    fn post_validate(&self, _input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        check_xy(args)
    }
}

static ABLINE: Lazy<Schema> = Lazy::new(|| {
    Schema::new("abline")
        .with(&[
            FieldSpec::key("horizontal", "h", FieldType::Numeric),
            FieldSpec::key("vertical", "v", FieldType::Numeric),
        ])
        .with(LINE_PARAMS)
});

/// Horizontal and/or vertical reference lines.
pub struct Abline;

impl CommandSchema for Abline {
    fn schema(&self) -> &Schema {
        &ABLINE
    }

    fn post_validate(&self, _input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        if args.value("horizontal").is_none() && args.value("vertical").is_none() {
            return Err(PlotError::validation(
                "horizontal",
                "a reference line needs horizontal or vertical positions",
            ));
        }
        Ok(())
    }
}

static TEXT: Lazy<Schema> = Lazy::new(|| {
    Schema::new("text").with(&[
        FieldSpec::pos("text", 2, FieldType::Text),
        FieldSpec::key("position", "pos", FieldType::TextPosition).auto(),
        FieldSpec::key("offset", "offset", FieldType::Integer),
        FieldSpec::key("font_scale", "cex", FieldType::Numeric),
        FieldSpec::key("rotation", "srt", FieldType::Numeric),
        FieldSpec::key("color", "col", FieldType::Color).auto(),
    ])
});

/// Text at one location or at a list of locations.
pub struct Text;

impl Text {
    /// Split `location` into x and y literals. Accepts `[x, y]` or `[[x, y], ...]`.
    fn split_location(raw: Option<&Value>) -> PlotResult<(Literal, Literal)> {
        let raw = raw.ok_or_else(|| PlotError::validation("location", "is required"))?;
        match raw.as_list() {
            Some(items) if items.first().and_then(Value::as_list).is_some() => {
                let mut xs = Vec::with_capacity(items.len());
                let mut ys = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let (x, y) = numeric_pair(item, &format!("location[{}]", i))?;
                    xs.push(x);
                    ys.push(y);
                }
                Ok((Literal::from(xs), Literal::from(ys)))
            }
            _ => {
                let (x, y) = numeric_pair(raw, "location")?;
                Ok((x.into(), y.into()))
            }
        }
    }
}

impl CommandSchema for Text {
    fn schema(&self) -> &Schema {
        &TEXT
    }

    fn post_validate(&self, input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        let (x, y) = Self::split_location(input.get("location"))?;
        args.set_positional(0, x);
        args.set_positional(1, y);
        Ok(())
    }
}

static LEGEND: Lazy<Schema> = Lazy::new(|| {
    Schema::new("legend")
        .with(&[
            FieldSpec::pos("name", 2, FieldType::Text),
            FieldSpec::key("box_type", "bty", FieldType::BoxType).auto(),
        ])
        .with(LINE_PARAMS)
});

pub struct Legend;

impl CommandSchema for Legend {
    fn schema(&self) -> &Schema {
        &LEGEND
    }

    fn post_validate(&self, input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        let position = input
            .get("position")
            .ok_or_else(|| PlotError::validation("position", "is required"))?;
        let (x, y) = numeric_pair(position, "position")?;
        args.set_positional(0, x.into());
        args.set_positional(1, y.into());
        Ok(())
    }
}

static TITLE: Lazy<Schema> = Lazy::new(|| {
    Schema::new("title").with(&[
        FieldSpec::unrouted("title", FieldType::Text).required(),
        FieldSpec::unrouted("position", FieldType::TitlePosition).auto().required(),
        FieldSpec::key("font_scale", "cex", FieldType::Numeric),
        FieldSpec::unrouted("color", FieldType::Color).auto(),
    ])
});

/// Axis label or main title. The position picks which `title()` keys are set.
pub struct Title;

impl CommandSchema for Title {
    fn schema(&self) -> &Schema {
        &TITLE
    }

    fn post_validate(&self, _input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        let position: TitlePosition = match args.value("position").and_then(Literal::as_object) {
            Some(DomainValue::TitlePosition(p)) => *p,
            _ => return Err(PlotError::validation("position", "expected a single title position")),
        };
        let keys = position.keys();
        for (field, key) in [("title", keys.label), ("color", keys.color), ("font_scale", keys.scale)] {
            if let Some(value) = args.value(field).cloned() {
                args.set_named(key, value);
            }
        }
        Ok(())
    }
}

static AXIS: Lazy<Schema> = Lazy::new(|| {
    Schema::new("axis").with(&[
        FieldSpec::pos("location", 0, FieldType::AxisPosition).auto(),
        FieldSpec::key("ticks", "at", FieldType::Numeric).required(),
        FieldSpec::key("labels", "labels", FieldType::Text),
        FieldSpec::key("origin", "pos", FieldType::Numeric),
        FieldSpec::key("line_type", "lty", FieldType::LineType).auto(),
        FieldSpec::key("color", "col", FieldType::Color).auto(),
        FieldSpec::key("label_direction", "las", FieldType::LabelDirection)
            .auto()
            .default("parallel"),
        FieldSpec::key("tick_marks", "tck", FieldType::TickMark)
            .auto()
            .default("outside"),
    ])
});

pub struct Axis;

impl CommandSchema for Axis {
    fn schema(&self) -> &Schema {
        &AXIS
    }

    fn post_validate(&self, _input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        if args.value("labels").is_some() && len_of(args, "labels") != len_of(args, "ticks") {
            return Err(PlotError::validation(
                "labels",
                format!(
                    "has {} entries but there are {} ticks",
                    len_of(args, "labels"),
                    len_of(args, "ticks")
                ),
            ));
        }
        Ok(())
    }
}

static BARPLOT: Lazy<Schema> = Lazy::new(|| {
    Schema::new("barplot").with(&[
        FieldSpec::pos("matrix", 0, FieldType::Matrix),
        FieldSpec::key("style", "beside", FieldType::BarStyle).auto(),
        FieldSpec::key("color", "col", FieldType::Color).auto(),
        FieldSpec::key("border_color", "border", FieldType::Color).auto(),
    ])
});

pub struct Barplot;

impl CommandSchema for Barplot {
    fn schema(&self) -> &Schema {
        &BARPLOT
    }
}

static MATRIX: Lazy<Schema> = Lazy::new(|| {
    Schema::new("matrix").with(&[
        FieldSpec::pos("values", 0, FieldType::Numeric),
        FieldSpec::pos("height", 1, FieldType::Integer),
        FieldSpec::pos("width", 2, FieldType::Integer),
    ])
});

/// Row-major `matrix(values, height, width, byrow=TRUE)`.
pub struct Matrix;

impl Matrix {
    /// Build the matrix call wrapped as a value for [`Barplot`]'s `matrix` field.
    pub fn value(values: Vec<Number>, height: usize, width: usize) -> PlotResult<Value> {
        let input = Fields::new()
            .with("values", values)
            .with("height", height)
            .with("width", width);
        let command = Matrix.build(&input)?;
        Ok(Value::Object(DomainValue::Matrix(Box::new(command))))
    }
}

impl CommandSchema for Matrix {
    fn schema(&self) -> &Schema {
        &MATRIX
    }

    fn post_validate(&self, _input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        args.set_named("byrow", Literal::Bool(true));
        Ok(())
    }
}

static HIST: Lazy<Schema> = Lazy::new(|| {
    Schema::new("hist")
        .with(&[
            FieldSpec::pos("series", 0, FieldType::Numeric),
            FieldSpec::key("color", "col", FieldType::Color).auto(),
            FieldSpec::key("bins", "breaks", FieldType::Numeric),
        ])
        .with(XY_RANGE)
});

pub struct Hist;

impl CommandSchema for Hist {
    fn schema(&self) -> &Schema {
        &HIST
    }

    fn post_validate(&self, _input: &Fields, args: &mut ArgSet) -> PlotResult<()> {
        for key in ["main", "xlab", "ylab"] {
            args.set_named(key, Literal::text(""));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    fn build(schema: &dyn CommandSchema, input: Fields) -> PlotResult<String> {
        schema.build(&input).map(|c| c.to_r())
    }

    #[test]
    fn test_output_raster_gets_size() {
        let out = build(
            &Output,
            fields! { "path" => "out.png", "type" => Value::sym("png"), "size" => vec![800, 600] },
        )
        .unwrap();
        assert_eq!(out, "png('out.png', width=800, height=600)");
    }

    #[test]
    fn test_output_pdf_drops_size() {
        let out = build(
            &Output,
            fields! { "path" => "out.pdf", "type" => "pdf", "size" => vec![800, 600] },
        )
        .unwrap();
        assert_eq!(out, "pdf('out.pdf')");
    }

    #[test]
    fn test_output_requires_type() {
        let err = build(&Output, fields! { "path" => "out.png" }).unwrap_err();
        assert!(matches!(err, PlotError::Validation { ref field, .. } if field == "type"));
    }

    #[test]
    fn test_empty_par() {
        assert_eq!(build(&Par, Fields::new()).unwrap(), "par()");
    }

    #[test]
    fn test_par_keys_and_margin() {
        let out = build(
            &Par,
            fields! {
                "axis_font_scale" => 1.5,
                "background" => Value::sym("white"),
                "margin" => vec![4, 4, 2, 1],
            },
        )
        .unwrap();
        assert_eq!(out, "par(cex.axis=1.5, bg='white', mar=c(4, 4, 2, 1))");
        assert!(build(&Par, fields! { "margin" => vec![1, 2] }).is_err());
    }

    #[test]
    fn test_frame() {
        let out = build(
            &Frame,
            fields! {
                "x" => 0,
                "y" => 1,
                "line_type" => Value::sym("none"),
                "x_range" => vec![0, 4],
                "y_range" => vec![1, 8],
            },
        )
        .unwrap();
        assert_eq!(
            out,
            "plot(0, 1, lty=0, pch='.', xlim=c(0, 4), ylim=c(1, 8), type='o', ann=FALSE)"
        );
    }

    #[test]
    fn test_frame_rejects_decreasing_range() {
        let err = build(
            &Frame,
            fields! { "x" => 0, "y" => 1, "x_range" => vec![4, 0] },
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::Validation { ref field, .. } if field == "x_range"));
    }

    #[test]
    fn test_points_and_lines_need_equal_lengths() {
        let out = build(&Points, fields! { "x" => vec![0, 1], "y" => vec![3, 4], "color" => Value::sym("red") })
            .unwrap();
        assert_eq!(out, "points(c(0, 1), c(3, 4), col='red', pch='.', type='o')");
        assert!(build(&Points, fields! { "x" => vec![0, 1], "y" => vec![3] }).is_err());
        assert!(build(&Lines, fields! { "x" => vec![0], "y" => vec![3, 4] }).is_err());
    }

    #[test]
    fn test_abline_needs_a_direction() {
        assert_eq!(
            build(&Abline, fields! { "horizontal" => 2, "line_type" => Value::sym("dashed") }).unwrap(),
            "abline(h=2, lty=2, pch='.')"
        );
        assert!(build(&Abline, fields! { "color" => Value::sym("red") }).is_err());
    }

    #[test]
    fn test_text_locations() {
        let single = build(&Text, fields! { "text" => "hi", "location" => vec![1, 2] }).unwrap();
        assert_eq!(single, "text(1, 2, 'hi')");

        let pairs = Value::from(vec![vec![0, 1], vec![2, 3]]);
        let many = build(
            &Text,
            fields! {
                "text" => vec!["a", "b"],
                "location" => pairs,
                "position" => Value::sym("above"),
            },
        )
        .unwrap();
        assert_eq!(many, "text(c(0, 2), c(1, 3), c('a', 'b'), pos=3)");

        assert!(build(&Text, fields! { "text" => "hi" }).is_err());
        assert!(build(&Text, fields! { "text" => "hi", "location" => vec![1, 2, 3] }).is_err());
    }

    #[test]
    fn test_legend_position() {
        let out = build(
            &Legend,
            fields! {
                "position" => vec![0, 8],
                "name" => vec!["a", "b"],
                "box_type" => Value::sym("none"),
            },
        )
        .unwrap();
        assert_eq!(out, "legend(0, 8, c('a', 'b'), bty='n', pch='.')");
    }

    #[test]
    fn test_title_keys_follow_position() {
        let x = build(&Title, fields! { "position" => Value::sym("x"), "title" => "Time" }).unwrap();
        assert_eq!(x, "title(xlab='Time')");

        let top = build(
            &Title,
            fields! {
                "position" => Value::sym("top"),
                "title" => "Main",
                "color" => Value::sym("blue"),
                "font_scale" => 2,
            },
        )
        .unwrap();
        assert_eq!(top, "title(cex=2, main='Main', col.main='blue', cex.main=2)");

        assert!(build(&Title, fields! { "title" => "Main" }).is_err());
    }

    #[test]
    fn test_axis_defaults_and_labels() {
        let out = build(
            &Axis,
            fields! { "location" => Value::sym("bottom"), "ticks" => vec![0, 1], "labels" => vec!["a", "b"] },
        )
        .unwrap();
        assert_eq!(out, "axis(1, at=c(0, 1), labels=c('a', 'b'), las=0, tck=-0.01)");

        let err = build(
            &Axis,
            fields! { "location" => Value::sym("left"), "ticks" => vec![0, 1], "labels" => "a" },
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::Validation { ref field, .. } if field == "labels"));
        assert!(build(&Axis, fields! { "location" => Value::sym("left") }).is_err());
    }

    #[test]
    fn test_matrix_and_barplot() {
        let values = vec![Number::Int(1), Number::Int(2), Number::Int(3), Number::Int(4)];
        let matrix = Matrix::value(values, 2, 2).unwrap();
        let out = build(
            &Barplot,
            fields! {
                "matrix" => matrix,
                "style" => Value::sym("stacked"),
                "color" => vec![Value::sym("red"), Value::sym("blue")],
            },
        )
        .unwrap();
        assert_eq!(
            out,
            "barplot(matrix(c(1, 2, 3, 4), 2, 2, byrow=TRUE), beside=TRUE, col=c('red', 'blue'))"
        );
    }

    #[test]
    fn test_grouped_bars_omit_beside() {
        let matrix = Matrix::value(vec![Number::Int(1)], 1, 1).unwrap();
        let out = build(&Barplot, fields! { "matrix" => matrix, "style" => "grouped" }).unwrap();
        assert_eq!(out, "barplot(matrix(1, 1, 1, byrow=TRUE))");
    }

    #[test]
    fn test_hist_blanks_labels() {
        let out = build(&Hist, fields! { "series" => vec![1.5, 2.0], "bins" => 4 }).unwrap();
        assert_eq!(out, "hist(c(1.5, 2.0), breaks=4, main='', xlab='', ylab='')");
    }
}
