//! Declarative field schemas and the types fields can be coerced into.

use crate::domain::*;
use crate::error::DomainError;
use crate::params::value::Value;
use crate::rscript::Literal;

/// Target type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Numeric,
    Integer,
    Text,
    Boolean,
    Color,
    LineType,
    LineWeight,
    PointType,
    BarStyle,
    TextPosition,
    AxisPosition,
    LabelDirection,
    TickMark,
    BoxType,
    TitlePosition,
    OutputType,
    OutputSize,
    Matrix,
}

impl FieldType {
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Numeric => "number",
            FieldType::Integer => "integer",
            FieldType::Text => "string",
            FieldType::Boolean => "boolean",
            FieldType::Color => "color",
            FieldType::LineType => "line type",
            FieldType::LineWeight => "line weight",
            FieldType::PointType => "point type",
            FieldType::BarStyle => "bar style",
            FieldType::TextPosition => "text position",
            FieldType::AxisPosition => "axis position",
            FieldType::LabelDirection => "label direction",
            FieldType::TickMark => "tick mark",
            FieldType::BoxType => "box type",
            FieldType::TitlePosition => "title position",
            FieldType::OutputType => "output type",
            FieldType::OutputSize => "output size",
            FieldType::Matrix => "matrix",
        }
    }

    /// Accept `value` only if it already is of this type.
    pub fn check(self, value: &Value) -> Result<Literal, DomainError> {
        let lit = match (self, value) {
            (FieldType::Numeric, Value::Int(_) | Value::Float(_)) => Literal::from_value(value).ok(),
            (FieldType::Integer, Value::Int(n)) => Some(Literal::int(*n)),
            (FieldType::Text, Value::Str(s)) => Some(Literal::Text(s.clone())),
            (FieldType::Boolean, Value::Bool(b)) => Some(Literal::Bool(*b)),
            (_, Value::Object(obj)) if self.is_domain() && obj.type_name() == self.name() => {
                Some(Literal::Object(obj.clone()))
            }
            _ => None,
        };
        lit.ok_or_else(|| {
            DomainError::new(format!(
                "expected {}, got {}",
                self.name(),
                value.type_name()
            ))
        })
    }

    /// Build the domain value, keeping instances that are already of this type.
    ///
    /// Plain types have nothing to build and fall back to [`FieldType::check`].
    pub fn coerce(self, value: &Value) -> Result<Literal, DomainError> {
        if let Value::Object(obj) = value {
            if obj.type_name() == self.name() {
                return Ok(Literal::Object(obj.clone()));
            }
        }
        let obj = match self {
            FieldType::Color => DomainValue::Color(Color::new(value)?),
            FieldType::LineType => DomainValue::LineType(LineType::new(value)?),
            FieldType::LineWeight => DomainValue::LineWeight(LineWeight::new(value)?),
            FieldType::PointType => DomainValue::PointType(PointType::new(value)?),
            FieldType::BarStyle => DomainValue::BarStyle(BarStyle::new(value)?),
            FieldType::TextPosition => DomainValue::TextPosition(TextPosition::new(value)?),
            FieldType::AxisPosition => DomainValue::AxisPosition(AxisPosition::new(value)?),
            FieldType::LabelDirection => DomainValue::LabelDirection(LabelDirection::new(value)?),
            FieldType::TickMark => DomainValue::TickMark(TickMark::new(value)?),
            FieldType::BoxType => DomainValue::BoxType(BoxType::new(value)?),
            FieldType::TitlePosition => DomainValue::TitlePosition(TitlePosition::new(value)?),
            FieldType::OutputType => DomainValue::OutputType(OutputType::new(value)?),
            FieldType::OutputSize => DomainValue::OutputSize(OutputSize::new(value)?),
            FieldType::Numeric
            | FieldType::Integer
            | FieldType::Text
            | FieldType::Boolean
            | FieldType::Matrix => return self.check(value),
        };
        Ok(Literal::Object(obj))
    }

    fn is_domain(self) -> bool {
        !matches!(
            self,
            FieldType::Numeric | FieldType::Integer | FieldType::Text | FieldType::Boolean
        )
    }
}

/// Where a field's value ends up in the generated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dest {
    Position(usize),
    Key(&'static str),
    /// Validated and kept for post-processing, but not emitted directly.
    Unrouted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub dest: Dest,
    pub ty: FieldType,
    pub required: bool,
    pub auto_cast: bool,
    /// Hand the whole list to the type's constructor instead of each element.
    pub array_type: bool,
    /// Symbolic value used when the field is absent.
    pub default: Option<&'static str>,
}

impl FieldSpec {
    const fn new(name: &'static str, dest: Dest, ty: FieldType) -> Self {
        Self {
            name,
            dest,
            ty,
            required: false,
            auto_cast: false,
            array_type: false,
            default: None,
        }
    }

    pub const fn key(name: &'static str, key: &'static str, ty: FieldType) -> Self {
        Self::new(name, Dest::Key(key), ty)
    }

    pub const fn pos(name: &'static str, index: usize, ty: FieldType) -> Self {
        Self::new(name, Dest::Position(index), ty)
    }

    pub const fn unrouted(name: &'static str, ty: FieldType) -> Self {
        Self::new(name, Dest::Unrouted, ty)
    }

    pub const fn auto(mut self) -> Self {
        self.auto_cast = true;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn array(mut self) -> Self {
        self.array_type = true;
        self
    }

    pub const fn default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }
}

/// Ordered set of field specs for one R function.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub name: &'static str,
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Key-union with a fragment: a field with a known name replaces the old one in place.
    pub fn with(mut self, fragment: &[FieldSpec]) -> Self {
        for spec in fragment {
            match self.fields.iter_mut().find(|f| f.name == spec.name) {
                Some(existing) => *existing = *spec,
                None => self.fields.push(*spec),
            }
        }
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Styling shared by every line-drawing command.
pub const LINE_PARAMS: &[FieldSpec] = &[
    FieldSpec::key("color", "col", FieldType::Color).auto(),
    FieldSpec::key("line_type", "lty", FieldType::LineType).auto(),
    FieldSpec::key("line_weight", "lwd", FieldType::LineWeight).auto(),
    FieldSpec::key("point_type", "pch", FieldType::PointType).auto().default("none"),
];

pub const XY_POINTS: &[FieldSpec] = &[
    FieldSpec::pos("x", 0, FieldType::Numeric),
    FieldSpec::pos("y", 1, FieldType::Numeric),
];

pub const XY_RANGE: &[FieldSpec] = &[
    FieldSpec::key("x_range", "xlim", FieldType::Numeric),
    FieldSpec::key("y_range", "ylim", FieldType::Numeric),
];
