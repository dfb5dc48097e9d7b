//! Validated configuration values that know how to write themselves as R.
//!
//! Every type validates on construction and fails with a
//! [`DomainError`](crate::error::DomainError) when the input is outside its
//! domain. There is no fallback to a default: callers supply a valid value or
//! get an error.

pub mod color;
pub mod lookup;
pub mod marker;
pub mod output;

pub use color::Color;
pub use lookup::{
    AxisPosition, BarStyle, BoxType, LabelDirection, LineType, Mapped, TextPosition, TickMark,
    TitleKeys, TitlePosition,
};
pub use marker::{LineWeight, PointType};
pub use output::{OutputSize, OutputType};

use crate::rscript::Command;

/// Capability shared by all domain values: an R encoding of themselves.
pub trait RObject {
    fn to_r(&self) -> String;

    /// Whether the value stands for R's `NULL`; such values are left out of named arguments.
    fn is_null(&self) -> bool {
        false
    }
}

/// Closed set of domain values a literal can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainValue {
    Color(Color),
    LineType(LineType),
    LineWeight(LineWeight),
    PointType(PointType),
    BarStyle(BarStyle),
    TextPosition(TextPosition),
    AxisPosition(AxisPosition),
    LabelDirection(LabelDirection),
    TickMark(TickMark),
    BoxType(BoxType),
    TitlePosition(TitlePosition),
    OutputType(OutputType),
    OutputSize(OutputSize),
    /// A `matrix(...)` call used as an argument of another command.
    Matrix(Box<Command>),
}

impl DomainValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            DomainValue::Color(_) => "color",
            DomainValue::LineType(_) => "line type",
            DomainValue::LineWeight(_) => "line weight",
            DomainValue::PointType(_) => "point type",
            DomainValue::BarStyle(_) => "bar style",
            DomainValue::TextPosition(_) => "text position",
            DomainValue::AxisPosition(_) => "axis position",
            DomainValue::LabelDirection(_) => "label direction",
            DomainValue::TickMark(_) => "tick mark",
            DomainValue::BoxType(_) => "box type",
            DomainValue::TitlePosition(_) => "title position",
            DomainValue::OutputType(_) => "output type",
            DomainValue::OutputSize(_) => "output size",
            DomainValue::Matrix(_) => "matrix",
        }
    }

    fn inner(&self) -> &dyn RObject {
        match self {
            DomainValue::Color(v) => v,
            DomainValue::LineType(v) => v,
            DomainValue::LineWeight(v) => v,
            DomainValue::PointType(v) => v,
            DomainValue::BarStyle(v) => v,
            DomainValue::TextPosition(v) => v,
            DomainValue::AxisPosition(v) => v,
            DomainValue::LabelDirection(v) => v,
            DomainValue::TickMark(v) => v,
            DomainValue::BoxType(v) => v,
            DomainValue::TitlePosition(v) => v,
            DomainValue::OutputType(v) => v,
            DomainValue::OutputSize(v) => v,
            DomainValue::Matrix(v) => &**v,
        }
    }
}

impl RObject for DomainValue {
    fn to_r(&self) -> String {
        self.inner().to_r()
    }

    fn is_null(&self) -> bool {
        self.inner().is_null()
    }
}

impl RObject for Command {
    fn to_r(&self) -> String {
        Command::to_r(self)
    }
}
