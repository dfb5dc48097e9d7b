use std::fmt;

use crate::domain::{DomainValue, RObject};
use crate::error::{PlotError, PlotResult};
use crate::params::value::Value;

/// An R number: integers stay integral, floats keep a fractional part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(n) => *n as f64,
            Number::Float(f) => *f,
        }
    }

    /// Smaller of two numbers, keeping the representation of the winner.
    pub fn min(self, other: Number) -> Number {
        if other.as_f64() < self.as_f64() {
            other
        } else {
            self
        }
    }

    pub fn max(self, other: Number) -> Number {
        if other.as_f64() > self.as_f64() {
            other
        } else {
            self
        }
    }

    /// Shift by a whole amount. Integers that would overflow become floats.
    pub fn offset(self, delta: i64) -> Number {
        match self {
            Number::Int(n) => n
                .checked_add(delta)
                .map_or(Number::Float(n as f64 + delta as f64), Number::Int),
            Number::Float(f) => Number::Float(f + delta as f64),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Int(n as i64)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(v) if v.is_nan() => write!(f, "NaN"),
            Number::Float(v) if v.is_infinite() => {
                write!(f, "{}", if *v > 0.0 { "Inf" } else { "-Inf" })
            }
            Number::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{:.1}", v),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

/// A value in R literal form.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(Number),
    /// Enumeration tag. Renders exactly like text.
    Tag(String),
    Text(String),
    Bool(bool),
    /// A length-1 sequence renders as its only element, longer ones as `c(...)`.
    Seq(Vec<Literal>),
    Object(DomainValue),
}

impl Literal {
    pub fn text(s: impl Into<String>) -> Self {
        Literal::Text(s.into())
    }

    pub fn int(n: i64) -> Self {
        Literal::Number(Number::Int(n))
    }

    /// Render as R source.
    ///
    /// Quotes inside text are not escaped.
    pub fn to_r(&self) -> String {
        match self {
            Literal::Number(n) => n.to_string(),
            Literal::Tag(s) | Literal::Text(s) => format!("'{}'", s),
            Literal::Bool(true) => "TRUE".to_string(),
            Literal::Bool(false) => "FALSE".to_string(),
            Literal::Seq(items) if items.len() == 1 => items[0].to_r(),
            Literal::Seq(items) => {
                let parts: Vec<String> = items.iter().map(Literal::to_r).collect();
                format!("c({})", parts.join(", "))
            }
            Literal::Object(obj) => obj.to_r(),
        }
    }

    /// True for domain values whose lookup maps to R's `NULL`.
    pub fn is_null(&self) -> bool {
        match self {
            Literal::Object(obj) => obj.is_null(),
            _ => false,
        }
    }

    /// Number of elements this literal stands for (scalars count as one).
    pub fn len(&self) -> usize {
        match self {
            Literal::Seq(items) => items.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Literal::Number(n) => Some(*n),
            Literal::Seq(items) if items.len() == 1 => items[0].as_number(),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DomainValue> {
        match self {
            Literal::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Convert a raw value without any schema.
    ///
    /// Nulls and nested field maps have no literal form.
    pub fn from_value(value: &Value) -> PlotResult<Literal> {
        match value {
            Value::Int(n) => Ok(Literal::Number(Number::Int(*n))),
            Value::Float(f) => Ok(Literal::Number(Number::Float(*f))),
            Value::Bool(b) => Ok(Literal::Bool(*b)),
            Value::Str(s) => Ok(Literal::Text(s.clone())),
            Value::Symbol(s) => Ok(Literal::Tag(s.clone())),
            Value::List(items) => items
                .iter()
                .map(Literal::from_value)
                .collect::<PlotResult<Vec<_>>>()
                .map(Literal::Seq),
            Value::Object(obj) => Ok(Literal::Object(obj.clone())),
            Value::Null | Value::Map(_) => Err(PlotError::type_err(format!(
                "a {} cannot be written as an R literal",
                value.type_name()
            ))),
        }
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Literal::Number(n)
    }
}

impl From<Vec<Number>> for Literal {
    fn from(numbers: Vec<Number>) -> Self {
        Literal::Seq(numbers.into_iter().map(Literal::Number).collect())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_r())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Color;

    fn num(n: i64) -> Literal {
        Literal::int(n)
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(Number::Int(3).to_string(), "3");
        assert_eq!(Number::Float(1.0).to_string(), "1.0");
        assert_eq!(Number::Float(0.2).to_string(), "0.2");
        assert_eq!(Number::Float(-0.01).to_string(), "-0.01");
        assert_eq!(Number::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Number::Float(f64::NEG_INFINITY).to_string(), "-Inf");
    }

    #[test]
    fn test_offset_at_integer_limits() {
        assert_eq!(Number::Int(3).offset(-1), Number::Int(2));
        assert_eq!(Number::Float(0.5).offset(1), Number::Float(1.5));
        assert_eq!(Number::Int(i64::MAX).offset(-1), Number::Int(i64::MAX - 1));
        assert_eq!(Number::Int(i64::MAX).offset(1), Number::Float(i64::MAX as f64 + 1.0));
        assert_eq!(Number::Int(i64::MIN).offset(-1), Number::Float(i64::MIN as f64 - 1.0));
    }

    #[test]
    fn test_scalars() {
        assert_eq!(Literal::Tag("red".into()).to_r(), "'red'");
        assert_eq!(Literal::text("x title").to_r(), "'x title'");
        assert_eq!(Literal::Bool(true).to_r(), "TRUE");
        assert_eq!(Literal::Bool(false).to_r(), "FALSE");
    }

    #[test]
    fn test_single_element_sequence_collapses() {
        for lit in [num(7), Literal::text("a"), Literal::Bool(false)] {
            assert_eq!(Literal::Seq(vec![lit.clone()]).to_r(), lit.to_r());
        }
    }

    #[test]
    fn test_sequence_uses_combine() {
        let seq = Literal::Seq(vec![num(1), Literal::text("b")]);
        assert_eq!(seq.to_r(), "c(1, 'b')");
        assert_eq!(Literal::Seq(vec![]).to_r(), "c()");
    }

    #[test]
    fn test_quotes_are_not_escaped() {
        assert_eq!(Literal::text("it's").to_r(), "'it's'");
    }

    #[test]
    fn test_object_delegates() {
        let color = Color::new(&Value::sym("red")).unwrap();
        assert_eq!(Literal::Object(DomainValue::Color(color)).to_r(), "'red'");
    }

    #[test]
    fn test_from_value_rejects_null() {
        let err = Literal::from_value(&Value::List(vec![Value::Int(1), Value::Null])).unwrap_err();
        assert!(matches!(err, PlotError::Type(_)));
    }

    #[test]
    fn test_number_min_max_keep_representation() {
        let a = Number::Int(2);
        let b = Number::Float(2.5);
        assert_eq!(a.min(b), Number::Int(2));
        assert_eq!(a.max(b), Number::Float(2.5));
        assert_eq!(Number::Int(4).offset(1), Number::Int(5));
    }
}
