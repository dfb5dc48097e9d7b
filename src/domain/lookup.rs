//! Enumerations backed by a symbolic-name → R value table.

use crate::domain::RObject;
use crate::error::DomainError;
use crate::params::value::Value;
use crate::rscript::{Literal, Number};

/// The R value a symbolic name stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mapped {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(&'static str),
}

impl Mapped {
    pub fn to_literal(self) -> Option<Literal> {
        match self {
            Mapped::Null => None,
            Mapped::Int(n) => Some(Literal::Number(Number::Int(n))),
            Mapped::Float(f) => Some(Literal::Number(Number::Float(f))),
            Mapped::Bool(b) => Some(Literal::Bool(b)),
            Mapped::Text(s) => Some(Literal::text(s)),
        }
    }
}

fn lookup(
    table: &'static [(&'static str, Mapped)],
    type_name: &str,
    value: &Value,
) -> Result<(&'static str, Mapped), DomainError> {
    let name = value.as_name().ok_or_else(|| {
        DomainError::new(format!(
            "{} must be a symbolic name, got {}",
            type_name,
            value.type_name()
        ))
    })?;
    table
        .iter()
        .find(|(key, _)| *key == name)
        .copied()
        .ok_or_else(|| {
            let keys: Vec<&str> = table.iter().map(|(k, _)| *k).collect();
            DomainError::new(format!(
                "{} must be one of {{{}}}, got '{}'",
                type_name,
                keys.join(","),
                name
            ))
        })
}

macro_rules! lookup_type {
    ($(#[$meta:meta])* $name:ident, $label:literal, [$($key:literal => $mapped:expr),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            key: &'static str,
            mapped: Mapped,
        }

        impl $name {
            pub const TABLE: &'static [(&'static str, Mapped)] = &[$(($key, $mapped)),+];

            pub fn new(value: &Value) -> Result<Self, DomainError> {
                let (key, mapped) = lookup(Self::TABLE, $label, value)?;
                Ok(Self { key, mapped })
            }

            /// The symbolic name this value was built from.
            pub fn key(&self) -> &'static str {
                self.key
            }

            pub fn mapped(&self) -> Mapped {
                self.mapped
            }
        }

        impl RObject for $name {
            fn to_r(&self) -> String {
                self.mapped
                    .to_literal()
                    .map_or_else(|| "NULL".to_string(), |lit| lit.to_r())
            }

            fn is_null(&self) -> bool {
                self.mapped == Mapped::Null
            }
        }
    };
}

lookup_type!(
    /// R `lty` codes.
    LineType, "line type", [
        "none" => Mapped::Int(0),
        "solid" => Mapped::Int(1),
        "dashed" => Mapped::Int(2),
        "dotted" => Mapped::Int(3),
    ]
);

lookup_type!(
    /// `beside` flag of `barplot`: `stacked` sets it, `grouped` leaves R's default.
    BarStyle, "bar style", [
        "stacked" => Mapped::Bool(true),
        "grouped" => Mapped::Null,
    ]
);

lookup_type!(
    /// `pos` of `text`.
    TextPosition, "text position", [
        "below" => Mapped::Int(1),
        "left" => Mapped::Int(2),
        "above" => Mapped::Int(3),
        "right" => Mapped::Int(4),
    ]
);

lookup_type!(
    /// Side argument of `axis`.
    AxisPosition, "axis position", [
        "bottom" => Mapped::Int(1),
        "left" => Mapped::Int(2),
        "top" => Mapped::Int(3),
        "right" => Mapped::Int(4),
    ]
);

lookup_type!(
    /// `las` of `axis`.
    LabelDirection, "label direction", [
        "parallel" => Mapped::Int(0),
        "perpendicular" => Mapped::Int(2),
    ]
);

lookup_type!(
    /// `tck` of `axis`; fractions of the plot region.
    TickMark, "tick mark", [
        "inside" => Mapped::Float(0.01),
        "outside" => Mapped::Float(-0.01),
        "none" => Mapped::Int(0),
        "lines" => Mapped::Int(1),
    ]
);

lookup_type!(
    /// `bty` of `legend`.
    BoxType, "box type", [
        "none" => Mapped::Text("n"),
        "solid" => Mapped::Null,
    ]
);

/// Where a title goes. Each position uses its own trio of `title()` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitlePosition {
    X,
    Y,
    Top,
}

/// Named-argument keys for one title position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleKeys {
    pub label: &'static str,
    pub color: &'static str,
    pub scale: &'static str,
}

impl TitlePosition {
    pub fn new(value: &Value) -> Result<Self, DomainError> {
        match value.as_name() {
            Some("x") => Ok(TitlePosition::X),
            Some("y") => Ok(TitlePosition::Y),
            Some("top") => Ok(TitlePosition::Top),
            Some(other) => Err(DomainError::new(format!(
                "title position must be one of {{x,y,top}}, got '{}'",
                other
            ))),
            None => Err(DomainError::new(format!(
                "title position must be a symbolic name, got {}",
                value.type_name()
            ))),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            TitlePosition::X => "x",
            TitlePosition::Y => "y",
            TitlePosition::Top => "top",
        }
    }

    pub fn keys(&self) -> TitleKeys {
        match self {
            TitlePosition::X => TitleKeys { label: "xlab", color: "col.lab", scale: "cex.lab" },
            TitlePosition::Y => TitleKeys { label: "ylab", color: "col.lab", scale: "cex.lab" },
            TitlePosition::Top => TitleKeys { label: "main", color: "col.main", scale: "cex.main" },
        }
    }
}

impl RObject for TitlePosition {
    fn to_r(&self) -> String {
        Literal::Tag(self.tag().to_string()).to_r()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_key_is_accepted() {
        for (key, _) in LineType::TABLE {
            assert!(LineType::new(&Value::sym(*key)).is_ok());
        }
        for (key, _) in TickMark::TABLE {
            assert!(TickMark::new(&Value::from(*key)).is_ok());
        }
        for (key, _) in AxisPosition::TABLE {
            assert!(AxisPosition::new(&Value::sym(*key)).is_ok());
        }
    }

    #[test]
    fn test_unknown_names_fail() {
        assert!(LineType::new(&Value::sym("wavy")).is_err());
        assert!(BoxType::new(&Value::Int(1)).is_err());
        assert!(TitlePosition::new(&Value::sym("bottom")).is_err());
        assert!(TextPosition::new(&Value::sym("center")).is_err());
        assert!(TextPosition::new(&Value::Int(3)).is_err());
        assert!(LabelDirection::new(&Value::sym("diagonal")).is_err());
        assert!(BarStyle::new(&Value::sym("tiled")).is_err());
        assert!(BarStyle::new(&Value::Bool(true)).is_err());
    }

    #[test]
    fn test_encodings() {
        assert_eq!(LineType::new(&Value::sym("dotted")).unwrap().to_r(), "3");
        assert_eq!(TickMark::new(&Value::sym("outside")).unwrap().to_r(), "-0.01");
        assert_eq!(BoxType::new(&Value::sym("none")).unwrap().to_r(), "'n'");
        assert_eq!(BarStyle::new(&Value::sym("stacked")).unwrap().to_r(), "TRUE");
        assert!(BarStyle::new(&Value::sym("grouped")).unwrap().is_null());
    }

    #[test]
    fn test_null_mapping() {
        let solid = BoxType::new(&Value::sym("solid")).unwrap();
        assert!(solid.is_null());
        assert_eq!(solid.to_r(), "NULL");
        assert_eq!(solid.key(), "solid");
    }

    #[test]
    fn test_title_keys() {
        let top = TitlePosition::new(&Value::sym("top")).unwrap();
        assert_eq!(top.keys().label, "main");
        assert_eq!(top.keys().color, "col.main");
        let y = TitlePosition::new(&Value::from("y")).unwrap();
        assert_eq!(y.keys().scale, "cex.lab");
        assert_eq!(y.to_r(), "'y'");
    }
}
