use crate::domain::RObject;
use crate::error::DomainError;
use crate::params::value::Value;
use crate::rscript::Literal;

/// Characters R accepts as a `pch` symbol.
pub const POINT_CHARS: &[char] = &['*', '.', 'o', 'O', '0', '+', '-', '|', '%', '#'];

/// Point marker: an R symbol index in 0..=25 or a single plotting character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointType {
    Index(i64),
    Char(char),
}

impl PointType {
    pub fn new(value: &Value) -> Result<Self, DomainError> {
        match value {
            Value::Int(n) if (0..=25).contains(n) => Ok(PointType::Index(*n)),
            Value::Int(n) => Err(DomainError::new(format!(
                "point type index must be within [0, 25], got {}",
                n
            ))),
            Value::Str(s) | Value::Symbol(s) if s == "none" => Ok(PointType::Char('.')),
            Value::Str(s) | Value::Symbol(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if POINT_CHARS.contains(&c) => Ok(PointType::Char(c)),
                    _ => Err(DomainError::new(format!(
                        "point type must be one of {{{}}}, got '{}'",
                        POINT_CHARS.iter().collect::<String>(),
                        s
                    ))),
                }
            }
            other => Err(DomainError::new(format!(
                "point type must be an index or a character, got {}",
                other.type_name()
            ))),
        }
    }
}

impl RObject for PointType {
    fn to_r(&self) -> String {
        match self {
            PointType::Index(n) => Literal::int(*n).to_r(),
            PointType::Char(c) => Literal::text(c.to_string()).to_r(),
        }
    }
}

/// Line thickness, a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWeight(i64);

impl LineWeight {
    pub fn new(value: &Value) -> Result<Self, DomainError> {
        match value {
            Value::Int(n) if *n > 0 => Ok(LineWeight(*n)),
            Value::Int(n) => Err(DomainError::new(format!(
                "line weight must be positive, got {}",
                n
            ))),
            other => Err(DomainError::new(format!(
                "line weight must be an integer, got {}",
                other.type_name()
            ))),
        }
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl RObject for LineWeight {
    fn to_r(&self) -> String {
        Literal::int(self.0).to_r()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_type_index_bounds() {
        assert_eq!(PointType::new(&Value::Int(0)).unwrap().to_r(), "0");
        assert_eq!(PointType::new(&Value::Int(25)).unwrap().to_r(), "25");
        assert!(PointType::new(&Value::Int(26)).is_err());
        assert!(PointType::new(&Value::Int(-1)).is_err());
    }

    #[test]
    fn test_point_type_characters() {
        assert_eq!(PointType::new(&Value::from("O")).unwrap().to_r(), "'O'");
        assert_eq!(PointType::new(&Value::sym("none")).unwrap().to_r(), "'.'");
        assert!(PointType::new(&Value::from("x")).is_err());
        assert!(PointType::new(&Value::from("oo")).is_err());
        assert!(PointType::new(&Value::Float(1.0)).is_err());
    }

    #[test]
    fn test_line_weight() {
        assert_eq!(LineWeight::new(&Value::Int(4)).unwrap().to_r(), "4");
        assert!(LineWeight::new(&Value::Int(0)).is_err());
        assert!(LineWeight::new(&Value::Float(2.0)).is_err());
    }
}
