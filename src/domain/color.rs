use crate::domain::RObject;
use crate::error::DomainError;
use crate::params::value::Value;
use crate::rscript::{Command, Literal, Number};

/// A color: any named/hex color string, or an RGB triple with components in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Named(String),
    Rgb([Number; 3]),
}

impl Color {
    pub fn new(value: &Value) -> Result<Self, DomainError> {
        match value {
            Value::Str(s) | Value::Symbol(s) => Ok(Color::Named(s.clone())),
            Value::List(items) => {
                if items.len() != 3 {
                    return Err(DomainError::new(format!(
                        "an RGB color needs exactly 3 components, got {}",
                        items.len()
                    )));
                }
                let mut rgb = [Number::Int(0); 3];
                for (slot, item) in rgb.iter_mut().zip(items) {
                    let n = item.as_number().ok_or_else(|| {
                        DomainError::new(format!(
                            "RGB components must be numbers, got {}",
                            item.type_name()
                        ))
                    })?;
                    if !(0.0..=1.0).contains(&n.as_f64()) {
                        return Err(DomainError::new(format!(
                            "RGB component {} is outside [0, 1]",
                            n
                        )));
                    }
                    *slot = n;
                }
                Ok(Color::Rgb(rgb))
            }
            other => Err(DomainError::new(format!(
                "expected a color name or an RGB triple, got {}",
                other.type_name()
            ))),
        }
    }
}

impl RObject for Color {
    fn to_r(&self) -> String {
        match self {
            Color::Named(name) => Literal::text(name.as_str()).to_r(),
            Color::Rgb([r, g, b]) => Command::new("rgb").arg(*r).arg(*g).arg(*b).to_r(),
        }
    }
}
