use crate::domain::RObject;
use crate::error::DomainError;
use crate::params::value::Value;
use crate::rscript::{Literal, Number};

/// Accepted pixel range for each side of a raster image.
pub const SIZE_RANGE: std::ops::RangeInclusive<i64> = 10..=10000;

/// Image format; its tag is also the name of the R device function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Bmp,
    Jpeg,
    Png,
    Tiff,
    Pdf,
}

impl OutputType {
    pub const ALL: [OutputType; 5] = [
        OutputType::Bmp,
        OutputType::Jpeg,
        OutputType::Png,
        OutputType::Tiff,
        OutputType::Pdf,
    ];

    pub fn new(value: &Value) -> Result<Self, DomainError> {
        let name = value.as_name().ok_or_else(|| {
            DomainError::new(format!(
                "output type must be a symbolic name, got {}",
                value.type_name()
            ))
        })?;
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == name)
            .ok_or_else(|| {
                DomainError::new(format!(
                    "output type must be one of {{bmp,jpeg,png,tiff,pdf}}, got '{}'",
                    name
                ))
            })
    }

    pub fn tag(&self) -> &'static str {
        match self {
            OutputType::Bmp => "bmp",
            OutputType::Jpeg => "jpeg",
            OutputType::Png => "png",
            OutputType::Tiff => "tiff",
            OutputType::Pdf => "pdf",
        }
    }

    /// Vector formats take no pixel size.
    pub fn is_vector(&self) -> bool {
        matches!(self, OutputType::Pdf)
    }
}

impl RObject for OutputType {
    fn to_r(&self) -> String {
        Literal::Tag(self.tag().to_string()).to_r()
    }
}

/// Width and height of a raster image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSize {
    pub width: i64,
    pub height: i64,
}

impl OutputSize {
    pub fn new(value: &Value) -> Result<Self, DomainError> {
        let items = value.as_list().ok_or_else(|| {
            DomainError::new(format!(
                "output size must be a [width, height] list, got {}",
                value.type_name()
            ))
        })?;
        if items.len() != 2 {
            return Err(DomainError::new(format!(
                "output size needs exactly 2 values, got {}",
                items.len()
            )));
        }
        let mut sides = [0i64; 2];
        for (side, item) in sides.iter_mut().zip(items) {
            let Value::Int(n) = item else {
                return Err(DomainError::new(format!(
                    "output size values must be integers, got {}",
                    item.type_name()
                )));
            };
            if !SIZE_RANGE.contains(n) {
                return Err(DomainError::new(format!(
                    "output size {} is outside [{}, {}]",
                    n,
                    SIZE_RANGE.start(),
                    SIZE_RANGE.end()
                )));
            }
            *side = *n;
        }
        Ok(OutputSize {
            width: sides[0],
            height: sides[1],
        })
    }
}

impl RObject for OutputSize {
    fn to_r(&self) -> String {
        Literal::Seq(vec![
            Literal::Number(Number::Int(self.width)),
            Literal::Number(Number::Int(self.height)),
        ])
        .to_r()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_types() {
        for t in OutputType::ALL {
            assert_eq!(OutputType::new(&Value::sym(t.tag())).unwrap(), t);
        }
        assert!(OutputType::new(&Value::sym("gif")).is_err());
        assert!(OutputType::new(&Value::sym("pdf")).unwrap().is_vector());
        assert!(!OutputType::new(&Value::from("png")).unwrap().is_vector());
    }

    #[test]
    fn test_output_size_bounds() {
        let size = OutputSize::new(&Value::from(vec![800, 600])).unwrap();
        assert_eq!((size.width, size.height), (800, 600));
        assert_eq!(size.to_r(), "c(800, 600)");
        assert!(OutputSize::new(&Value::from(vec![10, 10000])).is_ok());
        assert!(OutputSize::new(&Value::from(vec![9, 600])).is_err());
        assert!(OutputSize::new(&Value::from(vec![800, 10001])).is_err());
        assert!(OutputSize::new(&Value::from(vec![800])).is_err());
        assert!(OutputSize::new(&Value::from(vec![800.0, 600.0])).is_err());
    }
}
