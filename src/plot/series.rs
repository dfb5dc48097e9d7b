//! Data series and the ranges derived from them.

use crate::params::value::{Fields, Value};
use crate::rscript::Number;

/// Color given to a series that does not pick one.
pub const DEFAULT_SERIES_COLOR: &str = "black";

/// One data series with its style options.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub x: Vec<Number>,
    pub y: Vec<Number>,
    /// Style options, always carrying `color` and `name`.
    pub options: Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Series {
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn values(&self, axis: Axis) -> &[Number] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Smallest and largest value on `axis`.
    pub fn extent(&self, axis: Axis) -> Option<(Number, Number)> {
        let values = self.values(axis);
        let first = *values.first()?;
        Some(
            values
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
        )
    }
}

/// Global min/max on `axis` over every series.
///
/// Constant data is widened by one unit on each side.
pub fn auto_range(series: &[Series], axis: Axis) -> Option<(Number, Number)> {
    let (lo, hi) = series
        .iter()
        .filter_map(|s| s.extent(axis))
        .reduce(|(a_lo, a_hi), (b_lo, b_hi)| (a_lo.min(b_lo), a_hi.max(b_hi)))?;
    if lo.as_f64() == hi.as_f64() {
        return Some((lo.offset(-1), hi.offset(1)));
    }
    Some((lo, hi))
}

/// Option `name` of every series that sets it, in series order.
pub fn collect_option(series: &[Series], name: &str) -> Vec<Value> {
    series
        .iter()
        .filter_map(|s| s.option(name).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(y: &[i64]) -> Series {
        Series {
            x: (0..y.len() as i64).map(Number::Int).collect(),
            y: y.iter().copied().map(Number::Int).collect(),
            options: Fields::new(),
        }
    }

    #[test]
    fn test_auto_range_spans_all_series() {
        let all = [series(&[1, 3, 2, 5, 4]), series(&[2, 6, 3, 8, 1])];
        assert_eq!(auto_range(&all, Axis::X), Some((Number::Int(0), Number::Int(4))));
        assert_eq!(auto_range(&all, Axis::Y), Some((Number::Int(1), Number::Int(8))));
    }

    #[test]
    fn test_constant_data_is_widened() {
        let all = [series(&[3, 3])];
        assert_eq!(auto_range(&all, Axis::Y), Some((Number::Int(2), Number::Int(4))));
        assert_eq!(auto_range(&[], Axis::Y), None);
    }

    #[test]
    fn test_constant_data_at_integer_limits() {
        let (lo, hi) = auto_range(&[series(&[i64::MAX])], Axis::Y).unwrap();
        assert_eq!(lo, Number::Int(i64::MAX - 1));
        assert!(matches!(hi, Number::Float(_)));
        let (lo, hi) = auto_range(&[series(&[i64::MIN])], Axis::Y).unwrap();
        assert!(matches!(lo, Number::Float(_)));
        assert_eq!(hi, Number::Int(i64::MIN + 1));
    }

    #[test]
    fn test_collect_option_compacts() {
        let mut a = series(&[1]);
        a.options.set("line_type", Value::sym("dashed"));
        let b = series(&[2]);
        assert_eq!(collect_option(&[a, b], "line_type"), vec![Value::sym("dashed")]);
    }
}
