//! Rendering of coordinate values.

use std::fmt::Write;

/// How a single coordinate value is rendered.
///
/// * `decimals: None` uses the shortest representation that reads back to the same value (`10.0`, `0.1`).
/// * `decimals: Some(n)` prints exactly `n` fraction digits (`10.00`).
/// * `compact` prints values without a fractional part as bare integers (`10`), whatever `decimals` is.
///
/// Non-finite values are written as `NaN`, `Infinity` and `-Infinity`. Negative zero is written as zero.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct NumberFormat {
    /// Fixed number of fraction digits.
    pub decimals: Option<usize>,
    /// Drop the fraction of integral values.
    pub compact: bool,
}

impl NumberFormat {
    /// Creates a new format.
    pub const fn new(decimals: Option<usize>, compact: bool) -> Self {
        Self { decimals, compact }
    }

    /// Writes the value into the sink.
    pub fn write(&self, sink: &mut impl Write, value: f64) -> std::fmt::Result {
        if value.is_nan() {
            return sink.write_str("NaN");
        }
        if value.is_infinite() {
            return sink.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        }
        // `-0.0` is written without a sign.
        let value = if value == 0.0 { 0.0 } else { value };

        if self.compact && value.fract() == 0.0 {
            return write!(sink, "{value:.0}");
        }

        match self.decimals {
            Some(decimals) => write!(sink, "{value:.decimals$}"),
            None => write!(sink, "{value:?}"),
        }
    }

    /// Renders the value into a new string.
    pub fn format(&self, value: f64) -> String {
        let mut text = String::new();
        // Writing into a `String` does not fail.
        let _ = self.write(&mut text, value);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural() {
        let format = NumberFormat::new(None, false);
        assert_eq!(format.format(10.0), "10.0");
        assert_eq!(format.format(0.1), "0.1");
        assert_eq!(format.format(-2.5), "-2.5");
        assert_eq!(format.format(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn fixed_decimals() {
        let format = NumberFormat::new(Some(2), false);
        assert_eq!(format.format(10.0), "10.00");
        assert_eq!(format.format(1.005), "1.00");
        assert_eq!(format.format(7.12345), "7.12");
    }

    #[test]
    fn compact() {
        assert_eq!(NumberFormat::new(None, true).format(10.0), "10");
        assert_eq!(NumberFormat::new(None, true).format(10.5), "10.5");
        assert_eq!(NumberFormat::new(Some(3), true).format(-4.0), "-4");
        assert_eq!(NumberFormat::new(Some(3), true).format(1.5), "1.500");
    }

    #[test]
    fn negative_zero() {
        assert_eq!(NumberFormat::new(None, true).format(-0.0), "0");
        assert_eq!(NumberFormat::new(None, false).format(-0.0), "0.0");
        assert_eq!(NumberFormat::new(Some(2), false).format(-0.0), "0.00");
    }

    #[test]
    fn non_finite() {
        let format = NumberFormat::new(Some(2), true);
        assert_eq!(format.format(f64::NAN), "NaN");
        assert_eq!(format.format(f64::INFINITY), "Infinity");
        assert_eq!(format.format(f64::NEG_INFINITY), "-Infinity");
    }
}
