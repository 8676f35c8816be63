//! Line parsing and the sample value type.

use regex::Regex;

use crate::error::ParseError;

/// One accepted reading: the numeric value rounded to a tenth and the unit
/// text captured verbatim from the line.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub unit: String,
}

impl Sample {
    /// Grouping key for exact-value comparison.
    #[inline]
    pub fn key(&self) -> i32 {
        quantize_to_tenths_i32(self.value)
    }
}

/// Round to one decimal place, half away from zero.
#[inline]
pub fn round_to_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Quantize a value to integer tenths, rounding to nearest and clamping to
/// the i32 range. Non-finite values (NaN/±Inf) map to 0.
#[inline]
fn quantize_to_tenths_i32(v: f64) -> i32 {
    if !v.is_finite() {
        return 0;
    }
    let scaled = (v * 10.0).round();
    if scaled >= f64::from(i32::MAX) {
        i32::MAX
    } else if scaled <= f64::from(i32::MIN) {
        i32::MIN
    } else {
        scaled as i32
    }
}

/// The configured data pattern, compiled once at startup and shared
/// read-only by every attempt.
///
/// Two capture groups: numeric value, unit.
#[derive(Debug, Clone)]
pub struct LinePattern {
    re: Regex,
}

impl LinePattern {
    pub fn compile(pattern: &str) -> crate::error::Result<Self> {
        let re = Regex::new(pattern)
            .map_err(|e| eyre::eyre!("invalid data pattern {pattern:?}: {e}"))?;
        Ok(Self { re })
    }

    pub fn as_str(&self) -> &str {
        self.re.as_str()
    }

    /// Parse one raw line into a `Sample`.
    ///
    /// The line is trimmed first. A non-matching line, or a match whose
    /// first group is not a number, fails with `FormatInvalid`; callers
    /// drop the line and keep the attempt running.
    pub fn parse(&self, line: &str) -> Result<Sample, ParseError> {
        let trimmed = line.trim();
        let reject = || ParseError::FormatInvalid(trimmed.to_string());
        let caps = self.re.captures(trimmed).ok_or_else(reject)?;
        let value: f64 = caps
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(reject)?;
        let unit = caps.get(2).map(|m| m.as_str().to_string()).ok_or_else(reject)?;
        Ok(Sample {
            value: round_to_tenth(value),
            unit,
        })
    }
}
