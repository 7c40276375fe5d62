//! Domain models for swept ranges and their scaled values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// One swept numeric range: `[start, stop)` stepping by `step`.
///
/// Every raw index is divided by `scale_divisor` to obtain the physical value
/// written next to it (e.g. keV indices rendered as MeV with a divisor of 1000).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeSpecRecord", into = "RangeSpecRecord")]
pub struct RangeSpec {
    start: i64,
    stop: i64,
    step: i64,
    scale_divisor: i64,
}

impl RangeSpec {
    /// Build a range, rejecting steps that would never reach `stop`.
    pub fn new(start: i64, stop: i64, step: i64, scale_divisor: i64) -> Result<Self, DomainError> {
        if step == 0 {
            return Err(DomainError::ZeroStep);
        }
        if start == stop {
            return Err(DomainError::EmptyRange { start });
        }
        if (stop > start) != (step > 0) {
            return Err(DomainError::StepDirection { start, stop, step });
        }
        if scale_divisor <= 0 {
            return Err(DomainError::NonPositiveDivisor(scale_divisor));
        }
        Ok(Self {
            start,
            stop,
            step,
            scale_divisor,
        })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn stop(&self) -> i64 {
        self.stop
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn scale_divisor(&self) -> i64 {
        self.scale_divisor
    }

    /// Number of raw indices in the range, `ceil((stop - start) / step)`.
    pub fn line_count(&self) -> usize {
        let span = self.stop.abs_diff(self.start);
        let step = self.step.unsigned_abs();
        span.div_ceil(step) as usize
    }

    /// Iterate the raw indices in order. Each call starts a fresh pass.
    pub fn values(&self) -> RangeValues {
        RangeValues {
            next: Some(self.start),
            stop: self.stop,
            step: self.step,
            remaining: self.line_count(),
        }
    }
}

/// Serialized shape of a [`RangeSpec`] used in configuration files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RangeSpecRecord {
    start: i64,
    stop: i64,
    #[serde(default = "RangeSpecRecord::default_step")]
    step: i64,
    #[serde(default = "RangeSpecRecord::default_divisor")]
    divisor: i64,
}

impl RangeSpecRecord {
    fn default_step() -> i64 {
        1
    }

    fn default_divisor() -> i64 {
        1
    }
}

impl TryFrom<RangeSpecRecord> for RangeSpec {
    type Error = DomainError;

    fn try_from(value: RangeSpecRecord) -> Result<Self, Self::Error> {
        RangeSpec::new(value.start, value.stop, value.step, value.divisor)
    }
}

impl From<RangeSpec> for RangeSpecRecord {
    fn from(value: RangeSpec) -> Self {
        Self {
            start: value.start,
            stop: value.stop,
            step: value.step,
            divisor: value.scale_divisor,
        }
    }
}

/// Iterator over the raw indices of a [`RangeSpec`].
#[derive(Debug, Clone)]
pub struct RangeValues {
    next: Option<i64>,
    stop: i64,
    step: i64,
    remaining: usize,
}

impl Iterator for RangeValues {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let current = self.next?;
        let in_range = if self.step > 0 {
            current < self.stop
        } else {
            current > self.stop
        };
        if !in_range {
            self.next = None;
            return None;
        }
        self.next = current.checked_add(self.step);
        self.remaining = self.remaining.saturating_sub(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next.is_some() { self.remaining } else { 0 };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RangeValues {}

/// A raw index divided by its scale divisor.
///
/// Whole results keep an integer representation so they render without a
/// trailing `.0`; the consumer parses the text as call syntax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaledValue {
    Integral(i64),
    Fractional(f64),
}

impl ScaledValue {
    pub fn is_integral(&self) -> bool {
        matches!(self, ScaledValue::Integral(_))
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            ScaledValue::Integral(value) => value as f64,
            ScaledValue::Fractional(value) => value,
        }
    }
}

impl fmt::Display for ScaledValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaledValue::Integral(value) => write!(f, "{value}"),
            // `{}` on f64 is the shortest text that round-trips, never exponent form.
            ScaledValue::Fractional(value) => write!(f, "{value}"),
        }
    }
}
