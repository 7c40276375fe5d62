//! Conversion of raw loop indices into physical values.

use crate::domain::model::ScaledValue;

/// Divide `raw` by `divisor`, keeping whole results integer-typed.
///
/// `divisor` must be positive; [`RangeSpec`](crate::domain::model::RangeSpec)
/// guarantees this for every range it produces.
pub fn scale_value(raw: i64, divisor: i64) -> ScaledValue {
    debug_assert!(divisor > 0, "scale divisor must be positive");
    if raw % divisor == 0 {
        ScaledValue::Integral(raw / divisor)
    } else {
        ScaledValue::Fractional(raw as f64 / divisor as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_results_stay_integral() {
        assert_eq!(scale_value(2000, 1000), ScaledValue::Integral(2));
        assert_eq!(scale_value(0, 1000), ScaledValue::Integral(0));
        assert_eq!(scale_value(324, 1), ScaledValue::Integral(324));
        assert_eq!(scale_value(-3000, 1000), ScaledValue::Integral(-3));
    }

    #[test]
    fn fractional_results_keep_precision() {
        assert_eq!(scale_value(20, 1000), ScaledValue::Fractional(0.02));
        assert_eq!(scale_value(290, 1000).to_string(), "0.29");
        assert_eq!(scale_value(1100, 1000).to_string(), "1.1");
        assert_eq!(scale_value(-20, 1000).to_string(), "-0.02");
    }

    #[test]
    fn integral_iff_divisible() {
        for raw in -50..50 {
            for divisor in 1..12 {
                assert_eq!(
                    scale_value(raw, divisor).is_integral(),
                    raw % divisor == 0,
                    "raw={raw} divisor={divisor}"
                );
            }
        }
    }
}
