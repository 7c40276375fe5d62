//! Line generation over swept ranges.

use crate::app::scale::scale_value;
use crate::app::template::LineTemplate;
use crate::domain::errors::TemplateError;
use crate::domain::model::{RangeSpec, RangeValues};

/// Lazily render one line per raw index of `spec`.
///
/// Lines come out in iteration order. The returned iterator can be cloned, and
/// calling this again starts a fresh pass over the same range.
pub fn generate_lines<'t, T>(spec: &RangeSpec, template: &'t T) -> Lines<'t, T>
where
    T: LineTemplate + ?Sized,
{
    Lines {
        values: spec.values(),
        divisor: spec.scale_divisor(),
        template,
    }
}

/// Iterator returned by [`generate_lines`].
pub struct Lines<'t, T: ?Sized> {
    values: RangeValues,
    divisor: i64,
    template: &'t T,
}

impl<T: ?Sized> Clone for Lines<'_, T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            divisor: self.divisor,
            template: self.template,
        }
    }
}

impl<T> Iterator for Lines<'_, T>
where
    T: LineTemplate + ?Sized,
{
    type Item = Result<String, TemplateError>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.values.next()?;
        let scaled = scale_value(raw, self.divisor);
        tracing::debug!(raw, %scaled, "rendering line");
        Some(self.template.render_line(raw, scaled))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> ExactSizeIterator for Lines<'_, T> where T: LineTemplate + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ScaledValue;

    fn pair(raw: i64, scaled: ScaledValue) -> String {
        format!("{raw}:{scaled}")
    }

    #[test]
    fn yields_one_line_per_index() {
        let spec = RangeSpec::new(20, 300, 10, 1000).unwrap();
        let lines: Vec<String> = generate_lines(&spec, &pair)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(lines.len(), 28);
        assert_eq!(lines.first().map(String::as_str), Some("20:0.02"));
        assert_eq!(lines.last().map(String::as_str), Some("290:0.29"));
    }

    #[test]
    fn integral_values_have_no_decimal_point() {
        let spec = RangeSpec::new(2000, 16000, 1000, 1000).unwrap();
        let lines: Vec<String> = generate_lines(&spec, &pair)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(lines[0], "2000:2");
        assert_eq!(lines[13], "15000:15");
    }

    #[test]
    fn descending_ranges_keep_order() {
        let spec = RangeSpec::new(5, 0, -2, 1).unwrap();
        let lines: Vec<String> = generate_lines(&spec, &pair)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(lines, vec!["5:5", "3:3", "1:1"]);
    }

    #[test]
    fn restarting_repeats_the_sequence() {
        let spec = RangeSpec::new(300, 2000, 100, 1000).unwrap();
        let lines = generate_lines(&spec, &pair);
        let first: Vec<_> = lines.clone().map(Result::unwrap).collect();
        let second: Vec<_> = lines.map(Result::unwrap).collect();
        let again: Vec<_> = generate_lines(&spec, &pair).map(Result::unwrap).collect();

        assert_eq!(first.len(), 17);
        assert_eq!(first, second);
        assert_eq!(first, again);
    }
}
