use std::f64::consts::TAU;

use log::warn;

/// An angular interval, clockwise from 12 o'clock, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub const fn new(start: f64, end: f64) -> Self {
        Span { start, end }
    }

    /// A zero-width span sitting at `angle`.
    pub const fn collapsed(angle: f64) -> Self {
        Span {
            start: angle,
            end: angle,
        }
    }

    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        0.5 * (self.start + self.end)
    }

    /// `angle` must already be normalized to `[0, 2π)`.
    pub fn contains(&self, angle: f64) -> bool {
        self.sweep() > 0.0 && angle >= self.start && angle < self.end
    }

    pub fn lerp(&self, to: &Span, t: f64) -> Span {
        Span {
            start: self.start + (to.start - self.start) * t,
            end: self.end + (to.end - self.end) * t,
        }
    }
}

/// One wedge of the pie, rebuilt from the data source on every reload.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub value: f64,
    pub span: Span,
}

impl Slice {
    /// Share of the full revolution, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        self.span.sweep() / TAU
    }
}

/// Values the pie can't show proportionally count as zero.
fn sanitize(index: usize, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("slice {} has unusable value {}, treating it as 0", index, value);
        0.0
    }
}

/// Lays `values` out around the circle. Slice `i` gets a sweep of
/// `2π · value_i / Σvalues`; when nothing is positive every slice is empty.
pub fn layout_slices(values: &[f64]) -> Vec<Slice> {
    let values: Vec<f64> = values
        .iter()
        .enumerate()
        .map(|(i, v)| sanitize(i, *v))
        .collect();
    // scale by the largest value first so huge inputs can't overflow the sum
    let max = values.iter().copied().fold(0.0, f64::max);
    let total: f64 = if max > 0.0 {
        values.iter().map(|v| v / max).sum()
    } else {
        0.0
    };

    let mut angle = 0.0;
    let mut slices = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let sweep = if total > 0.0 {
            TAU * ((value / max) / total)
        } else {
            0.0
        };
        let end = (angle + sweep).min(TAU);
        slices.push(Slice {
            index,
            value,
            span: Span::new(angle, end),
        });
        angle = end;
    }

    // snap the last non-empty slice shut so rounding never leaves a gap
    if total > 0.0 {
        if let Some(last) = slices.iter_mut().rev().find(|s| s.span.sweep() > 0.0) {
            last.span.end = TAU;
        }
        for s in slices.iter_mut().rev().take_while(|s| s.span.sweep() == 0.0) {
            s.span = Span::collapsed(TAU);
        }
    }

    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn quarter_quarter_half() {
        let slices = layout_slices(&[1.0, 1.0, 2.0]);
        let fractions: Vec<f64> = slices.iter().map(Slice::fraction).collect();

        assert_eq!(slices.len(), 3);
        assert!(close(fractions[0], 0.25));
        assert!(close(fractions[1], 0.25));
        assert!(close(fractions[2], 0.5));
    }

    #[test]
    fn indices_are_contiguous_and_sweeps_fill_the_circle() {
        for n in 0..12 {
            let values: Vec<f64> = (0..n).map(|i| (i * 7 % 5 + 1) as f64 * 0.3).collect();
            let slices = layout_slices(&values);

            assert_eq!(slices.len(), n);
            for (i, s) in slices.iter().enumerate() {
                assert_eq!(s.index, i);
            }
            if n > 0 {
                let total: f64 = slices.iter().map(|s| s.span.sweep()).sum();
                assert!(close(total, TAU));
                assert!(close(slices[0].span.start, 0.0));
                assert!(close(slices[n - 1].span.end, TAU));
            }
            for pair in slices.windows(2) {
                assert_eq!(pair[0].span.end, pair[1].span.start);
            }
        }
    }

    #[test]
    fn negative_and_nan_values_count_as_zero() {
        let slices = layout_slices(&[3.0, -4.0, f64::NAN, 1.0]);

        assert_eq!(slices[1].value, 0.0);
        assert_eq!(slices[2].value, 0.0);
        assert_eq!(slices[1].span.sweep(), 0.0);
        assert!(close(slices[0].fraction(), 0.75));
        assert!(close(slices[3].fraction(), 0.25));
    }

    #[test]
    fn huge_values_stay_proportional() {
        let even = layout_slices(&[1e308, 1e308]);
        assert!(close(even[0].fraction(), 0.5));
        assert!(close(even[1].fraction(), 0.5));
        assert_eq!(even[0].value, 1e308);

        let uneven = layout_slices(&[1e308, 3e307]);
        assert!(close(uneven[0].fraction(), 1.0 / 1.3));
        assert!(close(uneven[1].fraction(), 0.3 / 1.3));
        assert!(close(uneven[1].span.end, TAU));
    }

    #[test]
    fn zero_sum_gives_empty_slices() {
        let slices = layout_slices(&[0.0, 0.0]);

        assert_eq!(slices.len(), 2);
        assert!(slices.iter().all(|s| s.span.sweep() == 0.0));
    }

    #[test]
    fn trailing_zero_slices_sit_at_the_end() {
        let slices = layout_slices(&[1.0, 0.0]);

        assert!(close(slices[0].span.end, TAU));
        assert_eq!(slices[1].span, Span::collapsed(TAU));
    }

    #[test]
    fn span_contains_is_half_open() {
        let span = Span::new(1.0, 2.0);
        assert!(span.contains(1.0));
        assert!(span.contains(1.5));
        assert!(!span.contains(2.0));
        assert!(!Span::collapsed(1.0).contains(1.0));
    }
}
