use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::slice::Span;

/// Timing curve applied to transition progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Animates the pie from one set of spans to another.
///
/// Slices that appear grow out of the end of the previous geometry; slices
/// that disappear shrink into the end of the circle.
#[derive(Clone, Debug)]
pub struct Transition {
    from: Vec<Span>,
    to: Vec<Span>,
    elapsed: f64,
    duration: f64,
    easing: Easing,
}

impl Transition {
    pub fn new(from: Vec<Span>, to: Vec<Span>, duration: f64, easing: Easing) -> Self {
        let len = from.len().max(to.len());
        let grow_from = from.last().map(|s| s.end).unwrap_or(0.0);

        let mut from = from;
        let mut to = to;
        from.resize(len, Span::collapsed(grow_from));
        to.resize(len, Span::collapsed(TAU));

        Transition {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// Moves the transition forward by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress in `[0, 1]`, before easing.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    /// The spans to display right now. Includes disappearing slices until
    /// the transition finishes.
    pub fn current(&self) -> Vec<Span> {
        let t = self.easing.apply(self.progress());
        self.from
            .iter()
            .zip(&self.to)
            .map(|(a, b)| a.lerp(b, t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(3.0), 1.0);
        }
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn transition_interpolates_and_finishes() {
        let mut tr = Transition::new(
            vec![Span::new(0.0, TAU)],
            vec![Span::new(0.0, 2.0), Span::new(2.0, TAU)],
            1.0,
            Easing::Linear,
        );

        let start = tr.current();
        assert_eq!(start.len(), 2);
        assert_eq!(start[0], Span::new(0.0, TAU));
        assert_eq!(start[1], Span::collapsed(TAU));

        tr.advance(0.5);
        assert!(!tr.is_finished());
        assert!((tr.current()[0].end - (TAU + 2.0) / 2.0).abs() < 1e-12);

        tr.advance(10.0);
        assert!(tr.is_finished());
        assert_eq!(tr.current()[1], Span::new(2.0, TAU));
    }

    #[test]
    fn removed_slices_shrink_to_the_end() {
        let mut tr = Transition::new(
            vec![Span::new(0.0, 1.0), Span::new(1.0, TAU)],
            vec![Span::new(0.0, TAU)],
            0.2,
            Easing::EaseOut,
        );
        tr.advance(0.2);
        assert_eq!(tr.current()[1], Span::collapsed(TAU));
    }

    #[test]
    fn zero_duration_is_already_done() {
        let tr = Transition::new(vec![], vec![Span::new(0.0, TAU)], 0.0, Easing::EaseInOut);
        assert!(tr.is_finished());
        assert_eq!(tr.current(), vec![Span::new(0.0, TAU)]);
    }
}
