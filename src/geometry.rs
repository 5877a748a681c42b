//! Screen-space primitives used by the widget. Coordinates are f32 with
//! y pointing down. Angles are radians measured clockwise from 12 o'clock.

use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// The point `radius` away from `self` in the direction of `angle`.
    pub fn at_angle(self, angle: f64, radius: f32) -> Point {
        Point {
            x: self.x + radius * angle.sin() as f32,
            y: self.y - radius * angle.cos() as f32,
        }
    }

    /// Angle of `other` as seen from `self`, normalized to `[0, 2π)`.
    pub fn angle_to(self, other: Point) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        normalize_angle(dx.atan2(-dy))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        min: Point::new(0.0, 0.0),
        max: Point::new(0.0, 0.0),
    };

    pub fn from_min_size(min: Point, width: f32, height: f32) -> Self {
        Rect {
            min,
            max: Point::new(min.x + width, min.y + height),
        }
    }

    pub fn width(&self) -> f32 {
        (self.max.x - self.min.x).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.max.y - self.min.y).max(0.0)
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Radius of the largest circle centered in the rect.
    pub fn inscribed_radius(&self) -> f32 {
        0.5 * self.width().min(self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn angles_run_clockwise_from_top() {
        let c = Point::new(10.0, 10.0);
        assert!(close(c.angle_to(Point::new(10.0, 0.0)), 0.0));
        assert!(close(c.angle_to(Point::new(20.0, 10.0)), FRAC_PI_2));
        assert!(close(c.angle_to(Point::new(10.0, 20.0)), PI));
        assert!(close(c.angle_to(Point::new(0.0, 10.0)), 3.0 * FRAC_PI_2));
    }

    #[test]
    fn at_angle_inverts_angle_to() {
        let c = Point::new(-3.0, 4.0);
        for angle in [0.1, 1.0, 2.5, 4.0, 6.0] {
            let p = c.at_angle(angle, 5.0);
            assert!((c.angle_to(p) - angle).abs() < 1e-4);
            assert!((c.distance(p) - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn rect_measures() {
        let r = Rect::from_min_size(Point::new(0.0, 0.0), 200.0, 100.0);
        assert_eq!(r.center(), Point::new(100.0, 50.0));
        assert_eq!(r.inscribed_radius(), 50.0);
        assert!(!r.is_empty());
        assert!(Rect::ZERO.is_empty());
    }

    #[test]
    fn normalize_wraps_negative_angles() {
        assert!(close(normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2));
        assert!(close(normalize_angle(TAU + 1.0), 1.0));
    }
}
