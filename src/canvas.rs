use std::f64::consts::FRAC_PI_2;

use crate::{color::Color, geometry::Point, slice::Span};

/// The drawing operations a pie needs from whatever is hosting it.
pub trait Canvas {
    /// Fills a convex polygon.
    fn fill_polygon(&mut self, points: Vec<Point>, fill: Color);

    fn stroke_circle(&mut self, center: Point, radius: f32, width: f32, color: Color);
}

/// Longest arc segment, in pixels, before another vertex is added.
const SEGMENT_LENGTH: f64 = 4.0;

/// Tessellates a pie sector into convex polygons.
///
/// Each polygon is the center plus points along at most a quarter turn of
/// arc, so hosts that only fill convex shapes can draw any sweep.
pub fn sector_polygons(center: Point, radius: f32, span: Span) -> Vec<Vec<Point>> {
    let sweep = span.sweep();
    if sweep <= 0.0 || radius <= 0.0 {
        return Vec::new();
    }

    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f64;
    let steps = ((piece_sweep * radius as f64) / SEGMENT_LENGTH).ceil().max(1.0) as usize;

    (0..pieces)
        .map(|p| {
            let start = span.start + piece_sweep * p as f64;
            let mut points = Vec::with_capacity(steps + 2);
            points.push(center);
            for s in 0..=steps {
                let angle = start + piece_sweep * s as f64 / steps as f64;
                points.push(center.at_angle(angle, radius));
            }
            points
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn full_circle_splits_into_quarters() {
        let c = Point::new(50.0, 50.0);
        let polys = sector_polygons(c, 40.0, Span::new(0.0, TAU));

        assert_eq!(polys.len(), 4);
        for poly in &polys {
            assert_eq!(poly[0], c);
            for p in &poly[1..] {
                assert!((c.distance(*p) - 40.0).abs() < 1e-3);
            }
        }
        // first arc point is straight up
        assert!((polys[0][1].x - 50.0).abs() < 1e-4);
        assert!((polys[0][1].y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn small_sector_is_one_polygon() {
        let polys = sector_polygons(Point::default(), 10.0, Span::new(0.2, 0.4));
        assert_eq!(polys.len(), 1);
        assert!(polys[0].len() >= 3);
    }

    #[test]
    fn empty_sector_draws_nothing() {
        assert!(sector_polygons(Point::default(), 10.0, Span::collapsed(1.0)).is_empty());
        assert!(sector_polygons(Point::default(), 0.0, Span::new(0.0, 1.0)).is_empty());
    }
}
