//! A toolkit-neutral interactive element: the host gives it a rect, asks it
//! to draw, and routes pointer positions through `hit_test`.

use crate::{
    canvas::Canvas,
    geometry::{Point, Rect},
};

pub trait Component {
    /// What a successful hit test identifies.
    type Hit;

    fn layout(&mut self, bounds: Rect);

    fn draw(&self, canvas: &mut dyn Canvas);

    fn hit_test(&self, point: Point) -> Option<Self::Hit>;
}
