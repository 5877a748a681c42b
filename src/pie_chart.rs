use egui::{Color32, Painter, Pos2, Sense, Shape, Stroke, Vec2, Widget};

use crate::{
    canvas::Canvas,
    color::Color,
    component::Component,
    geometry::{Point, Rect},
    pie_view::PieView,
};

/// Hosts a [`PieView`] inside an egui layout.
pub struct PieChart<'a> {
    view: &'a mut PieView,
    desired_size: Vec2,
}

impl<'a> PieChart<'a> {
    pub fn new(view: &'a mut PieView) -> Self {
        PieChart {
            view,
            desired_size: Vec2::new(256.0, 256.0),
        }
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.desired_size = size;
        self
    }
}

impl<'a> Widget for PieChart<'a> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(self.desired_size, Sense::click());

        self.view.layout(Rect {
            min: to_point(rect.min),
            max: to_point(rect.max),
        });

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.view.tap(to_point(pos));
            }
        }

        let dt = ui.input().unstable_dt as f64;
        if self.view.advance(dt) {
            ui.ctx().request_repaint();
        }

        if ui.is_rect_visible(rect) {
            let mut canvas = PainterCanvas {
                painter: ui.painter(),
            };
            self.view.draw(&mut canvas);
        }

        response
    }
}

struct PainterCanvas<'p> {
    painter: &'p Painter,
}

impl<'p> Canvas for PainterCanvas<'p> {
    fn fill_polygon(&mut self, points: Vec<Point>, fill: Color) {
        let points = points.into_iter().map(to_pos).collect();
        self.painter
            .add(Shape::convex_polygon(points, to_color32(fill), Stroke::none()));
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, width: f32, color: Color) {
        self.painter
            .circle_stroke(to_pos(center), radius, Stroke::new(width, to_color32(color)));
    }
}

fn to_point(pos: Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

fn to_pos(point: Point) -> Pos2 {
    Pos2::new(point.x, point.y)
}

pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}
