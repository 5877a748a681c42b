use std::rc::{Rc, Weak};

use log::{debug, trace, warn};

use crate::{
    animation::{Easing, Transition},
    canvas::{sector_polygons, Canvas},
    color::{color_at, Color},
    component::Component,
    geometry::{Point, Rect},
    slice::{layout_slices, Slice, Span},
    source::{PieViewDataSource, PieViewDelegate},
};

/// Seconds a reload transition takes unless configured otherwise.
pub const DEFAULT_ANIMATION_SPEED: f64 = 0.5;

/// How far a selected slice moves out, as a fraction of the bounds' radius.
pub const DEFAULT_SELECTED_OFFSET: f32 = 0.08;

const OUTLINE: Color = Color::rgb(125, 125, 125);

/// A pie chart fed by a [`PieViewDataSource`] and reporting selection to a
/// [`PieViewDelegate`].
///
/// Both collaborators are held weakly: the view never keeps them alive and
/// behaves as if they were unset once their owner drops them.
pub struct PieView {
    data_source: Option<Weak<dyn PieViewDataSource>>,
    delegate: Option<Weak<dyn PieViewDelegate>>,

    animation_speed: f64,
    slice_colors: Vec<Color>,
    easing: Easing,
    selected_offset: f32,

    slices: Vec<Slice>,
    displayed: Vec<Span>,
    transition: Option<Transition>,
    // per slice, 0.0 resting .. 1.0 fully pulled out
    lift: Vec<f32>,
    selected: Option<usize>,
    bounds: Rect,
}

impl Default for PieView {
    fn default() -> Self {
        Self::new()
    }
}

impl PieView {
    pub fn new() -> Self {
        PieView {
            data_source: None,
            delegate: None,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            slice_colors: Vec::new(),
            easing: Easing::default(),
            selected_offset: DEFAULT_SELECTED_OFFSET,
            slices: Vec::new(),
            displayed: Vec::new(),
            transition: None,
            lift: Vec::new(),
            selected: None,
            bounds: Rect::ZERO,
        }
    }

    pub fn set_data_source<S: PieViewDataSource + 'static>(&mut self, source: &Rc<S>) {
        let weak: Weak<dyn PieViewDataSource> = Rc::downgrade(source) as Weak<S>;
        self.data_source = Some(weak);
    }

    pub fn clear_data_source(&mut self) {
        self.data_source = None;
    }

    /// The data source, if one is set and still alive.
    pub fn data_source(&self) -> Option<Rc<dyn PieViewDataSource>> {
        self.data_source.as_ref().and_then(Weak::upgrade)
    }

    pub fn set_delegate<D: PieViewDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<dyn PieViewDelegate> = Rc::downgrade(delegate) as Weak<D>;
        self.delegate = Some(weak);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// The delegate, if one is set and still alive.
    pub fn delegate(&self) -> Option<Rc<dyn PieViewDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    pub fn animation_speed(&self) -> f64 {
        self.animation_speed
    }

    /// Seconds a transition takes. Zero (or anything not positive) makes
    /// changes instant.
    pub fn set_animation_speed(&mut self, seconds: f64) {
        self.animation_speed = if seconds.is_finite() && seconds > 0.0 {
            seconds
        } else {
            0.0
        };
    }

    pub fn slice_colors(&self) -> &[Color] {
        &self.slice_colors
    }

    pub fn set_slice_colors(&mut self, colors: Vec<Color>) {
        self.slice_colors = colors;
    }

    pub fn color_for_slice(&self, index: usize) -> Color {
        color_at(&self.slice_colors, index)
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn set_selected_offset(&mut self, offset: f32) {
        self.selected_offset = if offset.is_finite() {
            offset.clamp(0.0, 0.5)
        } else {
            0.0
        };
    }

    /// Slices from the latest reload, in index order.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Spans as currently drawn. While a reload animates this can hold more
    /// entries than [`slices`](Self::slices): removed slices shrink away.
    pub fn displayed_spans(&self) -> Vec<Span> {
        match &self.transition {
            Some(transition) => transition.current(),
            None => self.displayed.clone(),
        }
    }

    pub fn selected_slice(&self) -> Option<usize> {
        self.selected
    }

    /// Re-reads every slice from the data source and animates to the new
    /// layout. Does nothing if there is no data source.
    pub fn reload_data(&mut self) {
        let Some(source) = self.data_source() else {
            debug!("reload skipped: no data source");
            return;
        };

        let count = source.number_of_slices(self);
        let values: Vec<f64> = (0..count)
            .map(|index| source.value_for_slice(self, index))
            .collect();
        debug!("reloading {} slices", count);

        // the delegate hears about a vanished selection while the old
        // slices are still in place
        if let Some(selected) = self.selected {
            if selected >= count {
                self.deselect_slice(selected);
            }
        }

        let from = self.displayed_spans();
        self.slices = layout_slices(&values);
        self.displayed = self.slices.iter().map(|s| s.span).collect();
        self.transition = if self.animation_speed > 0.0 {
            Some(Transition::new(
                from,
                self.displayed.clone(),
                self.animation_speed,
                self.easing,
            ))
        } else {
            None
        };
        self.lift.resize(count, 0.0);
    }

    /// Selects `index`, deselecting the current selection first. Returns
    /// false if there is no such slice.
    pub fn select_slice(&mut self, index: usize) -> bool {
        if index >= self.slices.len() {
            warn!("cannot select slice {} of {}", index, self.slices.len());
            return false;
        }
        if self.selected == Some(index) {
            return true;
        }
        if let Some(current) = self.selected {
            self.deselect_slice(current);
        }

        let delegate = self.delegate();
        if let Some(delegate) = &delegate {
            delegate.will_select_slice(self, index);
        }
        self.selected = Some(index);
        self.settle_if_instant();
        if let Some(delegate) = &delegate {
            delegate.did_select_slice(self, index);
        }

        trace!("selected slice {}", index);
        true
    }

    /// Deselects `index` if it is the selected slice.
    pub fn deselect_slice(&mut self, index: usize) -> bool {
        if self.selected != Some(index) {
            return false;
        }

        let delegate = self.delegate();
        if let Some(delegate) = &delegate {
            delegate.will_deselect_slice(self, index);
        }
        self.selected = None;
        self.settle_if_instant();
        if let Some(delegate) = &delegate {
            delegate.did_deselect_slice(self, index);
        }

        trace!("deselected slice {}", index);
        true
    }

    /// Handles a tap at `point`: tapping the selected slice deselects it,
    /// tapping another slice selects that one, tapping outside the pie
    /// clears the selection.
    pub fn tap(&mut self, point: Point) {
        match (self.hit_test(point), self.selected) {
            (Some(hit), Some(current)) if hit == current => {
                self.deselect_slice(current);
            }
            (Some(hit), _) => {
                self.select_slice(hit);
            }
            (None, Some(current)) => {
                self.deselect_slice(current);
            }
            (None, None) => {}
        }
    }

    /// Moves all animations forward by `dt` seconds. Returns true while
    /// anything is still moving, so the host knows to keep repainting.
    pub fn advance(&mut self, dt: f64) -> bool {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        let finished = match &mut self.transition {
            Some(transition) => {
                transition.advance(dt);
                transition.is_finished()
            }
            None => false,
        };
        if finished {
            self.transition = None;
        }

        let step = if self.animation_speed > 0.0 {
            (dt / self.animation_speed) as f32
        } else {
            1.0
        };
        let selected = self.selected;
        for (i, lift) in self.lift.iter_mut().enumerate() {
            let target = if selected == Some(i) { 1.0 } else { 0.0 };
            if *lift < target {
                *lift = (*lift + step).min(target);
            } else if *lift > target {
                *lift = (*lift - step).max(target);
            }
        }

        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        let selected = self.selected;
        self.transition.is_some()
            || self.lift.iter().enumerate().any(|(i, lift)| {
                let target = if selected == Some(i) { 1.0 } else { 0.0 };
                *lift != target
            })
    }

    fn settle_if_instant(&mut self) {
        if self.animation_speed <= 0.0 {
            self.advance(0.0);
        }
    }

    fn radius(&self) -> f32 {
        self.bounds.inscribed_radius() * (1.0 - self.selected_offset)
    }
}

impl Component for PieView {
    type Hit = usize;

    fn layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if self.bounds.is_empty() {
            return;
        }

        let center = self.bounds.center();
        let radius = self.radius();
        let reach = self.selected_offset * self.bounds.inscribed_radius();
        let spans = self.displayed_spans();

        if spans.iter().all(|s| s.sweep() <= 0.0) {
            canvas.stroke_circle(center, radius, 1.0, OUTLINE);
            return;
        }

        for (i, span) in spans.iter().enumerate() {
            let lift = self.lift.get(i).copied().unwrap_or(0.0);
            let origin = center.at_angle(span.mid(), lift * reach);
            let fill = self.color_for_slice(i);
            for polygon in sector_polygons(origin, radius, *span) {
                canvas.fill_polygon(polygon, fill);
            }
        }
    }

    fn hit_test(&self, point: Point) -> Option<usize> {
        if self.bounds.is_empty() {
            return None;
        }

        let center = self.bounds.center();
        if center.distance(point) > self.radius() {
            return None;
        }

        let angle = center.angle_to(point);
        self.displayed_spans()
            .iter()
            .take(self.slices.len())
            .position(|span| span.contains(angle))
    }
}
