//! Capabilities a [`PieView`] borrows from its owner.
//!
//! The view only keeps `Weak` references to these, so the owner decides how
//! long they live. Methods take `&self`; implementors that need to record
//! something use `Cell`/`RefCell`.

use crate::pie_view::PieView;

/// Supplies the slices shown by a [`PieView`].
pub trait PieViewDataSource {
    fn number_of_slices(&self, view: &PieView) -> usize;

    /// Called once per index in `0..number_of_slices` during a reload.
    fn value_for_slice(&self, view: &PieView, index: usize) -> f64;
}

/// Told about selection changes. `will_*` runs before the view commits the
/// change, `did_*` after.
pub trait PieViewDelegate {
    fn will_select_slice(&self, view: &PieView, index: usize);
    fn did_select_slice(&self, view: &PieView, index: usize);

    fn will_deselect_slice(&self, view: &PieView, index: usize);
    fn did_deselect_slice(&self, view: &PieView, index: usize);
}

/// A fixed list of values, handy for static charts and tests.
impl PieViewDataSource for Vec<f64> {
    fn number_of_slices(&self, _view: &PieView) -> usize {
        self.len()
    }

    fn value_for_slice(&self, _view: &PieView, index: usize) -> f64 {
        self.get(index).copied().unwrap_or(0.0)
    }
}
