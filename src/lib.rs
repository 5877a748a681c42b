//! A pie chart view that pulls slice values from a data source and tells a
//! delegate when slices are selected or deselected.
//!
//! [`PieView`] does the work and draws through the [`Canvas`] trait, so it
//! is not tied to a toolkit; [`PieChart`] hosts it in egui. The rest of the
//! crate backs the bundled disk-usage pie.

pub mod analyzer;
pub mod animation;
pub mod canvas;
pub mod color;
pub mod component;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pie_chart;
pub mod pie_view;
pub mod slice;
pub mod source;
pub mod stats;
pub mod utils;

pub use canvas::Canvas;
pub use color::Color;
pub use component::Component;
pub use error::PieError;
pub use pie_chart::PieChart;
pub use pie_view::PieView;
pub use source::{PieViewDataSource, PieViewDelegate};
