use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    animation::Easing,
    color::{Color, DEFAULT_PALETTE},
    error::PieError,
    pie_view::{PieView, DEFAULT_ANIMATION_SPEED, DEFAULT_SELECTED_OFFSET},
};

/// Look of a pie, as read from a RON style file. Missing fields keep their
/// defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieConfig {
    /// Seconds per transition, 0 for none.
    pub animation_speed: f64,
    pub easing: Easing,
    pub slice_colors: Vec<Color>,
    pub selected_offset: f32,
}

impl Default for PieConfig {
    fn default() -> Self {
        PieConfig {
            animation_speed: DEFAULT_ANIMATION_SPEED,
            easing: Easing::default(),
            slice_colors: DEFAULT_PALETTE.to_vec(),
            selected_offset: DEFAULT_SELECTED_OFFSET,
        }
    }
}

impl PieConfig {
    pub fn parse(text: &str) -> Result<Self, PieError> {
        Ok(ron::de::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PieError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// `<config dir>/pie-view/style.ron`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pie-view").join("style.ron"))
    }

    /// Reads `explicit` if given, otherwise the default style file if it
    /// exists, otherwise falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, PieError> {
        if let Some(path) = explicit {
            info!("loading style from {}", path.display());
            return Self::from_path(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                info!("loading style from {}", path.display());
                Self::from_path(path)
            }
            _ => {
                debug!("no style file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn apply(&self, view: &mut PieView) {
        view.set_animation_speed(self.animation_speed);
        view.set_easing(self.easing);
        view.set_slice_colors(self.slice_colors.clone());
        view.set_selected_offset(self.selected_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_partial_style() {
        let config = PieConfig::parse(
            "(animation_speed: 0.25, easing: EaseOut, slice_colors: [(r: 255, g: 0, b: 0)])",
        )
        .unwrap();

        assert_eq!(config.animation_speed, 0.25);
        assert_eq!(config.easing, Easing::EaseOut);
        assert_eq!(config.slice_colors, vec![Color::rgb(255, 0, 0)]);
        assert_eq!(config.selected_offset, DEFAULT_SELECTED_OFFSET);
    }

    #[test]
    fn empty_style_is_default() {
        assert_eq!(PieConfig::parse("()").unwrap(), PieConfig::default());
    }

    #[test]
    fn malformed_style_is_a_config_error() {
        assert!(matches!(
            PieConfig::parse("(easing: Bouncy)"),
            Err(PieError::Config(_))
        ));
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(selected_offset: 0.2)").unwrap();

        let config = PieConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.selected_offset, 0.2);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            PieConfig::load(Some(missing.as_path())),
            Err(PieError::Io(_))
        ));
    }

    #[test]
    fn apply_configures_view() {
        let config = PieConfig {
            animation_speed: 0.0,
            easing: Easing::Linear,
            slice_colors: vec![Color::WHITE],
            selected_offset: 0.1,
        };
        let mut view = PieView::new();
        config.apply(&mut view);

        assert_eq!(view.animation_speed(), 0.0);
        assert_eq!(view.easing(), Easing::Linear);
        assert_eq!(view.slice_colors(), &[Color::WHITE]);
    }
}
