use std::{borrow::Cow, error::Error, fmt};

/// Errors from the fallible edges of the crate: style files, directory
/// scans and color parsing. The widget itself never fails.
#[derive(Debug)]
pub enum PieError {
    /// Reading a file or walking a directory failed.
    Io(std::io::Error),

    /// A style file could not be parsed.
    Config(ron::de::SpannedError),

    /// An ignore pattern is not a valid glob.
    Pattern(glob::PatternError),

    /// A color string is not of the form `#rrggbb` or `#rrggbbaa`.
    InvalidColor(String),
}

impl fmt::Display for PieError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            PieError::Io(error) => Cow::from(format!("io error: {}", error)),
            PieError::Config(error) => Cow::from(format!("config error: {}", error)),
            PieError::Pattern(error) => Cow::from(format!("bad ignore pattern: {}", error)),
            PieError::InvalidColor(s) => Cow::from(format!("invalid color '{}'", s)),
        };

        write!(f, "{}", msg)
    }
}

impl Error for PieError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PieError::Io(error) => Some(error),
            PieError::Config(error) => Some(error),
            PieError::Pattern(error) => Some(error),
            PieError::InvalidColor(_) => None,
        }
    }
}

impl From<std::io::Error> for PieError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ron::de::SpannedError> for PieError {
    fn from(value: ron::de::SpannedError) -> Self {
        Self::Config(value)
    }
}

impl From<glob::PatternError> for PieError {
    fn from(value: glob::PatternError) -> Self {
        Self::Pattern(value)
    }
}
