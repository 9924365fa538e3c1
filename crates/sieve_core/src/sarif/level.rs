use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Severity of a SARIF result.
///
/// Results that omit `level` are treated as [`Level::Error`]. Any value
/// outside the four SARIF levels is read as [`Level::None`], which keeps the
/// set of levels closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Level {
    /// A serious problem.
    #[default]
    Error,
    /// A problem that is not serious enough to fail a build on its own.
    Warning,
    /// A minor issue or point of interest.
    Note,
    /// Purely informational.
    None,
}

impl Level {
    /// Parses a SARIF level string. Unrecognised values become [`Level::None`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "error" => Self::Error,
            "warning" => Self::Warning,
            "note" => Self::Note,
            _ => Self::None,
        }
    }

    /// The SARIF spelling of this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(Level::parse("error"), Level::Error);
        assert_eq!(Level::parse("warning"), Level::Warning);
        assert_eq!(Level::parse("note"), Level::Note);
        assert_eq!(Level::parse("none"), Level::None);
    }

    #[test]
    fn unknown_level_is_none() {
        assert_eq!(Level::parse("info"), Level::None);
        assert_eq!(Level::parse("ERROR"), Level::None);
    }

    #[test]
    fn default_is_error() {
        assert_eq!(Level::default(), Level::Error);
    }

    #[test]
    fn display_matches_sarif_spelling() {
        assert_eq!(Level::Warning.to_string(), "warning");
        assert_eq!(Level::None.to_string(), "none");
    }
}
