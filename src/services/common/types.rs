use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Repeat mode for track or queue repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop after the last track of the queue
    #[default]
    Off,

    /// Repeat the current track
    One,

    /// Repeat the whole queue
    All,
}

impl RepeatMode {
    /// The mode that follows this one in the cycle Off → All → One → Off
    pub fn cycled(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

impl From<&str> for RepeatMode {
    fn from(mode: &str) -> Self {
        match mode.to_ascii_lowercase().as_str() {
            "one" | "track" => Self::One,
            "all" | "queue" | "playlist" => Self::All,
            _ => Self::Off,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatMode::Off => write!(f, "off"),
            RepeatMode::One => write!(f, "one"),
            RepeatMode::All => write!(f, "all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_visits_all_then_one_then_off() {
        let mut mode = RepeatMode::Off;
        let mut visited = Vec::new();

        for _ in 0..3 {
            mode = mode.cycled();
            visited.push(mode);
        }

        assert_eq!(visited, vec![RepeatMode::All, RepeatMode::One, RepeatMode::Off]);
    }

    #[test]
    fn parses_loose_names() {
        assert_eq!(RepeatMode::from("ONE"), RepeatMode::One);
        assert_eq!(RepeatMode::from("playlist"), RepeatMode::All);
        assert_eq!(RepeatMode::from("whatever"), RepeatMode::Off);
    }
}
