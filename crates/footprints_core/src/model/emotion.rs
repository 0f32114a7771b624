//! Emotion tag vocabulary.
//!
//! # Responsibility
//! - Define the closed set of emotions a footprint can carry.
//! - Map each emotion to its display colour.
//!
//! # Invariants
//! - The set has exactly six members and is never extended at runtime.
//! - Wire and storage form is the lowercase member name.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Colour used for dots that carry no emotion tag.
pub const UNTAGGED_COLOR: &str = "#7AF278";

/// Emotion tag attached to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Happiness,
    Sadness,
    Surprise,
}

impl Emotion {
    /// All emotions in display order.
    pub const ALL: [Emotion; 6] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happiness,
        Emotion::Sadness,
        Emotion::Surprise,
    ];

    /// Stable lowercase name used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anger => "anger",
            Self::Disgust => "disgust",
            Self::Fear => "fear",
            Self::Happiness => "happiness",
            Self::Sadness => "sadness",
            Self::Surprise => "surprise",
        }
    }

    /// Parses a user-provided name; case-insensitive, surrounding whitespace ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|emotion| emotion.as_str() == normalized)
    }

    /// Neon display colour as `#RRGGBB`.
    pub fn color(self) -> &'static str {
        match self {
            Self::Anger => "#FF073A",
            Self::Disgust => "#66FF00",
            Self::Fear => "#B967FF",
            Self::Happiness => "#FFFF00",
            Self::Sadness => "#0099FF",
            Self::Surprise => "#FF6EC7",
        }
    }
}

/// Display colour for an optional tag.
pub fn color_for(emotion: Option<Emotion>) -> &'static str {
    emotion.map_or(UNTAGGED_COLOR, Emotion::color)
}

impl Display for Emotion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a name is not one of the six known emotions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEmotion(pub String);

impl Display for UnknownEmotion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown emotion `{}`; expected anger|disgust|fear|happiness|sadness|surprise",
            self.0
        )
    }
}

impl Error for UnknownEmotion {}

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownEmotion(s.trim().to_string()))
    }
}
