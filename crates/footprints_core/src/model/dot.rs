//! Ephemeral dot geometry.
//!
//! Dots exist only on the display side. Nothing here is persisted.

use crate::model::emotion::Emotion;
use crate::model::submission::GalleryItem;
use serde::{Deserialize, Serialize};

/// Default dot diameter in pixels.
pub const DOT_SIZE: f64 = 32.0;

/// Screen-space point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point reached by travelling `distance` along `angle` (radians, y grows downward).
    pub fn project(self, angle: f64, distance: f64) -> Position {
        Position::new(
            self.x + angle.cos() * distance,
            self.y + angle.sin() * distance,
        )
    }

    /// Linear interpolation; `t` is clamped to `0..=1` and `t = 1` yields `to` exactly.
    pub fn lerp(self, to: Position, t: f64) -> Position {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return to;
        }
        Position::new(
            self.x + (to.x - self.x) * t,
            self.y + (to.y - self.y) * t,
        )
    }
}

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

/// On-screen representation of one gallery item.
///
/// Geometry only. Hover and pause state is kept per dot by
/// [`crate::motion::travel::Wander`], which [`crate::motion::stage::Stage`] owns alongside the
/// dots (see `Stage::pointer_enter` and `Stage::hovered`).
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub id: String,
    pub content: String,
    pub emotion: Option<Emotion>,
    pub location: Option<String>,
    pub position: Position,
    /// Diameter in pixels.
    pub size: f64,
}

impl Dot {
    pub fn new(id: impl Into<String>, content: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            emotion: None,
            location: None,
            position,
            size: DOT_SIZE,
        }
    }

    pub fn with_emotion(mut self, emotion: Emotion) -> Self {
        self.emotion = Some(emotion);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builds a dot for a gallery item at the given start position.
    pub fn from_item(item: &GalleryItem, position: Position) -> Self {
        Self {
            id: item.id.clone(),
            content: item.message.clone(),
            emotion: item.emotion,
            location: item.location.clone(),
            position,
            size: DOT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn project_follows_screen_axes() {
        let moved = Position::new(10.0, 10.0).project(FRAC_PI_2, 5.0);
        assert!((moved.x - 10.0).abs() < 1e-9);
        assert!((moved.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn lerp_clamps_progress() {
        let from = Position::new(0.0, 0.0);
        let to = Position::new(100.0, 50.0);
        assert_eq!(from.lerp(to, 0.5), Position::new(50.0, 25.0));
        assert_eq!(from.lerp(to, 2.0), to);
        assert_eq!(from.lerp(to, -1.0), from);
    }
}
