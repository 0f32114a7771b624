//! Connection lines between related dots.
//!
//! # Responsibility
//! - Decide which dot pairs are related (shared emotion or shared location).
//! - Redraw the full connection overlay once per frame.
//!
//! # Invariants
//! - Each unordered pair is considered once (`i < j`) and drawn at most once.
//! - Location matching is exact and case-sensitive.
//! - Pair checks are O(n²) per frame. Galleries hold tens of dots; this is a
//!   scaling limit, not something to optimise around.

use crate::model::dot::{Dot, Position};
use crate::motion::canvas::{Canvas, LineStyle, CONNECTION_STYLE};

/// One line to draw, by index into the dot slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub a: Position,
    pub b: Position,
}

/// Whether two dots share an emotion tag or a location tag.
pub fn are_related(a: &Dot, b: &Dot) -> bool {
    let same_emotion = matches!((a.emotion, b.emotion), (Some(x), Some(y)) if x == y);
    let same_location = matches!(
        (a.location.as_deref(), b.location.as_deref()),
        (Some(x), Some(y)) if x == y
    );
    same_emotion || same_location
}

/// All related pairs at the dots' current positions.
pub fn connections(dots: &[Dot]) -> Vec<Connection> {
    let mut lines = Vec::new();
    for (i, first) in dots.iter().enumerate() {
        for (offset, second) in dots[i + 1..].iter().enumerate() {
            if are_related(first, second) {
                lines.push(Connection {
                    from: i,
                    to: i + 1 + offset,
                    a: first.position,
                    b: second.position,
                });
            }
        }
    }
    lines
}

/// Draws the connection overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipRenderer {
    style: LineStyle,
}

impl Default for RelationshipRenderer {
    fn default() -> Self {
        Self {
            style: CONNECTION_STYLE,
        }
    }
}

impl RelationshipRenderer {
    pub fn new(style: LineStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Strokes every related pair onto `canvas`. Does not clear it.
    ///
    /// Returns the number of lines drawn.
    pub fn draw<C: Canvas + ?Sized>(&self, dots: &[Dot], canvas: &mut C) -> usize {
        let lines = connections(dots);
        for line in &lines {
            canvas.stroke_line(line.a, line.b, &self.style);
        }
        lines.len()
    }
}
