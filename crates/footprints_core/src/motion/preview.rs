//! Placement of the hover detail preview box.

use crate::model::dot::{Position, Size};

pub const PREVIEW_WIDTH: f64 = 320.0;
pub const PREVIEW_HEIGHT: f64 = 120.0;
pub const PREVIEW_PADDING: f64 = 10.0;

/// Top-left anchored preview rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PreviewBox {
    fn fits(&self, viewport: Size) -> bool {
        self.left >= 0.0
            && self.left + self.width <= viewport.width
            && self.top >= 0.0
            && self.top + self.height <= viewport.height
    }
}

/// Tries right, left, below, above the dot centre; first fit wins, else right.
pub fn preview_box(center: Position, viewport: Size) -> PreviewBox {
    let boxed = |left: f64, top: f64| PreviewBox {
        left,
        top,
        width: PREVIEW_WIDTH,
        height: PREVIEW_HEIGHT,
    };
    let candidates = [
        boxed(center.x + PREVIEW_PADDING, center.y - PREVIEW_HEIGHT / 2.0),
        boxed(
            center.x - PREVIEW_WIDTH - PREVIEW_PADDING,
            center.y - PREVIEW_HEIGHT / 2.0,
        ),
        boxed(center.x - PREVIEW_WIDTH / 2.0, center.y + PREVIEW_PADDING),
        boxed(
            center.x - PREVIEW_WIDTH / 2.0,
            center.y - PREVIEW_HEIGHT - PREVIEW_PADDING,
        ),
    ];

    candidates
        .iter()
        .copied()
        .find(|candidate| candidate.fits(viewport))
        .unwrap_or(candidates[0])
}
