//! Initial dot sets for a freshly mounted stage.
//!
//! Gallery items start at random positions inside the safe area. When the
//! gallery cannot be loaded the page substitutes placeholder dots instead.

use crate::config::PlacementConfig;
use crate::model::dot::{Dot, Position, Size};
use crate::model::emotion::Emotion;
use crate::model::submission::GalleryItem;
use crate::motion::placement::SafeArea;
use rand::seq::SliceRandom;
use rand::Rng;

/// Placeholders keep out of a circle of this radius around the viewport centre.
pub const PLACEHOLDER_KEEP_OUT_RADIUS: f64 = 150.0;
const PLACEHOLDER_POSITION_ATTEMPTS: u32 = 32;
/// Chance that a placeholder carries each optional tag.
const PLACEHOLDER_TAG_CHANCE: f64 = 0.7;

const PLACEHOLDER_MESSAGES: &[&str] = &[
    "Exploring the digital realm...",
    "Leaving traces in cyberspace...",
    "Following the white rabbit...",
    "Decoding the matrix...",
    "Seeking the truth...",
    "Breaking free from illusion...",
    "Questioning reality...",
    "Embracing the unknown...",
];

const PLACEHOLDER_LOCATIONS: &[&str] = &[
    "The Grid",
    "Zion",
    "The Construct",
    "The Loading Program",
    "The Training Simulation",
];

/// One dot per item, each at a uniformly random point in the safe area.
pub fn dots_from_items<R: Rng + ?Sized>(
    items: &[GalleryItem],
    viewport: Size,
    config: &PlacementConfig,
    rng: &mut R,
) -> Vec<Dot> {
    let area = SafeArea::for_viewport(viewport, config);
    items
        .iter()
        .map(|item| {
            let mut dot = Dot::from_item(item, area.sample(rng));
            dot.size = config.dot_size;
            dot
        })
        .collect()
}

/// Locally generated stand-in dots for when the gallery fetch fails.
pub fn placeholder_dots<R: Rng + ?Sized>(
    count: usize,
    viewport: Size,
    config: &PlacementConfig,
    rng: &mut R,
) -> Vec<Dot> {
    let area = SafeArea::for_viewport(viewport, config);
    let center = viewport.center();

    (0..count)
        .map(|index| {
            let message = PLACEHOLDER_MESSAGES
                .choose(rng)
                .copied()
                .unwrap_or("...");
            let mut dot = Dot::new(
                format!("placeholder-{index}"),
                message,
                sample_outside_center(&area, center, rng),
            );
            dot.size = config.dot_size;
            if rng.gen_bool(PLACEHOLDER_TAG_CHANCE) {
                dot.emotion = Emotion::ALL.choose(rng).copied();
            }
            if rng.gen_bool(PLACEHOLDER_TAG_CHANCE) {
                dot.location = PLACEHOLDER_LOCATIONS
                    .choose(rng)
                    .map(|location| (*location).to_string());
            }
            dot
        })
        .collect()
}

/// Rejection-samples away from the centre; small viewports accept the last draw.
fn sample_outside_center<R: Rng + ?Sized>(area: &SafeArea, center: Position, rng: &mut R) -> Position {
    let mut candidate = area.sample(rng);
    for _ in 1..PLACEHOLDER_POSITION_ATTEMPTS {
        if candidate.distance_to(center) >= PLACEHOLDER_KEEP_OUT_RADIUS {
            break;
        }
        candidate = area.sample(rng);
    }
    candidate
}
