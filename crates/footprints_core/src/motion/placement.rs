//! Next-target selection for wandering dots.
//!
//! # Responsibility
//! - Pick the next resting position for a dot from its current position.
//! - Keep targets inside the safe area between the reserved bands.
//! - Keep clear of other dots on a best-effort basis.
//!
//! # Invariants
//! - Every returned target lies inside [`SafeArea::for_viewport`].
//! - Selection always terminates: after `max_attempts` rejected candidates a
//!   fallback target is accepted without separation checks.
//! - The engine only reads the `others` snapshot; it never mutates dots.

use crate::config::PlacementConfig;
use crate::model::dot::{Position, Size};
use log::debug;
use rand::Rng;
use std::f64::consts::{FRAC_PI_4, FRAC_PI_8, TAU};

/// Region dots may occupy for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeArea {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl SafeArea {
    /// Computes the safe area for `viewport`.
    ///
    /// The horizontal margin is capped at half the viewport width so bounds
    /// never invert. When the two bands overlap, the vertical range collapses
    /// onto the lower edge of the top band.
    pub fn for_viewport(viewport: Size, config: &PlacementConfig) -> Self {
        let width = viewport.width.max(0.0);
        let height = viewport.height.max(0.0);
        let margin = config.margin.min(width / 2.0).max(0.0);

        let min_x = margin;
        let max_x = (width - margin).max(min_x);
        let min_y = config.top_band;
        let max_y = (height - config.bottom_band).max(min_y);

        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn clamp(&self, point: Position) -> Position {
        Position::new(
            point.x.clamp(self.min_x, self.max_x),
            point.y.clamp(self.min_y, self.max_y),
        )
    }

    pub fn contains(&self, point: Position) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }

    pub fn in_top_band(&self, y: f64) -> bool {
        y < self.min_y
    }

    pub fn in_bottom_band(&self, y: f64) -> bool {
        y > self.max_y
    }

    /// Uniformly random point inside the area.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(
            sample_span(rng, self.min_x, self.max_x),
            sample_span(rng, self.min_y, self.max_y),
        )
    }
}

fn sample_span<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

/// Outcome of one target selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// A candidate passed the separation check on attempt `attempts` (1-based).
    Direct { target: Position, attempts: u32 },
    /// Every candidate was rejected; the fallback target was used.
    Fallback { target: Position },
}

impl Placement {
    pub fn target(&self) -> Position {
        match *self {
            Self::Direct { target, .. } | Self::Fallback { target } => target,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Octant-sampling target picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementEngine {
    config: PlacementConfig,
}

impl PlacementEngine {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Chooses the next target for a dot at `current`.
    ///
    /// `others` holds the positions of every other visible dot. The dot being
    /// moved must not be included.
    pub fn next_target<R: Rng + ?Sized>(
        &self,
        current: Position,
        viewport: Size,
        others: &[Position],
        rng: &mut R,
    ) -> Placement {
        let area = SafeArea::for_viewport(viewport, &self.config);

        for attempt in 1..=self.config.max_attempts {
            let candidate = area.clamp(current.project(
                sample_octant_angle(rng),
                self.config.travel_radius,
            ));
            if self.is_clear_of(candidate, others) {
                return Placement::Direct {
                    target: candidate,
                    attempts: attempt,
                };
            }
        }

        let target = self.fallback_target(current, &area, rng);
        debug!(
            "event=placement_fallback module=motion attempts={} others={}",
            self.config.max_attempts,
            others.len()
        );
        Placement::Fallback { target }
    }

    fn is_clear_of(&self, candidate: Position, others: &[Position]) -> bool {
        others
            .iter()
            .all(|other| candidate.distance_to(*other) >= self.config.min_separation)
    }

    /// Short horizontal hop; pulls the dot out of a reserved band if it sits in one.
    fn fallback_target<R: Rng + ?Sized>(
        &self,
        current: Position,
        area: &SafeArea,
        rng: &mut R,
    ) -> Position {
        let angle = rng.gen_range(0.0..TAU);
        let separation = self.config.min_separation;

        let x = current.x + angle.cos() * separation;
        let mut y = current.y;
        if area.in_top_band(y) {
            y = area.min_y + separation;
        } else if area.in_bottom_band(y) {
            y = area.max_y - separation;
        }

        area.clamp(Position::new(x, y))
    }
}

/// One of eight compass octants, jittered by up to a quarter octant each way.
fn sample_octant_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let octant = rng.gen_range(0..8u8);
    let base = FRAC_PI_4 * f64::from(octant);
    base + rng.gen_range(-FRAC_PI_8..FRAC_PI_8)
}

#[cfg(test)]
mod tests {
    use super::{sample_octant_angle, Placement, PlacementEngine, SafeArea};
    use crate::config::PlacementConfig;
    use crate::model::dot::{Position, Size};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::{FRAC_PI_8, TAU};

    fn engine() -> PlacementEngine {
        PlacementEngine::new(PlacementConfig::default())
    }

    #[test]
    fn margin_is_capped_for_narrow_viewports() {
        let area = SafeArea::for_viewport(Size::new(60.0, 600.0), &PlacementConfig::default());
        assert_eq!(area.min_x, 30.0);
        assert_eq!(area.max_x, 30.0);
    }

    #[test]
    fn overlapping_bands_collapse_instead_of_inverting() {
        let area = SafeArea::for_viewport(Size::new(800.0, 100.0), &PlacementConfig::default());
        assert!(area.min_y <= area.max_y);
        assert_eq!(area.max_y, 80.0);
    }

    #[test]
    fn octant_angles_stay_within_jitter_of_a_compass_direction() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let angle = sample_octant_angle(&mut rng);
            let nearest = (angle / (TAU / 8.0)).round() * (TAU / 8.0);
            assert!((angle - nearest).abs() <= FRAC_PI_8 + 1e-12);
        }
    }

    #[test]
    fn no_neighbours_means_first_attempt_wins() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let placement = engine().next_target(
                Position::new(400.0, 400.0),
                Size::new(1280.0, 720.0),
                &[],
                &mut rng,
            );
            assert!(matches!(placement, Placement::Direct { attempts: 1, .. }));
        }
    }

    #[test]
    fn fallback_pulls_dot_out_of_top_band() {
        let config = PlacementConfig::default();
        let area = SafeArea::for_viewport(Size::new(1000.0, 1000.0), &config);
        let mut rng = StdRng::seed_from_u64(5);

        let target = engine().fallback_target(Position::new(500.0, 10.0), &area, &mut rng);
        assert_eq!(target.y, 80.0 + 60.0);
        assert!(area.contains(target));
    }
}
