//! Per-dot travel legs and hover pausing.
//!
//! # Invariants
//! - A travel leg interpolates linearly from `from` to `to` over `duration`.
//! - Pausing freezes elapsed time; the target and remaining duration survive
//!   a pause/resume cycle unchanged.

use crate::model::dot::Position;
use std::time::Duration;

/// Hover-driven motion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Wandering,
    /// Pointer is over the dot; travel is suspended.
    Paused,
}

/// Result of advancing a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelStatus {
    InFlight,
    Arrived,
}

/// One linear leg from a start point to a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Travel {
    from: Position,
    to: Position,
    duration: Duration,
    elapsed: Duration,
}

impl Travel {
    pub fn new(from: Position, to: Position, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn origin(&self) -> Position {
        self.from
    }

    pub fn target(&self) -> Position {
        self.to
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Fraction of the leg completed, `0..=1`. Zero-length legs are complete.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn position(&self) -> Position {
        self.from.lerp(self.to, self.progress())
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn advance(&mut self, dt: Duration) -> TravelStatus {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.is_complete() {
            TravelStatus::Arrived
        } else {
            TravelStatus::InFlight
        }
    }
}

/// Travel plus hover state for one dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Wander {
    travel: Travel,
    hover: HoverState,
}

impl Wander {
    pub fn new(travel: Travel) -> Self {
        Self {
            travel,
            hover: HoverState::Wandering,
        }
    }

    pub fn travel(&self) -> &Travel {
        &self.travel
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    pub fn is_paused(&self) -> bool {
        self.hover == HoverState::Paused
    }

    pub fn position(&self) -> Position {
        self.travel.position()
    }

    pub fn target(&self) -> Position {
        self.travel.target()
    }

    /// `Wandering -> Paused`. Idempotent.
    pub fn pointer_enter(&mut self) {
        self.hover = HoverState::Paused;
    }

    /// `Paused -> Wandering`. Idempotent.
    pub fn pointer_leave(&mut self) {
        self.hover = HoverState::Wandering;
    }

    /// Advances the in-flight leg unless paused.
    ///
    /// Returns `Arrived` only while wandering, so a paused dot is never
    /// retargeted.
    pub fn advance(&mut self, dt: Duration) -> TravelStatus {
        if self.is_paused() {
            return TravelStatus::InFlight;
        }
        self.travel.advance(dt)
    }

    /// Starts a new leg from the current interpolated position.
    pub fn retarget(&mut self, target: Position, duration: Duration) {
        self.travel = Travel::new(self.position(), target, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::{HoverState, Travel, TravelStatus, Wander};
    use crate::model::dot::Position;
    use std::time::Duration;

    fn leg() -> Travel {
        Travel::new(
            Position::new(0.0, 0.0),
            Position::new(200.0, 100.0),
            Duration::from_secs(20),
        )
    }

    #[test]
    fn travel_interpolates_linearly() {
        let mut travel = leg();
        assert_eq!(travel.advance(Duration::from_secs(5)), TravelStatus::InFlight);
        assert_eq!(travel.position(), Position::new(50.0, 25.0));
        assert_eq!(travel.remaining(), Duration::from_secs(15));
    }

    #[test]
    fn travel_arrives_and_saturates() {
        let mut travel = leg();
        assert_eq!(travel.advance(Duration::from_secs(25)), TravelStatus::Arrived);
        assert_eq!(travel.position(), Position::new(200.0, 100.0));
        assert_eq!(travel.elapsed(), Duration::from_secs(20));
    }

    #[test]
    fn zero_duration_leg_is_immediately_complete() {
        let travel = Travel::new(Position::new(1.0, 1.0), Position::new(9.0, 9.0), Duration::ZERO);
        assert!(travel.is_complete());
        assert_eq!(travel.position(), Position::new(9.0, 9.0));
    }

    #[test]
    fn paused_wander_keeps_position_and_target() {
        let mut wander = Wander::new(leg());
        wander.advance(Duration::from_secs(10));
        let before = wander.position();

        wander.pointer_enter();
        assert_eq!(wander.hover(), HoverState::Paused);
        assert_eq!(wander.advance(Duration::from_secs(60)), TravelStatus::InFlight);
        assert_eq!(wander.position(), before);

        wander.pointer_leave();
        assert_eq!(wander.target(), Position::new(200.0, 100.0));
        assert_eq!(wander.travel().remaining(), Duration::from_secs(10));
        assert_eq!(wander.advance(Duration::from_secs(10)), TravelStatus::Arrived);
    }

    #[test]
    fn retarget_starts_from_current_position() {
        let mut wander = Wander::new(leg());
        wander.advance(Duration::from_secs(10));
        wander.retarget(Position::new(0.0, 300.0), Duration::from_secs(20));

        assert_eq!(wander.travel().origin(), Position::new(100.0, 50.0));
        assert_eq!(wander.travel().elapsed(), Duration::ZERO);
    }
}
