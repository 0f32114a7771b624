//! Gallery stage: owns the dots, advances them, renders them.
//!
//! # Responsibility
//! - Advance every dot's travel leg per tick and retarget arrivals.
//! - Render the connection overlay and dots as a separate pass.
//! - Route pointer enter/leave to the matching dot.
//!
//! # Invariants
//! - Each dot's position is written only by its own travel leg.
//! - Retargeting reads a snapshot of the other dots' positions.
//! - After `unmount`, ticks and renders are no-ops.

use crate::config::PlacementConfig;
use crate::model::dot::{Dot, Position, Size};
use crate::motion::canvas::Canvas;
use crate::motion::placement::{Placement, PlacementEngine};
use crate::motion::relations::RelationshipRenderer;
use crate::motion::travel::{Travel, TravelStatus, Wander};
use log::info;
use rand::Rng;
use std::time::Duration;

/// Counters for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Dots whose position changed.
    pub moved: usize,
    /// Dots that arrived and received a new target.
    pub retargeted: usize,
    /// Retargets that used the fallback path.
    pub fallbacks: usize,
}

/// Mounted set of wandering dots.
pub struct Stage<R: Rng> {
    viewport: Size,
    engine: PlacementEngine,
    renderer: RelationshipRenderer,
    travel_duration: Duration,
    dots: Vec<Dot>,
    wanders: Vec<Wander>,
    rng: R,
    mounted: bool,
}

impl<R: Rng> Stage<R> {
    /// Mounts `dots` and gives each its first target.
    pub fn mount(dots: Vec<Dot>, viewport: Size, config: &PlacementConfig, mut rng: R) -> Self {
        let engine = PlacementEngine::new(config.clone());
        let travel_duration = config.travel_duration();

        let positions: Vec<Position> = dots.iter().map(|dot| dot.position).collect();
        let wanders = dots
            .iter()
            .enumerate()
            .map(|(index, dot)| {
                let others = others_of(&positions, index);
                let placement = engine.next_target(dot.position, viewport, &others, &mut rng);
                Wander::new(Travel::new(dot.position, placement.target(), travel_duration))
            })
            .collect();

        info!(
            "event=stage_mount module=motion status=ok dots={} viewport={}x{}",
            dots.len(),
            viewport.width,
            viewport.height
        );

        Self {
            viewport,
            engine,
            renderer: RelationshipRenderer::default(),
            travel_duration,
            dots,
            wanders,
            rng,
            mounted: true,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn dot(&self, id: &str) -> Option<&Dot> {
        self.dots.iter().find(|dot| dot.id == id)
    }

    /// Current destination of the dot's in-flight leg.
    pub fn target_of(&self, id: &str) -> Option<Position> {
        self.index_of(id).map(|index| self.wanders[index].target())
    }

    pub fn wander_of(&self, id: &str) -> Option<&Wander> {
        self.index_of(id).map(|index| &self.wanders[index])
    }

    /// First paused dot, for the detail preview.
    pub fn hovered(&self) -> Option<&Dot> {
        self.wanders
            .iter()
            .position(Wander::is_paused)
            .map(|index| &self.dots[index])
    }

    /// Pauses the dot under the pointer. Returns `false` for unknown ids.
    pub fn pointer_enter(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(index) if self.mounted => {
                self.wanders[index].pointer_enter();
                true
            }
            _ => false,
        }
    }

    /// Resumes the dot the pointer left. Returns `false` for unknown ids.
    pub fn pointer_leave(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(index) if self.mounted => {
                self.wanders[index].pointer_leave();
                true
            }
            _ => false,
        }
    }

    /// New viewport size for subsequent retargets. In-flight legs are kept.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Advances every dot by `dt`, retargeting those that arrived.
    pub fn tick(&mut self, dt: Duration) -> TickReport {
        let mut report = TickReport::default();
        if !self.mounted {
            return report;
        }

        for index in 0..self.dots.len() {
            let before = self.dots[index].position;
            let status = self.wanders[index].advance(dt);
            self.dots[index].position = self.wanders[index].position();

            if status == TravelStatus::Arrived && !self.wanders[index].is_paused() {
                let snapshot: Vec<Position> = self
                    .dots
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .map(|(_, dot)| dot.position)
                    .collect();
                let placement = self.engine.next_target(
                    self.dots[index].position,
                    self.viewport,
                    &snapshot,
                    &mut self.rng,
                );
                if let Placement::Fallback { .. } = placement {
                    report.fallbacks += 1;
                }
                self.wanders[index].retarget(placement.target(), self.travel_duration);
                report.retargeted += 1;
            }

            if self.dots[index].position != before {
                report.moved += 1;
            }
        }

        report
    }

    /// Clears `canvas`, draws connections, then dots. Returns lines drawn.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) -> usize {
        if !self.mounted {
            return 0;
        }
        canvas.clear(self.viewport);
        let lines = self.renderer.draw(&self.dots, canvas);
        for (dot, wander) in self.dots.iter().zip(&self.wanders) {
            canvas.fill_dot(dot, wander.is_paused());
        }
        lines
    }

    /// Cancels every travel leg and stops rendering.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        let discarded = self.dots.len();
        self.dots.clear();
        self.wanders.clear();
        info!("event=stage_unmount module=motion status=ok dots={discarded}");
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.dots.iter().position(|dot| dot.id == id)
    }
}

impl<R: Rng> Drop for Stage<R> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn others_of(positions: &[Position], index: usize) -> Vec<Position> {
    positions
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != index)
        .map(|(_, position)| *position)
        .collect()
}
