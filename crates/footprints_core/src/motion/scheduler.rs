//! Tick sources that drive a [`Stage`].
//!
//! The stage does not know where time comes from. A [`Ticker`] yields frame
//! deltas; [`drive`] runs `tick` then `render` for each one until the ticker
//! stops or the stage is unmounted.

use crate::motion::canvas::Canvas;
use crate::motion::stage::Stage;
use rand::Rng;
use std::time::Duration;

/// Source of frame deltas. `None` ends the loop.
pub trait Ticker {
    fn next_tick(&mut self) -> Option<Duration>;
}

/// Fixed-step ticker for a bounded number of frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedStepTicker {
    step: Duration,
    remaining: u32,
}

impl FixedStepTicker {
    pub fn new(step: Duration, frames: u32) -> Self {
        Self {
            step,
            remaining: frames,
        }
    }

    /// Ticker at `fps` frames per second. `fps` of zero is treated as one.
    pub fn at_fps(fps: u32, frames: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1), frames)
    }
}

impl Ticker for FixedStepTicker {
    fn next_tick(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.step)
    }
}

/// Totals over a driven run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: u32,
    pub retargets: usize,
    pub fallbacks: usize,
    /// Lines drawn on the final frame.
    pub last_frame_lines: usize,
}

/// Runs the tick/render loop until the ticker is exhausted or the stage unmounts.
pub fn drive<R, T, C>(stage: &mut Stage<R>, ticker: &mut T, canvas: &mut C) -> RunSummary
where
    R: Rng,
    T: Ticker + ?Sized,
    C: Canvas + ?Sized,
{
    let mut summary = RunSummary::default();
    while stage.is_mounted() {
        let Some(dt) = ticker.next_tick() else {
            break;
        };
        let report = stage.tick(dt);
        summary.retargets += report.retargeted;
        summary.fallbacks += report.fallbacks;
        summary.last_frame_lines = stage.render(canvas);
        summary.frames += 1;
    }
    summary
}
