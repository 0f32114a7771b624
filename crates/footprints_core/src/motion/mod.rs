//! Client-side motion: placement, travel, relationship lines, frame loop.
//!
//! # Responsibility
//! - Pick wander targets that respect reserved bands and soft separation.
//! - Advance per-dot travel legs with hover pausing.
//! - Draw connection lines between related dots every frame.
//!
//! # Invariants
//! - Single-threaded and frame-driven; nothing here blocks or does I/O.
//! - Geometry problems are clamped, never reported as errors.

pub mod canvas;
pub mod placement;
pub mod preview;
pub mod relations;
pub mod scheduler;
pub mod seed;
pub mod stage;
pub mod travel;
