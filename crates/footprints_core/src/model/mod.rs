//! Domain model for footprints and their on-screen dots.
//!
//! # Responsibility
//! - Define persisted submission records and their public projection.
//! - Define the ephemeral dot geometry consumed by the motion layer.
//!
//! # Invariants
//! - Every submission is identified by a stable non-nil UUID.
//! - Dots never outlive the stage that owns them.

pub mod dot;
pub mod emotion;
pub mod submission;
