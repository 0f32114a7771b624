//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into intake, gallery and moderation APIs.
//! - Own response caches and injected clocks; no module-level state.

pub mod auth;
pub mod cache;
pub mod clock;
pub mod error;
pub mod gallery_service;
pub mod moderation_service;
pub mod notify;
pub mod submission_service;
