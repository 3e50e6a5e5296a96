//! sustainiq-core: sustainability maturity scoring.
//!
//! Turns four categorical answers into a deterministic score, stage and
//! recommendation.
//!
//! # Public API
//!
//! - [`validate()`] -- check a JSON payload and extract a [`SnapshotInput`]
//! - [`compute()`] -- score an input into a [`SnapshotResult`]
//! - [`FormAnswers`] -- the public form's slugs and their backend mapping

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "SustainIQ";

pub mod form;
pub mod input;
pub mod scoring;
pub mod validate;

pub use form::FormAnswers;
pub use input::{Challenge, CompanySize, SnapshotInput, TrackMetrics};
pub use scoring::{clamp_score, compute, SnapshotResult, Stage};
pub use validate::{validate, MissingFields, REQUIRED_FIELDS};
