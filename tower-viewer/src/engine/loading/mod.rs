//! Startup loading: mesh metadata fetch and progress reporting.
//!
//! The model scene itself is spawned by [`crate::engine::scene::model`]; this
//! module tracks the milestones that gate the `Running` state.

/// One-shot mesh metadata load with failure logging.
pub mod metadata_loader;

/// Loading milestones resource.
pub mod progress;
