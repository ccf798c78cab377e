//! Data assets consumed by the viewer.
//!
//! Mesh metadata arrives as a JSON asset; bounds are derived from the loaded
//! model and used for recentering and camera framing.

/// World-space axis-aligned bounds used by the bounds calculator and camera framing.
pub mod bounds;

/// Mesh metadata (floor number and units per mesh) loaded from JSON.
pub mod mesh_metadata;
