//! The loaded building model: scene spawning, mesh naming and recentering.

/// Key, fill and ambient lights.
pub mod lighting;

/// Name to entity lookup over the model's meshes, with the blocked-name filter.
pub mod mesh_index;

/// Model scene root spawning and mesh indexing once the scene instance is ready.
pub mod model;

/// Whole-model and largest-mesh bounds, computed once per scene root.
pub mod model_bounds;
