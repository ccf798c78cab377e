//! Static configuration shared by the tower viewer.
//!
//! Everything here is immutable data tied to the hosted building model:
//! camera framing, the highlight palette, mesh lookup tables and asset paths.

/// Initial camera pose, animation timings and orbit limits.
pub mod camera;

/// Emissive highlight palette for hover, selection and filter tones.
pub mod highlight;

/// Unit status labels, residence categories and the default price range.
pub mod listing;

/// Mesh name tables: blocked meshes, explicit groups and linked floors.
pub mod meshes;

/// Asset paths and front-end routes.
pub mod path;
