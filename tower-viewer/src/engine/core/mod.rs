//! Core application setup and state management.
//!
//! Builds the app, owns the `Loading → Running` lifecycle and configures the
//! window for native and WASM targets.

/// App construction: plugins, resources and system scheduling.
pub mod app_setup;

/// Lifecycle states and loading progress publishing.
pub mod app_state;

/// Platform-specific window configuration.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
