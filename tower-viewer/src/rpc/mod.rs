//! JSON-RPC 2.0 bridge between the viewer canvas and the web front end.
//!
//! The viewer runs inside an iframe; the front end owns every overlay panel
//! and talks to the engine through `postMessage`.
//!
//! ```text
//! Front end (parent window)  <──postMessage──>  Viewer (iframe)
//!        │                                          │
//!        ├─ Request (with id) ────────────────────> │ handled, answered
//!        ├─ Request (no id) ──────────────────────> │ handled, not answered
//!        │ <──────────────────── Response (with id) ┤
//!        │ <─────────────────── Notification (no id) ┤
//! ```
//!
//! ## Requests
//!
//! - `apply_filters` `{status, priceRange, residenceType, amenities}`
//! - `reset_filters`
//! - `select_floor` `{floor, meshName}`
//! - `navigate_vertical` `{direction: "up" | "down" | "top" | "bottom"}`
//! - `get_selection`, `get_compass`
//! - `open_property` `{unitId}` and `open_floor_plan` `{unitId?}`, answered
//!   with `{route, state}` for the front-end router
//!
//! ## Notifications
//!
//! `loading_progress`, `meshes_loaded`, `model_bounds`, `selection_changed`,
//! `compass_changed` and `auto_rotate_changed`. Systems push them with
//! [`WebRpcInterface::send_notification`](web_rpc::WebRpcInterface::send_notification);
//! the queue is flushed in `Last`.
//!
//! ## Errors
//!
//! - `-32601`: method not found
//! - `-32602`: invalid params (bad payload, unknown direction, unknown unit)
//! - `-32603`: internal error

/// Message queues, request dispatch and the browser message listener.
pub mod web_rpc;
