//! Messages exchanged between the three layers.
//!
//! UI → App: [`UiEvent`]. App ↔ Network: [`NetworkCommand`] / [`NetworkResponse`],
//! matched up by request id. App → UI: [`RenderState`] snapshots.

pub mod network;
pub mod render;
pub mod ui_events;

pub use network::{NetworkCommand, NetworkResponse};
pub use render::RenderState;
pub use ui_events::UiEvent;
