//! Broadcasting of intake status events.
//!
//! The broadcaster is a plain tokio broadcast channel, so any front end
//! (CLI, desktop shell, web socket) can subscribe to the same stream.

pub mod status;

pub use status::{StatusBroadcaster, StatusEvent};
