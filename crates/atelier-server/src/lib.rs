//! HTTP and WebSocket server for the Atelier design service.
//!
//! The request router lives in `ws::handlers`; REST endpoints expose the
//! same history the real-time protocol writes to.

pub mod registry;
pub mod rest;
pub mod state;
pub mod ws;

pub use registry::ConnectionRegistry;
pub use state::{AppState, build_router};
