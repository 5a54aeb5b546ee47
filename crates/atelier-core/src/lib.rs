//! Core generation pipeline for Atelier.
//!
//! This crate owns prompt composition, the generation service, the model
//! client, and the in-memory session/history store used by the server.

pub mod error;
pub mod generator;
pub mod prompt;
pub mod provider;
pub mod store;

pub use error::AtelierCoreError;
pub use generator::GenerationService;
pub use provider::ChatModelClient;
pub use store::{DesignStore, Session};
