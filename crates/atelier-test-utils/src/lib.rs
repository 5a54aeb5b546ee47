//! Shared mocks for Atelier crate tests.

mod model;

pub use model::{FailingModel, FixedModel, RecordingModel};
