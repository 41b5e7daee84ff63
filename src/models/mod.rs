//! Recognition model catalog.

pub mod catalog;

pub use catalog::{get_model, list_models, model_path, ModelInfo};
