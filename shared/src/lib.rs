//! Shared types and models for the CropAdviser platform
//!
//! Domain records, the canonical seed tables and the pure scoring rules used
//! by the backend.

pub mod advice;
pub mod models;
pub mod scoring;
pub mod seed;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
