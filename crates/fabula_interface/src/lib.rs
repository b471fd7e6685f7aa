//! Trait definitions for Fabula generation backends.
//!
//! This crate provides the [`GenerationBackend`] trait the pipeline drives and
//! the wire types exchanged with the generation service.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{GenerationBackend, Health};
pub use types::{
    GenerationMode, HealthStatus, LearnRequest, LearnRequestBuilder, PredictRequest,
    PredictRequestBuilder, PredictResponse,
};
