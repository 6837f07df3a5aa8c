//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides trait definitions for building the batch pipeline
//! that extracts raw rows from a source, transforms them, and loads them to
//! a destination.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use transform::Transformer;
