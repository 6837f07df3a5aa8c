//! Customer Tier Loader
//!
//! A batch ETL job that reads a customer CSV from object storage, keeps the
//! customer columns, recodes the flag columns to booleans, classifies each
//! customer by tenure and replaces a warehouse table with the result.

pub mod cli;
pub mod config;
pub mod error;
pub mod etl;
pub mod model;
pub mod source;
pub mod storage;
pub mod transform;
pub mod warehouse;

// Re-exports for convenience
pub use config::{PipelineConfig, SourceConfig};
pub use error::EtlError;
pub use etl::{Extractor, Loader, Pipeline, Transformer};
pub use model::{ClassifiedRecord, RawRecord, Tier};
pub use source::{CsvObjectExtractor, LocalObjectStore, ObjectStore, S3ObjectStore};
pub use storage::{NdjsonReader, NdjsonWriter};
pub use transform::{CustomerTransformer, transform};
pub use warehouse::{CommitMode, PostgresConnector, WarehouseLoader};
