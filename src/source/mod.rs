//! Source side of the pipeline
//!
//! Fetching objects from a bucket and decoding them into raw records:
//! - [`ObjectStore`] implementations for S3 and a local directory
//! - CSV decoding into [`RawRecord`](crate::model::RawRecord)s
//! - [`CsvObjectExtractor`] tying both together as an extractor

mod csv;
mod extractor;
mod local;
mod s3;
mod store;

pub use self::csv::parse_tabular;
pub use extractor::CsvObjectExtractor;
pub use local::LocalObjectStore;
pub use s3::S3ObjectStore;
pub use store::ObjectStore;
