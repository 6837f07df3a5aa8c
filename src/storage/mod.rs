//! File system storage operations
//!
//! NDJSON export of the classified batch, used for dry runs without a
//! warehouse.

mod ndjson;

pub use ndjson::{NdjsonReader, NdjsonWriter};
