//! Failure kinds raised by the pipeline stages.
//!
//! Stages return [`eyre::Result`]; these variants travel inside the report
//! and can be recovered with `report.downcast_ref::<EtlError>()`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EtlError {
    /// The object store could not deliver the requested object
    #[error("source object s3://{bucket}/{key} unavailable: {reason}")]
    SourceUnavailable {
        bucket: String,
        key: String,
        reason: String,
    },

    /// The fetched bytes are not a well-formed CSV table
    #[error("malformed input{}: {reason}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedInput { line: Option<u64>, reason: String },

    /// A row lacks one of the projected columns
    #[error("row {row} is missing required column '{column}'")]
    SchemaMismatch { row: usize, column: &'static str },

    /// A recoded column holds a value outside its expected domain
    #[error("row {row}: unrecognized value '{value}' in column '{column}'")]
    UnrecognizedValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// The destination could not be reached or rejected the credentials
    #[error("cannot connect to {host}:{port}: {reason}")]
    Connection {
        host: String,
        port: u16,
        reason: String,
    },

    /// A statement failed after the connection was established
    #[error("load failed at row {row} ({committed} row(s) committed): {reason}")]
    Load {
        row: usize,
        committed: usize,
        reason: String,
    },
}
