//! Destination side of the pipeline
//!
//! Replaces the `final_data` table and inserts the classified batch.
//! [`WarehouseLoader`] owns the load protocol; the [`Connector`] /
//! [`WarehouseConnection`] pair abstracts the database so the protocol can
//! run against PostgreSQL/Redshift or a recording double in tests.

mod connection;
mod loader;
mod postgres;
pub mod schema;

pub use connection::{ConnectionParams, Connector, SqlValue, WarehouseConnection};
pub use loader::{CommitMode, WarehouseLoader};
pub use postgres::{PostgresConnection, PostgresConnector};
