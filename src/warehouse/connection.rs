//! Connection abstraction for the destination database

use eyre::Result;
use std::fmt;
use std::future::Future;

/// Parameters needed to reach the destination database
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub port: u16,
    /// Negotiate TLS on the connection
    pub tls: bool,
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"********")
            .field("port", &self.port)
            .field("tls", &self.tls)
            .finish()
    }
}

impl fmt::Display for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

/// A bind parameter for a statement
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Bool(bool),
    Int(i32),
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

/// An open session with the destination database
///
/// Statements run inside whatever transaction `begin` opened; nothing is
/// durable until `commit` returns.
pub trait WarehouseConnection: Send {
    /// Run one statement with positional parameters, returning affected rows
    fn execute(
        &mut self,
        statement: &str,
        params: &[SqlValue],
    ) -> impl Future<Output = Result<u64>> + Send;

    /// Open a transaction
    fn begin(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Commit the open transaction
    fn commit(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Abandon the open transaction
    fn rollback(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Release the connection
    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

/// Factory for [`WarehouseConnection`]s
pub trait Connector: Send + Sync {
    type Connection: WarehouseConnection;

    /// Open a connection
    ///
    /// # Errors
    /// Fails with [`EtlError::Connection`](crate::error::EtlError::Connection)
    /// when the server is unreachable or rejects the credentials
    fn connect(&self) -> impl Future<Output = Result<Self::Connection>> + Send;
}
