//! PostgreSQL wire-protocol connection (PostgreSQL and Redshift)

use super::{ConnectionParams, Connector, SqlValue, WarehouseConnection};
use crate::error::EtlError;
use eyre::{Context, Report, Result};
use postgres_native_tls::MakeTlsConnector;
use std::future::Future;
use tokio::task::JoinHandle;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls};

impl SqlValue {
    fn as_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            Self::Text(value) => value,
            Self::Bool(value) => value,
            Self::Int(value) => value,
        }
    }
}

/// Opens [`PostgresConnection`]s with `tokio-postgres`
///
/// # Example
/// ```no_run
/// use customer_tier_loader::warehouse::{ConnectionParams, Connector, PostgresConnector, WarehouseConnection};
///
/// # async fn example() -> eyre::Result<()> {
/// let connector = PostgresConnector::new(ConnectionParams {
///     host: "localhost".to_string(),
///     database: "dev".to_string(),
///     user: "postgres".to_string(),
///     password: "password".to_string(),
///     port: 5432,
///     tls: false,
/// });
/// let connection = connector.connect().await?;
/// connection.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PostgresConnector {
    params: ConnectionParams,
}

impl PostgresConnector {
    pub fn new(params: ConnectionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    fn config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.params.host)
            .port(self.params.port)
            .dbname(&self.params.database)
            .user(&self.params.user)
            .password(&self.params.password);
        config
    }

    fn connection_error<E>(&self, err: E) -> EtlError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        EtlError::Connection {
            host: self.params.host.clone(),
            port: self.params.port,
            reason: format!("{:#}", Report::new(err)),
        }
    }
}

impl Connector for PostgresConnector {
    type Connection = PostgresConnection;

    async fn connect(&self) -> Result<PostgresConnection> {
        log::debug!("Connecting to {}", self.params);
        let config = self.config();

        let (client, driver) = if self.params.tls {
            let tls = native_tls::TlsConnector::new().map_err(|e| self.connection_error(e))?;
            let (client, connection) = config
                .connect(MakeTlsConnector::new(tls))
                .await
                .map_err(|e| self.connection_error(e))?;
            (client, tokio::spawn(drive(connection)))
        } else {
            let (client, connection) = config
                .connect(NoTls)
                .await
                .map_err(|e| self.connection_error(e))?;
            (client, tokio::spawn(drive(connection)))
        };

        log::info!("Connected to {}", self.params);
        Ok(PostgresConnection { client, driver })
    }
}

/// Runs the socket half of a connection until the client is dropped
async fn drive<F>(connection: F)
where
    F: Future<Output = std::result::Result<(), tokio_postgres::Error>>,
{
    if let Err(e) = connection.await {
        log::error!("Warehouse connection error: {:#}", Report::new(e));
    }
}

/// A live `tokio-postgres` session
pub struct PostgresConnection {
    client: Client,
    driver: JoinHandle<()>,
}

impl WarehouseConnection for PostgresConnection {
    async fn execute(&mut self, statement: &str, params: &[SqlValue]) -> Result<u64> {
        let params: Vec<&(dyn ToSql + Sync)> = params.iter().map(SqlValue::as_sql).collect();
        self.client
            .execute(statement, &params)
            .await
            .wrap_err("Statement failed")
    }

    async fn begin(&mut self) -> Result<()> {
        self.client
            .batch_execute("BEGIN")
            .await
            .wrap_err("Failed to open transaction")
    }

    async fn commit(&mut self) -> Result<()> {
        self.client
            .batch_execute("COMMIT")
            .await
            .wrap_err("Failed to commit transaction")
    }

    async fn rollback(&mut self) -> Result<()> {
        self.client
            .batch_execute("ROLLBACK")
            .await
            .wrap_err("Failed to roll back transaction")
    }

    async fn close(self) -> Result<()> {
        drop(self.client);
        self.driver
            .await
            .with_context(|| "Failed to shut down warehouse connection")?;
        log::debug!("Warehouse connection closed");
        Ok(())
    }
}
