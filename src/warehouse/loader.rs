//! Warehouse loader
//!
//! Full table replace followed by row inserts, with the commit granularity
//! chosen by [`CommitMode`].

use super::schema::{self, CREATE_TABLE, DROP_TABLE, INSERT_ROW, TABLE_NAME};
use super::{Connector, WarehouseConnection};
use crate::error::EtlError;
use crate::etl::Loader;
use crate::model::ClassifiedRecord;
use eyre::Result;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How inserted rows are committed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitMode {
    /// One transaction per row; rows before a failure stay committed
    #[default]
    PerRow,
    /// All rows in one transaction; a failure commits nothing
    Batch,
}

impl FromStr for CommitMode {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "per-row" | "row" => Ok(Self::PerRow),
            "batch" => Ok(Self::Batch),
            other => eyre::bail!(
                "Unknown commit mode '{}', expected 'per-row' or 'batch'",
                other
            ),
        }
    }
}

impl fmt::Display for CommitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerRow => write!(f, "per-row"),
            Self::Batch => write!(f, "batch"),
        }
    }
}

/// Loader that replaces `final_data` with the classified batch
///
/// Protocol, on one connection:
/// 1. connect (failure: [`EtlError::Connection`], nothing executed)
/// 2. `DROP TABLE IF EXISTS` and `CREATE TABLE`, committed together
/// 3. one parameterised insert per record, in order
/// 4. close the connection, whatever happened in 2 and 3
///
/// Statement failures after connecting surface as [`EtlError::Load`],
/// carrying the 1-based failing row (0 for the DDL step) and how many
/// rows were committed before it.
pub struct WarehouseLoader<C> {
    connector: C,
    commit_mode: CommitMode,
}

impl<C: Connector> WarehouseLoader<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            commit_mode: CommitMode::default(),
        }
    }

    /// Set the commit granularity (default: per row)
    pub fn with_commit_mode(mut self, commit_mode: CommitMode) -> Self {
        self.commit_mode = commit_mode;
        self
    }

    pub fn commit_mode(&self) -> CommitMode {
        self.commit_mode
    }

    async fn replace_table(
        &self,
        conn: &mut C::Connection,
        records: &[ClassifiedRecord],
    ) -> Result<usize> {
        Self::recreate_table(conn).await?;

        log::info!(
            "Inserting {} row(s) into {} ({} commit)",
            records.len(),
            TABLE_NAME,
            self.commit_mode
        );
        match self.commit_mode {
            CommitMode::PerRow => Self::insert_per_row(conn, records).await,
            CommitMode::Batch => Self::insert_batch(conn, records).await,
        }
    }

    async fn recreate_table(conn: &mut C::Connection) -> Result<()> {
        let outcome = async {
            conn.begin().await?;
            conn.execute(DROP_TABLE, &[]).await?;
            conn.execute(CREATE_TABLE, &[]).await?;
            conn.commit().await
        }
        .await;

        if let Err(e) = outcome {
            Self::abandon(conn).await;
            return Err(EtlError::Load {
                row: 0,
                committed: 0,
                reason: format!("failed to recreate {}: {:#}", TABLE_NAME, e),
            }
            .into());
        }

        log::debug!("Recreated table {}", TABLE_NAME);
        Ok(())
    }

    async fn insert_per_row(
        conn: &mut C::Connection,
        records: &[ClassifiedRecord],
    ) -> Result<usize> {
        let mut committed = 0;

        for (index, record) in records.iter().enumerate() {
            let params = schema::insert_params(record);
            let outcome = async {
                conn.begin().await?;
                conn.execute(INSERT_ROW, &params).await?;
                conn.commit().await
            }
            .await;

            if let Err(e) = outcome {
                Self::abandon(conn).await;
                return Err(EtlError::Load {
                    row: index + 1,
                    committed,
                    reason: format!("{:#}", e),
                }
                .into());
            }

            committed += 1;
            log::trace!("Committed row {} ({})", index + 1, record.customer_id);
        }

        Ok(committed)
    }

    async fn insert_batch(
        conn: &mut C::Connection,
        records: &[ClassifiedRecord],
    ) -> Result<usize> {
        if let Err(e) = conn.begin().await {
            return Err(EtlError::Load {
                row: 1,
                committed: 0,
                reason: format!("{:#}", e),
            }
            .into());
        }

        for (index, record) in records.iter().enumerate() {
            let params = schema::insert_params(record);
            if let Err(e) = conn.execute(INSERT_ROW, &params).await {
                Self::abandon(conn).await;
                return Err(EtlError::Load {
                    row: index + 1,
                    committed: 0,
                    reason: format!("{:#}", e),
                }
                .into());
            }
        }

        if let Err(e) = conn.commit().await {
            Self::abandon(conn).await;
            return Err(EtlError::Load {
                row: records.len(),
                committed: 0,
                reason: format!("commit failed: {:#}", e),
            }
            .into());
        }

        Ok(records.len())
    }

    /// Roll back the open transaction, keeping the original failure
    async fn abandon(conn: &mut C::Connection) {
        if let Err(e) = conn.rollback().await {
            log::warn!("Rollback failed: {:#}", e);
        }
    }
}

impl<C: Connector> Loader for WarehouseLoader<C> {
    type Item = ClassifiedRecord;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        log::info!("Starting data loading into {}", TABLE_NAME);
        let mut conn = self.connector.connect().await?;

        let result = self.replace_table(&mut conn, &items).await;
        let closed = conn.close().await;

        match (result, closed) {
            (Ok(count), closed) => {
                // Every row is already committed, so a failed close loses nothing
                if let Err(close_err) = closed {
                    log::warn!("Failed to close connection after load: {:#}", close_err);
                }
                log::info!(
                    "Data loading completed successfully! {} record(s) were loaded into {}",
                    count,
                    TABLE_NAME
                );
                Ok(count)
            }
            (Err(e), closed) => {
                if let Err(close_err) = closed {
                    log::warn!("Failed to close connection after error: {:#}", close_err);
                }
                Err(e)
            }
        }
    }
}
