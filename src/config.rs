//! Run configuration
//!
//! Source location, destination credentials and load options, resolved
//! from a YAML file or from environment variables.

use crate::transform::DEFAULT_ROW_LIMIT;
use crate::warehouse::{CommitMode, ConnectionParams};
use eyre::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_SOURCE_BUCKET: &str = "source-pipeline-etl";
pub const DEFAULT_SOURCE_KEY: &str = "Dataset.csv";
pub const DEFAULT_DEST_PORT: u16 = 5439;

/// Where the dataset comes from and how much of it to keep
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceConfig {
    pub bucket: String,
    pub key: String,
    pub row_limit: usize,
}

impl SourceConfig {
    /// Load the source settings alone, for commands that never touch the
    /// warehouse (SOURCE_BUCKET, SOURCE_KEY, ROW_LIMIT)
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bucket: optional("SOURCE_BUCKET")?.unwrap_or_else(default_source_bucket),
            key: optional("SOURCE_KEY")?.unwrap_or_else(default_source_key),
            row_limit: parsed("ROW_LIMIT")?.unwrap_or(DEFAULT_ROW_LIMIT),
        })
    }
}

/// Everything a run needs besides the data itself
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    #[serde(default = "default_source_bucket")]
    pub source_bucket: String,
    #[serde(default = "default_source_key")]
    pub source_key: String,
    pub dest_host: String,
    pub dest_db: String,
    #[serde(default = "default_dest_port")]
    pub dest_port: u16,
    pub dest_user: String,
    pub dest_password: String,
    #[serde(default)]
    pub dest_tls: bool,
    #[serde(default)]
    pub commit_mode: CommitMode,
    #[serde(default = "default_row_limit")]
    pub row_limit: usize,
}

fn default_source_bucket() -> String {
    DEFAULT_SOURCE_BUCKET.to_string()
}

fn default_source_key() -> String {
    DEFAULT_SOURCE_KEY.to_string()
}

fn default_dest_port() -> u16 {
    DEFAULT_DEST_PORT
}

fn default_row_limit() -> usize {
    DEFAULT_ROW_LIMIT
}

impl PipelineConfig {
    /// Load configuration from environment variables
    ///
    /// Required:
    /// - REDSHIFT_ENDPOINT: destination host
    /// - REDSHIFT_DBNAME: destination database
    /// - REDSHIFT_USER: destination user
    /// - REDSHIFT_PASSWORD: destination password
    ///
    /// Optional:
    /// - REDSHIFT_PORT (default 5439)
    /// - REDSHIFT_TLS (default false)
    /// - SOURCE_BUCKET (default "source-pipeline-etl")
    /// - SOURCE_KEY (default "Dataset.csv")
    /// - COMMIT_MODE: "per-row" or "batch" (default "per-row")
    /// - ROW_LIMIT (default 100)
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            source_bucket: optional("SOURCE_BUCKET")?.unwrap_or_else(default_source_bucket),
            source_key: optional("SOURCE_KEY")?.unwrap_or_else(default_source_key),
            dest_host: required("REDSHIFT_ENDPOINT")?,
            dest_db: required("REDSHIFT_DBNAME")?,
            dest_port: parsed("REDSHIFT_PORT")?.unwrap_or(DEFAULT_DEST_PORT),
            dest_user: required("REDSHIFT_USER")?,
            dest_password: required("REDSHIFT_PASSWORD")?,
            dest_tls: parsed("REDSHIFT_TLS")?.unwrap_or(false),
            commit_mode: parsed("COMMIT_MODE")?.unwrap_or_default(),
            row_limit: parsed("ROW_LIMIT")?.unwrap_or(DEFAULT_ROW_LIMIT),
        })
    }

    /// Load configuration from a YAML file with camelCase keys
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn source(&self) -> SourceConfig {
        SourceConfig {
            bucket: self.source_bucket.clone(),
            key: self.source_key.clone(),
            row_limit: self.row_limit,
        }
    }

    /// Destination connection parameters
    pub fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            host: self.dest_host.clone(),
            database: self.dest_db.clone(),
            user: self.dest_user.clone(),
            password: self.dest_password.clone(),
            port: self.dest_port,
            tls: self.dest_tls,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("source_bucket", &self.source_bucket)
            .field("source_key", &self.source_key)
            .field("dest_host", &self.dest_host)
            .field("dest_db", &self.dest_db)
            .field("dest_port", &self.dest_port)
            .field("dest_user", &self.dest_user)
            .field("dest_password", &"********")
            .field("dest_tls", &self.dest_tls)
            .field("commit_mode", &self.commit_mode)
            .field("row_limit", &self.row_limit)
            .finish()
    }
}

fn optional(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Invalid {} environment variable", name)),
    }
}

fn required(name: &str) -> Result<String> {
    optional(name)?.ok_or_else(|| eyre::eyre!("{} environment variable not set", name))
}

fn parsed<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    optional(name)?
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| eyre::eyre!("Invalid {} '{}': {}", name, value, e))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VARS: [&str; 10] = [
        "SOURCE_BUCKET",
        "SOURCE_KEY",
        "REDSHIFT_ENDPOINT",
        "REDSHIFT_DBNAME",
        "REDSHIFT_PORT",
        "REDSHIFT_USER",
        "REDSHIFT_PASSWORD",
        "REDSHIFT_TLS",
        "COMMIT_MODE",
        "ROW_LIMIT",
    ];

    fn clear_env() {
        unsafe {
            for var in VARS {
                std::env::remove_var(var);
            }
        }
    }

    fn set_required_env() {
        unsafe {
            std::env::set_var("REDSHIFT_ENDPOINT", "cluster.example.com");
            std::env::set_var("REDSHIFT_DBNAME", "dev");
            std::env::set_var("REDSHIFT_USER", "awsuser");
            std::env::set_var("REDSHIFT_PASSWORD", "secret");
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_defaults() {
        clear_env();
        set_required_env();

        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.source_bucket, "source-pipeline-etl");
        assert_eq!(config.source_key, "Dataset.csv");
        assert_eq!(config.dest_host, "cluster.example.com");
        assert_eq!(config.dest_port, 5439);
        assert!(!config.dest_tls);
        assert_eq!(config.commit_mode, CommitMode::PerRow);
        assert_eq!(config.row_limit, 100);

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_overrides() {
        clear_env();
        set_required_env();
        unsafe {
            std::env::set_var("SOURCE_BUCKET", "other-bucket");
            std::env::set_var("REDSHIFT_PORT", "5432");
            std::env::set_var("REDSHIFT_TLS", "true");
            std::env::set_var("COMMIT_MODE", "batch");
            std::env::set_var("ROW_LIMIT", "25");
        }

        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.source_bucket, "other-bucket");
        assert_eq!(config.dest_port, 5432);
        assert!(config.dest_tls);
        assert_eq!(config.commit_mode, CommitMode::Batch);
        assert_eq!(config.row_limit, 25);

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_missing_required() {
        clear_env();

        let result = PipelineConfig::from_env();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("REDSHIFT_ENDPOINT")
        );
    }

    #[test]
    #[serial_test::serial]
    fn test_source_from_env_needs_no_credentials() {
        clear_env();
        unsafe {
            std::env::set_var("SOURCE_KEY", "customers.csv");
            std::env::set_var("ROW_LIMIT", "10");
        }

        let source = SourceConfig::from_env().unwrap();
        assert_eq!(
            source,
            SourceConfig {
                bucket: "source-pipeline-etl".to_string(),
                key: "customers.csv".to_string(),
                row_limit: 10,
            }
        );

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_invalid_port() {
        clear_env();
        set_required_env();
        unsafe {
            std::env::set_var("REDSHIFT_PORT", "not-a-port");
        }

        let result = PipelineConfig::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("REDSHIFT_PORT"));

        clear_env();
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "sourceBucket: my-bucket\nsourceKey: customers.csv\ndestHost: localhost\ndestDb: warehouse\ndestPort: 5432\ndestUser: loader\ndestPassword: pw\ncommitMode: batch"
        )
        .unwrap();

        let config = PipelineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.source_bucket, "my-bucket");
        assert_eq!(config.source_key, "customers.csv");
        assert_eq!(config.dest_port, 5432);
        assert_eq!(config.commit_mode, CommitMode::Batch);
        assert_eq!(config.row_limit, 100);
        assert_eq!(config.source().key, "customers.csv");

        let params = config.connection_params();
        assert_eq!(params.host, "localhost");
        assert_eq!(params.database, "warehouse");
        assert_eq!(params.user, "loader");
        assert_eq!(params.password, "pw");
    }

    #[test]
    fn test_from_file_missing_field() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "destHost: localhost").unwrap();

        let result = PipelineConfig::from_file(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "destHost: h\ndestDb: d\ndestUser: u\ndestPassword: topsecret"
        )
        .unwrap();

        let config = PipelineConfig::from_file(file.path()).unwrap();
        assert!(!format!("{:?}", config).contains("topsecret"));
    }
}
