//! CLI helper functions
//!
//! Each command builds its pipeline from a [`PipelineConfig`] and an
//! [`ObjectStore`], so the same wiring serves S3 and local runs.

use crate::{
    config::{PipelineConfig, SourceConfig},
    etl::{Extractor, Pipeline, Transformer},
    model::ClassifiedRecord,
    source::{CsvObjectExtractor, ObjectStore},
    storage::NdjsonWriter,
    transform::CustomerTransformer,
    warehouse::{Connector, PostgresConnector, WarehouseConnection, WarehouseLoader},
};
use eyre::{Context, Result};
use std::path::Path;

/// Load the full run configuration
///
/// Reads the YAML file when one is given, environment variables otherwise.
pub fn load_pipeline_config(config_file: Option<&Path>) -> Result<PipelineConfig> {
    match config_file {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            PipelineConfig::from_file(path)
        }
        None => PipelineConfig::from_env().context("Failed to load configuration from environment"),
    }
}

/// Load only the source settings, for commands that never reach the warehouse
pub fn load_source_config(config_file: Option<&Path>) -> Result<SourceConfig> {
    match config_file {
        Some(path) => Ok(PipelineConfig::from_file(path)?.source()),
        None => SourceConfig::from_env(),
    }
}

fn extractor<S: ObjectStore>(source: &SourceConfig, store: S) -> CsvObjectExtractor<S> {
    CsvObjectExtractor::new(store, &source.bucket, &source.key)
}

/// Extract, transform and load into the warehouse
///
/// Pipeline: CsvObjectExtractor → CustomerTransformer → WarehouseLoader
pub async fn run_pipeline<S: ObjectStore>(config: &PipelineConfig, store: S) -> Result<usize> {
    let source = config.source();
    let connector = PostgresConnector::new(config.connection_params());
    log::info!(
        "Loading s3://{}/{} into {}",
        source.bucket,
        source.key,
        connector.params()
    );

    let transformer = CustomerTransformer::with_row_limit(source.row_limit);
    let loader = WarehouseLoader::new(connector).with_commit_mode(config.commit_mode);
    log::info!(
        "Keeping at most {} row(s), {} commit",
        transformer.row_limit(),
        loader.commit_mode()
    );

    Pipeline::new(extractor(&source, store), transformer, loader)
        .run()
        .await
}

/// Extract and transform, returning the batch that would be loaded
pub async fn preview_batch<S: ObjectStore>(
    source: &SourceConfig,
    store: S,
) -> Result<Vec<ClassifiedRecord>> {
    let records = extractor(source, store).extract().await?;
    CustomerTransformer::with_row_limit(source.row_limit).transform_many(records)
}

/// Extract, transform and write the batch to an NDJSON file
///
/// Pipeline: CsvObjectExtractor → CustomerTransformer → NdjsonWriter
pub async fn export_batch<S: ObjectStore>(
    source: &SourceConfig,
    store: S,
    output: impl AsRef<Path>,
) -> Result<usize> {
    let writer = NdjsonWriter::<ClassifiedRecord>::new(output);
    log::info!("Exporting batch to {}", writer.path().display());

    let pipeline = Pipeline::new(
        extractor(source, store),
        CustomerTransformer::with_row_limit(source.row_limit),
        writer,
    );

    pipeline.run().await
}

/// Open and close a warehouse connection to verify host and credentials
pub async fn check_connection(config: &PipelineConfig) -> Result<()> {
    let connector = PostgresConnector::new(config.connection_params());
    let connection = connector.connect().await?;
    connection.close().await
}
