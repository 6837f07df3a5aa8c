//! CSV object extractor
//!
//! Fetches one object and decodes it into raw records.

use super::{ObjectStore, parse_tabular};
use crate::etl::Extractor;
use crate::model::RawRecord;
use eyre::Result;

/// Extractor for a single CSV object in a bucket
///
/// # Example
/// ```no_run
/// use customer_tier_loader::etl::Extractor;
/// use customer_tier_loader::source::{CsvObjectExtractor, S3ObjectStore};
///
/// # async fn example() -> eyre::Result<()> {
/// let store = S3ObjectStore::from_env().await;
/// let extractor = CsvObjectExtractor::new(store, "source-pipeline-etl", "Dataset.csv");
/// let records = extractor.extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct CsvObjectExtractor<S> {
    store: S,
    bucket: String,
    key: String,
}

impl<S: ObjectStore> CsvObjectExtractor<S> {
    pub fn new(store: S, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: ObjectStore> Extractor for CsvObjectExtractor<S> {
    type Item = RawRecord;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        log::info!("Reading {} from bucket {}", self.key, self.bucket);

        let bytes = self.store.fetch(&self.bucket, &self.key).await?;
        log::debug!("Fetched {} byte(s)", bytes.len());

        let records = parse_tabular(&bytes)?;
        log::info!("Read {} record(s) successfully", records.len());

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;
    use std::collections::HashMap;

    struct MemoryStore(HashMap<(String, String), Vec<u8>>);

    impl MemoryStore {
        fn with(bucket: &str, key: &str, body: &[u8]) -> Self {
            let mut objects = HashMap::new();
            objects.insert((bucket.to_string(), key.to_string()), body.to_vec());
            Self(objects)
        }
    }

    impl ObjectStore for MemoryStore {
        async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
            self.0
                .get(&(bucket.to_string(), key.to_string()))
                .cloned()
                .ok_or_else(|| {
                    EtlError::SourceUnavailable {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        reason: "NoSuchKey".to_string(),
                    }
                    .into()
                })
        }
    }

    #[tokio::test]
    async fn test_extract_parses_object() {
        let store = MemoryStore::with("bucket", "Dataset.csv", b"customerID,tenure\nA,1\nB,2\n");
        let extractor = CsvObjectExtractor::new(store, "bucket", "Dataset.csv");

        let records = extractor.extract().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("customerID"), Some("B"));
    }

    #[tokio::test]
    async fn test_extract_missing_object() {
        let store = MemoryStore::with("bucket", "Dataset.csv", b"a\n1\n");
        let extractor = CsvObjectExtractor::new(store, "bucket", "Other.csv");

        let err = extractor.extract().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EtlError>(),
            Some(EtlError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let store = MemoryStore(HashMap::new());
        let extractor = CsvObjectExtractor::new(store, "b", "k.csv");
        assert_eq!(extractor.bucket(), "b");
        assert_eq!(extractor.key(), "k.csv");
    }
}
