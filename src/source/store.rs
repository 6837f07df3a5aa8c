//! Object store abstraction

use eyre::Result;

/// A bucket/key addressed blob store
///
/// Implementations fail with
/// [`EtlError::SourceUnavailable`](crate::error::EtlError::SourceUnavailable)
/// when the bucket or object is missing or access is denied.
pub trait ObjectStore: Send + Sync {
    /// Fetch the full contents of `bucket/key`
    fn fetch(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}
