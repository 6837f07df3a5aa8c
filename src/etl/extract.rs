//! Extractor trait for pulling records out of a source

use eyre::Result;

/// Extractor trait for extracting records from a source
///
/// Implementors define where the raw records come from:
/// - Object storage (S3)
/// - Local files
/// - In-memory fixtures in tests
///
/// # Example
/// ```no_run
/// use customer_tier_loader::etl::Extractor;
/// use eyre::Result;
///
/// struct StaticExtractor(Vec<String>);
///
/// impl Extractor for StaticExtractor {
///     type Item = String;
///
///     async fn extract(&self) -> Result<Vec<Self::Item>> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, I/O, parsing, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Vec<Self::Item>>> + Send;
}
