//! Loader trait for writing records to a destination

use eyre::Result;

/// Loader trait for loading records to a destination
///
/// Implementors define where the transformed batch ends up:
/// - A warehouse table
/// - An NDJSON file
///
/// # Example
/// ```no_run
/// use customer_tier_loader::etl::Loader;
/// use eyre::Result;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     type Item = String;
///
///     async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
///         Ok(items.len())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Send;

    /// Load items to the destination
    ///
    /// Returns the number of items durably written
    ///
    /// # Errors
    /// Returns an error if loading fails (connection, I/O, rejected row, etc.)
    fn load(
        &self,
        items: Vec<Self::Item>,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}
