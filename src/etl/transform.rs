//! Transformer trait for record transformation

use eyre::Result;

/// Transformer trait for transforming records
///
/// Implementors define a single stage of record processing:
/// - Column projection
/// - Value recoding
/// - Derived fields
///
/// # Example
/// ```
/// use customer_tier_loader::etl::Transformer;
/// use eyre::Result;
///
/// struct Uppercase;
///
/// impl Transformer for Uppercase {
///     type Input = String;
///     type Output = String;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input.to_uppercase())
///     }
/// }
///
/// let out = Uppercase.transform_many(vec!["a".into(), "b".into()]).unwrap();
/// assert_eq!(out, vec!["A", "B"]);
/// ```
pub trait Transformer: Send + Sync {
    /// Input item type
    type Input: Send;

    /// Output item type after transformation
    type Output: Send;

    /// Transform a single item
    ///
    /// # Errors
    /// Returns an error if transformation fails (validation, conversion, etc.)
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Transform multiple items (default batch implementation)
    ///
    /// Stops at the first failing item; no partial output is returned.
    /// Override this for whole-batch steps such as truncation.
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        inputs.into_iter().map(|i| self.transform(i)).collect()
    }
}
