//! Full customer transformation: project, recode, classify, cap.

use super::{BooleanRecoder, Projector, TenureClassifier};
use crate::etl::Transformer;
use crate::model::{ClassifiedRecord, RawRecord};
use eyre::Result;

/// Default number of records kept after classification
pub const DEFAULT_ROW_LIMIT: usize = 100;

/// Transformer chaining every customer stage
///
/// Per record: [`Projector`] → [`BooleanRecoder`] → [`TenureClassifier`].
/// [`transform_many`](Transformer::transform_many) classifies the whole
/// input first and truncates to the row limit last, so a bad row anywhere
/// in the file aborts the batch.
///
/// # Example
/// ```
/// use customer_tier_loader::etl::Transformer;
/// use customer_tier_loader::model::{RawRecord, Tier};
/// use customer_tier_loader::transform::CustomerTransformer;
///
/// let rows: Vec<RawRecord> = (1..=3)
///     .map(|i| {
///         RawRecord::from_pairs(i, [
///             ("customerID", format!("C{}", i)),
///             ("gender", "Male".to_string()),
///             ("SeniorCitizen", "0".to_string()),
///             ("Partner", "Yes".to_string()),
///             ("Dependents", "No".to_string()),
///             ("tenure", (i * 20).to_string()),
///         ])
///     })
///     .collect();
///
/// let batch = CustomerTransformer::with_row_limit(2).transform_many(rows).unwrap();
/// assert_eq!(batch.len(), 2);
/// assert_eq!(batch[1].classification, Tier::Gold);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CustomerTransformer {
    row_limit: usize,
}

impl CustomerTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_limit(row_limit: usize) -> Self {
        Self { row_limit }
    }

    pub fn row_limit(&self) -> usize {
        self.row_limit
    }
}

impl Default for CustomerTransformer {
    fn default() -> Self {
        Self::with_row_limit(DEFAULT_ROW_LIMIT)
    }
}

impl Transformer for CustomerTransformer {
    type Input = RawRecord;
    type Output = ClassifiedRecord;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let projected = Projector.transform(input)?;
        let normalized = BooleanRecoder.transform(projected)?;
        TenureClassifier.transform(normalized)
    }

    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        let projected = Projector.transform_many(inputs)?;
        log::info!("Projected {} row(s) to the customer columns", projected.len());

        let normalized = BooleanRecoder.transform_many(projected)?;
        log::info!("Recoded SeniorCitizen, Partner and Dependents");

        let mut classified = TenureClassifier.transform_many(normalized)?;
        log::info!("Classified {} customer(s) by tenure", classified.len());

        if classified.len() > self.row_limit {
            log::debug!(
                "Capping batch from {} to {} row(s)",
                classified.len(),
                self.row_limit
            );
            classified.truncate(self.row_limit);
        }

        Ok(classified)
    }
}

/// Transform a raw table into the default-capped output batch.
pub fn transform(raw: Vec<RawRecord>) -> Result<Vec<ClassifiedRecord>> {
    CustomerTransformer::default().transform_many(raw)
}
