//! Column projection
//!
//! Reduces a raw CSV row to the six columns the warehouse table keeps.

use crate::error::EtlError;
use crate::etl::Transformer;
use crate::model::{PROJECTED_COLUMNS, ProjectedRecord, RawRecord};
use eyre::Result;

/// Transformer that keeps only the projected columns
///
/// Any other column in the source row is discarded. A row without one of
/// the projected columns fails with [`EtlError::SchemaMismatch`].
///
/// # Example
/// ```
/// use customer_tier_loader::etl::Transformer;
/// use customer_tier_loader::model::RawRecord;
/// use customer_tier_loader::transform::Projector;
///
/// let raw = RawRecord::from_pairs(1, [
///     ("customerID", "7590-VHVEG"),
///     ("gender", "Female"),
///     ("SeniorCitizen", "0"),
///     ("Partner", "Yes"),
///     ("Dependents", "No"),
///     ("tenure", "1"),
///     ("MonthlyCharges", "29.85"),
/// ]);
///
/// let projected = Projector.transform(raw).unwrap();
/// assert_eq!(projected.customer_id, "7590-VHVEG");
/// assert_eq!(projected.tenure, "1");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Projector;

impl Projector {
    fn take(record: &mut RawRecord, column: &'static str) -> Result<String> {
        record.fields.remove(column).ok_or_else(|| {
            EtlError::SchemaMismatch {
                row: record.row,
                column,
            }
            .into()
        })
    }
}

impl Transformer for Projector {
    type Input = RawRecord;
    type Output = ProjectedRecord;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let [customer_id, gender, senior_citizen, partner, dependents, tenure] = PROJECTED_COLUMNS;

        Ok(ProjectedRecord {
            row: input.row,
            customer_id: Self::take(&mut input, customer_id)?,
            gender: Self::take(&mut input, gender)?,
            senior_citizen: Self::take(&mut input, senior_citizen)?,
            partner: Self::take(&mut input, partner)?,
            dependents: Self::take(&mut input, dependents)?,
            tenure: Self::take(&mut input, tenure)?,
        })
    }
}
