//! Boolean recoding
//!
//! Turns the source's `0`/`1` and `Yes`/`No` flags into real booleans and
//! parses tenure.

use crate::error::EtlError;
use crate::etl::Transformer;
use crate::model::{NormalizedRecord, ProjectedRecord};
use eyre::Result;

/// Recode a `0`/`1` flag such as `SeniorCitizen`.
///
/// Already-boolean text (`true`/`false`) is accepted unchanged so that
/// recoding twice gives the same answer. Anything else is `None`.
pub fn recode_flag(value: &str) -> Option<bool> {
    match value {
        "0" => Some(false),
        "1" => Some(true),
        _ => parse_bool(value),
    }
}

/// Recode a `Yes`/`No` answer such as `Partner` or `Dependents`.
///
/// Already-boolean text (`true`/`false`) is accepted unchanged so that
/// recoding twice gives the same answer. Anything else is `None`.
pub fn recode_yes_no(value: &str) -> Option<bool> {
    match value {
        "Yes" => Some(true),
        "No" => Some(false),
        _ => parse_bool(value),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Transformer that types the flag columns and tenure
///
/// Values outside a column's domain fail with
/// [`EtlError::UnrecognizedValue`] instead of passing through untyped.
#[derive(Clone, Copy, Debug, Default)]
pub struct BooleanRecoder;

impl BooleanRecoder {
    fn recode(
        row: usize,
        column: &'static str,
        value: &str,
        recode: fn(&str) -> Option<bool>,
    ) -> Result<bool> {
        recode(value).ok_or_else(|| unrecognized(row, column, value))
    }
}

fn unrecognized(row: usize, column: &'static str, value: &str) -> eyre::Report {
    EtlError::UnrecognizedValue {
        row,
        column,
        value: value.to_string(),
    }
    .into()
}

impl Transformer for BooleanRecoder {
    type Input = ProjectedRecord;
    type Output = NormalizedRecord;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let row = input.row;
        let tenure = input
            .tenure
            .parse::<i32>()
            .map_err(|_| unrecognized(row, "tenure", &input.tenure))?;

        Ok(NormalizedRecord {
            row,
            senior_citizen: Self::recode(row, "SeniorCitizen", &input.senior_citizen, recode_flag)?,
            partner: Self::recode(row, "Partner", &input.partner, recode_yes_no)?,
            dependents: Self::recode(row, "Dependents", &input.dependents, recode_yes_no)?,
            tenure,
            customer_id: input.customer_id,
            gender: input.gender,
        })
    }
}
