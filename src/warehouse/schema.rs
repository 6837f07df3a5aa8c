//! Destination table definition and statements

use super::SqlValue;
use crate::model::ClassifiedRecord;

/// Destination table, replaced on every run
pub const TABLE_NAME: &str = "final_data";

pub const DROP_TABLE: &str = "DROP TABLE IF EXISTS final_data";

pub const CREATE_TABLE: &str = "CREATE TABLE final_data (
    customerID VARCHAR(255),
    gender VARCHAR(50),
    SeniorCitizen BOOLEAN,
    Partner BOOLEAN,
    Dependents BOOLEAN,
    tenure INT,
    classification VARCHAR(50)
)";

pub const INSERT_ROW: &str = "INSERT INTO final_data (
    customerID, gender, SeniorCitizen, Partner, Dependents, tenure, classification
) VALUES ($1, $2, $3, $4, $5, $6, $7)";

/// Bind parameters for [`INSERT_ROW`], in column order
pub fn insert_params(record: &ClassifiedRecord) -> Vec<SqlValue> {
    vec![
        record.customer_id.as_str().into(),
        record.gender.as_str().into(),
        record.senior_citizen.into(),
        record.partner.into(),
        record.dependents.into(),
        record.tenure.into(),
        record.classification.as_str().into(),
    ]
}
