//! Record types flowing through the pipeline, one per stage.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Columns kept by projection, in output order
pub const PROJECTED_COLUMNS: [&str; 6] = [
    "customerID",
    "gender",
    "SeniorCitizen",
    "Partner",
    "Dependents",
    "tenure",
];

/// One decoded CSV row keyed by header name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based position of the row in the file, header excluded
    pub row: usize,
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new(row: usize, fields: HashMap<String, String>) -> Self {
        Self { row, fields }
    }

    /// Build a record from `(column, value)` pairs
    pub fn from_pairs<K, V>(row: usize, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            row,
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|s| s.as_str())
    }
}

/// A row restricted to the six projected columns, values still raw
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectedRecord {
    pub row: usize,
    pub customer_id: String,
    pub gender: String,
    pub senior_citizen: String,
    pub partner: String,
    pub dependents: String,
    pub tenure: String,
}

/// A projected row with its flags and tenure typed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub row: usize,
    pub customer_id: String,
    pub gender: String,
    pub senior_citizen: bool,
    pub partner: bool,
    pub dependents: bool,
    pub tenure: i32,
}

/// Loyalty tier derived from tenure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    New,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// Classify a tenure in months.
    ///
    /// Bands are inclusive upper bounds checked in ascending order, so a
    /// negative tenure lands in [`Tier::New`].
    ///
    /// ```
    /// use customer_tier_loader::model::Tier;
    ///
    /// assert_eq!(Tier::from_tenure(6), Tier::New);
    /// assert_eq!(Tier::from_tenure(7), Tier::Bronze);
    /// assert_eq!(Tier::from_tenure(61), Tier::Platinum);
    /// ```
    pub fn from_tenure(tenure: i32) -> Self {
        match tenure {
            ..=6 => Self::New,
            ..=12 => Self::Bronze,
            ..=36 => Self::Silver,
            ..=60 => Self::Gold,
            _ => Self::Platinum,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final record shape, one row of `final_data`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassifiedRecord {
    #[serde(rename = "customerID")]
    pub customer_id: String,
    pub gender: String,
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: bool,
    #[serde(rename = "Partner")]
    pub partner: bool,
    #[serde(rename = "Dependents")]
    pub dependents: bool,
    pub tenure: i32,
    pub classification: Tier,
}

impl ClassifiedRecord {
    pub fn from_normalized(record: NormalizedRecord, classification: Tier) -> Self {
        Self {
            customer_id: record.customer_id,
            gender: record.gender,
            senior_citizen: record.senior_citizen,
            partner: record.partner,
            dependents: record.dependents,
            tenure: record.tenure,
            classification,
        }
    }
}

impl fmt::Display for ClassifiedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:<7} senior={:<5} partner={:<5} dependents={:<5} tenure={:>3} {}",
            self.customer_id,
            self.gender,
            self.senior_citizen,
            self.partner,
            self.dependents,
            self.tenure,
            self.classification
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_band_edges() {
        let cases = [
            (0, Tier::New),
            (6, Tier::New),
            (7, Tier::Bronze),
            (12, Tier::Bronze),
            (13, Tier::Silver),
            (36, Tier::Silver),
            (37, Tier::Gold),
            (60, Tier::Gold),
            (61, Tier::Platinum),
            (72, Tier::Platinum),
        ];
        for (tenure, expected) in cases {
            assert_eq!(Tier::from_tenure(tenure), expected, "tenure={}", tenure);
        }
    }

    #[test]
    fn test_negative_tenure_is_new() {
        assert_eq!(Tier::from_tenure(-3), Tier::New);
        assert_eq!(Tier::from_tenure(i32::MIN), Tier::New);
    }

    #[test]
    fn test_classified_record_serializes_with_column_names() {
        let record = ClassifiedRecord {
            customer_id: "7590-VHVEG".to_string(),
            gender: "Female".to_string(),
            senior_citizen: false,
            partner: true,
            dependents: false,
            tenure: 1,
            classification: Tier::New,
        };

        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        assert_eq!(value["customerID"], "7590-VHVEG");
        assert_eq!(value["SeniorCitizen"], false);
        assert_eq!(value["Partner"], true);
        assert_eq!(value["classification"], "new");
    }

    #[test]
    fn test_raw_record_lookup() {
        let record = RawRecord::from_pairs(1, [("gender", "Male")]);
        assert_eq!(record.get("gender"), Some("Male"));
        assert_eq!(record.get("tenure"), None);
    }
}
