//! Tenure classification

use crate::etl::Transformer;
use crate::model::{ClassifiedRecord, NormalizedRecord, Tier};
use eyre::Result;

/// Transformer that attaches a [`Tier`] computed from tenure
#[derive(Clone, Copy, Debug, Default)]
pub struct TenureClassifier;

impl Transformer for TenureClassifier {
    type Input = NormalizedRecord;
    type Output = ClassifiedRecord;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let tier = Tier::from_tenure(input.tenure);
        Ok(ClassifiedRecord::from_normalized(input, tier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_from_tenure() {
        let record = NormalizedRecord {
            row: 1,
            customer_id: "9237-HQITU".to_string(),
            gender: "Female".to_string(),
            senior_citizen: false,
            partner: false,
            dependents: false,
            tenure: 45,
        };

        let classified = TenureClassifier.transform(record).unwrap();
        assert_eq!(classified.classification, Tier::Gold);
        assert_eq!(classified.tenure, 45);
        assert_eq!(classified.customer_id, "9237-HQITU");
    }
}
