//! Batch-level validation of raw frequency codes.
//!
//! A single out-of-range or non-integral code anywhere in the batch rejects
//! the whole batch before any simulation runs. Missing codes are not errors.

use log::{debug, warn};

use crate::error::{HarmonizerError, Result};
use crate::models::{ExposureCodes, FoodType, FrequencyCode, RawCode, SubjectRecord};

/// An out-of-range or non-integral code found during validation
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidCode {
    /// Zero-based subject index within the batch
    pub subject: usize,
    /// Subject identifier, when known
    pub subject_id: Option<String>,
    /// Food type of the offending code
    pub food: FoodType,
    /// The rejected value
    pub value: RawCode,
}

impl From<InvalidCode> for HarmonizerError {
    fn from(invalid: InvalidCode) -> Self {
        Self::ValidationError {
            subject: invalid.subject,
            food: invalid.food,
            value: invalid.value,
        }
    }
}

/// Collect every invalid code in the batch, in subject then food order
#[must_use]
pub fn find_invalid_codes(records: &[SubjectRecord]) -> Vec<InvalidCode> {
    records
        .iter()
        .enumerate()
        .flat_map(|(subject, record)| {
            FoodType::ALL.into_iter().filter_map(move |food| {
                let value = record.code(food)?;
                value.to_frequency_code().is_none().then(|| InvalidCode {
                    subject,
                    subject_id: record.subject_id.clone(),
                    food,
                    value,
                })
            })
        })
        .collect()
}

/// Validate a batch and convert it into typed codes
///
/// # Errors
///
/// Returns `ValidationError` for the first invalid code if the batch
/// contains any; no codes are returned in that case.
pub fn validate_records(records: &[SubjectRecord]) -> Result<Vec<ExposureCodes>> {
    let invalid = find_invalid_codes(records);

    if let Some(first) = invalid.first() {
        warn!(
            "Rejecting batch of {} subjects: {} frequency code(s) not in {}..={}",
            records.len(),
            invalid.len(),
            FrequencyCode::MIN,
            FrequencyCode::MAX
        );
        for bad in invalid.iter().take(10) {
            warn!(
                "  subject {} ({}): {} = {}",
                bad.subject,
                bad.subject_id.as_deref().unwrap_or("no id"),
                bad.food,
                bad.value
            );
        }
        return Err(first.clone().into());
    }

    let codes: Vec<ExposureCodes> = records
        .iter()
        .map(|record| {
            ExposureCodes::from_validated(
                record.codes().map(|v| v.and_then(RawCode::to_frequency_code)),
            )
        })
        .collect();

    debug!("Validated frequency codes for {} subjects", codes.len());
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_batch_with_missing_values() {
        let records = vec![
            SubjectRecord::new(Some(1), Some(8), None, Some(4)),
            SubjectRecord::new(None, None, None, None),
        ];
        let codes = validate_records(&records).unwrap();
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[0].get(FoodType::River).map(FrequencyCode::value), Some(8));
        assert_eq!(codes[0].get(FoodType::Frozen), None);
    }

    #[test]
    fn test_one_bad_code_rejects_batch() {
        let records = vec![
            SubjectRecord::new(Some(1), Some(2), Some(3), Some(4)),
            SubjectRecord::new(Some(2), Some(9), Some(3), Some(4)).with_id("S002"),
            SubjectRecord::new(Some(0), Some(2), Some(3), Some(4)),
        ];

        let invalid = find_invalid_codes(&records);
        assert_eq!(invalid.len(), 2);
        assert_eq!(invalid[0].subject_id.as_deref(), Some("S002"));

        let err = validate_records(&records).unwrap_err();
        assert!(matches!(
            err,
            HarmonizerError::ValidationError {
                subject: 1,
                food: FoodType::River,
                value: RawCode::Integer(9)
            }
        ));
    }

    #[test]
    fn test_fractional_code_rejects_batch() {
        let mut record = SubjectRecord::new(Some(1), Some(2), Some(3), Some(4));
        record.frozen = Some(RawCode::Fractional(2.5));
        let records = vec![SubjectRecord::new(Some(1), Some(1), Some(1), Some(1)), record];

        let err = validate_records(&records).unwrap_err();
        assert!(matches!(
            err,
            HarmonizerError::ValidationError {
                subject: 1,
                food: FoodType::Frozen,
                value: RawCode::Fractional(v)
            } if v == 2.5
        ));
        assert!(err.to_string().contains("code 2.5"));
    }
}
