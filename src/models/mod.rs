//! Data models for subjects, frequency codes and harmonization results.

pub mod exposure;
pub mod result;
pub mod subject;

pub use exposure::{FoodType, FrequencyCode, RawCode};
pub use result::{BandProbabilities, ExposureCategory, HarmonizationResult};
pub use subject::{ExposureCodes, SubjectRecord};
