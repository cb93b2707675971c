//! Subject records as read from an exposure table.

use serde::{Deserialize, Serialize};

use crate::models::exposure::{FoodType, FrequencyCode, RawCode};

/// One subject's raw, unvalidated frequency codes
///
/// Codes are kept exactly as reported; range checking happens once for the
/// whole batch in the validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Optional subject identifier, used only for logging
    pub subject_id: Option<String>,
    /// Sea fish code
    pub sea: Option<RawCode>,
    /// River fish code
    pub river: Option<RawCode>,
    /// Frozen fish code
    pub frozen: Option<RawCode>,
    /// Canned fish code
    pub canned: Option<RawCode>,
}

impl SubjectRecord {
    /// Create a record of whole-number codes without an identifier
    #[must_use]
    pub fn new(
        sea: Option<i64>,
        river: Option<i64>,
        frozen: Option<i64>,
        canned: Option<i64>,
    ) -> Self {
        Self {
            subject_id: None,
            sea: sea.map(RawCode::Integer),
            river: river.map(RawCode::Integer),
            frozen: frozen.map(RawCode::Integer),
            canned: canned.map(RawCode::Integer),
        }
    }

    /// Attach an identifier
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.subject_id = Some(id.into());
        self
    }

    /// Raw code for one food type
    #[must_use]
    pub const fn code(&self, food: FoodType) -> Option<RawCode> {
        match food {
            FoodType::Sea => self.sea,
            FoodType::River => self.river,
            FoodType::Frozen => self.frozen,
            FoodType::Canned => self.canned,
        }
    }

    /// Raw codes in [`FoodType::ALL`] order
    #[must_use]
    pub const fn codes(&self) -> [Option<RawCode>; 4] {
        [self.sea, self.river, self.frozen, self.canned]
    }
}

/// The four validated codes of one subject
///
/// `None` entries are missing responses. Only produced by the batch
/// validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExposureCodes([Option<FrequencyCode>; 4]);

impl ExposureCodes {
    pub(crate) const fn from_validated(codes: [Option<FrequencyCode>; 4]) -> Self {
        Self(codes)
    }

    /// Validated code for one food type
    #[must_use]
    pub const fn get(&self, food: FoodType) -> Option<FrequencyCode> {
        self.0[food.index()]
    }
}
