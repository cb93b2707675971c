//! Food types and the ordinal frequency codes reported for them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four fish food types recorded per subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodType {
    /// Sea fish
    Sea,
    /// River (freshwater) fish
    River,
    /// Frozen fish
    Frozen,
    /// Canned fish
    Canned,
}

impl FoodType {
    /// All food types, in sampling order
    pub const ALL: [Self; 4] = [Self::Sea, Self::River, Self::Frozen, Self::Canned];

    /// Position of this food type in [`FoodType::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Sea => 0,
            Self::River => 1,
            Self::Frozen => 2,
            Self::Canned => 3,
        }
    }

    /// Default input column name for this food type
    #[must_use]
    pub const fn default_column(self) -> &'static str {
        match self {
            Self::Sea => "sea_fish",
            Self::River => "river_fish",
            Self::Frozen => "frozen_fish",
            Self::Canned => "canned_fish",
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sea => "sea fish",
            Self::River => "river fish",
            Self::Frozen => "frozen fish",
            Self::Canned => "canned fish",
        };
        f.write_str(name)
    }
}

/// A validated consumption frequency code in `1..=8`
///
/// Code 1 is the lowest bracket (never), code 8 the highest. Missing
/// responses are represented as `Option::None` around this type, never as
/// a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FrequencyCode(u8);

impl FrequencyCode {
    /// Lowest valid code
    pub const MIN: u8 = 1;
    /// Highest valid code
    pub const MAX: u8 = 8;
    /// Number of distinct codes
    pub const COUNT: usize = (Self::MAX - Self::MIN + 1) as usize;

    /// Create a code from a raw value, returning `None` when out of range
    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
    }

    /// The raw code value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Zero-based position of this code in an interval table
    #[must_use]
    pub const fn table_index(self) -> usize {
        (self.0 - Self::MIN) as usize
    }

    /// Iterate over every valid code in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl fmt::Display for FrequencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A code exactly as read from the input, before range checking
///
/// Whole numbers stay integral whatever their storage type; anything with a
/// fractional part (or too large for `i64`) is kept as a float so it can be
/// reported as-is when the batch is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCode {
    /// Whole-number code
    Integer(i64),
    /// Code with a fractional part
    Fractional(f64),
}

impl RawCode {
    /// Classify a float read from a floating-point column
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Self::Integer(value as i64)
        } else {
            Self::Fractional(value)
        }
    }

    /// The validated code, or `None` when outside `1..=8` or not whole
    #[must_use]
    pub fn to_frequency_code(self) -> Option<FrequencyCode> {
        match self {
            Self::Integer(value) => FrequencyCode::new(value),
            Self::Fractional(_) => None,
        }
    }
}

impl From<i64> for RawCode {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl fmt::Display for RawCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Fractional(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_code_range() {
        assert!(FrequencyCode::new(0).is_none());
        assert!(FrequencyCode::new(9).is_none());
        assert!(FrequencyCode::new(-1).is_none());
        assert!(FrequencyCode::new(i64::MAX).is_none());

        let code = FrequencyCode::new(8).unwrap();
        assert_eq!(code.value(), 8);
        assert_eq!(code.table_index(), 7);
        assert_eq!(FrequencyCode::all().count(), FrequencyCode::COUNT);
    }

    #[test]
    fn test_raw_code_from_float() {
        assert_eq!(RawCode::from_f64(3.0), RawCode::Integer(3));
        assert_eq!(RawCode::from_f64(2.5), RawCode::Fractional(2.5));
        assert!(matches!(RawCode::from_f64(1e30), RawCode::Fractional(_)));

        assert_eq!(RawCode::Integer(3).to_frequency_code().map(FrequencyCode::value), Some(3));
        assert!(RawCode::Integer(9).to_frequency_code().is_none());
        assert!(RawCode::Fractional(2.5).to_frequency_code().is_none());
        assert_eq!(RawCode::Fractional(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_food_type_order() {
        for (i, food) in FoodType::ALL.iter().enumerate() {
            assert_eq!(food.index(), i);
        }
        assert_eq!(FoodType::Canned.default_column(), "canned_fish");
    }
}
