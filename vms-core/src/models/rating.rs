use thiserror::Error;

/// A quality rating given to a completed purchase order.
///
/// Ratings are finite numbers on a closed scale from [`QualityRating::MIN`]
/// to [`QualityRating::MAX`]. Construction goes through `TryFrom<f64>`, so a
/// deserialized rating is always in range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct QualityRating(f64);

impl QualityRating {
    /// The lowest possible rating
    pub const MIN: f64 = 0.0;
    /// The highest possible rating
    pub const MAX: f64 = 5.0;

    /// The numeric value of the rating
    pub fn value(self) -> f64 {
        self.0
    }
}

/// The ways a raw number can fail to be a rating.
#[derive(Debug, Error, PartialEq)]
pub enum RatingError {
    /// NaN or infinite input
    #[error("quality rating must be a finite number")]
    NotFinite,
    /// A finite number outside the scale
    #[error("quality rating {0} is outside the range [0, 5]")]
    OutOfRange(f64),
}

impl TryFrom<f64> for QualityRating {
    type Error = RatingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            Err(RatingError::NotFinite)
        } else if !(Self::MIN..=Self::MAX).contains(&value) {
            Err(RatingError::OutOfRange(value))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<QualityRating> for f64 {
    fn from(value: QualityRating) -> Self {
        value.0
    }
}
