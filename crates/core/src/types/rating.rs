//! Customer rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum RatingError {
    /// The value is outside the 0-5 star scale.
    #[error("rating must be between 0 and 5, got {0}")]
    OutOfRange(f32),
    /// The value is NaN or infinite.
    #[error("rating must be a finite number")]
    NotFinite,
}

/// An aggregate star rating on a 0-5 scale.
///
/// Fractional values are allowed (e.g. 4.5 stars).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Rating(f32);

impl Rating {
    /// Construct a rating, validating the 0-5 range.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if the value is below 0 or above 5,
    /// or [`RatingError::NotFinite`] for NaN / infinite input.
    pub fn new(value: f32) -> Result<Self, RatingError> {
        if !value.is_finite() {
            return Err(RatingError::NotFinite);
        }
        if !(0.0..=5.0).contains(&value) {
            return Err(RatingError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Get the rating value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Rating {
    type Error = RatingError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for f32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range() {
        assert!(Rating::new(0.0).is_ok());
        assert!(Rating::new(4.5).is_ok());
        assert!(Rating::new(5.0).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(Rating::new(5.1), Err(RatingError::OutOfRange(5.1)));
        assert_eq!(Rating::new(-0.5), Err(RatingError::OutOfRange(-0.5)));
        assert_eq!(Rating::new(f32::NAN), Err(RatingError::NotFinite));
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let rating: Rating = serde_json::from_str("4.5").unwrap();
        assert_eq!(rating.value(), 4.5);
        assert!(serde_json::from_str::<Rating>("6.0").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rating::new(4.5).unwrap().to_string(), "4.5");
        assert_eq!(Rating::new(4.0).unwrap().to_string(), "4.0");
    }
}
