//! Feedback rating type.

use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when parsing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The input is not a whole number.
    #[error("rating must be a whole number")]
    NotWholeNumber,
    /// The input does not fit the rating range.
    #[error("rating is out of range")]
    OutOfRange,
}

/// A numeric feedback rating.
///
/// No scale is enforced; the public form offers 1 to 5 but the store keeps
/// whatever whole number the client submitted.
///
/// Deserialization accepts either a JSON number or a numeric string, because
/// HTML forms submit every field as text:
///
/// ```
/// use feedback_desk_core::Rating;
///
/// let a: Rating = serde_json::from_str("5").unwrap();
/// let b: Rating = serde_json::from_str("\" 5 \"").unwrap();
/// assert_eq!(a, b);
/// assert!(serde_json::from_str::<Rating>("\"five\"").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(i32);

impl Rating {
    /// Create a rating from a whole number.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Parse a rating from user-supplied text.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::NotWholeNumber`] if the text is not an integer,
    /// or [`RatingError::OutOfRange`] if it does not fit in an `i32`.
    pub fn parse(s: &str) -> Result<Self, RatingError> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(value) => Self::from_i64(value),
            Err(_) => match trimmed.parse::<f64>() {
                Ok(value) => Self::from_f64(value),
                Err(_) => Err(RatingError::NotWholeNumber),
            },
        }
    }

    fn from_i64(value: i64) -> Result<Self, RatingError> {
        i32::try_from(value)
            .map(Self)
            .map_err(|_| RatingError::OutOfRange)
    }

    #[allow(clippy::cast_possible_truncation)] // range checked before the cast
    fn from_f64(value: f64) -> Result<Self, RatingError> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(RatingError::NotWholeNumber);
        }
        if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
            return Err(RatingError::OutOfRange);
        }
        Ok(Self(value as i32))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

struct RatingVisitor;

impl Visitor<'_> for RatingVisitor {
    type Value = Rating;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a whole number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Rating, E> {
        Rating::from_i64(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Rating, E> {
        i64::try_from(v)
            .map_err(|_| E::custom(RatingError::OutOfRange))
            .and_then(|v| Rating::from_i64(v).map_err(E::custom))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Rating, E> {
        Rating::from_f64(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Rating, E> {
        Rating::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RatingVisitor)
    }
}
