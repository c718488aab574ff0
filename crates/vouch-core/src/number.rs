use std::fmt;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number as JsonNumber;

use crate::{
    hash::{hash_bytes, HashCode},
    CanonicalizeError,
};

/// A document number, stored as a finite IEEE-754 double.
///
/// Numbers parsed from JSON compare numerically regardless of how they were
/// written, so `2`, `2.0` and `2e0` are all equal.
#[derive(Clone, Copy, Debug, PartialOrd)]
pub struct Number(f64);

impl Number {
    /// Creates a new [`Number`] after validating finiteness.
    ///
    /// ```
    /// # use vouch_core::Number;
    /// let num = Number::new(42.0)?;
    /// assert_eq!(num.get(), 42.0);
    /// assert!(Number::new(f64::NAN).is_err());
    /// # Ok::<(), vouch_core::CanonicalizeError>(())
    /// ```
    pub fn new(value: f64) -> Result<Self, CanonicalizeError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(CanonicalizeError::NotFinite { value })
        }
    }

    /// Builds a number from an element count.
    #[must_use]
    pub fn from_count(count: usize) -> Self {
        Self(count as f64)
    }

    /// Returns the raw floating-point value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    pub(crate) fn hash_code(self) -> HashCode {
        // 0.0 and -0.0 compare equal and must hash alike.
        let value = if self.0 == 0.0 { 0.0_f64 } else { self.0 };
        hash_bytes(&value.to_le_bytes())
    }

    /// Converts the number into a `serde_json::Number` using minimal integer representation when possible.
    ///
    /// ```
    /// # use vouch_core::Number;
    /// assert_eq!(Number::new(5.0)?.to_json_number().to_string(), "5");
    /// assert_eq!(Number::new(0.5)?.to_json_number().to_string(), "0.5");
    /// # Ok::<(), vouch_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn to_json_number(self) -> JsonNumber {
        if self.0.fract() == 0.0 && !(self.0 == 0.0 && self.0.is_sign_negative()) {
            if (i64::MIN as f64) <= self.0 && self.0 <= (i64::MAX as f64) {
                return JsonNumber::from(self.0 as i64);
            }
            if self.0 >= 0.0 && self.0 <= (u64::MAX as f64) {
                return JsonNumber::from(self.0 as u64);
            }
        }
        // Finite by construction, so `from_f64` always succeeds.
        JsonNumber::from_f64(self.0).unwrap_or_else(|| JsonNumber::from(0))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_number().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(D::Error::custom)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_display_without_fraction() {
        assert_eq!(Number::new(2.0).unwrap().to_string(), "2");
        assert_eq!(Number::from_count(417).to_string(), "417");
        assert_eq!(Number::new(-3.25).unwrap().to_string(), "-3.25");
    }

    #[test]
    fn signed_zeroes_share_a_hash() {
        let positive = Number::new(0.0).unwrap();
        let negative = Number::new(-0.0).unwrap();
        assert_eq!(positive, negative);
        assert_eq!(positive.hash_code(), negative.hash_code());
    }

    #[test]
    fn serializes_like_display() {
        assert_eq!(serde_json::to_string(&Number::from_count(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Number::new(0.25).unwrap()).unwrap(), "0.25");
        assert_eq!(serde_yaml::to_string(&Number::new(7.0).unwrap()).unwrap(), "7\n");
    }

    #[test]
    fn deserializing_rejects_non_finite_values() {
        let number: Number = serde_json::from_str("2").unwrap();
        assert_eq!(number, Number::new(2.0).unwrap());
        let err = serde_yaml::from_str::<Number>(".nan").unwrap_err();
        assert!(err.to_string().contains("non-finite"), "{err}");
        assert!(serde_yaml::from_str::<Number>("-.inf").is_err());
        assert!(serde_yaml::from_str::<crate::Expected>("[1, .nan]").is_err());
        assert!(serde_yaml::from_str::<crate::Node>("{a: .inf}").is_err());
    }
}
