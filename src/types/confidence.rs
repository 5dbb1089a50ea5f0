//! Witness type for confidence values bounded to [0.0, 1.0].
//!
//! Confidence means different things per channel and must not be compared
//! across channels naively:
//!
//! - **Dictionary**: "the surface form is a curated place name" — the
//!   entry's base confidence, essentially certainty about the spelling,
//!   not about the usage in context.
//! - **Pattern**: "a productive suffix rule fired" — reflects rule
//!   precision measured on the source corpus (compound admin names ~0.98,
//!   bare natural-feature suffixes ~0.75).
//! - **Tagger**: whatever the third-party tagger reports, flattened by a
//!   fixed discount because external taggers rarely expose calibrated
//!   scores.
//!
//! Cross-channel conflicts are therefore settled by channel priority
//! first and only then by score (see `resolve`); the classifier and
//! geocoder compose scores with [`Confidence::combine`] and
//! [`Confidence::saturating`] so composed values never leave [0, 1].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A confidence score guaranteed to be in the range [0.0, 1.0].
///
/// This is a witness type: its existence proves the value is valid, so
/// downstream code never re-checks bounds. `#[repr(transparent)]` makes
/// it layout-identical to `f64`.
///
/// # Construction
///
/// - [`Confidence::new`]: returns `None` if out of range (strict)
/// - [`Confidence::saturating`]: clamps to [0, 1] (lenient, never fails)
///
/// # Example
///
/// ```rust
/// use chimei::types::Confidence;
///
/// assert!(Confidence::new(0.5).is_some());
/// assert!(Confidence::new(1.5).is_none());
/// assert_eq!(Confidence::saturating(1.5).get(), 1.0);
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// The minimum valid confidence value.
    pub const MIN: Self = Self(0.0);

    /// The maximum valid confidence value.
    pub const MAX: Self = Self(1.0);

    /// A "perfect" confidence of 1.0.
    pub const CERTAIN: Self = Self(1.0);

    /// A "no information" confidence of 0.5 (maximum entropy). This is
    /// also what the normalizer reports for an unknown name.
    pub const UNCERTAIN: Self = Self(0.5);

    /// Create a confidence score, returning `None` if out of range.
    #[must_use]
    #[inline]
    pub fn new(value: f64) -> Option<Self> {
        if (0.0..=1.0).contains(&value) && !value.is_nan() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a confidence score, clamping to [0.0, 1.0].
    ///
    /// NaN is treated as 0.0.
    #[must_use]
    #[inline]
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Get the inner value (guaranteed to be in [0.0, 1.0]).
    #[must_use]
    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Scale by a factor in [0, 1], clamping the result.
    ///
    /// Used for channel discounts and the partial-match geocode tier.
    #[must_use]
    #[inline]
    pub fn discount(self, factor: f64) -> Self {
        Self::saturating(self.0 * factor)
    }

    /// Combine two confidence scores (geometric mean).
    ///
    /// Geometric mean penalizes low scores more than arithmetic mean,
    /// which is appropriate for independent confidence estimates.
    #[must_use]
    #[inline]
    pub fn combine(self, other: Self) -> Self {
        Self((self.0 * other.0).sqrt())
    }

    /// Check if this is "high confidence" (>= 0.9).
    #[must_use]
    #[inline]
    pub fn is_high(self) -> bool {
        self.0 >= 0.9
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::CERTAIN
    }
}

impl fmt::Debug for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Confidence({:.4})", self.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

impl TryFrom<f64> for Confidence {
    type Error = crate::Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
            .ok_or_else(|| crate::Error::invalid_input(format!("confidence {value} not in [0, 1]")))
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> f64 {
        c.0
    }
}

impl PartialEq<f64> for Confidence {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<f64> for Confidence {
    fn partial_cmp(&self, other: &f64) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_rejects_out_of_range() {
        assert!(Confidence::new(-0.1).is_none());
        assert!(Confidence::new(1.01).is_none());
        assert!(Confidence::new(f64::NAN).is_none());
        assert!(Confidence::new(0.0).is_some());
        assert!(Confidence::new(1.0).is_some());
    }

    #[test]
    fn saturating_clamps() {
        assert_eq!(Confidence::saturating(2.0).get(), 1.0);
        assert_eq!(Confidence::saturating(-2.0).get(), 0.0);
        assert_eq!(Confidence::saturating(f64::NAN).get(), 0.0);
    }

    #[test]
    fn combine_never_exceeds_inputs() {
        let a = Confidence::saturating(0.9);
        let b = Confidence::saturating(0.5);
        let c = a.combine(b);
        assert!(c.get() <= a.get());
        assert!(c.get() >= b.get() * 0.9_f64.sqrt() - 1e-12);
    }

    #[test]
    fn discount_scales_down() {
        let c = Confidence::saturating(0.8).discount(0.85);
        assert!((c.get() - 0.68).abs() < 1e-12);
    }
}
