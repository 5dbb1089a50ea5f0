//! Witness types that encode invariants in the type system.
//!
//! Instead of repeatedly validating that a confidence score is in [0, 1],
//! parse it once into a [`Confidence`]. The type system then guarantees
//! the invariant holds everywhere the value is used, including across the
//! score-composition points in the classifier and geocoder where two
//! sources of confidence are blended.

mod confidence;

pub use confidence::Confidence;
