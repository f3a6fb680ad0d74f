//! Position type for card ordering within a column.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Rejected attempt to build a [`Position`] from NaN or an infinity
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("position must be a finite number, got {0}")]
pub struct NonFinitePosition(pub f64);

/// Numeric ordering key of a card within its column.
///
/// Lower positions render first (top of the column). Gaps are allowed, so a
/// card can be placed between two neighbours without renumbering the column.
/// The value is always finite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Position(f64);

impl Position {
    /// Position used for the first card of an empty column
    pub const ORIGIN: Position = Position(0.0);

    /// Create a position from a raw value, `None` unless it is finite
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    /// Position strictly above `first`
    pub fn before(first: Position) -> Self {
        Self(first.0 - 1.0)
    }

    /// Position strictly below `last`
    pub fn after(last: Position) -> Self {
        Self(last.0 + 1.0)
    }

    /// Midpoint between two neighbours.
    ///
    /// The arguments may be given in either order. When the neighbours are
    /// equal (malformed data) the result equals them as well.
    pub fn between(a: Position, b: Position) -> Self {
        Self(a.0 + (b.0 - a.0) / 2.0)
    }

    /// Midpoint strictly inside `(lower, upper)`.
    ///
    /// `None` when the neighbours are too close for an `f64` to fit between
    /// them, or out of order.
    pub fn strictly_between(lower: Position, upper: Position) -> Option<Self> {
        let mid = Self::between(lower, upper);
        (lower < mid && mid < upper).then_some(mid)
    }

    /// Get the raw value
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Position {
    type Error = NonFinitePosition;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(NonFinitePosition(value))
    }
}

impl From<Position> for f64 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl From<i32> for Position {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_before_after() {
        let p = Position::from(3);
        assert!(Position::before(p) < p);
        assert!(Position::after(p) > p);
    }

    #[test]
    fn test_position_between() {
        let a = Position::from(1);
        let b = Position::from(2);

        let mid = Position::between(a, b);
        assert!(mid > a);
        assert!(mid < b);
        assert_eq!(Position::between(b, a), mid);
    }

    #[test]
    fn test_strictly_between_detects_exhausted_gap() {
        let a = Position::from(1);
        assert_eq!(
            Position::strictly_between(Position::ORIGIN, a),
            Some(Position::try_from(0.5).unwrap())
        );

        let next = Position::try_from(f64::from_bits(1.0f64.to_bits() + 1)).unwrap();
        assert_eq!(Position::strictly_between(a, next), None);
        assert_eq!(Position::strictly_between(a, a), None);
        assert_eq!(Position::strictly_between(next, a), None);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Position::new(f64::NAN).is_none());
        assert!(Position::new(f64::INFINITY).is_none());
        assert_eq!(
            Position::try_from(f64::NEG_INFINITY),
            Err(NonFinitePosition(f64::NEG_INFINITY))
        );
        assert!(serde_json::from_str::<Position>("1e400").is_err());
        assert_eq!(Position::new(2.5).map(|p| p.value()), Some(2.5));
    }

    #[test]
    fn test_position_deserializes_integers() {
        let p: Position = serde_json::from_str("4").unwrap();
        assert_eq!(p, Position::from(4));
    }
}
