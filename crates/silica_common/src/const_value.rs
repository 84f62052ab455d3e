//! Compile-time constant leaf values, checked against their shape eagerly.

use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An error produced when a value does not fit a [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// The value lies outside the range representable by the shape.
    #[error("value {value} is not representable in {shape}")]
    NotRepresentable {
        /// The offending value.
        value: i64,
        /// The shape it was checked against.
        shape: Shape,
    },
}

/// A fixed constant value of a known shape.
///
/// The representability check happens once, at construction. A `Const` that
/// exists is always valid for its shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Const {
    value: i64,
    shape: Shape,
}

impl Const {
    /// Creates a constant, verifying that `value` fits the shape's range:
    /// `0..2^w` for `unsigned(w)`, two's complement for `signed(w)`.
    pub fn new(value: i64, shape: impl Into<Shape>) -> Result<Self, ShapeError> {
        let shape = shape.into();
        if fits(value, shape) {
            Ok(Self { value, shape })
        } else {
            Err(ShapeError::NotRepresentable { value, shape })
        }
    }

    /// Creates the all-zero constant of the given shape.
    pub fn zero(shape: impl Into<Shape>) -> Self {
        Self {
            value: 0,
            shape: shape.into(),
        }
    }

    /// Returns the constant's value.
    pub fn value(self) -> i64 {
        self.value
    }

    /// Returns the constant's shape.
    pub fn shape(self) -> Shape {
        self.shape
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Range check in `i128` so that widths up to 127 are exact; wider shapes
/// admit every `i64` of the matching sign.
fn fits(value: i64, shape: Shape) -> bool {
    let width = shape.width();
    if width == 0 {
        return value == 0;
    }
    let value = value as i128;
    if shape.is_signed() {
        if width >= 65 {
            return true;
        }
        let min = -(1i128 << (width - 1));
        let max = (1i128 << (width - 1)) - 1;
        min <= value && value <= max
    } else {
        if value < 0 {
            return false;
        }
        if width >= 64 {
            return true;
        }
        value < (1i128 << width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_range() {
        assert!(Const::new(0, Shape::unsigned(1)).is_ok());
        assert!(Const::new(1, Shape::unsigned(1)).is_ok());
        assert!(Const::new(2, Shape::unsigned(1)).is_err());
        assert!(Const::new(255, Shape::unsigned(8)).is_ok());
        assert!(Const::new(256, Shape::unsigned(8)).is_err());
        assert!(Const::new(-1, Shape::unsigned(8)).is_err());
    }

    #[test]
    fn signed_range() {
        assert!(Const::new(-128, Shape::signed(8)).is_ok());
        assert!(Const::new(127, Shape::signed(8)).is_ok());
        assert!(Const::new(128, Shape::signed(8)).is_err());
        assert!(Const::new(-129, Shape::signed(8)).is_err());
    }

    #[test]
    fn zero_width_admits_only_zero() {
        assert!(Const::new(0, Shape::unsigned(0)).is_ok());
        assert!(Const::new(1, Shape::unsigned(0)).is_err());
        assert!(Const::new(0, Shape::signed(0)).is_ok());
    }

    #[test]
    fn wide_shapes_admit_any_i64() {
        assert!(Const::new(i64::MAX, Shape::unsigned(64)).is_ok());
        assert!(Const::new(i64::MIN, Shape::signed(65)).is_ok());
        assert!(Const::new(i64::MIN, Shape::unsigned(64)).is_err());
    }

    #[test]
    fn zero_constructor() {
        let c = Const::zero(Shape::signed(4));
        assert_eq!(c.value(), 0);
        assert_eq!(c.shape(), Shape::signed(4));
    }

    #[test]
    fn error_message_names_value_and_shape() {
        let err = Const::new(9, Shape::unsigned(3)).unwrap_err();
        assert_eq!(
            format!("{err}"),
            "value 9 is not representable in unsigned(3)"
        );
    }

    #[test]
    fn display_is_bare_value() {
        let c = Const::new(-3, Shape::signed(4)).unwrap();
        assert_eq!(format!("{c}"), "-3");
    }

    #[test]
    fn serde_roundtrip() {
        let c = Const::new(42, Shape::unsigned(8)).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        let back: Const = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
