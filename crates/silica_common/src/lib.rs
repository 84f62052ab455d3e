//! Shared foundational types for the Silica wiring toolchain.
//!
//! This crate provides the value-leaf model consumed by the signature and
//! connection machinery: bit-vector shapes, constant values, mutable signal
//! leaves, and the opaque [`Value`] union over both.

#![warn(missing_docs)]

pub mod const_value;
pub mod shape;
pub mod signal;
pub mod value;

pub use const_value::{Const, ShapeError};
pub use shape::Shape;
pub use signal::Signal;
pub use value::Value;
