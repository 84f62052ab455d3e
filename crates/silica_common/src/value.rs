//! The opaque leaf union: a mutable signal or a fixed constant.

use crate::const_value::Const;
use crate::shape::Shape;
use crate::signal::Signal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A leaf value at the bottom of an interface member tree.
///
/// The wiring layer never looks inside a value beyond its shape and its
/// signal-or-constant classification; bit-level semantics belong to the
/// expression and simulation layers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Value {
    /// A drivable signal leaf, shared by handle.
    Signal(Arc<Signal>),
    /// A fixed constant leaf. Constants are never driven.
    Const(Const),
}

impl Value {
    /// Returns the shape of the underlying leaf.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Signal(signal) => signal.shape(),
            Value::Const(constant) => constant.shape(),
        }
    }

    /// Returns `true` for a constant leaf.
    pub fn is_const(&self) -> bool {
        matches!(self, Value::Const(_))
    }

    /// Returns the signal handle, or `None` for a constant leaf.
    pub fn as_signal(&self) -> Option<&Arc<Signal>> {
        match self {
            Value::Signal(signal) => Some(signal),
            Value::Const(_) => None,
        }
    }

    /// Returns the constant, or `None` for a signal leaf.
    pub fn as_const(&self) -> Option<Const> {
        match self {
            Value::Signal(_) => None,
            Value::Const(constant) => Some(*constant),
        }
    }
}

impl From<Const> for Value {
    fn from(constant: Const) -> Self {
        Value::Const(constant)
    }
}

impl From<Arc<Signal>> for Value {
    fn from(signal: Arc<Signal>) -> Self {
        Value::Signal(signal)
    }
}

impl From<Signal> for Value {
    fn from(signal: Signal) -> Self {
        Value::Signal(Arc::new(signal))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Signal(signal) => write!(f, "{signal}"),
            Value::Const(constant) => write!(f, "{constant}"),
        }
    }
}
