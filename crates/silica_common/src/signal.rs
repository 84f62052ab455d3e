//! Mutable signal leaves: named, shaped wires with an optional reset value.

use crate::const_value::Const;
use crate::shape::Shape;
use arcstr::ArcStr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A mutable hardware value: a named wire or register leaf.
///
/// Signals are immutable metadata handles; the "mutable" half of the name
/// refers to the hardware value they stand for, which can be driven, as
/// opposed to a [`Const`] which never can. Interfaces and assignments share
/// signals through `Arc<Signal>`, so two handles refer to the same leaf
/// exactly when they are pointer-equal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Signal {
    name: ArcStr,
    shape: Shape,
    reset: Option<Const>,
    reset_less: bool,
}

impl Signal {
    /// Creates a signal with the given name and shape, no explicit reset
    /// (equivalent to an all-zero reset), and a reset network attached.
    pub fn new(name: impl Into<ArcStr>, shape: impl Into<Shape>) -> Self {
        Self {
            name: name.into(),
            shape: shape.into(),
            reset: None,
            reset_less: false,
        }
    }

    /// Attaches an explicit reset constant.
    pub fn with_reset(mut self, reset: Const) -> Self {
        self.reset = Some(reset);
        self
    }

    /// Marks the signal as reset-less: it is never updated by a reset
    /// network and holds its power-on value indefinitely until driven.
    pub fn reset_less(mut self) -> Self {
        self.reset_less = true;
        self
    }

    /// Returns the signal's name.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Returns the signal's shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the explicit reset constant, if one was attached.
    pub fn reset(&self) -> Option<Const> {
        self.reset
    }

    /// Returns the effective reset value: the explicit reset, or zero.
    pub fn reset_value(&self) -> i64 {
        self.reset.map(Const::value).unwrap_or(0)
    }

    /// Returns `true` if the signal is reset-less.
    pub fn is_reset_less(&self) -> bool {
        self.reset_less
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
