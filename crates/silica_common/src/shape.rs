//! Bit-vector shapes: a width in bits plus a signedness flag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of a hardware value: its width in bits and whether arithmetic
/// on it is signed.
///
/// Shapes are language-independent. A VHDL `std_logic_vector(7 downto 0)`,
/// a Verilog `wire [7:0]`, and a SystemVerilog `logic [7:0]` all carry the
/// shape `unsigned(8)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Shape {
    width: u32,
    signed: bool,
}

impl Shape {
    /// Creates an unsigned shape of the given width.
    pub fn unsigned(width: u32) -> Self {
        Self {
            width,
            signed: false,
        }
    }

    /// Creates a signed (two's complement) shape of the given width.
    pub fn signed(width: u32) -> Self {
        Self {
            width,
            signed: true,
        }
    }

    /// Returns the width in bits.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns `true` if values of this shape are interpreted as signed.
    pub fn is_signed(self) -> bool {
        self.signed
    }
}

impl From<u32> for Shape {
    fn from(width: u32) -> Self {
        Shape::unsigned(width)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.signed {
            write!(f, "signed({})", self.width)
        } else {
            write!(f, "unsigned({})", self.width)
        }
    }
}
