//! Flow directions for interface members.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction of data flow through an interface member, from the
/// perspective of the interface's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flow {
    /// The member is driven by the owner.
    Out,
    /// The member is driven by the owner's peer.
    In,
}

impl Flow {
    /// Returns the opposite direction. Total and involutive:
    /// `flow.flip().flip() == flow` for every flow.
    pub fn flip(self) -> Self {
        match self {
            Flow::Out => Flow::In,
            Flow::In => Flow::Out,
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Out => write!(f, "out"),
            Flow::In => write!(f, "in"),
        }
    }
}
