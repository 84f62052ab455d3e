//! Interface members: bit-shaped ports or nested signatures, with a flow
//! direction and optional array dimensions.

use crate::error::WiringError;
use crate::flow::Flow;
use crate::signature::Signature;
use silica_common::{Const, Shape};
use std::fmt;

/// What a member carries: a port leaf or a nested signature.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberPayload {
    /// A bit-shaped port with an optional reset constant.
    Port {
        /// The port's shape.
        shape: Shape,
        /// The reset constant, validated against the shape at construction.
        reset: Option<Const>,
    },
    /// A nested signature, stored with the polarity it was declared in.
    Signature(Signature),
}

/// A description accepted by the [`input`]/[`output`] shorthand
/// constructors: a shape (or bare width) for a port member, or a signature
/// for a nested member.
#[derive(Debug, Clone)]
pub enum MemberDesc {
    /// Describes a port member of the given shape.
    Shape(Shape),
    /// Describes a nested signature member.
    Signature(Signature),
}

impl From<u32> for MemberDesc {
    fn from(width: u32) -> Self {
        MemberDesc::Shape(Shape::unsigned(width))
    }
}

impl From<Shape> for MemberDesc {
    fn from(shape: Shape) -> Self {
        MemberDesc::Shape(shape)
    }
}

impl From<Signature> for MemberDesc {
    fn from(signature: Signature) -> Self {
        MemberDesc::Signature(signature)
    }
}

/// Creates a member driven by the owner's peer.
pub fn input(desc: impl Into<MemberDesc>) -> Member {
    Member::new(Flow::In, desc)
}

/// Creates a member driven by the owner.
pub fn output(desc: impl Into<MemberDesc>) -> Member {
    Member::new(Flow::Out, desc)
}

/// A single typed slot in an interface signature.
///
/// Members are immutable value objects: [`flip`](Member::flip) and
/// [`array`](Member::array) return new members rather than mutating.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    flow: Flow,
    payload: MemberPayload,
    dimensions: Vec<usize>,
}

impl Member {
    /// Creates a scalar member with the given flow and description.
    pub fn new(flow: Flow, desc: impl Into<MemberDesc>) -> Self {
        let payload = match desc.into() {
            MemberDesc::Shape(shape) => MemberPayload::Port { shape, reset: None },
            MemberDesc::Signature(signature) => MemberPayload::Signature(signature),
        };
        Self {
            flow,
            payload,
            dimensions: Vec::new(),
        }
    }

    /// Attaches a reset constant to a port member.
    ///
    /// Fails with [`WiringError::Type`] when the value is not representable
    /// in the port's shape, and with [`WiringError::Value`] on a signature
    /// member, which cannot carry a reset.
    pub fn with_reset(self, reset: i64) -> Result<Self, WiringError> {
        match self.payload {
            MemberPayload::Port { shape, .. } => {
                let reset = Const::new(reset, shape)
                    .map_err(|err| WiringError::Type(format!("invalid reset: {err}")))?;
                Ok(Self {
                    payload: MemberPayload::Port {
                        shape,
                        reset: Some(reset),
                    },
                    ..self
                })
            }
            MemberPayload::Signature(_) => Err(WiringError::Value(format!(
                "a signature member cannot have a reset value {reset}"
            ))),
        }
    }

    /// Returns a new member with the flow inverted and everything else
    /// unchanged. Involutive.
    pub fn flip(&self) -> Self {
        Self {
            flow: self.flow.flip(),
            payload: self.payload.clone(),
            dimensions: self.dimensions.clone(),
        }
    }

    /// Returns a new member with the given dimensions prepended, outermost
    /// first. Later calls prepend, so `m.array([a]).array([b])` is
    /// equivalent to `m.array([b, a])`.
    pub fn array(self, dims: impl IntoIterator<Item = usize>) -> Self {
        let mut dimensions: Vec<usize> = dims.into_iter().collect();
        dimensions.extend(self.dimensions.iter().copied());
        Self { dimensions, ..self }
    }

    /// Returns the member's flow.
    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Returns the member's payload.
    pub fn payload(&self) -> &MemberPayload {
        &self.payload
    }

    /// Returns the array dimensions, outermost first. Empty for scalars.
    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    /// Returns `true` for a port member.
    pub fn is_port(&self) -> bool {
        matches!(self.payload, MemberPayload::Port { .. })
    }

    /// Returns `true` for a nested signature member.
    pub fn is_signature(&self) -> bool {
        matches!(self.payload, MemberPayload::Signature(_))
    }

    /// Returns the port shape.
    ///
    /// Fails with [`WiringError::Attribute`] on a signature member.
    pub fn shape(&self) -> Result<Shape, WiringError> {
        match &self.payload {
            MemberPayload::Port { shape, .. } => Ok(*shape),
            MemberPayload::Signature(_) => Err(WiringError::Attribute(
                "a signature member does not have a shape".into(),
            )),
        }
    }

    /// Returns the port reset constant, if any.
    ///
    /// Fails with [`WiringError::Attribute`] on a signature member.
    pub fn reset(&self) -> Result<Option<Const>, WiringError> {
        match &self.payload {
            MemberPayload::Port { reset, .. } => Ok(*reset),
            MemberPayload::Signature(_) => Err(WiringError::Attribute(
                "a signature member does not have a reset value".into(),
            )),
        }
    }

    /// Returns the nested signature, flipped when this member's own flow is
    /// `In`: from the consuming side, an `In` member is the provider's
    /// `Out`, so its inner polarity inverts.
    ///
    /// Fails with [`WiringError::Attribute`] on a port member.
    pub fn signature(&self) -> Result<Signature, WiringError> {
        self.nested_signature().ok_or_else(|| {
            WiringError::Attribute("a port member does not have a signature".into())
        })
    }

    /// Like [`signature`](Member::signature), but returns `None` on a port
    /// member instead of failing.
    pub fn nested_signature(&self) -> Option<Signature> {
        match &self.payload {
            MemberPayload::Signature(signature) => Some(match self.flow {
                Flow::In => signature.flip(),
                Flow::Out => signature.clone(),
            }),
            MemberPayload::Port { .. } => None,
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.flow)?;
        match &self.payload {
            MemberPayload::Port { shape, reset: None } => write!(f, "{shape}")?,
            MemberPayload::Port {
                shape,
                reset: Some(reset),
            } => write!(f, "{shape} reset={reset}")?,
            MemberPayload::Signature(signature) => match signature.name() {
                Some(name) => write!(f, "{name}")?,
                None => write!(f, "signature")?,
            },
        }
        for dim in &self.dimensions {
            write!(f, "[{dim}]")?;
        }
        Ok(())
    }
}
