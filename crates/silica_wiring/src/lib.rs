//! Structural wiring for hierarchical hardware interfaces.
//!
//! This crate implements the signature/connection type system of the Silica
//! toolchain: directional [`Member`]s composed into ordered, freezable
//! [`Signature`]s, concrete [`Interface`]s instantiated from them, and the
//! [`connect`] algorithm that pairs same-path members of multiple compliant
//! interfaces into leaf-level combinational [`Assignment`]s.
//!
//! # Usage
//!
//! ```ignore
//! let stream = Signature::new([("valid", output(1)), ("ready", input(1))])?;
//! let producer = Signature::new([("bus", output(stream.clone()))])?.create();
//! let consumer = Signature::new([("bus", input(stream))])?.create();
//! let assignments = connect(&[("producer", &producer), ("consumer", &consumer)])?;
//! ```

#![warn(missing_docs)]

pub mod component;
pub mod connect;
pub mod error;
pub mod flow;
pub mod interface;
pub mod member;
pub mod members;
pub mod path;
pub mod signature;

pub use component::{Component, ComponentBuilder, FieldDecl};
pub use connect::{connect, Assignment};
pub use error::WiringError;
pub use flow::Flow;
pub use interface::{flipped, Flipped, Interface, Slot, Wireable};
pub use member::{input, output, Member, MemberDesc, MemberPayload};
pub use members::SignatureMembers;
pub use path::{MemberPath, PathStep};
pub use signature::Signature;
