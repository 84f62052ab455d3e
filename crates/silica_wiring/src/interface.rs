//! Concrete interfaces instantiated from signatures, and the `Wireable`
//! boundary trait the connect algorithm accepts.

use crate::error::WiringError;
use crate::signature::Signature;
use arcstr::ArcStr;
use silica_common::Value;
use std::collections::BTreeMap;

/// One attribute of a concrete interface: a leaf value, a dimensioned array
/// of slots, or a nested interface.
///
/// Slots form an explicit variant tree addressed by name and index; there is
/// no reflective attribute access anywhere in the wiring layer.
#[derive(Debug, Clone)]
pub enum Slot {
    /// A leaf value: a signal or a constant.
    Value(Value),
    /// One array level of a dimensioned member.
    Array(Vec<Slot>),
    /// A nested interface for a signature member.
    Interface(Interface),
}

impl Slot {
    /// Describes the slot kind for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Slot::Value(_) => "a value",
            Slot::Array(_) => "an array",
            Slot::Interface(_) => "an interface",
        }
    }

    /// Returns the leaf value, or `None` for arrays and interfaces.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Slot::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the array elements, or `None` for values and interfaces.
    pub fn as_array(&self) -> Option<&[Slot]> {
        match self {
            Slot::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the nested interface, or `None` for values and arrays.
    pub fn as_interface(&self) -> Option<&Interface> {
        match self {
            Slot::Interface(interface) => Some(interface),
            _ => None,
        }
    }
}

/// An object that can participate in a connection: anything that reports a
/// [`Signature`] and resolves member names to [`Slot`]s.
///
/// [`Interface`], [`Flipped`] views, and
/// [`Component`](crate::component::Component)s all implement this; custom
/// implementations are how externally-built objects (for example interfaces
/// whose leaves are constants) join a connection.
pub trait Wireable {
    /// Returns the signature this object claims to implement.
    fn signature(&self) -> Signature;

    /// Resolves a member name to its slot, or `None` if the attribute does
    /// not exist.
    fn slot(&self, name: &str) -> Option<Slot>;
}

impl<T: Wireable + ?Sized> Wireable for &T {
    fn signature(&self) -> Signature {
        (**self).signature()
    }

    fn slot(&self, name: &str) -> Option<Slot> {
        (**self).slot(name)
    }
}

/// A concrete interface: one slot per member of its signature, built once by
/// [`Signature::create`] and never restructured afterwards.
///
/// Designers may [`attach`](Self::attach) extra attributes outside the
/// declared member set; compliance checking ignores them.
#[derive(Debug, Clone)]
pub struct Interface {
    signature: Signature,
    slots: BTreeMap<ArcStr, Slot>,
}

impl Interface {
    pub(crate) fn from_parts(signature: Signature, slots: BTreeMap<ArcStr, Slot>) -> Self {
        Self { signature, slots }
    }

    /// Adds an attribute outside the declared member set.
    ///
    /// Fails with [`WiringError::Name`] when the name is already taken,
    /// whether by a declared member or an earlier attachment.
    pub fn attach(&mut self, name: impl Into<ArcStr>, slot: Slot) -> Result<(), WiringError> {
        let name = name.into();
        if self.slots.contains_key(&name) {
            return Err(WiringError::Name(format!(
                "attribute '{name}' already exists on the interface"
            )));
        }
        self.slots.insert(name, slot);
        Ok(())
    }
}

impl Wireable for Interface {
    fn signature(&self) -> Signature {
        self.signature.clone()
    }

    fn slot(&self, name: &str) -> Option<Slot> {
        self.slots.get(name).cloned()
    }
}

/// A zero-copy view of a wireable object with its signature flipped.
///
/// Attribute access delegates to the wrapped object unchanged; only the
/// reported signature polarity inverts.
#[derive(Debug, Clone)]
pub struct Flipped<T> {
    inner: T,
}

/// Wraps an object so it reports the flipped polarity of its signature.
pub fn flipped<T: Wireable>(inner: T) -> Flipped<T> {
    Flipped { inner }
}

impl<T> Flipped<T> {
    /// Recovers the wrapped object.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Wireable> Wireable for Flipped<T> {
    fn signature(&self) -> Signature {
        self.inner.signature().flip()
    }

    fn slot(&self, name: &str) -> Option<Slot> {
        self.inner.slot(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::Flow;
    use crate::member::{input, output};

    #[test]
    fn interface_exposes_declared_slots() {
        let sig = Signature::new([("a", output(1)), ("b", input(8))]).unwrap();
        let iface = sig.create();
        assert!(iface.slot("a").is_some());
        assert!(iface.slot("b").is_some());
        assert!(iface.slot("c").is_none());
    }

    #[test]
    fn attach_adds_extra_attributes() {
        let sig = Signature::new([("a", output(1))]).unwrap();
        let mut iface = sig.create();
        let extra = iface.slot("a").unwrap();
        iface.attach("debug", extra).unwrap();
        assert!(iface.slot("debug").is_some());
    }

    #[test]
    fn attach_rejects_collisions() {
        let sig = Signature::new([("a", output(1))]).unwrap();
        let mut iface = sig.create();
        let slot = iface.slot("a").unwrap();
        let err = iface.attach("a", slot).unwrap_err();
        assert!(matches!(err, WiringError::Name(_)));
    }

    #[test]
    fn flipped_view_reports_flipped_signature() {
        let sig = Signature::new([("a", output(1))]).unwrap();
        let iface = sig.create();
        let view = flipped(&iface);
        assert_eq!(view.signature().members().get("a").unwrap().flow(), Flow::In);
        // Attribute access delegates to the same slots.
        let a = iface.slot("a").unwrap();
        let b = view.slot("a").unwrap();
        let a = a.as_value().unwrap().as_signal().unwrap();
        let b = b.as_value().unwrap().as_signal().unwrap();
        assert!(std::sync::Arc::ptr_eq(a, b));
    }

    #[test]
    fn double_flip_restores_polarity() {
        let sig = Signature::new([("a", output(1))]).unwrap();
        let iface = sig.create();
        let view = flipped(flipped(&iface));
        assert_eq!(
            view.signature().members().get("a").unwrap().flow(),
            Flow::Out
        );
    }

    #[test]
    fn flipped_interface_is_compliant_with_flipped_signature() {
        let sig = Signature::new([("a", output(1))]).unwrap();
        let iface = sig.create();
        let view = flipped(&iface);
        assert!(sig.flip().is_compliant(&view));
    }

    #[test]
    fn slot_kind_names() {
        let sig = Signature::new([("a", output(1))]).unwrap();
        let iface = sig.create();
        let slot = iface.slot("a").unwrap();
        assert_eq!(slot.kind_name(), "a value");
        assert_eq!(Slot::Array(Vec::new()).kind_name(), "an array");
        assert_eq!(Slot::Interface(sig.create()).kind_name(), "an interface");
    }
}
