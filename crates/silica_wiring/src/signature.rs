//! Signatures: named collections of members with identity semantics and
//! compliance checking.

use crate::error::WiringError;
use crate::flow::Flow;
use crate::interface::{Interface, Slot, Wireable};
use crate::member::{Member, MemberPayload};
use crate::members::SignatureMembers;
use crate::path::MemberPath;
use arcstr::ArcStr;
use silica_common::{Const, Value};
use std::sync::Arc;

/// Whether a signature compares structurally or by identity.
#[derive(Debug, Clone)]
enum SignatureKind {
    Anonymous,
    Named(ArcStr),
}

#[derive(Debug)]
struct SignatureInner {
    members: SignatureMembers,
    kind: SignatureKind,
}

/// A declarative, nested, directional description of an interface.
///
/// Signatures are shared handles: cloning or [`flip`](Self::flip)ping one
/// yields another view of the same underlying member collection, so freezing
/// any view freezes them all.
///
/// Anonymous signatures compare structurally; named (or component-derived)
/// signatures compare by identity, since a named signature may carry meaning
/// beyond its member set and two distinct declarations should never be
/// conflated.
#[derive(Debug, Clone)]
pub struct Signature {
    inner: Arc<SignatureInner>,
    flipped: bool,
}

impl Signature {
    /// Creates an anonymous signature from (name, member) pairs.
    pub fn new<N, I>(members: I) -> Result<Self, WiringError>
    where
        N: Into<ArcStr>,
        I: IntoIterator<Item = (N, Member)>,
    {
        Self::build(SignatureKind::Anonymous, members)
    }

    /// Creates a named signature from (name, member) pairs.
    pub fn named<S, N, I>(name: S, members: I) -> Result<Self, WiringError>
    where
        S: Into<ArcStr>,
        N: Into<ArcStr>,
        I: IntoIterator<Item = (N, Member)>,
    {
        Self::build(SignatureKind::Named(name.into()), members)
    }

    fn build<N, I>(kind: SignatureKind, members: I) -> Result<Self, WiringError>
    where
        N: Into<ArcStr>,
        I: IntoIterator<Item = (N, Member)>,
    {
        let collection = SignatureMembers::new();
        for (name, member) in members {
            collection.insert(name, member)?;
        }
        Ok(Self {
            inner: Arc::new(SignatureInner {
                members: collection,
                kind,
            }),
            flipped: false,
        })
    }

    /// Wraps an already-built member collection, as done by the component
    /// base when deriving a signature from declarations.
    pub(crate) fn from_members(members: SignatureMembers, name: Option<ArcStr>) -> Self {
        let kind = match name {
            Some(name) => SignatureKind::Named(name),
            None => SignatureKind::Anonymous,
        };
        Self {
            inner: Arc::new(SignatureInner {
                members,
                kind,
            }),
            flipped: false,
        }
    }

    /// Returns the signature's name, or `None` for an anonymous signature.
    pub fn name(&self) -> Option<&ArcStr> {
        match &self.inner.kind {
            SignatureKind::Named(name) => Some(name),
            SignatureKind::Anonymous => None,
        }
    }

    /// Returns `true` for an anonymous (structurally compared) signature.
    pub fn is_anonymous(&self) -> bool {
        matches!(self.inner.kind, SignatureKind::Anonymous)
    }

    /// Returns a lightweight wrapper over the same signature with every
    /// member's flow inverted. Not a deep copy: both views share the same
    /// member collection.
    pub fn flip(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            flipped: !self.flipped,
        }
    }

    /// Returns `true` if this handle is a flipped view.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Returns the member collection, with this view's polarity applied.
    pub fn members(&self) -> SignatureMembers {
        let members = self.inner.members.clone();
        if self.flipped {
            members.flip()
        } else {
            members
        }
    }

    /// Freezes the member collection, recursively. Idempotent.
    pub fn freeze(&self) {
        self.inner.members.freeze();
    }

    /// Returns `true` once the signature has been frozen.
    pub fn is_frozen(&self) -> bool {
        self.inner.members.is_frozen()
    }

    /// Instantiates a concrete [`Interface`] mirroring this signature's
    /// member tree, with leaf signals named after their member paths.
    pub fn create(&self) -> Interface {
        self.create_at(&MemberPath::root())
    }

    /// Like [`create`](Self::create), but with leaf signal names rooted at
    /// the given path.
    pub fn create_at(&self, path: &MemberPath) -> Interface {
        Interface::from_parts(self.clone(), self.members().create(path))
    }

    /// Checks whether a candidate object structurally satisfies this
    /// signature, short-circuiting on the first violation.
    pub fn is_compliant(&self, obj: &dyn Wireable) -> bool {
        let mut reasons = Vec::new();
        self.check_obj(obj, &MemberPath::root(), true, &mut reasons)
    }

    /// Collects every way in which a candidate object violates this
    /// signature. Empty iff [`is_compliant`](Self::is_compliant) holds.
    pub fn compliance_violations(&self, obj: &dyn Wireable) -> Vec<String> {
        let mut reasons = Vec::new();
        self.check_obj(obj, &MemberPath::root(), false, &mut reasons);
        reasons
    }

    fn check_obj(
        &self,
        obj: &dyn Wireable,
        path: &MemberPath,
        fail_fast: bool,
        reasons: &mut Vec<String>,
    ) -> bool {
        let mut ok = true;
        for (name, member) in self.members().entries() {
            let child = path.child(name.clone());
            match obj.slot(name.as_str()) {
                None => {
                    reasons.push(format!("'{child}' is not present"));
                    ok = false;
                }
                Some(slot) => {
                    if !check_member(&member, member.dimensions(), &slot, &child, fail_fast, reasons)
                    {
                        ok = false;
                    }
                }
            }
            if !ok && fail_fast {
                return false;
            }
        }
        ok
    }

    /// Pairs every declared member with the corresponding slot on a
    /// compliant object, yielding (path, flow, slot) triples in
    /// lexicographic path order with the nested-`In` polarity flip applied.
    ///
    /// On a compliant object this never fails and yields exactly as many
    /// entries as `self.members().flatten(..)`.
    pub fn flatten(
        &self,
        obj: &dyn Wireable,
    ) -> Result<Vec<(MemberPath, Flow, Slot)>, WiringError> {
        let mut out = Vec::new();
        self.flatten_obj(obj, &MemberPath::root(), &mut out)?;
        Ok(out)
    }

    fn flatten_obj(
        &self,
        obj: &dyn Wireable,
        path: &MemberPath,
        out: &mut Vec<(MemberPath, Flow, Slot)>,
    ) -> Result<(), WiringError> {
        for (name, member) in self.members().entries() {
            let child = path.child(name.clone());
            let slot = obj.slot(name.as_str()).ok_or_else(|| {
                WiringError::Attribute(format!("'{child}' is not present on the object"))
            })?;
            if member.dimensions().is_empty() {
                if let Some(nested) = member.nested_signature() {
                    out.push((child.clone(), member.flow(), slot.clone()));
                    match &slot {
                        Slot::Interface(iface) => nested.flatten_obj(iface, &child, out)?,
                        _ => {
                            return Err(WiringError::Attribute(format!(
                                "'{child}' is expected to be an interface, but is {}",
                                slot.kind_name()
                            )))
                        }
                    }
                    continue;
                }
            }
            out.push((child, member.flow(), slot));
        }
        Ok(())
    }
}

fn check_member(
    member: &Member,
    dims: &[usize],
    slot: &Slot,
    path: &MemberPath,
    fail_fast: bool,
    reasons: &mut Vec<String>,
) -> bool {
    if let Some((&dim, rest)) = dims.split_first() {
        return match slot {
            Slot::Array(elements) => {
                if elements.len() != dim {
                    reasons.push(format!(
                        "'{path}' is expected to be an array of {dim} elements, but has {} elements",
                        elements.len()
                    ));
                    return false;
                }
                let mut ok = true;
                for (i, element) in elements.iter().enumerate() {
                    if !check_member(member, rest, element, &path.index(i), fail_fast, reasons) {
                        ok = false;
                        if fail_fast {
                            return false;
                        }
                    }
                }
                ok
            }
            _ => {
                reasons.push(format!(
                    "'{path}' is expected to be an array of {dim} elements, but is {}",
                    slot.kind_name()
                ));
                false
            }
        };
    }
    match member.payload() {
        MemberPayload::Port { shape, reset } => match slot {
            Slot::Value(value) => {
                let mut ok = true;
                if value.shape() != *shape {
                    reasons.push(format!(
                        "'{path}' has shape {}, but the signature declares {shape}",
                        value.shape()
                    ));
                    ok = false;
                    if fail_fast {
                        return false;
                    }
                }
                if let Value::Signal(signal) = value {
                    if signal.is_reset_less() {
                        reasons.push(format!("'{path}' is a reset-less signal"));
                        ok = false;
                        if fail_fast {
                            return false;
                        }
                    }
                    let declared = reset.map(Const::value).unwrap_or(0);
                    if signal.reset_value() != declared {
                        reasons.push(format!(
                            "'{path}' has a reset value {}, but the signature declares {declared}",
                            signal.reset_value()
                        ));
                        ok = false;
                        if fail_fast {
                            return false;
                        }
                    }
                }
                ok
            }
            _ => {
                reasons.push(format!(
                    "'{path}' is expected to be a value, but is {}",
                    slot.kind_name()
                ));
                false
            }
        },
        MemberPayload::Signature(nested) => {
            let nested = match member.flow() {
                Flow::In => nested.flip(),
                Flow::Out => nested.clone(),
            };
            match slot {
                Slot::Interface(iface) => nested.check_obj(iface, path, fail_fast, reasons),
                _ => {
                    reasons.push(format!(
                        "'{path}' is expected to be an interface, but is {}",
                        slot.kind_name()
                    ));
                    false
                }
            }
        }
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner.kind, &other.inner.kind) {
            (SignatureKind::Anonymous, SignatureKind::Anonymous) => {
                self.members() == other.members()
            }
            _ => Arc::ptr_eq(&self.inner, &other.inner) && self.flipped == other.flipped,
        }
    }
}
