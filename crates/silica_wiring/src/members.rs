//! The ordered, append-only member collection backing every signature.

use crate::error::WiringError;
use crate::flow::Flow;
use crate::interface::Slot;
use crate::member::{Member, MemberPayload};
use crate::path::MemberPath;
use arcstr::ArcStr;
use silica_common::{Signal, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// The reserved attribute name through which every interface exposes its
/// signature; no member may shadow it.
const RESERVED_NAME: &str = "signature";

#[derive(Debug)]
struct MembersInner {
    map: Mutex<BTreeMap<ArcStr, Member>>,
    frozen: AtomicBool,
}

/// An ordered-by-name, append-only mapping from member names to [`Member`]s.
///
/// Iteration order is lexicographic by name, not insertion order, so that
/// the connect walk pairs members identically across independently authored
/// signatures. Collections share their storage: [`flip`](Self::flip) returns
/// a zero-allocation view onto the same map, and cloning a collection clones
/// the handle, not the members.
///
/// Cyclic signatures (a signature reachable from its own members) are not
/// supported; signatures are declared top-down.
#[derive(Debug, Clone)]
pub struct SignatureMembers {
    inner: Arc<MembersInner>,
    flipped: bool,
}

impl SignatureMembers {
    /// Creates a new, empty collection.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MembersInner {
                map: Mutex::new(BTreeMap::new()),
                frozen: AtomicBool::new(false),
            }),
            flipped: false,
        }
    }

    fn adjust(&self, member: Member) -> Member {
        if self.flipped {
            member.flip()
        } else {
            member
        }
    }

    /// Inserts a member under the given name.
    ///
    /// Fails with [`WiringError::Name`] when the name is not a valid public
    /// identifier or is the reserved name `signature`, and with
    /// [`WiringError::Signature`] when the name already exists or the
    /// collection is frozen. Inserting through a flipped view stores the
    /// flipped member, so the mutation is visible through every view of the
    /// collection in the appropriate polarity.
    pub fn insert(&self, name: impl Into<ArcStr>, member: Member) -> Result<(), WiringError> {
        let name = name.into();
        validate_name(&name)?;
        let mut map = self.inner.map.lock().unwrap();
        if self.inner.frozen.load(Ordering::Relaxed) {
            return Err(WiringError::Signature(format!(
                "cannot insert member '{name}' into a frozen signature"
            )));
        }
        if map.contains_key(&name) {
            return Err(WiringError::Signature(format!(
                "member '{name}' already exists in the signature and cannot be replaced"
            )));
        }
        map.insert(name, self.adjust(member));
        Ok(())
    }

    /// Looks up a member by name.
    ///
    /// Fails with [`WiringError::Signature`] when the member is structurally
    /// absent, which callers need to distinguish from invalid-access errors.
    pub fn get(&self, name: &str) -> Result<Member, WiringError> {
        let map = self.inner.map.lock().unwrap();
        map.get(name)
            .map(|member| self.adjust(member.clone()))
            .ok_or_else(|| {
                WiringError::Signature(format!("signature does not have a member '{name}'"))
            })
    }

    /// Returns `true` if a member with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.map.lock().unwrap().contains_key(name)
    }

    /// Returns all member names in lexicographic order.
    pub fn names(&self) -> Vec<ArcStr> {
        self.inner.map.lock().unwrap().keys().cloned().collect()
    }

    /// Returns all (name, member) pairs in lexicographic name order, with
    /// this view's polarity applied.
    pub fn entries(&self) -> Vec<(ArcStr, Member)> {
        self.inner
            .map
            .lock()
            .unwrap()
            .iter()
            .map(|(name, member)| (name.clone(), self.adjust(member.clone())))
            .collect()
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.inner.map.lock().unwrap().len()
    }

    /// Returns `true` if the collection has no members.
    pub fn is_empty(&self) -> bool {
        self.inner.map.lock().unwrap().is_empty()
    }

    /// Returns a view of the same collection with every member's flow
    /// inverted. The view shares storage with this collection: mutations
    /// through either are visible through both, in inverse polarity.
    pub fn flip(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            flipped: !self.flipped,
        }
    }

    /// Permanently locks the collection against further insertions, and
    /// recursively freezes every nested signature. Idempotent.
    pub fn freeze(&self) {
        if self.inner.frozen.swap(true, Ordering::Relaxed) {
            return;
        }
        let map = self.inner.map.lock().unwrap();
        for member in map.values() {
            if let MemberPayload::Signature(signature) = member.payload() {
                signature.freeze();
            }
        }
    }

    /// Returns `true` once the collection has been frozen.
    pub fn is_frozen(&self) -> bool {
        self.inner.frozen.load(Ordering::Relaxed)
    }

    /// Enumerates (path, member) pairs depth-first in lexicographic path
    /// order, recursing into scalar nested signatures through the
    /// flip-adjusted view. Dimensioned signature members are enumerated as
    /// aggregates, without descending per element.
    pub fn flatten(&self, path: &MemberPath) -> Vec<(MemberPath, Member)> {
        let mut out = Vec::new();
        self.flatten_into(path, &mut out);
        out
    }

    fn flatten_into(&self, path: &MemberPath, out: &mut Vec<(MemberPath, Member)>) {
        for (name, member) in self.entries() {
            let child = path.child(name);
            if member.dimensions().is_empty() {
                if let Some(nested) = member.nested_signature() {
                    out.push((child.clone(), member));
                    nested.members().flatten_into(&child, out);
                    continue;
                }
            }
            out.push((child, member));
        }
    }

    /// Recursively synthesizes the concrete slot tree for an interface:
    /// fresh signals for port members (named by joining the path with `__`),
    /// nested arrays for dimensioned members, and nested interfaces for
    /// signature members.
    pub(crate) fn create(&self, path: &MemberPath) -> BTreeMap<ArcStr, Slot> {
        let mut slots = BTreeMap::new();
        for (name, member) in self.entries() {
            let child = path.child(name.clone());
            slots.insert(name, create_slot(&member, member.dimensions(), &child));
        }
        slots
    }
}

fn create_slot(member: &Member, dims: &[usize], path: &MemberPath) -> Slot {
    if let Some((&dim, rest)) = dims.split_first() {
        Slot::Array(
            (0..dim)
                .map(|i| create_slot(member, rest, &path.index(i)))
                .collect(),
        )
    } else {
        match member.payload() {
            MemberPayload::Port { shape, reset } => {
                let mut signal = Signal::new(path.leaf_name(), *shape);
                if let Some(reset) = reset {
                    signal = signal.with_reset(*reset);
                }
                Slot::Value(Value::Signal(Arc::new(signal)))
            }
            MemberPayload::Signature(signature) => {
                let nested = match member.flow() {
                    Flow::In => signature.flip(),
                    Flow::Out => signature.clone(),
                };
                Slot::Interface(nested.create_at(path))
            }
        }
    }
}

fn validate_name(name: &str) -> Result<(), WiringError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !valid {
        return Err(WiringError::Name(format!(
            "member name '{name}' is not a valid identifier"
        )));
    }
    if name == RESERVED_NAME {
        return Err(WiringError::Name(format!(
            "member name '{RESERVED_NAME}' is reserved"
        )));
    }
    Ok(())
}

impl Default for SignatureMembers {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SignatureMembers {
    /// Two collections are equal iff their recursively flattened
    /// (path, member) sequences are equal element-wise, so a collection
    /// compares equal to a flipped view of a matching inverse collection.
    fn eq(&self, other: &Self) -> bool {
        self.flatten(&MemberPath::root()) == other.flatten(&MemberPath::root())
    }
}
