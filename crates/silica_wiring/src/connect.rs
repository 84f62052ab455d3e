//! The connect algorithm: a synchronized structural walk over the member
//! trees of multiple compliant interfaces, emitting leaf-level drive
//! assignments.

use crate::error::WiringError;
use crate::flow::Flow;
use crate::interface::{Interface, Slot, Wireable};
use crate::member::{Member, MemberPayload};
use crate::members::SignatureMembers;
use crate::path::MemberPath;
use arcstr::ArcStr;
use silica_common::{Const, Shape, Signal, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// A directed, combinational drive of one signal leaf by another leaf value.
///
/// Assignments emitted by [`connect`] must be folded into the combinational
/// statement list of the enclosing scope, never into a clocked update:
/// placing them in a sequential context would introduce a cycle of latency
/// the signature contract never promised.
#[derive(Debug, Clone)]
pub struct Assignment {
    /// The driven signal leaf.
    pub target: Arc<Signal>,
    /// The driving value: a peer signal or a constant.
    pub value: Value,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

/// One participant of the walk: its handle name, the flip-adjusted member
/// view at the current level, and the object resolving names to slots.
struct Part<'a> {
    handle: &'a str,
    members: SignatureMembers,
    node: Node<'a>,
}

enum Node<'a> {
    Object(&'a dyn Wireable),
    Interface(Interface),
}

impl Node<'_> {
    fn slot(&self, name: &str) -> Option<Slot> {
        match self {
            Node::Object(obj) => obj.slot(name),
            Node::Interface(iface) => iface.slot(name),
        }
    }
}

/// A port member observed on one participant at the current path.
struct PortMember {
    part: usize,
    flow: Flow,
    shape: Shape,
    reset: Option<Const>,
    dims: Vec<usize>,
}

/// Wires the given named interface objects together.
///
/// Every handle is first checked for compliance with its own declared
/// signature; any violation fails the whole connection with a
/// [`WiringError::Connection`] aggregating every reason. On success all
/// participating signatures are frozen, then the member trees are walked in
/// lexicographic path order, pairing same-path members across all handles:
/// nested signature members recurse, port members are validated (flow
/// cardinality, bit width, reset agreement) and expanded across their array
/// dimensions into one [`Assignment`] per driven leaf.
///
/// The connection is all-or-nothing: on error, no assignments are returned
/// and none should be considered applied. Repeated calls with identical
/// inputs produce identical assignment lists.
pub fn connect(handles: &[(&str, &dyn Wireable)]) -> Result<Vec<Assignment>, WiringError> {
    for (handle, obj) in handles {
        let signature = obj.signature();
        let violations = signature.compliance_violations(*obj);
        if !violations.is_empty() {
            return Err(WiringError::Connection(format!(
                "connected object '{handle}' does not comply with its own signature: {}",
                violations.join("; ")
            )));
        }
    }
    // Later structural drift would invalidate the pairing computed below.
    for (_, obj) in handles {
        obj.signature().freeze();
    }

    let parts: Vec<Part> = handles
        .iter()
        .map(|&(handle, obj)| Part {
            handle,
            members: obj.signature().members(),
            node: Node::Object(obj),
        })
        .collect();

    let mut assignments = Vec::new();
    walk(&parts, &MemberPath::root(), &mut assignments)?;
    Ok(assignments)
}

fn walk<'a>(
    parts: &[Part<'a>],
    path: &MemberPath,
    assignments: &mut Vec<Assignment>,
) -> Result<(), WiringError> {
    let mut names: BTreeSet<ArcStr> = BTreeSet::new();
    for part in parts {
        names.extend(part.members.names());
    }
    for name in names {
        let child = path.child(name.clone());

        let mut present: Vec<(usize, Member)> = Vec::new();
        let mut absent: Vec<usize> = Vec::new();
        for (index, part) in parts.iter().enumerate() {
            match part.members.get(name.as_str()) {
                Ok(member) => present.push((index, member)),
                Err(_) => absent.push(index),
            }
        }
        // The handle whose walk would next report a later path is the one
        // missing the member; the total path order makes this deterministic.
        if let Some(&missing) = absent.first() {
            let holder = present[0].0;
            return Err(WiringError::Connection(format!(
                "Member '{}' is present in '{}', but not in '{}'",
                child.render(parts[holder].handle),
                parts[holder].handle,
                parts[missing].handle
            )));
        }

        let mut signatures: Vec<(usize, Member)> = Vec::new();
        let mut ports: Vec<PortMember> = Vec::new();
        for (index, member) in present {
            match member.payload() {
                MemberPayload::Signature(_) => signatures.push((index, member.clone())),
                MemberPayload::Port { shape, reset } => ports.push(PortMember {
                    part: index,
                    flow: member.flow(),
                    shape: *shape,
                    reset: *reset,
                    dims: member.dimensions().to_vec(),
                }),
            }
        }
        if !signatures.is_empty() && !ports.is_empty() {
            return Err(WiringError::Connection(format!(
                "Cannot connect '{}': it is a signature member in '{}' but a port member in '{}'",
                child,
                parts[signatures[0].0].handle,
                parts[ports[0].part].handle
            )));
        }
        if ports.is_empty() {
            descend(parts, &signatures, &child, &name, assignments)?;
        } else {
            connect_ports(parts, &ports, &child, &name, assignments)?;
        }
    }
    Ok(())
}

/// Recurses into same-path signature members, index by index for
/// dimensioned members. Nothing is connected at this level; the nested
/// leaves are paired by the recursive walk.
fn descend<'a>(
    parts: &[Part<'a>],
    members: &[(usize, Member)],
    path: &MemberPath,
    name: &ArcStr,
    assignments: &mut Vec<Assignment>,
) -> Result<(), WiringError> {
    let (first_index, first) = &members[0];
    for (index, member) in &members[1..] {
        if member.dimensions() != first.dimensions() {
            return Err(WiringError::Connection(format!(
                "Cannot connect '{}' with dimensions {:?} and '{}' with dimensions {:?}",
                path.render(parts[*first_index].handle),
                first.dimensions(),
                path.render(parts[*index].handle),
                member.dimensions()
            )));
        }
    }
    let mut sub: Vec<(usize, SignatureMembers, Slot)> = Vec::new();
    for (index, member) in members {
        let nested = member
            .nested_signature()
            .ok_or_else(|| inconsistent(parts[*index].handle, path))?;
        let slot = parts[*index]
            .node
            .slot(name.as_str())
            .ok_or_else(|| inconsistent(parts[*index].handle, path))?;
        sub.push((*index, nested.members(), slot));
    }
    descend_dims(parts, &sub, first.dimensions(), path, assignments)
}

fn descend_dims<'a>(
    parts: &[Part<'a>],
    sub: &[(usize, SignatureMembers, Slot)],
    dims: &[usize],
    path: &MemberPath,
    assignments: &mut Vec<Assignment>,
) -> Result<(), WiringError> {
    if let Some((&dim, rest)) = dims.split_first() {
        for i in 0..dim {
            let mut next = Vec::new();
            for (index, members, slot) in sub {
                let element = slot_element(slot, i, dim, parts[*index].handle, path)?;
                next.push((*index, members.clone(), element));
            }
            descend_dims(parts, &next, rest, &path.index(i), assignments)?;
        }
        Ok(())
    } else {
        let mut nested_parts = Vec::new();
        for (index, members, slot) in sub {
            let iface = match slot {
                Slot::Interface(iface) => iface.clone(),
                _ => return Err(inconsistent(parts[*index].handle, path)),
            };
            nested_parts.push(Part {
                handle: parts[*index].handle,
                members: members.clone(),
                node: Node::Interface(iface),
            });
        }
        walk(&nested_parts, path, assignments)
    }
}

/// Validates and wires the port members collected at one shared path.
fn connect_ports<'a>(
    parts: &[Part<'a>],
    ports: &[PortMember],
    path: &MemberPath,
    name: &ArcStr,
    assignments: &mut Vec<Assignment>,
) -> Result<(), WiringError> {
    let first = &ports[0];
    for port in &ports[1..] {
        // Only the bit width is load-bearing for wiring legality; paired
        // members may disagree on signedness.
        if port.shape.width() != first.shape.width() {
            return Err(WiringError::Connection(format!(
                "Cannot connect '{}' with shape {} and '{}' with shape {}: bit widths do not match",
                path.render(parts[first.part].handle),
                first.shape,
                path.render(parts[port.part].handle),
                port.shape
            )));
        }
        if port.dims != first.dims {
            return Err(WiringError::Connection(format!(
                "Cannot connect '{}' with dimensions {:?} and '{}' with dimensions {:?}",
                path.render(parts[first.part].handle),
                first.dims,
                path.render(parts[port.part].handle),
                port.dims
            )));
        }
    }
    let declared: Vec<(usize, Const)> = ports
        .iter()
        .filter_map(|port| port.reset.map(|reset| (port.part, reset)))
        .collect();
    if let Some((base_part, base)) = declared.first() {
        for (part, reset) in &declared[1..] {
            if reset.value() != base.value() {
                return Err(WiringError::Connection(format!(
                    "Cannot connect '{}' with reset value {} and '{}' with reset value {}",
                    path.render(parts[*base_part].handle),
                    base.value(),
                    path.render(parts[*part].handle),
                    reset.value()
                )));
            }
        }
    }

    let out_parts: Vec<usize> = ports
        .iter()
        .filter(|port| port.flow == Flow::Out)
        .map(|port| port.part)
        .collect();
    if out_parts.len() > 1 {
        let listed = out_parts
            .iter()
            .map(|&part| format!("'{}'", path.render(parts[part].handle)))
            .collect::<Vec<_>>()
            .join(" and ");
        return Err(WiringError::Connection(format!(
            "Cannot connect several output members {listed} together"
        )));
    }
    let out_part = match out_parts.first() {
        Some(&part) => part,
        // Input members left without a driver keep their own resets, which
        // the agreement check above has already proven consistent.
        None => return Ok(()),
    };

    let out_slot = parts[out_part]
        .node
        .slot(name.as_str())
        .ok_or_else(|| inconsistent(parts[out_part].handle, path))?;
    let mut in_slots = Vec::new();
    for port in ports.iter().filter(|port| port.flow == Flow::In) {
        let slot = parts[port.part]
            .node
            .slot(name.as_str())
            .ok_or_else(|| inconsistent(parts[port.part].handle, path))?;
        in_slots.push((port.part, slot));
    }
    emit(parts, out_part, &out_slot, &in_slots, &first.dims, path, assignments)
}

/// Expands one out slot against every in slot across the array dimensions,
/// index by index, emitting one assignment per driven signal leaf.
fn emit<'a>(
    parts: &[Part<'a>],
    out_part: usize,
    out_slot: &Slot,
    in_slots: &[(usize, Slot)],
    dims: &[usize],
    path: &MemberPath,
    assignments: &mut Vec<Assignment>,
) -> Result<(), WiringError> {
    if let Some((&dim, rest)) = dims.split_first() {
        for i in 0..dim {
            let out_element = slot_element(out_slot, i, dim, parts[out_part].handle, path)?;
            let mut in_elements = Vec::new();
            for (part, slot) in in_slots {
                in_elements.push((*part, slot_element(slot, i, dim, parts[*part].handle, path)?));
            }
            emit(
                parts,
                out_part,
                &out_element,
                &in_elements,
                rest,
                &path.index(i),
                assignments,
            )?;
        }
        return Ok(());
    }
    let out_value = match out_slot {
        Slot::Value(value) => value,
        _ => return Err(inconsistent(parts[out_part].handle, path)),
    };
    for (part, slot) in in_slots {
        let in_value = match slot {
            Slot::Value(value) => value,
            _ => return Err(inconsistent(parts[*part].handle, path)),
        };
        match in_value {
            // Constants are never driven. Pairing one against an equal
            // output constant is a no-op; anything else cannot be wired.
            Value::Const(constant) => {
                let agrees = matches!(
                    out_value,
                    Value::Const(out_const) if out_const.value() == constant.value()
                );
                if !agrees {
                    return Err(WiringError::Connection(format!(
                        "Cannot connect to the input member '{}' that has a constant value {}",
                        path.render(parts[*part].handle),
                        constant.value()
                    )));
                }
            }
            Value::Signal(signal) => {
                assignments.push(Assignment {
                    target: Arc::clone(signal),
                    value: out_value.clone(),
                });
            }
        }
    }
    Ok(())
}

fn slot_element(
    slot: &Slot,
    index: usize,
    dim: usize,
    handle: &str,
    path: &MemberPath,
) -> Result<Slot, WiringError> {
    match slot {
        Slot::Array(elements) if elements.len() == dim => Ok(elements[index].clone()),
        _ => Err(inconsistent(handle, path)),
    }
}

/// An object whose slots disagree with the signature it reported. Compliance
/// checking rules this out for well-behaved `Wireable` implementations.
fn inconsistent(handle: &str, path: &MemberPath) -> WiringError {
    WiringError::Connection(format!(
        "connected object '{handle}' is inconsistent with its signature at '{}'",
        path.render(handle)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::flipped;
    use crate::member::{input, output};
    use crate::signature::Signature;
    use std::collections::BTreeMap;

    /// A hand-built wireable whose leaves can be constants.
    struct Raw {
        signature: Signature,
        slots: BTreeMap<String, Slot>,
    }

    impl Raw {
        fn new(signature: Signature) -> Self {
            Self {
                signature,
                slots: BTreeMap::new(),
            }
        }

        fn with_const(mut self, name: &str, value: i64, width: u32) -> Self {
            let constant = Const::new(value, width).unwrap();
            self.slots
                .insert(name.to_string(), Slot::Value(Value::Const(constant)));
            self
        }

        fn with_signal(mut self, name: &str, width: u32) -> Self {
            let signal = Signal::new(name, width);
            self.slots
                .insert(name.to_string(), Slot::Value(Value::Signal(Arc::new(signal))));
            self
        }
    }

    impl Wireable for Raw {
        fn signature(&self) -> Signature {
            self.signature.clone()
        }

        fn slot(&self, name: &str) -> Option<Slot> {
            self.slots.get(name).cloned()
        }
    }

    fn leaf_signal(obj: &dyn Wireable, name: &str) -> Arc<Signal> {
        match obj.slot(name).unwrap() {
            Slot::Value(Value::Signal(signal)) => signal,
            other => panic!("expected a signal leaf, got {}", other.kind_name()),
        }
    }

    #[test]
    fn single_port_pair() {
        let p = Signature::new([("a", output(1))]).unwrap().create();
        let q = Signature::new([("a", input(1))]).unwrap().create();
        let assignments = connect(&[("p", &p), ("q", &q)]).unwrap();
        assert_eq!(assignments.len(), 1);
        assert!(Arc::ptr_eq(&assignments[0].target, &leaf_signal(&q, "a")));
        let value = assignments[0].value.as_signal().unwrap();
        assert!(Arc::ptr_eq(value, &leaf_signal(&p, "a")));
    }

    #[test]
    fn connect_freezes_participant_signatures() {
        let sig_p = Signature::new([("a", output(1))]).unwrap();
        let sig_q = Signature::new([("a", input(1))]).unwrap();
        let p = sig_p.create();
        let q = sig_q.create();
        connect(&[("p", &p), ("q", &q)]).unwrap();
        assert!(sig_p.is_frozen());
        assert!(sig_q.is_frozen());
    }

    #[test]
    fn symmetric_roles_invert_the_assignment() {
        let p = Signature::new([("x", output(1)), ("y", input(1))])
            .unwrap()
            .create();
        let q = Signature::new([("x", input(1)), ("y", output(1))])
            .unwrap()
            .create();
        let assignments = connect(&[("p", &p), ("q", &q)]).unwrap();
        assert_eq!(assignments.len(), 2);
        // x flows p -> q, y flows q -> p.
        assert!(Arc::ptr_eq(&assignments[0].target, &leaf_signal(&q, "x")));
        assert!(Arc::ptr_eq(&assignments[1].target, &leaf_signal(&p, "y")));
    }

    #[test]
    fn connection_against_flipped_view() {
        // {a: Out(1)} connected to the flip of another {a: Out(1)} instance.
        let sig = Signature::new([("a", output(1))]).unwrap();
        let p = sig.create();
        let other = Signature::new([("a", output(1))]).unwrap();
        let q = other.create();
        let q_view = flipped(&q);
        let assignments = connect(&[("p", &p), ("q", &q_view)]).unwrap();
        assert_eq!(assignments.len(), 1);
        assert!(Arc::ptr_eq(&assignments[0].target, &leaf_signal(&q, "a")));
    }

    #[test]
    fn several_outputs_are_rejected() {
        let p = Signature::new([("a", output(8))]).unwrap().create();
        let q = Signature::new([("a", output(8))]).unwrap().create();
        let err = connect(&[("p", &p), ("q", &q)]).unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("'p.a'"), "message: {message}");
        assert!(message.contains("'q.a'"), "message: {message}");
        assert!(message.contains("several output members"), "message: {message}");
        assert!(message.contains("together"), "message: {message}");
    }

    #[test]
    fn reset_disagreement_is_rejected() {
        let p = Signature::new([("a", output(1).with_reset(0).unwrap())])
            .unwrap()
            .create();
        let q = Signature::new([("a", input(1).with_reset(1).unwrap())])
            .unwrap()
            .create();
        let err = connect(&[("p", &p), ("q", &q)]).unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("reset value 0"), "message: {message}");
        assert!(message.contains("reset value 1"), "message: {message}");
    }

    #[test]
    fn reset_checked_only_when_both_declared() {
        let p = Signature::new([("a", output(2).with_reset(2).unwrap())])
            .unwrap()
            .create();
        // q declares no reset; its signals reset to zero, and that is not
        // compared against p's declared reset.
        let q = Signature::new([("a", input(2))]).unwrap().create();
        assert!(connect(&[("p", &p), ("q", &q)]).is_ok());
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let p = Signature::new([("a", output(8))]).unwrap().create();
        let q = Signature::new([("a", input(16))]).unwrap().create();
        let err = connect(&[("p", &p), ("q", &q)]).unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("unsigned(8)"), "message: {message}");
        assert!(message.contains("unsigned(16)"), "message: {message}");
    }

    #[test]
    fn signedness_mismatch_is_accepted() {
        // Deliberate permissiveness: only bit widths are load-bearing for
        // wiring legality, so signed(4) may drive unsigned(4).
        let p = Signature::new([("a", output(silica_common::Shape::signed(4)))])
            .unwrap()
            .create();
        let q = Signature::new([("a", input(4))]).unwrap().create();
        let assignments = connect(&[("p", &p), ("q", &q)]).unwrap();
        assert_eq!(assignments.len(), 1);
    }

    #[test]
    fn arrays_connect_index_by_index() {
        let p = Signature::new([("lane", output(1).array([3]))])
            .unwrap()
            .create();
        let q = Signature::new([("lane", input(1).array([3]))])
            .unwrap()
            .create();
        let assignments = connect(&[("p", &p), ("q", &q)]).unwrap();
        assert_eq!(assignments.len(), 3);
        let q_lanes = q.slot("lane").unwrap();
        let p_lanes = p.slot("lane").unwrap();
        for (i, assignment) in assignments.iter().enumerate() {
            let q_leaf = q_lanes.as_array().unwrap()[i]
                .as_value()
                .unwrap()
                .as_signal()
                .unwrap()
                .clone();
            let p_leaf = p_lanes.as_array().unwrap()[i]
                .as_value()
                .unwrap()
                .as_signal()
                .unwrap()
                .clone();
            assert!(Arc::ptr_eq(&assignment.target, &q_leaf));
            assert!(Arc::ptr_eq(assignment.value.as_signal().unwrap(), &p_leaf));
        }
    }

    #[test]
    fn array_dimension_disagreement_is_rejected() {
        let p = Signature::new([("lane", output(1).array([3]))])
            .unwrap()
            .create();
        let q = Signature::new([("lane", input(1).array([2]))])
            .unwrap()
            .create();
        let err = connect(&[("p", &p), ("q", &q)]).unwrap_err();
        assert!(format!("{err}").contains("dimensions"));
    }

    #[test]
    fn missing_member_attribution() {
        let p = Signature::new([("a", output(1))]).unwrap().create();
        let q = Signature::new([("a", input(1)), ("b", input(1))])
            .unwrap()
            .create();
        let err = connect(&[("p", &p), ("q", &q)]).unwrap_err();
        assert_eq!(
            format!("{err}"),
            "Member 'q.b' is present in 'q', but not in 'p'"
        );
    }

    #[test]
    fn mixed_signature_and_port_members_are_rejected() {
        let inner = Signature::new([("valid", output(1))]).unwrap();
        let p = Signature::new([("bus", output(inner))]).unwrap().create();
        let q = Signature::new([("bus", input(1))]).unwrap().create();
        let err = connect(&[("p", &p), ("q", &q)]).unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("'bus'"), "message: {message}");
        assert!(message.contains("signature member"), "message: {message}");
        assert!(message.contains("port member"), "message: {message}");
    }

    #[test]
    fn nested_signatures_connect_with_inverted_inner_flows() {
        let stream = Signature::new([("ready", input(1)), ("valid", output(1))]).unwrap();
        let p = Signature::new([("bus", output(stream.clone()))])
            .unwrap()
            .create();
        let q = Signature::new([("bus", input(stream))]).unwrap().create();
        let assignments = connect(&[("p", &p), ("q", &q)]).unwrap();
        assert_eq!(assignments.len(), 2);

        let p_bus = p.slot("bus").unwrap();
        let p_bus = p_bus.as_interface().unwrap();
        let q_bus = q.slot("bus").unwrap();
        let q_bus = q_bus.as_interface().unwrap();
        // ready flows q -> p, valid flows p -> q; ready sorts first.
        assert!(Arc::ptr_eq(
            &assignments[0].target,
            &leaf_signal(p_bus, "ready")
        ));
        assert!(Arc::ptr_eq(
            assignments[0].value.as_signal().unwrap(),
            &leaf_signal(q_bus, "ready")
        ));
        assert!(Arc::ptr_eq(
            &assignments[1].target,
            &leaf_signal(q_bus, "valid")
        ));
        assert!(Arc::ptr_eq(
            assignments[1].value.as_signal().unwrap(),
            &leaf_signal(p_bus, "valid")
        ));
    }

    #[test]
    fn inputs_without_a_driver_emit_nothing() {
        let p = Signature::new([("a", input(1))]).unwrap().create();
        let q = Signature::new([("a", input(1))]).unwrap().create();
        let assignments = connect(&[("p", &p), ("q", &q)]).unwrap();
        assert!(assignments.is_empty());
    }

    #[test]
    fn constant_input_with_equal_constant_output_emits_nothing() {
        let p = Raw::new(Signature::new([("a", output(1))]).unwrap()).with_const("a", 1, 1);
        let q = Raw::new(Signature::new([("a", input(1))]).unwrap()).with_const("a", 1, 1);
        let assignments = connect(&[("p", &p), ("q", &q)]).unwrap();
        assert!(assignments.is_empty());
    }

    #[test]
    fn constant_input_with_unequal_constant_output_is_rejected() {
        let p = Raw::new(Signature::new([("a", output(1))]).unwrap()).with_const("a", 0, 1);
        let q = Raw::new(Signature::new([("a", input(1))]).unwrap()).with_const("a", 1, 1);
        let err = connect(&[("p", &p), ("q", &q)]).unwrap_err();
        assert!(format!("{err}")
            .contains("Cannot connect to the input member 'q.a' that has a constant value 1"));
    }

    #[test]
    fn driving_a_constant_input_from_a_signal_is_rejected() {
        let p = Raw::new(Signature::new([("a", output(1))]).unwrap()).with_signal("a", 1);
        let q = Raw::new(Signature::new([("a", input(1))]).unwrap()).with_const("a", 1, 1);
        let err = connect(&[("p", &p), ("q", &q)]).unwrap_err();
        assert!(format!("{err}")
            .contains("Cannot connect to the input member 'q.a' that has a constant value 1"));
    }

    #[test]
    fn constant_output_drives_signal_inputs() {
        let p = Raw::new(Signature::new([("a", output(1))]).unwrap()).with_const("a", 1, 1);
        let q = Signature::new([("a", input(1))]).unwrap().create();
        let assignments = connect(&[("p", &p), ("q", &q)]).unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].value.as_const().unwrap().value(), 1);
    }

    #[test]
    fn non_compliant_handle_fails_with_aggregated_reasons() {
        let sig = Signature::new([("a", output(8)), ("b", output(1))]).unwrap();
        let p = Raw::new(sig).with_signal("a", 4);
        let q = Signature::new([("a", input(8)), ("b", input(1))])
            .unwrap()
            .create();
        let err = connect(&[("p", &p), ("q", &q)]).unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("'p' does not comply"), "message: {message}");
        assert!(message.contains("'a' has shape"), "message: {message}");
        assert!(message.contains("'b' is not present"), "message: {message}");
    }

    #[test]
    fn connection_is_deterministic() {
        let p = Signature::new([("x", output(1)), ("y", output(2)), ("z", input(1))])
            .unwrap()
            .create();
        let q = Signature::new([("x", input(1)), ("y", input(2)), ("z", output(1))])
            .unwrap()
            .create();
        let first: Vec<String> = connect(&[("p", &p), ("q", &q)])
            .unwrap()
            .iter()
            .map(|a| a.to_string())
            .collect();
        let second: Vec<String> = connect(&[("p", &p), ("q", &q)])
            .unwrap()
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(first, second);
        // Emission follows lexicographic member order.
        assert_eq!(first.len(), 3);
        assert_eq!(first[0], "x = x");
        assert_eq!(first[1], "y = y");
        assert_eq!(first[2], "z = z");
    }

    #[test]
    fn empty_connection_is_a_no_op() {
        assert!(connect(&[]).unwrap().is_empty());
    }

    #[test]
    fn single_handle_connects_trivially() {
        let p = Signature::new([("a", output(1)), ("b", input(1))])
            .unwrap()
            .create();
        let assignments = connect(&[("p", &p)]).unwrap();
        assert!(assignments.is_empty());
    }
}
