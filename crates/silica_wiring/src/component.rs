//! Component base: derives a signature from declared fields and
//! instantiates the matching interface.

use crate::error::WiringError;
use crate::interface::{Interface, Slot, Wireable};
use crate::member::Member;
use crate::members::SignatureMembers;
use crate::signature::Signature;
use arcstr::ArcStr;
use silica_common::Shape;
use silica_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use std::collections::BTreeSet;

/// Warning: a field declaration that looks like an interface member but is
/// not tagged with a flow direction.
pub const W301: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 301,
};

/// One declared field of a component.
///
/// Only [`Member`](FieldDecl::Member) declarations become interface members.
/// A bare [`Shape`](FieldDecl::Shape) or [`Signature`](FieldDecl::Signature)
/// is a plausible member that was never tagged as input or output — usually
/// a designer typo — and produces a [`W301`] warning. Anything else is
/// declared [`Opaque`](FieldDecl::Opaque) and ignored.
#[derive(Debug, Clone)]
pub enum FieldDecl {
    /// A tagged interface member.
    Member(Member),
    /// An untagged shape; warned about, not instantiated.
    Shape(Shape),
    /// An untagged signature; warned about, not instantiated.
    Signature(Signature),
    /// A field with no interface meaning.
    Opaque,
}

impl From<Member> for FieldDecl {
    fn from(member: Member) -> Self {
        FieldDecl::Member(member)
    }
}

impl From<Shape> for FieldDecl {
    fn from(shape: Shape) -> Self {
        FieldDecl::Shape(shape)
    }
}

impl From<Signature> for FieldDecl {
    fn from(signature: Signature) -> Self {
        FieldDecl::Signature(signature)
    }
}

/// Builds a [`Component`] from an explicit list of field declarations.
#[derive(Debug)]
pub struct ComponentBuilder {
    name: ArcStr,
    fields: Vec<(ArcStr, FieldDecl)>,
}

impl ComponentBuilder {
    /// Starts a builder for a component with the given name.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declares one field.
    pub fn field(mut self, name: impl Into<ArcStr>, decl: impl Into<FieldDecl>) -> Self {
        self.fields.push((name.into(), decl.into()));
        self
    }

    /// Derives the component's signature from its tagged member
    /// declarations and instantiates the matching interface.
    ///
    /// Fails with [`WiringError::Name`] when a field would overwrite an
    /// earlier same-named declaration, and with
    /// [`WiringError::NotImplemented`] when no member declarations exist at
    /// all. Untagged plausible members produce a non-fatal [`W301`] warning
    /// through `sink`.
    pub fn build(self, sink: &DiagnosticSink) -> Result<Component, WiringError> {
        let ComponentBuilder { name, fields } = self;
        let members = SignatureMembers::new();
        let mut seen: BTreeSet<ArcStr> = BTreeSet::new();
        let mut member_count = 0usize;
        for (field, decl) in fields {
            if !seen.insert(field.clone()) {
                return Err(WiringError::Name(format!(
                    "field '{field}' of component '{name}' would overwrite a previously \
                     declared attribute"
                )));
            }
            match decl {
                FieldDecl::Member(member) => {
                    members.insert(field, member)?;
                    member_count += 1;
                }
                FieldDecl::Shape(shape) => {
                    sink.emit(
                        Diagnostic::warning(
                            W301,
                            format!(
                                "field '{field}' of component '{name}' has shape {shape} but \
                                 is not tagged as an input or output"
                            ),
                        )
                        .with_origin(field.as_str())
                        .with_help("wrap the field in input(...) or output(...)"),
                    );
                }
                FieldDecl::Signature(_) => {
                    sink.emit(
                        Diagnostic::warning(
                            W301,
                            format!(
                                "field '{field}' of component '{name}' is a signature but \
                                 is not tagged as an input or output"
                            ),
                        )
                        .with_origin(field.as_str())
                        .with_help("wrap the field in input(...) or output(...)"),
                    );
                }
                FieldDecl::Opaque => {}
            }
        }
        if member_count == 0 {
            return Err(WiringError::NotImplemented(format!(
                "component '{name}' does not declare any interface members"
            )));
        }
        let signature = Signature::from_members(members, Some(name.clone()));
        let interface = signature.create();
        Ok(Component {
            name,
            signature,
            interface,
        })
    }
}

/// A hardware component with a derived signature and an instantiated
/// interface, ready to participate in [`connect`](crate::connect::connect).
///
/// The derived signature is nominal: two components with identical member
/// sets still carry distinct signatures.
#[derive(Debug, Clone)]
pub struct Component {
    name: ArcStr,
    signature: Signature,
    interface: Interface,
}

impl Component {
    /// Returns the component's name.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Returns the component's instantiated interface.
    pub fn interface(&self) -> &Interface {
        &self.interface
    }
}

impl Wireable for Component {
    fn signature(&self) -> Signature {
        self.signature.clone()
    }

    fn slot(&self, name: &str) -> Option<Slot> {
        self.interface.slot(name)
    }
}
