//! Paths identifying members within a nested interface tree.

use arcstr::ArcStr;
use std::fmt;

/// One step along a member path: a member name or an array index.
///
/// The derived ordering (names before indices, names compared
/// lexicographically) gives paths a total order, which the connect walk
/// relies on for deterministic diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathStep {
    /// A named member.
    Name(ArcStr),
    /// An element of an array member.
    Index(usize),
}

/// A path from the root of an interface to one of its members,
/// e.g. `bus.data[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberPath {
    steps: Vec<PathStep>,
}

impl MemberPath {
    /// Returns the empty path, designating the interface itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the path extended by a member name.
    pub fn child(&self, name: impl Into<ArcStr>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep::Name(name.into()));
        Self { steps }
    }

    /// Returns the path extended by an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep::Index(index));
        Self { steps }
    }

    /// Returns the steps of this path, outermost first.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Returns `true` for the empty path.
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Derives a flat signal name by joining the steps with `__`,
    /// e.g. `bus__data__0`. The result is a valid HDL identifier as long
    /// as every name step is one.
    pub fn leaf_name(&self) -> String {
        let mut parts = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            match step {
                PathStep::Name(name) => parts.push(name.to_string()),
                PathStep::Index(index) => parts.push(index.to_string()),
            }
        }
        parts.join("__")
    }

    /// Renders the path prefixed by a handle name, e.g. `p.a[0]`.
    pub fn render(&self, handle: &str) -> String {
        let mut out = String::from(handle);
        for step in &self.steps {
            match step {
                PathStep::Name(name) => {
                    out.push('.');
                    out.push_str(name);
                }
                PathStep::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
            }
        }
        out
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for step in &self.steps {
            match step {
                PathStep::Name(name) => {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                PathStep::Index(index) => {
                    write!(f, "[{index}]")?;
                }
            }
            first = false;
        }
        Ok(())
    }
}
