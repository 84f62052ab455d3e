//! Error taxonomy for signature construction, member access, and connection.

use thiserror::Error;

/// Errors raised while building signatures, accessing members, or wiring
/// interfaces together.
///
/// Every variant is a design-time programming error: none is recoverable,
/// and every failure is surfaced synchronously to the immediate caller.
/// [`Connection`](WiringError::Connection) errors are all-or-nothing — when
/// `connect` fails, no assignment has been emitted.
#[derive(Debug, Error)]
pub enum WiringError {
    /// A malformed shape, description, or reset argument.
    #[error("{0}")]
    Type(String),

    /// A reset value supplied where the member payload cannot carry one.
    #[error("{0}")]
    Value(String),

    /// An invalid or reserved member name, or a name collision.
    #[error("{0}")]
    Name(String),

    /// A property access that is invalid for the member's payload kind.
    #[error("{0}")]
    Attribute(String),

    /// A required declaration that was never provided.
    #[error("{0}")]
    NotImplemented(String),

    /// A structural mutation violation on a signature members collection:
    /// duplicate insertion, insertion after freezing, or lookup of an
    /// undeclared member.
    #[error("{0}")]
    Signature(String),

    /// A structural mismatch detected while connecting interfaces. The
    /// message always names the offending path(s) and handle name(s).
    #[error("{0}")]
    Connection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_message() {
        let err = WiringError::Connection("Cannot connect 'p.a'".into());
        assert_eq!(format!("{err}"), "Cannot connect 'p.a'");
    }

    #[test]
    fn variants_are_distinguishable() {
        let err = WiringError::Name("bad name".into());
        assert!(matches!(err, WiringError::Name(_)));
        let err = WiringError::Signature("frozen".into());
        assert!(matches!(err, WiringError::Signature(_)));
    }
}
