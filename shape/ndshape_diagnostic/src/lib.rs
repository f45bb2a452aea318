//! Error reporting for the ndshape type engine.
//!
//! Every fallible operation in the engine returns `Result<T, ShapeError>`.
//! A `ShapeError` carries a closed [`ErrorKind`] plus a human-readable
//! message that is either a static literal or an owned formatted string;
//! [`std::borrow::Cow`] keeps the two cases in one slot without extra
//! allocation for the static case.
//!
//! The kinds form a closed set shared with the external grammar
//! collaborators: `Lex`, `Parse` and `Os` are never produced by the core
//! itself but belong to the same enumeration so that a printer/parser
//! implementation can report through the same type.

use std::borrow::Cow;

/// Closed set of error kinds.
///
/// Success is not a kind: the success channel is `Result::Ok`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// Allocation failure.
    Memory,
    /// A value is outside the domain of an operation.
    Value,
    /// A type is unsuitable for an operation.
    Type,
    /// An argument combination is invalid.
    InvalidArgument,
    /// Semantics are deliberately undefined upstream.
    NotImplemented,
    /// An internal operation failed.
    Runtime,
    /// Tokenization failure (grammar collaborator).
    Lex,
    /// Parse failure (grammar collaborator).
    Parse,
    /// Operating system failure (grammar collaborator).
    Os,
}

impl ErrorKind {
    /// Canonical name of this kind.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            ErrorKind::Memory => "MemoryError",
            ErrorKind::Value => "ValueError",
            ErrorKind::Type => "TypeError",
            ErrorKind::InvalidArgument => "InvalidArgumentError",
            ErrorKind::NotImplemented => "NotImplementedError",
            ErrorKind::Runtime => "RuntimeError",
            ErrorKind::Lex => "LexError",
            ErrorKind::Parse => "ParseError",
            ErrorKind::Os => "OSError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An error produced by the type engine or one of its collaborators.
#[derive(Clone, Eq, PartialEq, thiserror::Error, Debug)]
#[error("{kind}: {message}")]
pub struct ShapeError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: Cow<'static, str>,
}

impl ShapeError {
    /// Create an error with a static message.
    #[inline]
    pub const fn new(kind: ErrorKind, message: &'static str) -> Self {
        ShapeError {
            kind,
            message: Cow::Borrowed(message),
        }
    }

    /// Create an error with an owned, formatted message.
    #[inline]
    pub fn formatted(kind: ErrorKind, message: String) -> Self {
        ShapeError {
            kind,
            message: Cow::Owned(message),
        }
    }

    /// Shorthand for a `ValueError`.
    pub fn value(message: impl Into<Cow<'static, str>>) -> Self {
        ShapeError {
            kind: ErrorKind::Value,
            message: message.into(),
        }
    }

    /// Shorthand for a `TypeError`.
    pub fn type_error(message: impl Into<Cow<'static, str>>) -> Self {
        ShapeError {
            kind: ErrorKind::Type,
            message: message.into(),
        }
    }

    /// Shorthand for an `InvalidArgumentError`.
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        ShapeError {
            kind: ErrorKind::InvalidArgument,
            message: message.into(),
        }
    }

    /// Shorthand for a `NotImplementedError`.
    pub fn not_implemented(message: impl Into<Cow<'static, str>>) -> Self {
        ShapeError {
            kind: ErrorKind::NotImplemented,
            message: message.into(),
        }
    }

    /// Shorthand for the allocation-failure error.
    #[inline]
    pub const fn memory() -> Self {
        ShapeError::new(ErrorKind::Memory, "out of memory")
    }

    /// The message text.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result alias used throughout the engine.
pub type ShapeResult<T> = Result<T, ShapeError>;
