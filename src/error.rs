// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by the stream, type-tree, and element-tree layers.

use std::fmt;

/// Errors reported by encode/decode and tree-manipulation operations.
///
/// All failures are local to the operation that raised them; none are fatal
/// to the host. After a `StreamExhausted` the stream cursor is indeterminate
/// and the caller must discard the stream rather than resume.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A primitive read/write needed more bytes than the buffer holds.
    StreamExhausted { offset: usize, need: usize },
    /// Element variant does not match the bound data type variant, or an
    /// incompatible type was supplied to a rebind.
    ShapeMismatch { expected: String, found: String },
    /// A representation value (or dense index) has no entry in the
    /// enumerator table. Recoverable for plain enumerated elements,
    /// unrecoverable for a variant-record discriminant.
    UnresolvedEnumerator { value: i64 },
    /// A variant-record element has no alternative selected.
    NoAlternative,
    /// A type handle does not resolve in the registry.
    UnknownType { index: usize },
    /// A type descriptor is internally malformed (e.g. a float of width 2,
    /// a variable-array size type that is not Basic).
    InvalidType { reason: String },
    /// A slot index is outside the current element count.
    IndexOutOfBounds { index: usize, length: usize },
    /// A path step does not resolve against the element it was applied to
    /// (no such field, unbound slot, or a name that is not the current
    /// variant alternative).
    PathUnresolved { step: String },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StreamExhausted { offset, need } => {
                write!(f, "stream exhausted at offset {}: need {} bytes", offset, need)
            }
            Self::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch: expected {}, found {}", expected, found)
            }
            Self::UnresolvedEnumerator { value } => {
                write!(f, "unresolved enumerator value {}", value)
            }
            Self::NoAlternative => write!(f, "variant record has no alternative selected"),
            Self::UnknownType { index } => write!(f, "unknown type handle {}", index),
            Self::InvalidType { reason } => write!(f, "invalid type: {}", reason),
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "index out of bounds: {} >= {}", index, length)
            }
            Self::PathUnresolved { step } => {
                write!(f, "path step '{}' does not resolve", step)
            }
        }
    }
}

impl std::error::Error for CodecError {}

pub type CodecResult<T> = Result<T, CodecError>;
