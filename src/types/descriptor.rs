// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Data type descriptors: the closed set of wire-shape variants.
//!
//! A `DataType` describes the layout of a value (scalar width + byte order,
//! array, enumerated, record, variant record). Container variants reference
//! their constituents through `TypeHandle`s into the owning `TypeRegistry`,
//! so mutually recursive record/variant types never form ownership cycles.

use crate::error::{CodecError, CodecResult};
use crate::stream::ByteOrder;
use crate::types::registry::TypeHandle;

/// Numeric kind of a basic (scalar) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Unsigned,
    Signed,
    Float,
}

/// Sized, endianed scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicType {
    /// Element width in bytes: 1, 2, 4 or 8.
    pub width: usize,
    pub kind: ScalarKind,
    /// Wire byte order; irrelevant for width 1.
    pub order: ByteOrder,
}

impl BasicType {
    pub fn new(width: usize, kind: ScalarKind, order: ByteOrder) -> CodecResult<Self> {
        match (kind, width) {
            (ScalarKind::Float, 4 | 8) => {}
            (ScalarKind::Float, w) => {
                return Err(CodecError::InvalidType {
                    reason: format!("float width {} (only 4 and 8 supported)", w),
                })
            }
            (_, 1 | 2 | 4 | 8) => {}
            (_, w) => {
                return Err(CodecError::InvalidType {
                    reason: format!("scalar width {} (only 1, 2, 4 and 8 supported)", w),
                })
            }
        }
        Ok(Self { width, kind, order })
    }

    /// Alignment equals width for all basic types.
    pub fn alignment(&self) -> usize {
        self.width
    }
}

/// Marks an array type as plain, opaque bytes, or character string.
///
/// The hint changes which element representation the factory chooses: hinted
/// arrays get a single contiguous buffer instead of per-slot child elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayHint {
    #[default]
    None,
    Opaque,
    String,
}

/// Array with an element count fixed at construction. No count prefix on
/// the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedArrayType {
    pub element: TypeHandle,
    pub count: usize,
    pub hint: ArrayHint,
}

/// Array whose element count travels on the wire, encoded through
/// `size_type` (default: 32-bit big-endian unsigned).
#[derive(Debug, Clone, PartialEq)]
pub struct VariableArrayType {
    pub element: TypeHandle,
    pub size_type: TypeHandle,
    pub hint: ArrayHint,
}

/// One symbolic enumerator: name plus wire representation value. The dense
/// index is the enumerator's position in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Enumerator {
    pub name: String,
    pub value: i64,
}

impl Enumerator {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Enumerated type: a Basic representation type plus an ordered table of
/// (name, representation value) pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumeratedType {
    pub representation: TypeHandle,
    pub enumerators: Vec<Enumerator>,
}

impl EnumeratedType {
    /// Dense index reserved for a representation value absent from the
    /// table ("unknown enumerator").
    pub fn sentinel_index(&self) -> usize {
        self.enumerators.len()
    }

    /// Translate a decoded representation value into its dense index.
    /// Unknown values map to the sentinel.
    pub fn index_of_value(&self, value: i64) -> usize {
        self.enumerators
            .iter()
            .position(|e| e.value == value)
            .unwrap_or_else(|| self.sentinel_index())
    }

    /// Representation value for a dense index; `None` for the sentinel or
    /// anything past it.
    pub fn value_of_index(&self, index: usize) -> Option<i64> {
        self.enumerators.get(index).map(|e| e.value)
    }

    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.enumerators.iter().position(|e| e.name == name)
    }
}

/// One declared field of a fixed record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub name: String,
    pub ty: TypeHandle,
}

impl RecordField {
    pub fn new(name: impl Into<String>, ty: TypeHandle) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Heterogeneous record: ordered fields, each individually aligned on the
/// wire.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRecordType {
    pub fields: Vec<RecordField>,
}

impl FixedRecordType {
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// One alternative of a variant record, selected by the discriminant's
/// dense index.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub name: String,
    pub ty: TypeHandle,
    pub semantics: String,
}

impl Alternative {
    pub fn new(name: impl Into<String>, ty: TypeHandle) -> Self {
        Self {
            name: name.into(),
            ty,
            semantics: String::new(),
        }
    }

    pub fn with_semantics(mut self, semantics: impl Into<String>) -> Self {
        self.semantics = semantics.into();
        self
    }
}

/// Discriminated union: an Enumerated discriminant plus one alternative per
/// dense discriminant index. Exactly one alternative is live per value.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecordType {
    pub discriminant: TypeHandle,
    pub alternatives: Vec<Alternative>,
}

impl VariantRecordType {
    pub fn alternative_index(&self, name: &str) -> Option<usize> {
        self.alternatives.iter().position(|a| a.name == name)
    }
}

/// Closed set of type variants.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Basic(BasicType),
    FixedArray(FixedArrayType),
    VariableArray(VariableArrayType),
    Enumerated(EnumeratedType),
    FixedRecord(FixedRecordType),
    VariantRecord(VariantRecordType),
}

impl TypeKind {
    /// Short variant name for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Basic(_) => "basic",
            Self::FixedArray(_) => "fixed array",
            Self::VariableArray(_) => "variable array",
            Self::Enumerated(_) => "enumerated",
            Self::FixedRecord(_) => "fixed record",
            Self::VariantRecord(_) => "variant record",
        }
    }
}

/// A complete, named data type.
#[derive(Debug, Clone, PartialEq)]
pub struct DataType {
    pub name: String,
    /// Free-text semantics annotation from the object model.
    pub semantics: String,
    /// Cached alignment, kept ≥ 1. Recomputed bottom-up by the registry;
    /// container types never trust this cache across child edits.
    pub(crate) alignment: usize,
    pub kind: TypeKind,
}

impl DataType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            semantics: String::new(),
            alignment: 1,
            kind,
        }
    }

    pub fn with_semantics(mut self, semantics: impl Into<String>) -> Self {
        self.semantics = semantics.into();
        self
    }

    /// Current cached alignment (≥ 1). See `TypeRegistry::recompute_alignment`.
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    pub fn is_basic(&self) -> bool {
        matches!(self.kind, TypeKind::Basic(_))
    }

    pub fn as_basic(&self) -> Option<&BasicType> {
        match &self.kind {
            TypeKind::Basic(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_enumerated(&self) -> Option<&EnumeratedType> {
        match &self.kind {
            TypeKind::Enumerated(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_fixed_record(&self) -> Option<&FixedRecordType> {
        match &self.kind {
            TypeKind::FixedRecord(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_type_validation() {
        assert!(BasicType::new(4, ScalarKind::Unsigned, ByteOrder::BigEndian).is_ok());
        assert!(BasicType::new(8, ScalarKind::Float, ByteOrder::LittleEndian).is_ok());
        assert!(BasicType::new(2, ScalarKind::Float, ByteOrder::BigEndian).is_err());
        assert!(BasicType::new(3, ScalarKind::Signed, ByteOrder::BigEndian).is_err());
        assert!(BasicType::new(16, ScalarKind::Unsigned, ByteOrder::BigEndian).is_err());
    }

    #[test]
    fn test_basic_alignment_equals_width() {
        let b = BasicType::new(8, ScalarKind::Float, ByteOrder::BigEndian).expect("basic");
        assert_eq!(b.alignment(), 8);
    }

    #[test]
    fn test_enumerator_table_translation() {
        let e = EnumeratedType {
            representation: TypeHandle::from_raw(0),
            enumerators: vec![
                Enumerator::new("RED", 10),
                Enumerator::new("GREEN", 20),
                Enumerator::new("BLUE", 30),
            ],
        };
        assert_eq!(e.index_of_value(20), 1);
        assert_eq!(e.index_of_value(99), e.sentinel_index());
        assert_eq!(e.sentinel_index(), 3);
        assert_eq!(e.value_of_index(2), Some(30));
        assert_eq!(e.value_of_index(3), None);
        assert_eq!(e.index_of_name("BLUE"), Some(2));
        assert_eq!(e.index_of_name("MAUVE"), None);
    }

    #[test]
    fn test_record_field_lookup() {
        let r = FixedRecordType {
            fields: vec![
                RecordField::new("x", TypeHandle::from_raw(0)),
                RecordField::new("y", TypeHandle::from_raw(0)),
            ],
        };
        assert_eq!(r.field_index("y"), Some(1));
        assert_eq!(r.field_index("z"), None);
    }
}
