// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Arena registry owning every `DataType` node.
//!
//! All internal type references are `TypeHandle` indices into this arena, so
//! record/variant types may reference each other (and indirectly themselves)
//! without reference cycles. Types live until the registry is dropped, which
//! is required to outlast every element bound to them.

use crate::error::{CodecError, CodecResult};
use crate::stream::ByteOrder;
use crate::types::descriptor::{
    Alternative, ArrayHint, BasicType, DataType, EnumeratedType, Enumerator, FixedArrayType,
    FixedRecordType, RecordField, ScalarKind, TypeKind, VariableArrayType, VariantRecordType,
};
use std::collections::HashSet;

/// Index of a `DataType` inside a `TypeRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHandle(u32);

impl TypeHandle {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owning arena of data types.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<DataType>,
    default_size_type: Option<TypeHandle>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Insert a type and compute its alignment bottom-up. Child handles must
    /// already exist in this registry.
    pub fn insert(&mut self, ty: DataType) -> CodecResult<TypeHandle> {
        let handle = TypeHandle(self.types.len() as u32);
        self.types.push(ty);
        self.recompute_alignment(handle)?;
        Ok(handle)
    }

    /// Replace a type's kind in place, keeping its handle. Used to close
    /// mutually recursive definitions: insert a stub, reference it, then
    /// redefine and recompute alignments.
    pub fn redefine(&mut self, handle: TypeHandle, kind: TypeKind) -> CodecResult<()> {
        let slot = self
            .types
            .get_mut(handle.index())
            .ok_or(CodecError::UnknownType {
                index: handle.index(),
            })?;
        slot.kind = kind;
        self.recompute_alignment(handle)?;
        Ok(())
    }

    /// Attach a free-text semantics annotation to an existing type.
    pub fn set_semantics(
        &mut self,
        handle: TypeHandle,
        semantics: impl Into<String>,
    ) -> CodecResult<()> {
        let slot = self
            .types
            .get_mut(handle.index())
            .ok_or(CodecError::UnknownType {
                index: handle.index(),
            })?;
        slot.semantics = semantics.into();
        Ok(())
    }

    pub fn get(&self, handle: TypeHandle) -> CodecResult<&DataType> {
        self.types
            .get(handle.index())
            .ok_or(CodecError::UnknownType {
                index: handle.index(),
            })
    }

    pub fn try_get(&self, handle: TypeHandle) -> Option<&DataType> {
        self.types.get(handle.index())
    }

    /// First type registered under `name`, if any.
    pub fn find(&self, name: &str) -> Option<TypeHandle> {
        self.types
            .iter()
            .position(|t| t.name == name)
            .map(|i| TypeHandle(i as u32))
    }

    /// Cached alignment of a type (≥ 1).
    pub fn alignment_of(&self, handle: TypeHandle) -> CodecResult<usize> {
        Ok(self.get(handle)?.alignment)
    }

    /// Recompute a type's alignment bottom-up as the maximum alignment of
    /// all reachable constituents. Idempotent; must be re-run after a
    /// referenced child type changes. Cycle-safe: a type reached through
    /// itself contributes its currently cached alignment.
    pub fn recompute_alignment(&mut self, handle: TypeHandle) -> CodecResult<usize> {
        let mut in_progress = HashSet::new();
        self.recompute_inner(handle, &mut in_progress)
    }

    fn recompute_inner(
        &mut self,
        handle: TypeHandle,
        in_progress: &mut HashSet<TypeHandle>,
    ) -> CodecResult<usize> {
        if !in_progress.insert(handle) {
            return self.alignment_of(handle);
        }
        let children: Vec<TypeHandle> = match &self.get(handle)?.kind {
            TypeKind::Basic(_) => Vec::new(),
            TypeKind::FixedArray(a) => vec![a.element],
            TypeKind::VariableArray(a) => vec![a.element, a.size_type],
            TypeKind::Enumerated(e) => vec![e.representation],
            TypeKind::FixedRecord(r) => r.fields.iter().map(|f| f.ty).collect(),
            TypeKind::VariantRecord(v) => std::iter::once(v.discriminant)
                .chain(v.alternatives.iter().map(|a| a.ty))
                .collect(),
        };
        let mut alignment = match &self.get(handle)?.kind {
            TypeKind::Basic(b) => b.alignment(),
            _ => 1,
        };
        for child in children {
            alignment = alignment.max(self.recompute_inner(child, in_progress)?);
        }
        in_progress.remove(&handle);
        self.types[handle.index()].alignment = alignment;
        Ok(alignment)
    }

    // --- convenience constructors -------------------------------------

    pub fn basic(
        &mut self,
        name: impl Into<String>,
        width: usize,
        kind: ScalarKind,
        order: ByteOrder,
    ) -> CodecResult<TypeHandle> {
        let basic = BasicType::new(width, kind, order)?;
        self.insert(DataType::new(name, TypeKind::Basic(basic)))
    }

    pub fn fixed_array(
        &mut self,
        name: impl Into<String>,
        element: TypeHandle,
        count: usize,
    ) -> CodecResult<TypeHandle> {
        self.fixed_array_with_hint(name, element, count, ArrayHint::None)
    }

    pub fn fixed_array_with_hint(
        &mut self,
        name: impl Into<String>,
        element: TypeHandle,
        count: usize,
        hint: ArrayHint,
    ) -> CodecResult<TypeHandle> {
        self.get(element)?;
        self.insert(DataType::new(
            name,
            TypeKind::FixedArray(FixedArrayType {
                element,
                count,
                hint,
            }),
        ))
    }

    pub fn variable_array(
        &mut self,
        name: impl Into<String>,
        element: TypeHandle,
    ) -> CodecResult<TypeHandle> {
        let size_type = self.default_size_type()?;
        self.variable_array_with_size_type(name, element, size_type, ArrayHint::None)
    }

    pub fn variable_array_with_size_type(
        &mut self,
        name: impl Into<String>,
        element: TypeHandle,
        size_type: TypeHandle,
        hint: ArrayHint,
    ) -> CodecResult<TypeHandle> {
        self.get(element)?;
        if self.get(size_type)?.as_basic().is_none() {
            return Err(CodecError::InvalidType {
                reason: "variable array size type must be basic".into(),
            });
        }
        self.insert(DataType::new(
            name,
            TypeKind::VariableArray(VariableArrayType {
                element,
                size_type,
                hint,
            }),
        ))
    }

    pub fn enumerated(
        &mut self,
        name: impl Into<String>,
        representation: TypeHandle,
        enumerators: Vec<Enumerator>,
    ) -> CodecResult<TypeHandle> {
        if self.get(representation)?.as_basic().is_none() {
            return Err(CodecError::InvalidType {
                reason: "enumerated representation type must be basic".into(),
            });
        }
        self.insert(DataType::new(
            name,
            TypeKind::Enumerated(EnumeratedType {
                representation,
                enumerators,
            }),
        ))
    }

    pub fn fixed_record(
        &mut self,
        name: impl Into<String>,
        fields: Vec<RecordField>,
    ) -> CodecResult<TypeHandle> {
        for field in &fields {
            self.get(field.ty)?;
        }
        self.insert(DataType::new(
            name,
            TypeKind::FixedRecord(FixedRecordType { fields }),
        ))
    }

    /// Register a variant record. The alternatives list is indexed by the
    /// discriminant's dense index, so it must cover the discriminant's
    /// enumerator table exactly.
    pub fn variant_record(
        &mut self,
        name: impl Into<String>,
        discriminant: TypeHandle,
        alternatives: Vec<Alternative>,
    ) -> CodecResult<TypeHandle> {
        let table_len = match self.get(discriminant)?.as_enumerated() {
            Some(e) => e.enumerators.len(),
            None => {
                return Err(CodecError::InvalidType {
                    reason: "variant record discriminant must be enumerated".into(),
                })
            }
        };
        if alternatives.len() != table_len {
            return Err(CodecError::InvalidType {
                reason: format!(
                    "variant record needs one alternative per enumerator ({} != {})",
                    alternatives.len(),
                    table_len
                ),
            });
        }
        for alt in &alternatives {
            self.get(alt.ty)?;
        }
        self.insert(DataType::new(
            name,
            TypeKind::VariantRecord(VariantRecordType {
                discriminant,
                alternatives,
            }),
        ))
    }

    /// Default element-count type for variable arrays: 32-bit big-endian
    /// unsigned, registered once per registry.
    pub fn default_size_type(&mut self) -> CodecResult<TypeHandle> {
        if let Some(handle) = self.default_size_type {
            return Ok(handle);
        }
        let handle = self.basic(
            "ElementCount32BE",
            4,
            ScalarKind::Unsigned,
            ByteOrder::BigEndian,
        )?;
        self.default_size_type = Some(handle);
        Ok(handle)
    }
}
