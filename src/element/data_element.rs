// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value holders bound to data types.
//!
//! A `DataElement` pairs a non-owning `TypeHandle` with the current value
//! payload for that type variant and an optional shared [`Stamp`]. Composite
//! elements own their children exclusively; the stamp is the only shared
//! reference threaded through a subtree.

use crate::element::factory;
use crate::element::value::ScalarValue;
use crate::error::{CodecError, CodecResult};
use crate::path::{Path, PathStep};
use crate::stamp::Stamp;
use crate::stream::{DecodeStream, EncodeStream};
use crate::types::descriptor::{ArrayHint, TypeKind};
use crate::types::registry::{TypeHandle, TypeRegistry};

/// Closed set of value-holder variants, parallel to `TypeKind`.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// One primitive value of the bound basic type's width/kind.
    Basic(ScalarValue),
    /// Per-slot children of an (unhinted) array type.
    Array(Vec<DataElement>),
    /// Contiguous byte buffer for opaque/string-hinted arrays; per-slot
    /// transfer is synthesized against this buffer.
    Opaque(Vec<u8>),
    /// Dense enumerator index; the sentinel (table length) marks "unknown".
    Enumerated(usize),
    /// One slot per declared field, positionally aligned with the record
    /// type's field list. `None` is an unbound slot.
    Record(Vec<Option<DataElement>>),
    /// Current alternative of a variant record; `index` is `None` until the
    /// first selection.
    Variant {
        index: Option<usize>,
        payload: Option<Box<DataElement>>,
    },
}

impl ElementKind {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Basic(_) => "basic",
            Self::Array(_) => "array",
            Self::Opaque(_) => "opaque",
            Self::Enumerated(_) => "enumerated",
            Self::Record(_) => "record",
            Self::Variant { .. } => "variant",
        }
    }
}

/// A value bound to a `DataType`, participating in encode/decode.
#[derive(Debug, Clone)]
pub struct DataElement {
    pub(crate) ty: TypeHandle,
    pub(crate) stamp: Option<Stamp>,
    pub(crate) kind: ElementKind,
}

/// Structural equality; the stamp is an identity handle, not part of the
/// value.
impl PartialEq for DataElement {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.kind == other.kind
    }
}

impl DataElement {
    pub(crate) fn from_parts(ty: TypeHandle, kind: ElementKind) -> Self {
        Self {
            ty,
            stamp: None,
            kind,
        }
    }

    /// Handle of the bound data type.
    pub fn data_type(&self) -> TypeHandle {
        self.ty
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    // --- stamp ---------------------------------------------------------

    pub fn stamp(&self) -> Option<&Stamp> {
        self.stamp.as_ref()
    }

    /// Attach a shared stamp to this element and, recursively, to every
    /// current child. Structural operations that create children afterwards
    /// re-attach at creation time.
    pub fn attach_stamp(&mut self, stamp: &Stamp) {
        self.stamp = Some(stamp.clone());
        self.for_each_child_mut(|child| child.attach_stamp(stamp));
    }

    /// Drop the stamp reference from this subtree.
    pub fn detach_stamp(&mut self) {
        self.stamp = None;
        self.for_each_child_mut(DataElement::detach_stamp);
    }

    fn for_each_child_mut(&mut self, mut f: impl FnMut(&mut DataElement)) {
        match &mut self.kind {
            ElementKind::Array(children) => children.iter_mut().for_each(&mut f),
            ElementKind::Record(slots) => slots.iter_mut().flatten().for_each(&mut f),
            ElementKind::Variant { payload, .. } => {
                if let Some(p) = payload {
                    f(p);
                }
            }
            ElementKind::Basic(_) | ElementKind::Opaque(_) | ElementKind::Enumerated(_) => {}
        }
    }

    pub(crate) fn mark_dirty(&self) {
        if let Some(stamp) = &self.stamp {
            stamp.mark_dirty();
        }
    }

    // --- scalar --------------------------------------------------------

    pub fn scalar(&self) -> Option<ScalarValue> {
        match &self.kind {
            ElementKind::Basic(v) => Some(*v),
            _ => None,
        }
    }

    /// Replace the scalar value. The new value must match the stored
    /// width/kind; marks the shared stamp dirty.
    pub fn set_scalar(&mut self, value: ScalarValue) -> CodecResult<()> {
        match &mut self.kind {
            ElementKind::Basic(current) => {
                if current.variant_name() != value.variant_name() {
                    return Err(CodecError::ShapeMismatch {
                        expected: current.variant_name().into(),
                        found: value.variant_name().into(),
                    });
                }
                *current = value;
                self.mark_dirty();
                Ok(())
            }
            other => Err(CodecError::ShapeMismatch {
                expected: "basic".into(),
                found: other.variant_name().into(),
            }),
        }
    }

    // --- enumerated ----------------------------------------------------

    pub fn enumerated_index(&self) -> Option<usize> {
        match &self.kind {
            ElementKind::Enumerated(index) => Some(*index),
            _ => None,
        }
    }

    /// Set the dense enumerator index. The sentinel (table length) is
    /// accepted; anything past it is out of bounds.
    pub fn set_enumerated_index(&mut self, reg: &TypeRegistry, index: usize) -> CodecResult<()> {
        let table_len = match &reg.get(self.ty)?.kind {
            TypeKind::Enumerated(e) => e.enumerators.len(),
            other => {
                return Err(CodecError::ShapeMismatch {
                    expected: "enumerated".into(),
                    found: other.variant_name().into(),
                })
            }
        };
        if index > table_len {
            return Err(CodecError::IndexOutOfBounds {
                index,
                length: table_len + 1,
            });
        }
        match &mut self.kind {
            ElementKind::Enumerated(current) => {
                *current = index;
                self.mark_dirty();
                Ok(())
            }
            other => Err(CodecError::ShapeMismatch {
                expected: "enumerated".into(),
                found: other.variant_name().into(),
            }),
        }
    }

    pub fn set_enumerator(&mut self, reg: &TypeRegistry, name: &str) -> CodecResult<()> {
        let index = reg
            .get(self.ty)?
            .as_enumerated()
            .and_then(|e| e.index_of_name(name))
            .ok_or(CodecError::UnresolvedEnumerator { value: -1 })?;
        self.set_enumerated_index(reg, index)
    }

    // --- array / opaque -------------------------------------------------

    /// Current slot count (array children, record fields, or buffer bytes).
    pub fn slot_count(&self) -> usize {
        match &self.kind {
            ElementKind::Array(children) => children.len(),
            ElementKind::Opaque(buffer) => buffer.len(),
            ElementKind::Record(slots) => slots.len(),
            _ => 0,
        }
    }

    pub fn child(&self, index: usize) -> Option<&DataElement> {
        match &self.kind {
            ElementKind::Array(children) => children.get(index),
            ElementKind::Record(slots) => slots.get(index).and_then(Option::as_ref),
            _ => None,
        }
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut DataElement> {
        match &mut self.kind {
            ElementKind::Array(children) => children.get_mut(index),
            ElementKind::Record(slots) => slots.get_mut(index).and_then(Option::as_mut),
            _ => None,
        }
    }

    /// Resize an array element, factory-building any new trailing children
    /// (with the subtree's stamp attached) and truncating surplus ones.
    /// Opaque buffers resize with zero fill.
    pub fn resize(&mut self, reg: &TypeRegistry, count: usize) -> CodecResult<()> {
        let element_ty = match &reg.get(self.ty)?.kind {
            TypeKind::FixedArray(a) => a.element,
            TypeKind::VariableArray(a) => a.element,
            other => {
                return Err(CodecError::ShapeMismatch {
                    expected: "array".into(),
                    found: other.variant_name().into(),
                })
            }
        };
        let stamp = self.stamp.clone();
        match &mut self.kind {
            ElementKind::Array(children) => {
                children.truncate(count);
                while children.len() < count {
                    let mut child = factory::default_element(reg, element_ty)?;
                    if let Some(stamp) = &stamp {
                        child.attach_stamp(stamp);
                    }
                    children.push(child);
                }
                Ok(())
            }
            ElementKind::Opaque(buffer) => {
                buffer.resize(count, 0);
                Ok(())
            }
            other => Err(CodecError::ShapeMismatch {
                expected: "array".into(),
                found: other.variant_name().into(),
            }),
        }
    }

    /// Raw buffer of an opaque/string element.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.kind {
            ElementKind::Opaque(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Replace the opaque buffer contents; marks the stamp dirty.
    pub fn set_bytes(&mut self, bytes: impl Into<Vec<u8>>) -> CodecResult<()> {
        match &mut self.kind {
            ElementKind::Opaque(buffer) => {
                *buffer = bytes.into();
                self.mark_dirty();
                Ok(())
            }
            other => Err(CodecError::ShapeMismatch {
                expected: "opaque".into(),
                found: other.variant_name().into(),
            }),
        }
    }

    // --- record ----------------------------------------------------------

    /// Look up a record field element by declared name.
    pub fn field(&self, reg: &TypeRegistry, name: &str) -> Option<&DataElement> {
        let record = reg.try_get(self.ty)?.as_fixed_record()?;
        self.child(record.field_index(name)?)
    }

    pub fn field_mut(&mut self, reg: &TypeRegistry, name: &str) -> Option<&mut DataElement> {
        let record = reg.try_get(self.ty)?.as_fixed_record()?;
        let index = record.field_index(name)?;
        self.child_mut(index)
    }

    /// Install an element into a record slot after verifying it accepts the
    /// declared field type. The subtree's stamp propagates to the new child.
    pub fn bind_field(
        &mut self,
        reg: &TypeRegistry,
        index: usize,
        mut element: DataElement,
    ) -> CodecResult<()> {
        let field_ty = match &reg.get(self.ty)?.kind {
            TypeKind::FixedRecord(r) => {
                r.fields
                    .get(index)
                    .ok_or(CodecError::IndexOutOfBounds {
                        index,
                        length: r.fields.len(),
                    })?
                    .ty
            }
            other => {
                return Err(CodecError::ShapeMismatch {
                    expected: "fixed record".into(),
                    found: other.variant_name().into(),
                })
            }
        };
        if !element.is_compatible(reg, field_ty) {
            return Err(CodecError::ShapeMismatch {
                expected: reg.get(field_ty)?.kind.variant_name().into(),
                found: element.kind.variant_name().into(),
            });
        }
        element.ty = field_ty;
        if let Some(stamp) = self.stamp.clone() {
            element.attach_stamp(&stamp);
        }
        match &mut self.kind {
            ElementKind::Record(slots) => {
                slots[index] = Some(element);
                Ok(())
            }
            other => Err(CodecError::ShapeMismatch {
                expected: "record".into(),
                found: other.variant_name().into(),
            }),
        }
    }

    /// Remove the element from a record slot, leaving it unbound. Decode
    /// then consumes the slot's bytes via the skip path; encode emits a
    /// type-correct default.
    pub fn unbind_field(&mut self, index: usize) -> CodecResult<()> {
        match &mut self.kind {
            ElementKind::Record(slots) => {
                let length = slots.len();
                let slot = slots
                    .get_mut(index)
                    .ok_or(CodecError::IndexOutOfBounds { index, length })?;
                if let Some(mut old) = slot.take() {
                    old.detach_stamp();
                }
                Ok(())
            }
            other => Err(CodecError::ShapeMismatch {
                expected: "record".into(),
                found: other.variant_name().into(),
            }),
        }
    }

    // --- variant ---------------------------------------------------------

    pub fn alternative_index(&self) -> Option<usize> {
        match &self.kind {
            ElementKind::Variant { index, .. } => *index,
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&DataElement> {
        match &self.kind {
            ElementKind::Variant { payload, .. } => payload.as_deref(),
            _ => None,
        }
    }

    pub fn payload_mut(&mut self) -> Option<&mut DataElement> {
        match &mut self.kind {
            ElementKind::Variant { payload, .. } => payload.as_deref_mut(),
            _ => None,
        }
    }

    /// Select the live alternative by dense index. A changed index discards
    /// the old payload and factory-builds the new alternative's default
    /// (with the stamp re-attached); an unchanged index keeps the payload.
    pub fn set_alternative_index(&mut self, reg: &TypeRegistry, index: usize) -> CodecResult<()> {
        if self.select_alternative(reg, index)? {
            self.mark_dirty();
        }
        Ok(())
    }

    /// Switch the live alternative without touching the dirty flag (the
    /// decoder's entry point). Returns whether the payload was rebuilt.
    pub(crate) fn select_alternative(
        &mut self,
        reg: &TypeRegistry,
        index: usize,
    ) -> CodecResult<bool> {
        let alt_ty = match &reg.get(self.ty)?.kind {
            TypeKind::VariantRecord(v) => {
                v.alternatives
                    .get(index)
                    .ok_or(CodecError::UnresolvedEnumerator {
                        value: index as i64,
                    })?
                    .ty
            }
            other => {
                return Err(CodecError::ShapeMismatch {
                    expected: "variant record".into(),
                    found: other.variant_name().into(),
                })
            }
        };
        let stamp = self.stamp.clone();
        match &mut self.kind {
            ElementKind::Variant { index: current, payload } => {
                if *current == Some(index) && payload.is_some() {
                    return Ok(false);
                }
                let mut fresh = factory::default_element(reg, alt_ty)?;
                if let Some(stamp) = &stamp {
                    fresh.attach_stamp(stamp);
                }
                *current = Some(index);
                *payload = Some(Box::new(fresh));
                Ok(true)
            }
            other => Err(CodecError::ShapeMismatch {
                expected: "variant".into(),
                found: other.variant_name().into(),
            }),
        }
    }

    /// Select the live alternative by declared name.
    pub fn set_alternative(&mut self, reg: &TypeRegistry, name: &str) -> CodecResult<()> {
        let index = match &reg.get(self.ty)?.kind {
            TypeKind::VariantRecord(v) => v
                .alternative_index(name)
                .ok_or(CodecError::UnresolvedEnumerator { value: -1 })?,
            other => {
                return Err(CodecError::ShapeMismatch {
                    expected: "variant record".into(),
                    found: other.variant_name().into(),
                })
            }
        };
        self.set_alternative_index(reg, index)
    }

    // --- rebind ----------------------------------------------------------

    /// Structural compatibility between this element and a data type:
    /// matching variant, matching scalar width/kind, hinted arrays against
    /// buffer elements, children checked recursively.
    pub fn is_compatible(&self, reg: &TypeRegistry, ty: TypeHandle) -> bool {
        let Some(data_type) = reg.try_get(ty) else {
            return false;
        };
        match (&data_type.kind, &self.kind) {
            (TypeKind::Basic(b), ElementKind::Basic(v)) => v.matches(b),
            (TypeKind::FixedArray(a), ElementKind::Array(children)) => {
                a.hint == ArrayHint::None
                    && children.iter().all(|c| c.is_compatible(reg, a.element))
            }
            (TypeKind::FixedArray(a), ElementKind::Opaque(_)) => a.hint != ArrayHint::None,
            (TypeKind::VariableArray(a), ElementKind::Array(children)) => {
                a.hint == ArrayHint::None
                    && children.iter().all(|c| c.is_compatible(reg, a.element))
            }
            (TypeKind::VariableArray(a), ElementKind::Opaque(_)) => a.hint != ArrayHint::None,
            (TypeKind::Enumerated(e), ElementKind::Enumerated(index)) => {
                *index <= e.sentinel_index()
            }
            (TypeKind::FixedRecord(r), ElementKind::Record(slots)) => {
                slots.len() == r.fields.len()
                    && slots
                        .iter()
                        .zip(&r.fields)
                        .all(|(slot, field)| match slot {
                            Some(child) => child.is_compatible(reg, field.ty),
                            None => true,
                        })
            }
            (TypeKind::VariantRecord(v), ElementKind::Variant { index, payload }) => {
                match (index, payload) {
                    (Some(i), Some(p)) => v
                        .alternatives
                        .get(*i)
                        .is_some_and(|alt| p.is_compatible(reg, alt.ty)),
                    (Some(i), None) => *i < v.alternatives.len(),
                    (None, _) => true,
                }
            }
            _ => false,
        }
    }

    /// Rebind this element (and its children) to a new data type. Fails
    /// without mutating any state when the type is incompatible.
    pub fn rebind(&mut self, reg: &TypeRegistry, ty: TypeHandle) -> CodecResult<()> {
        if !self.is_compatible(reg, ty) {
            return Err(CodecError::ShapeMismatch {
                expected: reg
                    .try_get(ty)
                    .map(|t| t.kind.variant_name())
                    .unwrap_or("known type")
                    .into(),
                found: self.kind.variant_name().into(),
            });
        }
        self.apply_rebind(reg, ty);
        Ok(())
    }

    fn apply_rebind(&mut self, reg: &TypeRegistry, ty: TypeHandle) {
        self.ty = ty;
        // is_compatible already vetted every child, so lookups cannot fail.
        let Some(data_type) = reg.try_get(ty) else {
            return;
        };
        match (&data_type.kind, &mut self.kind) {
            (TypeKind::FixedArray(a), ElementKind::Array(children)) => {
                let element = a.element;
                for child in children {
                    child.apply_rebind(reg, element);
                }
            }
            (TypeKind::VariableArray(a), ElementKind::Array(children)) => {
                let element = a.element;
                for child in children {
                    child.apply_rebind(reg, element);
                }
            }
            (TypeKind::FixedRecord(r), ElementKind::Record(slots)) => {
                let fields: Vec<TypeHandle> = r.fields.iter().map(|f| f.ty).collect();
                for (slot, field_ty) in slots.iter_mut().zip(fields) {
                    if let Some(child) = slot {
                        child.apply_rebind(reg, field_ty);
                    }
                }
            }
            (TypeKind::VariantRecord(v), ElementKind::Variant { index, payload }) => {
                if let (Some(i), Some(p)) = (index, payload) {
                    let alt_ty = v.alternatives[*i].ty;
                    p.apply_rebind(reg, alt_ty);
                }
            }
            _ => {}
        }
    }

    // --- path addressing -------------------------------------------------

    /// Resolve a path read-only. Any step that does not resolve (a missing
    /// field, an unbound slot, an index past the current count, a name that
    /// is not the live alternative) fails; nothing is created.
    pub fn element_at(&self, reg: &TypeRegistry, path: &Path) -> CodecResult<&DataElement> {
        let mut current = self;
        for step in path {
            current = current.resolve_step(reg, step)?;
        }
        Ok(current)
    }

    /// Resolve a path for writing, creating what is missing along the way:
    /// arrays grow to cover an index, unbound record slots get a default
    /// child, a variant alternative named by a field step is selected.
    pub fn element_at_mut(
        &mut self,
        reg: &TypeRegistry,
        path: &Path,
    ) -> CodecResult<&mut DataElement> {
        let mut current = self;
        for step in path {
            current = current.resolve_step_mut(reg, step)?;
        }
        Ok(current)
    }

    /// Scalar value at `path`.
    pub fn scalar_at(&self, reg: &TypeRegistry, path: &Path) -> CodecResult<ScalarValue> {
        let element = self.element_at(reg, path)?;
        element.scalar().ok_or_else(|| CodecError::ShapeMismatch {
            expected: "basic".into(),
            found: element.kind.variant_name().into(),
        })
    }

    /// Set the scalar at `path`, creating intermediate elements on the way.
    pub fn set_scalar_at(
        &mut self,
        reg: &TypeRegistry,
        path: &Path,
        value: ScalarValue,
    ) -> CodecResult<()> {
        self.element_at_mut(reg, path)?.set_scalar(value)
    }

    /// Replace the element at `path`. The incoming element must accept the
    /// slot's declared type; the subtree stamp propagates into it and is
    /// marked dirty.
    pub fn set_element_at(
        &mut self,
        reg: &TypeRegistry,
        path: &Path,
        mut element: DataElement,
    ) -> CodecResult<()> {
        let target = self.element_at_mut(reg, path)?;
        let ty = target.ty;
        if !element.is_compatible(reg, ty) {
            return Err(CodecError::ShapeMismatch {
                expected: reg.get(ty)?.kind.variant_name().into(),
                found: element.kind.variant_name().into(),
            });
        }
        element.apply_rebind(reg, ty);
        match target.stamp.clone() {
            Some(stamp) => {
                element.attach_stamp(&stamp);
                stamp.mark_dirty();
            }
            None => element.detach_stamp(),
        }
        *target = element;
        Ok(())
    }

    fn resolve_step(&self, reg: &TypeRegistry, step: &PathStep) -> CodecResult<&DataElement> {
        match (step, &self.kind) {
            (PathStep::Index(index), ElementKind::Array(children)) => {
                children.get(*index).ok_or(CodecError::IndexOutOfBounds {
                    index: *index,
                    length: children.len(),
                })
            }
            (PathStep::Field(name), ElementKind::Record(slots)) => {
                let index = reg
                    .get(self.ty)?
                    .as_fixed_record()
                    .and_then(|r| r.field_index(name))
                    .ok_or_else(|| path_unresolved(step))?;
                slots
                    .get(index)
                    .and_then(Option::as_ref)
                    .ok_or_else(|| path_unresolved(step))
            }
            (PathStep::Field(name), ElementKind::Variant { index, payload }) => {
                let v = match &reg.get(self.ty)?.kind {
                    TypeKind::VariantRecord(v) => v,
                    _ => return Err(path_unresolved(step)),
                };
                let current = index.ok_or(CodecError::NoAlternative)?;
                if v.alternatives.get(current).map(|a| a.name.as_str()) != Some(name.as_str()) {
                    return Err(path_unresolved(step));
                }
                payload.as_deref().ok_or(CodecError::NoAlternative)
            }
            _ => Err(path_unresolved(step)),
        }
    }

    fn resolve_step_mut(
        &mut self,
        reg: &TypeRegistry,
        step: &PathStep,
    ) -> CodecResult<&mut DataElement> {
        match step {
            PathStep::Index(index) => {
                let needs_growth = match &self.kind {
                    ElementKind::Array(children) => children.len() <= *index,
                    _ => return Err(path_unresolved(step)),
                };
                if needs_growth {
                    self.resize(reg, index + 1)?;
                    self.mark_dirty();
                }
                match &mut self.kind {
                    ElementKind::Array(children) => Ok(&mut children[*index]),
                    _ => Err(path_unresolved(step)),
                }
            }
            PathStep::Field(name) => match &self.kind {
                ElementKind::Record(_) => {
                    let record = reg
                        .get(self.ty)?
                        .as_fixed_record()
                        .ok_or_else(|| path_unresolved(step))?;
                    let index = record
                        .field_index(name)
                        .ok_or_else(|| path_unresolved(step))?;
                    let field_ty = record.fields[index].ty;
                    let stamp = self.stamp.clone();
                    match &mut self.kind {
                        ElementKind::Record(slots) => {
                            let slot = &mut slots[index];
                            if slot.is_none() {
                                let mut fresh = factory::default_element(reg, field_ty)?;
                                if let Some(stamp) = &stamp {
                                    fresh.attach_stamp(stamp);
                                }
                                *slot = Some(fresh);
                            }
                            match slot {
                                Some(child) => Ok(child),
                                None => Err(path_unresolved(step)),
                            }
                        }
                        _ => Err(path_unresolved(step)),
                    }
                }
                ElementKind::Variant { .. } => {
                    let index = match &reg.get(self.ty)?.kind {
                        TypeKind::VariantRecord(v) => v
                            .alternative_index(name)
                            .ok_or_else(|| path_unresolved(step))?,
                        _ => return Err(path_unresolved(step)),
                    };
                    self.set_alternative_index(reg, index)?;
                    self.payload_mut().ok_or(CodecError::NoAlternative)
                }
                _ => Err(path_unresolved(step)),
            },
        }
    }

    // --- wire transfer ---------------------------------------------------

    /// Decode this element in place; the bound type drives the structure.
    /// On error the stream cursor is indeterminate and must be discarded.
    pub fn decode(&mut self, reg: &TypeRegistry, stream: &mut DecodeStream<'_>) -> CodecResult<()> {
        crate::element::codec::decode(reg, stream, self)
    }

    /// Encode this element; the bound type drives the structure.
    pub fn encode(&self, reg: &TypeRegistry, stream: &mut EncodeStream) -> CodecResult<()> {
        crate::element::codec::encode(reg, stream, self)
    }
}

fn path_unresolved(step: &PathStep) -> CodecError {
    CodecError::PathUnresolved {
        step: step.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::ByteOrder;
    use crate::types::descriptor::{Alternative, Enumerator, RecordField, ScalarKind};

    fn position_record(reg: &mut TypeRegistry) -> TypeHandle {
        let f64t = reg
            .basic("Float64BE", 8, ScalarKind::Float, ByteOrder::BigEndian)
            .expect("basic");
        let pos = reg.fixed_array("Position", f64t, 2).expect("array");
        let u32t = reg
            .basic("Count32BE", 4, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        reg.fixed_record(
            "Entity",
            vec![RecordField::new("id", u32t), RecordField::new("pos", pos)],
        )
        .expect("record")
    }

    #[test]
    fn test_path_resolution_into_record_array() {
        let mut reg = TypeRegistry::new();
        let rec = position_record(&mut reg);
        let mut element = factory::default_element(&reg, rec).expect("factory");

        let path = Path::parse(".pos[1]");
        element
            .set_scalar_at(&reg, &path, ScalarValue::F64(2.5))
            .expect("set");
        assert_eq!(
            element.scalar_at(&reg, &path).expect("get"),
            ScalarValue::F64(2.5)
        );
        // The write grew the array to cover index 1.
        assert_eq!(
            element.field(&reg, "pos").map(|p| p.slot_count()),
            Some(2)
        );
    }

    #[test]
    fn test_read_path_does_not_create() {
        let mut reg = TypeRegistry::new();
        let rec = position_record(&mut reg);
        let element = factory::default_element(&reg, rec).expect("factory");

        // Arrays start empty, so index 0 is not there to read.
        let err = element
            .element_at(&reg, &Path::parse(".pos[0]"))
            .unwrap_err();
        assert!(matches!(err, CodecError::IndexOutOfBounds { .. }));

        let err = element
            .element_at(&reg, &Path::parse(".nope"))
            .unwrap_err();
        assert!(matches!(err, CodecError::PathUnresolved { .. }));
    }

    #[test]
    fn test_field_path_through_variant_selects_alternative() {
        let mut reg = TypeRegistry::new();
        let u8t = reg
            .basic("Repr8", 1, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let disc = reg
            .enumerated(
                "Kind",
                u8t,
                vec![Enumerator::new("A", 0), Enumerator::new("B", 1)],
            )
            .expect("enumerated");
        let u32t = reg
            .basic("Count32BE", 4, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let v = reg
            .variant_record(
                "Choice",
                disc,
                vec![Alternative::new("a", u32t), Alternative::new("b", u32t)],
            )
            .expect("variant");

        let mut element = factory::default_element(&reg, v).expect("factory");
        element
            .set_scalar_at(&reg, &Path::parse(".b"), ScalarValue::U32(7))
            .expect("set");
        assert_eq!(element.alternative_index(), Some(1));

        // Reading through the non-selected name fails.
        let err = element.element_at(&reg, &Path::parse(".a")).unwrap_err();
        assert!(matches!(err, CodecError::PathUnresolved { .. }));
        assert_eq!(
            element.scalar_at(&reg, &Path::parse(".b")).expect("get"),
            ScalarValue::U32(7)
        );
    }

    #[test]
    fn test_stamp_propagates_and_marks_dirty() {
        let mut reg = TypeRegistry::new();
        let rec = position_record(&mut reg);
        let mut element = factory::default_element(&reg, rec).expect("factory");

        let stamp = Stamp::new();
        element.attach_stamp(&stamp);
        assert!(!stamp.is_dirty());

        element
            .set_scalar_at(&reg, &Path::parse(".pos[0]"), ScalarValue::F64(1.0))
            .expect("set");
        assert!(stamp.is_dirty());

        // The grown child shares the same stamp.
        let child = element
            .element_at(&reg, &Path::parse(".pos[0]"))
            .expect("child");
        assert!(child.stamp().expect("stamp").ptr_eq(&stamp));
    }

    #[test]
    fn test_bind_and_unbind_field() {
        let mut reg = TypeRegistry::new();
        let rec = position_record(&mut reg);
        let u32t = reg.find("Count32BE").expect("type");
        let mut element = factory::default_element(&reg, rec).expect("factory");

        element.unbind_field(0).expect("unbind");
        assert!(element.child(0).is_none());

        let replacement = factory::default_element(&reg, u32t).expect("factory");
        element.bind_field(&reg, 0, replacement).expect("bind");
        assert!(element.child(0).is_some());

        // A shape-incompatible element is rejected.
        let f64t = reg.find("Float64BE").expect("type");
        let wrong = factory::default_element(&reg, f64t).expect("factory");
        let err = element.bind_field(&reg, 0, wrong).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_rebind_fails_without_mutation() {
        let mut reg = TypeRegistry::new();
        let u32t = reg
            .basic("Count32BE", 4, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let u32t2 = reg
            .basic("OtherCount32BE", 4, ScalarKind::Unsigned, ByteOrder::LittleEndian)
            .expect("basic");
        let f64t = reg
            .basic("Float64BE", 8, ScalarKind::Float, ByteOrder::BigEndian)
            .expect("basic");

        let mut element = factory::default_element(&reg, u32t).expect("factory");
        element.set_scalar(ScalarValue::U32(9)).expect("set");

        // Same width/kind under a different name/order is compatible.
        element.rebind(&reg, u32t2).expect("rebind");
        assert_eq!(element.data_type(), u32t2);
        assert_eq!(element.scalar(), Some(ScalarValue::U32(9)));

        // Incompatible target leaves the element untouched.
        let err = element.rebind(&reg, f64t).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch { .. }));
        assert_eq!(element.data_type(), u32t2);
        assert_eq!(element.scalar(), Some(ScalarValue::U32(9)));
    }

    #[test]
    fn test_set_element_at_adopts_slot_type_and_stamp() {
        let mut reg = TypeRegistry::new();
        let rec = position_record(&mut reg);
        let mut element = factory::default_element(&reg, rec).expect("factory");
        let stamp = Stamp::new();
        element.attach_stamp(&stamp);

        let u32t = reg.find("Count32BE").expect("type");
        let mut id = factory::default_element(&reg, u32t).expect("factory");
        id.set_scalar(ScalarValue::U32(77)).expect("set");
        stamp.clear_dirty();

        element
            .set_element_at(&reg, &Path::parse(".id"), id)
            .expect("set element");
        assert!(stamp.is_dirty());
        let installed = element.element_at(&reg, &Path::parse(".id")).expect("get");
        assert_eq!(installed.scalar(), Some(ScalarValue::U32(77)));
        assert!(installed.stamp().expect("stamp").ptr_eq(&stamp));
    }
}
