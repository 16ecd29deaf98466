// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural encode/decode drivers.
//!
//! The bound data type drives iteration (slot counts, per-slot types,
//! discriminants) and the element performs the per-slot value transfer,
//! recursing until basic types terminate in the stream primitives. Layout is
//! the object-model wire format: every value padded to its alignment, fixed
//! arrays carry no count prefix, variable arrays carry a size-typed count,
//! enumerated values travel as their representation value, variant records
//! as discriminant followed by the live alternative.

use crate::element::data_element::{DataElement, ElementKind};
use crate::element::factory;
use crate::element::value::ScalarValue;
use crate::error::{CodecError, CodecResult};
use crate::stream::{DecodeStream, EncodeStream};
use crate::types::descriptor::{BasicType, EnumeratedType, TypeKind};
use crate::types::registry::{TypeHandle, TypeRegistry};
use crate::types::walk;

fn shape_err(expected: &str, found: &ElementKind) -> CodecError {
    CodecError::ShapeMismatch {
        expected: expected.into(),
        found: found.variant_name().into(),
    }
}

fn basic_of(reg: &TypeRegistry, ty: TypeHandle) -> CodecResult<BasicType> {
    reg.get(ty)?
        .as_basic()
        .copied()
        .ok_or_else(|| CodecError::InvalidType {
            reason: "expected a basic constituent type".into(),
        })
}

/// Decode one enumerated value into its dense index (sentinel for unknown
/// representation values).
fn decode_enum_index(
    reg: &TypeRegistry,
    e: &EnumeratedType,
    stream: &mut DecodeStream<'_>,
) -> CodecResult<usize> {
    let rep = basic_of(reg, e.representation)?;
    let value = ScalarValue::decode(&rep, stream)?.to_i64();
    Ok(e.index_of_value(value))
}

/// Encode one dense index through the enumerator table; the sentinel is
/// invalid to emit.
fn encode_enum_index(
    reg: &TypeRegistry,
    e: &EnumeratedType,
    index: usize,
    stream: &mut EncodeStream,
) -> CodecResult<()> {
    let value = e
        .value_of_index(index)
        .ok_or(CodecError::UnresolvedEnumerator {
            value: index as i64,
        })?;
    let rep = basic_of(reg, e.representation)?;
    ScalarValue::from_i64(&rep, value).encode(&rep, stream)
}

pub(crate) fn decode(
    reg: &TypeRegistry,
    stream: &mut DecodeStream<'_>,
    element: &mut DataElement,
) -> CodecResult<()> {
    let data_type = reg.get(element.ty)?;
    let alignment = data_type.alignment();
    match &data_type.kind {
        TypeKind::Basic(b) => {
            let value = ScalarValue::decode(b, stream)?;
            match &mut element.kind {
                ElementKind::Basic(slot) => {
                    *slot = value;
                    Ok(())
                }
                other => Err(shape_err("basic", other)),
            }
        }
        TypeKind::FixedArray(a) => {
            stream.align(alignment)?;
            decode_array_slots(reg, stream, element, a.element, a.count)
        }
        TypeKind::VariableArray(a) => {
            stream.align(alignment)?;
            let size_type = basic_of(reg, a.size_type)?;
            let count = ScalarValue::decode(&size_type, stream)?.to_i64();
            if count < 0 {
                return Err(CodecError::InvalidType {
                    reason: format!("negative element count {} on wire", count),
                });
            }
            decode_array_slots(reg, stream, element, a.element, count as usize)
        }
        TypeKind::Enumerated(e) => {
            stream.align(alignment)?;
            let index = decode_enum_index(reg, e, stream)?;
            match &mut element.kind {
                ElementKind::Enumerated(slot) => {
                    *slot = index;
                    Ok(())
                }
                other => Err(shape_err("enumerated", other)),
            }
        }
        TypeKind::FixedRecord(r) => {
            stream.align(alignment)?;
            let slot_count = match &element.kind {
                ElementKind::Record(slots) => slots.len(),
                other => return Err(shape_err("record", other)),
            };
            if slot_count != r.fields.len() {
                return Err(CodecError::ShapeMismatch {
                    expected: format!("record with {} fields", r.fields.len()),
                    found: format!("record with {} slots", slot_count),
                });
            }
            for (index, field) in r.fields.iter().enumerate() {
                // An unbound slot still consumes the field's byte span.
                match element.child_mut(index) {
                    Some(child) => decode(reg, stream, child)?,
                    None => walk::skip_value(reg, field.ty, stream)?,
                }
            }
            Ok(())
        }
        TypeKind::VariantRecord(v) => {
            stream.align(alignment)?;
            let disc = reg.get(v.discriminant)?;
            let e = disc
                .as_enumerated()
                .ok_or_else(|| CodecError::InvalidType {
                    reason: "variant record discriminant must be enumerated".into(),
                })?;
            stream.align(disc.alignment())?;
            let index = decode_enum_index(reg, e, stream)?;
            if index == e.sentinel_index() {
                // No valid alternative: unrecoverable for this element.
                return Err(CodecError::UnresolvedEnumerator {
                    value: index as i64,
                });
            }
            element.select_alternative(reg, index)?;
            let payload = element
                .payload_mut()
                .ok_or(CodecError::NoAlternative)?;
            decode(reg, stream, payload)
        }
    }
}

fn decode_array_slots(
    reg: &TypeRegistry,
    stream: &mut DecodeStream<'_>,
    element: &mut DataElement,
    element_ty: TypeHandle,
    count: usize,
) -> CodecResult<()> {
    match &element.kind {
        ElementKind::Array(_) => {
            element.resize(reg, count)?;
            for index in 0..count {
                let child = element
                    .child_mut(index)
                    .ok_or(CodecError::IndexOutOfBounds {
                        index,
                        length: count,
                    })?;
                decode(reg, stream, child)?;
            }
            Ok(())
        }
        ElementKind::Opaque(_) => {
            let width = basic_of(reg, element_ty)?.width;
            let bytes = stream.read_bytes(count * width)?.to_vec();
            match &mut element.kind {
                ElementKind::Opaque(buffer) => {
                    *buffer = bytes;
                    Ok(())
                }
                other => Err(shape_err("opaque", other)),
            }
        }
        other => Err(shape_err("array", other)),
    }
}

pub(crate) fn encode(
    reg: &TypeRegistry,
    stream: &mut EncodeStream,
    element: &DataElement,
) -> CodecResult<()> {
    let data_type = reg.get(element.ty)?;
    let alignment = data_type.alignment();
    match &data_type.kind {
        TypeKind::Basic(b) => match &element.kind {
            ElementKind::Basic(value) => value.encode(b, stream),
            other => Err(shape_err("basic", other)),
        },
        TypeKind::FixedArray(a) => {
            stream.align(alignment);
            match &element.kind {
                ElementKind::Array(children) => {
                    // Never fewer bytes than the type mandates: missing
                    // trailing slots encode as type-correct defaults.
                    for index in 0..a.count {
                        match children.get(index) {
                            Some(child) => encode(reg, stream, child)?,
                            None => {
                                let default = factory::default_element(reg, a.element)?;
                                encode(reg, stream, &default)?;
                            }
                        }
                    }
                    Ok(())
                }
                ElementKind::Opaque(buffer) => {
                    let width = basic_of(reg, a.element)?.width;
                    let span = a.count * width;
                    let take = buffer.len().min(span);
                    stream.write_bytes(&buffer[..take]);
                    stream.skip(span - take);
                    Ok(())
                }
                other => Err(shape_err("array", other)),
            }
        }
        TypeKind::VariableArray(a) => {
            stream.align(alignment);
            let size_type = basic_of(reg, a.size_type)?;
            match &element.kind {
                ElementKind::Array(children) => {
                    ScalarValue::from_i64(&size_type, children.len() as i64)
                        .encode(&size_type, stream)?;
                    for child in children {
                        encode(reg, stream, child)?;
                    }
                    Ok(())
                }
                ElementKind::Opaque(buffer) => {
                    let width = basic_of(reg, a.element)?.width;
                    let count = buffer.len() / width;
                    ScalarValue::from_i64(&size_type, count as i64)
                        .encode(&size_type, stream)?;
                    stream.write_bytes(&buffer[..count * width]);
                    Ok(())
                }
                other => Err(shape_err("array", other)),
            }
        }
        TypeKind::Enumerated(e) => {
            stream.align(alignment);
            match &element.kind {
                ElementKind::Enumerated(index) => encode_enum_index(reg, e, *index, stream),
                other => Err(shape_err("enumerated", other)),
            }
        }
        TypeKind::FixedRecord(r) => {
            stream.align(alignment);
            let slots = match &element.kind {
                ElementKind::Record(slots) => slots,
                other => return Err(shape_err("record", other)),
            };
            if slots.len() != r.fields.len() {
                return Err(CodecError::ShapeMismatch {
                    expected: format!("record with {} fields", r.fields.len()),
                    found: format!("record with {} slots", slots.len()),
                });
            }
            for (slot, field) in slots.iter().zip(&r.fields) {
                match slot {
                    Some(child) => encode(reg, stream, child)?,
                    None => {
                        // Unbound slot still emits a type-correct span.
                        let default = factory::default_element(reg, field.ty)?;
                        encode(reg, stream, &default)?;
                    }
                }
            }
            Ok(())
        }
        TypeKind::VariantRecord(v) => {
            stream.align(alignment);
            let (index, payload) = match &element.kind {
                ElementKind::Variant { index, payload } => (*index, payload.as_deref()),
                other => return Err(shape_err("variant", other)),
            };
            let index = index.ok_or(CodecError::NoAlternative)?;
            let payload = payload.ok_or(CodecError::NoAlternative)?;
            let disc = reg.get(v.discriminant)?;
            let e = disc
                .as_enumerated()
                .ok_or_else(|| CodecError::InvalidType {
                    reason: "variant record discriminant must be enumerated".into(),
                })?;
            stream.align(disc.alignment());
            encode_enum_index(reg, e, index, stream)?;
            encode(reg, stream, payload)
        }
    }
}
