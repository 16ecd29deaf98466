// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-tree walks that need no element tree.
//!
//! `skip_value` consumes exactly one encoded value from a stream, which is
//! how unbound record slots stay byte-accurate during decode. The scalar
//! walks read or write a single primitive straight through a type handle,
//! degrading gracefully (with a warning) when the type turns out to be
//! composite.

use crate::element::{codec, factory};
use crate::element::value::ScalarValue;
use crate::error::{CodecError, CodecResult};
use crate::stream::{DecodeStream, EncodeStream};
use crate::types::descriptor::{BasicType, ScalarKind, TypeKind};
use crate::types::registry::{TypeHandle, TypeRegistry};

fn basic_of(reg: &TypeRegistry, ty: TypeHandle) -> CodecResult<BasicType> {
    reg.get(ty)?
        .as_basic()
        .copied()
        .ok_or_else(|| CodecError::InvalidType {
            reason: "expected a basic constituent type".into(),
        })
}

/// Consume exactly one encoded value of type `ty`, advancing the stream past
/// its padding and payload without building any element.
pub fn skip_value(
    reg: &TypeRegistry,
    ty: TypeHandle,
    stream: &mut DecodeStream<'_>,
) -> CodecResult<()> {
    let data_type = reg.get(ty)?;
    stream.align(data_type.alignment())?;
    match &data_type.kind {
        TypeKind::Basic(b) => stream.skip(b.width),
        TypeKind::FixedArray(a) => {
            for _ in 0..a.count {
                skip_value(reg, a.element, stream)?;
            }
            Ok(())
        }
        TypeKind::VariableArray(a) => {
            let size_type = basic_of(reg, a.size_type)?;
            let count = ScalarValue::decode(&size_type, stream)?.to_i64();
            if count < 0 {
                return Err(CodecError::InvalidType {
                    reason: format!("negative element count {} on wire", count),
                });
            }
            for _ in 0..count {
                skip_value(reg, a.element, stream)?;
            }
            Ok(())
        }
        TypeKind::Enumerated(e) => {
            let rep = basic_of(reg, e.representation)?;
            stream.align(rep.alignment())?;
            stream.skip(rep.width)
        }
        TypeKind::FixedRecord(r) => {
            for field in &r.fields {
                skip_value(reg, field.ty, stream)?;
            }
            Ok(())
        }
        TypeKind::VariantRecord(v) => {
            // The discriminant decides how many bytes follow, so it must
            // resolve even when the payload is thrown away.
            let disc = reg.get(v.discriminant)?;
            let e = disc
                .as_enumerated()
                .ok_or_else(|| CodecError::InvalidType {
                    reason: "variant record discriminant must be enumerated".into(),
                })?;
            let rep = basic_of(reg, e.representation)?;
            stream.align(disc.alignment())?;
            let value = ScalarValue::decode(&rep, stream)?.to_i64();
            let index = e.index_of_value(value);
            if index == e.sentinel_index() {
                return Err(CodecError::UnresolvedEnumerator { value });
            }
            skip_value(reg, v.alternatives[index].ty, stream)
        }
    }
}

/// Primitive types usable with the scalar walks.
pub trait Scalar: Copy {
    fn from_scalar(value: ScalarValue) -> Self;
    fn to_scalar(self, ty: &BasicType) -> ScalarValue;
}

macro_rules! impl_scalar {
    ($ty:ty) => {
        impl Scalar for $ty {
            fn from_scalar(value: ScalarValue) -> Self {
                match value {
                    ScalarValue::U8(v) => v as $ty,
                    ScalarValue::U16(v) => v as $ty,
                    ScalarValue::U32(v) => v as $ty,
                    ScalarValue::U64(v) => v as $ty,
                    ScalarValue::I8(v) => v as $ty,
                    ScalarValue::I16(v) => v as $ty,
                    ScalarValue::I32(v) => v as $ty,
                    ScalarValue::I64(v) => v as $ty,
                    ScalarValue::F32(v) => v as $ty,
                    ScalarValue::F64(v) => v as $ty,
                }
            }

            fn to_scalar(self, ty: &BasicType) -> ScalarValue {
                match (ty.kind, ty.width) {
                    (ScalarKind::Unsigned, 1) => ScalarValue::U8(self as u8),
                    (ScalarKind::Unsigned, 2) => ScalarValue::U16(self as u16),
                    (ScalarKind::Unsigned, 4) => ScalarValue::U32(self as u32),
                    (ScalarKind::Unsigned, _) => ScalarValue::U64(self as u64),
                    (ScalarKind::Signed, 1) => ScalarValue::I8(self as i8),
                    (ScalarKind::Signed, 2) => ScalarValue::I16(self as i16),
                    (ScalarKind::Signed, 4) => ScalarValue::I32(self as i32),
                    (ScalarKind::Signed, _) => ScalarValue::I64(self as i64),
                    (ScalarKind::Float, 4) => ScalarValue::F32(self as f32),
                    (ScalarKind::Float, _) => ScalarValue::F64(self as f64),
                }
            }
        }
    };
}

impl_scalar!(u8);
impl_scalar!(u16);
impl_scalar!(u32);
impl_scalar!(u64);
impl_scalar!(i8);
impl_scalar!(i16);
impl_scalar!(i32);
impl_scalar!(i64);
impl_scalar!(f32);
impl_scalar!(f64);

/// Decode one value of type `ty` and convert it to `T` if the type is basic.
///
/// A composite type is skipped instead (the stream still advances past one
/// full value) and `None` is returned.
pub fn decode_scalar<T: Scalar>(
    reg: &TypeRegistry,
    ty: TypeHandle,
    stream: &mut DecodeStream<'_>,
) -> CodecResult<Option<T>> {
    let data_type = reg.get(ty)?;
    match &data_type.kind {
        TypeKind::Basic(b) => {
            let value = ScalarValue::decode(b, stream)?;
            Ok(Some(T::from_scalar(value)))
        }
        other => {
            log::warn!(
                "[walk::decode_scalar] type '{}' is {}, not basic; skipping one value",
                data_type.name,
                other.variant_name()
            );
            skip_value(reg, ty, stream)?;
            Ok(None)
        }
    }
}

/// Encode `value` through type `ty` if the type is basic.
///
/// A composite type gets a default-constructed value encoded in its place so
/// the output keeps the byte span the type mandates.
pub fn encode_scalar<T: Scalar>(
    reg: &TypeRegistry,
    ty: TypeHandle,
    value: T,
    stream: &mut EncodeStream,
) -> CodecResult<()> {
    let data_type = reg.get(ty)?;
    match &data_type.kind {
        TypeKind::Basic(b) => value.to_scalar(b).encode(b, stream),
        other => {
            log::warn!(
                "[walk::encode_scalar] type '{}' is {}, not basic; encoding a default value",
                data_type.name,
                other.variant_name()
            );
            let default = factory::default_element(reg, ty)?;
            codec::encode(reg, stream, &default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::ByteOrder;
    use crate::types::descriptor::{Enumerator, RecordField};

    fn sample_record(reg: &mut TypeRegistry) -> TypeHandle {
        let u8t = reg
            .basic("Octet", 1, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let u32t = reg
            .basic("Count32BE", 4, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        reg.fixed_record(
            "Tagged",
            vec![RecordField::new("tag", u8t), RecordField::new("value", u32t)],
        )
        .expect("record")
    }

    #[test]
    fn test_skip_record_consumes_full_span() {
        let mut reg = TypeRegistry::new();
        let rec = sample_record(&mut reg);

        // tag, 3 padding bytes, u32, then a trailing marker.
        let bytes = [0xAA, 0, 0, 0, 0, 0, 0, 0x05, 0x99];
        let mut stream = DecodeStream::new(&bytes);
        skip_value(&reg, rec, &mut stream).expect("skip");
        assert_eq!(stream.offset(), 8);
        assert_eq!(stream.read_u8().expect("marker"), 0x99);
    }

    #[test]
    fn test_skip_variable_array_reads_count() {
        let mut reg = TypeRegistry::new();
        let u16t = reg
            .basic("Unsigned16BE", 2, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let arr = reg.variable_array("Values", u16t).expect("array");

        let bytes = [0, 0, 0, 2, 0, 1, 0, 2, 0xEE];
        let mut stream = DecodeStream::new(&bytes);
        skip_value(&reg, arr, &mut stream).expect("skip");
        assert_eq!(stream.offset(), 8);
    }

    #[test]
    fn test_skip_variant_requires_known_discriminant() {
        let mut reg = TypeRegistry::new();
        let u8t = reg
            .basic("Repr8", 1, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let disc = reg
            .enumerated("Kind", u8t, vec![Enumerator::new("A", 0)])
            .expect("enumerated");
        let v = reg
            .variant_record(
                "Value",
                disc,
                vec![crate::types::descriptor::Alternative::new("a", u8t)],
            )
            .expect("variant");

        let good = [0u8, 7];
        let mut stream = DecodeStream::new(&good);
        skip_value(&reg, v, &mut stream).expect("skip");
        assert_eq!(stream.offset(), 2);

        let bad = [5u8, 7];
        let mut stream = DecodeStream::new(&bad);
        let err = skip_value(&reg, v, &mut stream).unwrap_err();
        assert!(matches!(err, CodecError::UnresolvedEnumerator { value: 5 }));
    }

    #[test]
    fn test_decode_scalar_basic_and_composite() {
        let mut reg = TypeRegistry::new();
        let u32t = reg
            .basic("Count32BE", 4, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let rec = sample_record(&mut reg);

        let bytes = [0, 0, 1, 0];
        let mut stream = DecodeStream::new(&bytes);
        let v: Option<u64> = decode_scalar(&reg, u32t, &mut stream).expect("decode");
        assert_eq!(v, Some(256));

        // Composite: skipped, not extracted.
        let bytes = [0xAA, 0, 0, 0, 0, 0, 0, 0x05];
        let mut stream = DecodeStream::new(&bytes);
        let v: Option<u32> = decode_scalar(&reg, rec, &mut stream).expect("decode");
        assert_eq!(v, None);
        assert_eq!(stream.offset(), 8);
    }

    #[test]
    fn test_encode_scalar_converts_to_declared_width() {
        let mut reg = TypeRegistry::new();
        let u16t = reg
            .basic("Unsigned16BE", 2, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let mut out = EncodeStream::new();
        encode_scalar(&reg, u16t, 770u64, &mut out).expect("encode");
        assert_eq!(out.as_slice(), &[3, 2]);
    }

    #[test]
    fn test_encode_scalar_composite_emits_default_span() {
        let mut reg = TypeRegistry::new();
        let rec = sample_record(&mut reg);
        let mut out = EncodeStream::new();
        encode_scalar(&reg, rec, 1.5f64, &mut out).expect("encode");
        // One full default-encoded record: tag + padding + u32.
        assert_eq!(out.as_slice(), &[0u8; 8]);
    }
}
