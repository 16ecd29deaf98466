// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar value storage for basic elements.

use crate::error::{CodecError, CodecResult};
use crate::stream::{DecodeStream, EncodeStream};
use crate::types::descriptor::{BasicType, ScalarKind};

/// One primitive value of a matching width/kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl ScalarValue {
    /// Zero value of the given basic type's width/kind.
    pub fn default_for(ty: &BasicType) -> Self {
        match (ty.kind, ty.width) {
            (ScalarKind::Unsigned, 1) => Self::U8(0),
            (ScalarKind::Unsigned, 2) => Self::U16(0),
            (ScalarKind::Unsigned, 4) => Self::U32(0),
            (ScalarKind::Unsigned, _) => Self::U64(0),
            (ScalarKind::Signed, 1) => Self::I8(0),
            (ScalarKind::Signed, 2) => Self::I16(0),
            (ScalarKind::Signed, 4) => Self::I32(0),
            (ScalarKind::Signed, _) => Self::I64(0),
            (ScalarKind::Float, 4) => Self::F32(0.0),
            (ScalarKind::Float, _) => Self::F64(0.0),
        }
    }

    /// Whether this value's variant matches the basic type's width/kind.
    pub fn matches(&self, ty: &BasicType) -> bool {
        let (kind, width) = match self {
            Self::U8(_) => (ScalarKind::Unsigned, 1),
            Self::U16(_) => (ScalarKind::Unsigned, 2),
            Self::U32(_) => (ScalarKind::Unsigned, 4),
            Self::U64(_) => (ScalarKind::Unsigned, 8),
            Self::I8(_) => (ScalarKind::Signed, 1),
            Self::I16(_) => (ScalarKind::Signed, 2),
            Self::I32(_) => (ScalarKind::Signed, 4),
            Self::I64(_) => (ScalarKind::Signed, 8),
            Self::F32(_) => (ScalarKind::Float, 4),
            Self::F64(_) => (ScalarKind::Float, 8),
        };
        kind == ty.kind && width == ty.width
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
        }
    }

    /// Align and decode one value of the given basic type.
    pub fn decode(ty: &BasicType, stream: &mut DecodeStream<'_>) -> CodecResult<Self> {
        stream.align(ty.alignment())?;
        let order = ty.order;
        Ok(match (ty.kind, ty.width) {
            (ScalarKind::Unsigned, 1) => Self::U8(stream.read_u8()?),
            (ScalarKind::Unsigned, 2) => Self::U16(stream.read_u16(order)?),
            (ScalarKind::Unsigned, 4) => Self::U32(stream.read_u32(order)?),
            (ScalarKind::Unsigned, _) => Self::U64(stream.read_u64(order)?),
            (ScalarKind::Signed, 1) => Self::I8(stream.read_i8()?),
            (ScalarKind::Signed, 2) => Self::I16(stream.read_i16(order)?),
            (ScalarKind::Signed, 4) => Self::I32(stream.read_i32(order)?),
            (ScalarKind::Signed, _) => Self::I64(stream.read_i64(order)?),
            (ScalarKind::Float, 4) => Self::F32(stream.read_f32(order)?),
            (ScalarKind::Float, _) => Self::F64(stream.read_f64(order)?),
        })
    }

    /// Align and encode this value through the given basic type. Fails on a
    /// width/kind mismatch without writing anything.
    pub fn encode(&self, ty: &BasicType, stream: &mut EncodeStream) -> CodecResult<()> {
        if !self.matches(ty) {
            return Err(CodecError::ShapeMismatch {
                expected: format!("{:?} scalar of width {}", ty.kind, ty.width),
                found: self.variant_name().into(),
            });
        }
        stream.align(ty.alignment());
        let order = ty.order;
        match *self {
            Self::U8(v) => stream.write_u8(v),
            Self::U16(v) => stream.write_u16(v, order),
            Self::U32(v) => stream.write_u32(v, order),
            Self::U64(v) => stream.write_u64(v, order),
            Self::I8(v) => stream.write_i8(v),
            Self::I16(v) => stream.write_i16(v, order),
            Self::I32(v) => stream.write_i32(v, order),
            Self::I64(v) => stream.write_i64(v, order),
            Self::F32(v) => stream.write_f32(v, order),
            Self::F64(v) => stream.write_f64(v, order),
        }
        Ok(())
    }

    /// Widen to `i64`, used for enumerator-table translation.
    pub fn to_i64(&self) -> i64 {
        match *self {
            Self::U8(v) => v as i64,
            Self::U16(v) => v as i64,
            Self::U32(v) => v as i64,
            Self::U64(v) => v as i64,
            Self::I8(v) => v as i64,
            Self::I16(v) => v as i64,
            Self::I32(v) => v as i64,
            Self::I64(v) => v,
            Self::F32(v) => v as i64,
            Self::F64(v) => v as i64,
        }
    }

    /// Narrow an `i64` into a value of the given basic type's width/kind.
    pub fn from_i64(ty: &BasicType, value: i64) -> Self {
        match (ty.kind, ty.width) {
            (ScalarKind::Unsigned, 1) => Self::U8(value as u8),
            (ScalarKind::Unsigned, 2) => Self::U16(value as u16),
            (ScalarKind::Unsigned, 4) => Self::U32(value as u32),
            (ScalarKind::Unsigned, _) => Self::U64(value as u64),
            (ScalarKind::Signed, 1) => Self::I8(value as i8),
            (ScalarKind::Signed, 2) => Self::I16(value as i16),
            (ScalarKind::Signed, 4) => Self::I32(value as i32),
            (ScalarKind::Signed, _) => Self::I64(value),
            (ScalarKind::Float, 4) => Self::F32(value as f32),
            (ScalarKind::Float, _) => Self::F64(value as f64),
        }
    }
}

macro_rules! impl_scalar_accessor {
    ($name:ident, $ty:ty, $variant:ident) => {
        impl ScalarValue {
            pub fn $name(&self) -> Option<$ty> {
                match self {
                    Self::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }

        impl From<$ty> for ScalarValue {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_scalar_accessor!(as_u8, u8, U8);
impl_scalar_accessor!(as_u16, u16, U16);
impl_scalar_accessor!(as_u32, u32, U32);
impl_scalar_accessor!(as_u64, u64, U64);
impl_scalar_accessor!(as_i8, i8, I8);
impl_scalar_accessor!(as_i16, i16, I16);
impl_scalar_accessor!(as_i32, i32, I32);
impl_scalar_accessor!(as_i64, i64, I64);
impl_scalar_accessor!(as_f32, f32, F32);
impl_scalar_accessor!(as_f64, f64, F64);
