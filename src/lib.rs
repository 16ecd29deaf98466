// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven binary codec for federated-simulation data exchange.
//!
//! Object models are described at runtime as a tree of [`DataType`]s owned
//! by a [`TypeRegistry`]; values live in a parallel [`DataElement`] tree
//! bound to those types. The type tree drives the wire layout: per-value
//! alignment padding, configurable byte order, count-prefixed variable
//! arrays, enumerated values as their representation, variant records as
//! discriminant plus live alternative.
//!
//! ```
//! use omcodec::{
//!     default_element, DecodeStream, EncodeStream, RecordBuilder, ScalarValue, TypeRegistry,
//! };
//! use omcodec::types::well_known;
//!
//! let mut reg = TypeRegistry::new();
//! let f64t = well_known::float64_be(&mut reg).unwrap();
//! let point = RecordBuilder::new("Point")
//!     .field("x", f64t)
//!     .field("y", f64t)
//!     .build(&mut reg)
//!     .unwrap();
//!
//! let mut element = default_element(&reg, point).unwrap();
//! element
//!     .field_mut(&reg, "x")
//!     .unwrap()
//!     .set_scalar(ScalarValue::F64(1.5))
//!     .unwrap();
//!
//! let mut out = EncodeStream::new();
//! element.encode(&reg, &mut out).unwrap();
//! assert_eq!(out.offset(), 16);
//!
//! let bytes = out.into_vec();
//! let mut decoded = default_element(&reg, point).unwrap();
//! decoded.decode(&reg, &mut DecodeStream::new(&bytes)).unwrap();
//! assert_eq!(
//!     decoded.field(&reg, "x").and_then(|f| f.scalar()),
//!     Some(ScalarValue::F64(1.5))
//! );
//! ```

pub mod element;
pub mod error;
pub mod path;
pub mod stamp;
pub mod stream;
pub mod types;


pub use element::{default_element, DataElement, ElementKind, ScalarValue};
pub use error::{CodecError, CodecResult};
pub use path::{Path, PathStep};
pub use stamp::Stamp;
pub use stream::{ByteOrder, DecodeStream, EncodeStream};
pub use types::{
    ArrayHint, BasicType, DataType, EnumeratedBuilder, Enumerator, RecordBuilder, RecordField,
    ScalarKind, TypeHandle, TypeKind, TypeRegistry, VariantBuilder,
};
