// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Data type descriptors, the owning registry, and type-tree walks.

pub mod builder;
pub mod descriptor;
pub mod registry;
pub mod walk;

pub use builder::{well_known, EnumeratedBuilder, RecordBuilder, VariantBuilder};
pub use descriptor::{
    Alternative, ArrayHint, BasicType, DataType, EnumeratedType, Enumerator, FixedArrayType,
    FixedRecordType, RecordField, ScalarKind, TypeKind, VariableArrayType, VariantRecordType,
};
pub use registry::{TypeHandle, TypeRegistry};
pub use walk::{decode_scalar, encode_scalar, skip_value, Scalar};
