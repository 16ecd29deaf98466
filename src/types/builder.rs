// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent construction of composite types, plus the handful of well-known
//! types most object models start from.

use crate::error::CodecResult;
use crate::stream::ByteOrder;
use crate::types::descriptor::{Alternative, ArrayHint, Enumerator, RecordField, ScalarKind};
use crate::types::registry::{TypeHandle, TypeRegistry};

/// Builder for fixed record types.
///
/// ```
/// use omcodec::{ByteOrder, RecordBuilder, ScalarKind, TypeRegistry};
///
/// let mut reg = TypeRegistry::new();
/// let f64t = reg
///     .basic("Float64BE", 8, ScalarKind::Float, ByteOrder::BigEndian)
///     .unwrap();
/// let rec = RecordBuilder::new("Point")
///     .field("x", f64t)
///     .field("y", f64t)
///     .build(&mut reg)
///     .unwrap();
/// assert_eq!(reg.alignment_of(rec).unwrap(), 8);
/// ```
#[derive(Debug)]
pub struct RecordBuilder {
    name: String,
    semantics: Option<String>,
    fields: Vec<RecordField>,
}

impl RecordBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            semantics: None,
            fields: Vec::new(),
        }
    }

    pub fn semantics(mut self, text: impl Into<String>) -> Self {
        self.semantics = Some(text.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, ty: TypeHandle) -> Self {
        self.fields.push(RecordField::new(name, ty));
        self
    }

    pub fn build(self, reg: &mut TypeRegistry) -> CodecResult<TypeHandle> {
        let handle = reg.fixed_record(self.name, self.fields)?;
        if let Some(text) = self.semantics {
            reg.set_semantics(handle, text)?;
        }
        Ok(handle)
    }
}

/// Builder for enumerated types over a basic representation.
#[derive(Debug)]
pub struct EnumeratedBuilder {
    name: String,
    representation: TypeHandle,
    enumerators: Vec<Enumerator>,
}

impl EnumeratedBuilder {
    pub fn new(name: impl Into<String>, representation: TypeHandle) -> Self {
        Self {
            name: name.into(),
            representation,
            enumerators: Vec::new(),
        }
    }

    pub fn enumerator(mut self, name: impl Into<String>, value: i64) -> Self {
        self.enumerators.push(Enumerator::new(name, value));
        self
    }

    pub fn build(self, reg: &mut TypeRegistry) -> CodecResult<TypeHandle> {
        reg.enumerated(self.name, self.representation, self.enumerators)
    }
}

/// Builder for variant record types. Alternatives are positional against the
/// discriminant's enumerator table, so add them in table order.
#[derive(Debug)]
pub struct VariantBuilder {
    name: String,
    discriminant: TypeHandle,
    alternatives: Vec<Alternative>,
}

impl VariantBuilder {
    pub fn new(name: impl Into<String>, discriminant: TypeHandle) -> Self {
        Self {
            name: name.into(),
            discriminant,
            alternatives: Vec::new(),
        }
    }

    pub fn alternative(mut self, name: impl Into<String>, ty: TypeHandle) -> Self {
        self.alternatives.push(Alternative::new(name, ty));
        self
    }

    pub fn build(self, reg: &mut TypeRegistry) -> CodecResult<TypeHandle> {
        reg.variant_record(self.name, self.discriminant, self.alternatives)
    }
}

/// Well-known types, registered on demand and looked up by name afterwards
/// so repeated calls reuse one handle.
pub mod well_known {
    use super::*;

    fn find_or<F>(reg: &mut TypeRegistry, name: &str, f: F) -> CodecResult<TypeHandle>
    where
        F: FnOnce(&mut TypeRegistry) -> CodecResult<TypeHandle>,
    {
        match reg.find(name) {
            Some(handle) => Ok(handle),
            None => f(reg),
        }
    }

    /// 8-byte big-endian float.
    pub fn float64_be(reg: &mut TypeRegistry) -> CodecResult<TypeHandle> {
        find_or(reg, "Float64BE", |reg| {
            reg.basic("Float64BE", 8, ScalarKind::Float, ByteOrder::BigEndian)
        })
    }

    /// 4-byte big-endian float.
    pub fn float32_be(reg: &mut TypeRegistry) -> CodecResult<TypeHandle> {
        find_or(reg, "Float32BE", |reg| {
            reg.basic("Float32BE", 4, ScalarKind::Float, ByteOrder::BigEndian)
        })
    }

    /// Single octet.
    pub fn octet(reg: &mut TypeRegistry) -> CodecResult<TypeHandle> {
        find_or(reg, "Octet", |reg| {
            reg.basic("Octet", 1, ScalarKind::Unsigned, ByteOrder::BigEndian)
        })
    }

    /// Fixed array of three 8-byte big-endian floats.
    pub fn vector3d(reg: &mut TypeRegistry) -> CodecResult<TypeHandle> {
        find_or(reg, "Vector3D", |reg| {
            let f64t = float64_be(reg)?;
            reg.fixed_array("Vector3D", f64t, 3)
        })
    }

    /// Fixed array of four 8-byte big-endian floats (x, y, z, w).
    pub fn quaternion(reg: &mut TypeRegistry) -> CodecResult<TypeHandle> {
        find_or(reg, "Quaternion", |reg| {
            let f64t = float64_be(reg)?;
            reg.fixed_array("Quaternion", f64t, 4)
        })
    }

    /// Count-prefixed byte string.
    pub fn ascii_string(reg: &mut TypeRegistry) -> CodecResult<TypeHandle> {
        find_or(reg, "ASCIIString", |reg| {
            let elem = octet(reg)?;
            let size_type = reg.default_size_type()?;
            reg.variable_array_with_size_type("ASCIIString", elem, size_type, ArrayHint::String)
        })
    }

    /// Count-prefixed opaque byte buffer.
    pub fn opaque_data(reg: &mut TypeRegistry) -> CodecResult<TypeHandle> {
        find_or(reg, "OpaqueData", |reg| {
            let elem = octet(reg)?;
            let size_type = reg.default_size_type()?;
            reg.variable_array_with_size_type("OpaqueData", elem, size_type, ArrayHint::Opaque)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let mut reg = TypeRegistry::new();
        let f64t = well_known::float64_be(&mut reg).expect("type");
        let rec = RecordBuilder::new("Point")
            .semantics("cartesian position")
            .field("x", f64t)
            .field("y", f64t)
            .build(&mut reg)
            .expect("build");
        let ty = reg.get(rec).expect("get");
        assert_eq!(ty.name, "Point");
        assert_eq!(ty.semantics, "cartesian position");
        assert_eq!(reg.alignment_of(rec).expect("alignment"), 8);
    }

    #[test]
    fn test_enumerated_and_variant_builders() {
        let mut reg = TypeRegistry::new();
        let rep = reg
            .basic("Repr32BE", 4, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let disc = EnumeratedBuilder::new("Kind", rep)
            .enumerator("SCALAR", 1)
            .enumerator("TEXT", 2)
            .build(&mut reg)
            .expect("build");
        let text = well_known::ascii_string(&mut reg).expect("type");
        let f64t = well_known::float64_be(&mut reg).expect("type");
        let v = VariantBuilder::new("Value", disc)
            .alternative("scalar", f64t)
            .alternative("text", text)
            .build(&mut reg)
            .expect("build");
        assert!(reg.get(v).is_ok());
    }

    #[test]
    fn test_well_known_types_are_registered_once() {
        let mut reg = TypeRegistry::new();
        let a = well_known::vector3d(&mut reg).expect("type");
        let b = well_known::vector3d(&mut reg).expect("type");
        assert_eq!(a, b);
        let count = reg.len();
        well_known::quaternion(&mut reg).expect("type");
        // Quaternion reuses the float type already in the registry.
        assert_eq!(reg.len(), count + 1);
    }
}
