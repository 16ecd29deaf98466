// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Default element construction from a type tree alone.

use crate::element::data_element::{DataElement, ElementKind};
use crate::element::value::ScalarValue;
use crate::error::CodecResult;
use crate::types::descriptor::{ArrayHint, TypeKind};
use crate::types::registry::{TypeHandle, TypeRegistry};

/// Build a default, fully typed element matching the given type.
///
/// Purely structural — consumes no stream bytes. Basic types get a zero
/// scalar of the right width/kind, arrays start empty (hinted arrays get a
/// buffer representation), enumerated elements start at the "unknown"
/// sentinel, records get one default child per field, and variant records
/// have no alternative selected until the first set.
pub fn default_element(reg: &TypeRegistry, ty: TypeHandle) -> CodecResult<DataElement> {
    let data_type = reg.get(ty)?;
    let kind = match &data_type.kind {
        TypeKind::Basic(b) => ElementKind::Basic(ScalarValue::default_for(b)),
        TypeKind::FixedArray(a) => match a.hint {
            ArrayHint::None => ElementKind::Array(Vec::new()),
            ArrayHint::Opaque | ArrayHint::String => ElementKind::Opaque(Vec::new()),
        },
        TypeKind::VariableArray(a) => match a.hint {
            ArrayHint::None => ElementKind::Array(Vec::new()),
            ArrayHint::Opaque | ArrayHint::String => ElementKind::Opaque(Vec::new()),
        },
        TypeKind::Enumerated(e) => ElementKind::Enumerated(e.sentinel_index()),
        TypeKind::FixedRecord(r) => {
            let mut slots = Vec::with_capacity(r.fields.len());
            for field in &r.fields {
                slots.push(Some(default_element(reg, field.ty)?));
            }
            ElementKind::Record(slots)
        }
        TypeKind::VariantRecord(_) => ElementKind::Variant {
            index: None,
            payload: None,
        },
    };
    Ok(DataElement::from_parts(ty, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::ByteOrder;
    use crate::types::descriptor::{Alternative, Enumerator, RecordField, ScalarKind};

    #[test]
    fn test_factory_builds_matching_defaults() {
        let mut reg = TypeRegistry::new();
        let u32t = reg
            .basic("Count32BE", 4, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let f64t = reg
            .basic("Float64BE", 8, ScalarKind::Float, ByteOrder::BigEndian)
            .expect("basic");
        let rec = reg
            .fixed_record(
                "Sample",
                vec![RecordField::new("id", u32t), RecordField::new("value", f64t)],
            )
            .expect("record");

        let element = default_element(&reg, rec).expect("factory");
        assert_eq!(element.data_type(), rec);
        assert_eq!(element.slot_count(), 2);
        assert_eq!(element.child(0).and_then(|c| c.scalar()), Some(ScalarValue::U32(0)));
        assert_eq!(element.child(1).and_then(|c| c.scalar()), Some(ScalarValue::F64(0.0)));
    }

    #[test]
    fn test_factory_enumerated_starts_at_sentinel() {
        let mut reg = TypeRegistry::new();
        let u8t = reg
            .basic("Repr8", 1, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let e = reg
            .enumerated(
                "Mode",
                u8t,
                vec![Enumerator::new("OFF", 0), Enumerator::new("ON", 1)],
            )
            .expect("enumerated");
        let element = default_element(&reg, e).expect("factory");
        assert_eq!(element.enumerated_index(), Some(2));
    }

    #[test]
    fn test_factory_variant_has_no_alternative() {
        let mut reg = TypeRegistry::new();
        let u8t = reg
            .basic("Repr8", 1, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let disc = reg
            .enumerated("Kind", u8t, vec![Enumerator::new("A", 0)])
            .expect("enumerated");
        let v = reg
            .variant_record("Value", disc, vec![Alternative::new("a", u8t)])
            .expect("variant");
        let element = default_element(&reg, v).expect("factory");
        assert_eq!(element.alternative_index(), None);
        assert!(element.payload().is_none());
    }

    #[test]
    fn test_factory_hinted_array_uses_buffer() {
        let mut reg = TypeRegistry::new();
        let u8t = reg
            .basic("Octet", 1, ScalarKind::Unsigned, ByteOrder::BigEndian)
            .expect("basic");
        let s = reg
            .fixed_array_with_hint("Callsign", u8t, 8, crate::types::descriptor::ArrayHint::String)
            .expect("array");
        let element = default_element(&reg, s).expect("factory");
        assert_eq!(element.bytes(), Some(&[][..]));
    }
}
