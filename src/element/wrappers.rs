// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed convenience views over common element shapes: strings over hinted
//! byte arrays, and small fixed float arrays (positions, orientations).

use crate::element::data_element::DataElement;
use crate::element::value::ScalarValue;
use crate::error::{CodecError, CodecResult};
use crate::types::registry::TypeRegistry;

/// Text content of a string-hinted array element. Invalid UTF-8 is replaced,
/// not rejected, since peers may send arbitrary octets.
pub fn string(element: &DataElement) -> CodecResult<String> {
    let bytes = element.bytes().ok_or_else(|| CodecError::ShapeMismatch {
        expected: "opaque".into(),
        found: element.kind().variant_name().into(),
    })?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Replace the text content of a string-hinted array element.
pub fn set_string(element: &mut DataElement, text: &str) -> CodecResult<()> {
    element.set_bytes(text.as_bytes())
}

fn read_f64s<const N: usize>(element: &DataElement) -> CodecResult<[f64; N]> {
    let mut out = [0.0; N];
    for (index, slot) in out.iter_mut().enumerate() {
        let child = element.child(index).ok_or(CodecError::IndexOutOfBounds {
            index,
            length: element.slot_count(),
        })?;
        *slot = child
            .scalar()
            .and_then(|v| v.as_f64())
            .ok_or_else(|| CodecError::ShapeMismatch {
                expected: "f64".into(),
                found: child.kind().variant_name().into(),
            })?;
    }
    Ok(out)
}

fn write_f64s<const N: usize>(
    reg: &TypeRegistry,
    element: &mut DataElement,
    values: [f64; N],
) -> CodecResult<()> {
    element.resize(reg, N)?;
    for (index, value) in values.into_iter().enumerate() {
        element
            .child_mut(index)
            .ok_or(CodecError::IndexOutOfBounds { index, length: N })?
            .set_scalar(ScalarValue::F64(value))?;
    }
    Ok(())
}

/// Three-component float vector from a fixed float array element.
pub fn vector3(element: &DataElement) -> CodecResult<[f64; 3]> {
    read_f64s(element)
}

pub fn set_vector3(
    reg: &TypeRegistry,
    element: &mut DataElement,
    values: [f64; 3],
) -> CodecResult<()> {
    write_f64s(reg, element, values)
}

/// Four-component quaternion (x, y, z, w) from a fixed float array element.
pub fn quaternion(element: &DataElement) -> CodecResult<[f64; 4]> {
    read_f64s(element)
}

pub fn set_quaternion(
    reg: &TypeRegistry,
    element: &mut DataElement,
    values: [f64; 4],
) -> CodecResult<()> {
    write_f64s(reg, element, values)
}
