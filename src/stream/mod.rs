// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte-stream primitives for the object-model wire format.
//!
//! `DecodeStream` wraps a read-only buffer with a monotonically increasing
//! cursor; `EncodeStream` wraps a growable buffer with the same cursor
//! discipline. Both expose aligned, endianness-aware primitive access and an
//! unconditional `skip`.
//!
//! Byte order is resolved through one runtime host-endianness probe plus
//! explicit byte reversal, so producer and consumer layouts match regardless
//! of host architecture.

use crate::error::{CodecError, CodecResult};
use std::sync::OnceLock;

/// Wire byte order of a basic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

/// Host byte order, probed once at first use.
pub fn host_order() -> ByteOrder {
    static HOST: OnceLock<ByteOrder> = OnceLock::new();
    *HOST.get_or_init(|| {
        if u16::from_ne_bytes([1, 0]) == 1 {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    })
}

/// Generate order-aware read methods for integer primitives.
///
/// Each generated method:
/// 1. Checks buffer bounds (returns `CodecError::StreamExhausted` on overrun)
/// 2. Copies N bytes, reversing them when wire order differs from host order
/// 3. Advances the cursor
macro_rules! impl_read {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self, order: ByteOrder) -> CodecResult<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.take($size)?);
            if order != host_order() {
                bytes.reverse();
            }
            Ok(<$type>::from_ne_bytes(bytes))
        }
    };
}

/// Generate order-aware write methods for integer primitives.
macro_rules! impl_write {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self, value: $type, order: ByteOrder) {
            let mut bytes = value.to_ne_bytes();
            if order != host_order() {
                bytes.reverse();
            }
            self.buffer.extend_from_slice(&bytes);
        }
    };
}

/// Read cursor over an immutable byte buffer.
pub struct DecodeStream<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> DecodeStream<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// Advance the cursor to the next multiple of `alignment`.
    ///
    /// Fails when the advance would run past the end of the buffer.
    pub fn align(&mut self, alignment: usize) -> CodecResult<()> {
        if alignment <= 1 {
            return Ok(());
        }
        let mask = alignment - 1;
        let aligned = (self.offset + mask) & !mask;
        if aligned > self.buffer.len() {
            return Err(CodecError::StreamExhausted {
                offset: self.offset,
                need: aligned - self.offset,
            });
        }
        self.offset = aligned;
        Ok(())
    }

    /// Advance the cursor by `count` bytes without interpreting them.
    pub fn skip(&mut self, count: usize) -> CodecResult<()> {
        self.take(count).map(|_| ())
    }

    pub fn read_bytes(&mut self, count: usize) -> CodecResult<&'a [u8]> {
        self.take(count)
    }

    fn take(&mut self, count: usize) -> CodecResult<&'a [u8]> {
        if self.offset + count > self.buffer.len() {
            return Err(CodecError::StreamExhausted {
                offset: self.offset,
                need: count,
            });
        }
        let slice = &self.buffer[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> CodecResult<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    impl_read!(read_u16, u16, 2);
    impl_read!(read_u32, u32, 4);
    impl_read!(read_u64, u64, 8);
    impl_read!(read_i16, i16, 2);
    impl_read!(read_i32, i32, 4);
    impl_read!(read_i64, i64, 8);

    pub fn read_f32(&mut self, order: ByteOrder) -> CodecResult<f32> {
        Ok(f32::from_bits(self.read_u32(order)?))
    }

    pub fn read_f64(&mut self, order: ByteOrder) -> CodecResult<f64> {
        Ok(f64::from_bits(self.read_u64(order)?))
    }
}

/// Write cursor over a growable byte buffer.
///
/// The cursor always sits at the end of the buffer; alignment and `skip`
/// grow the buffer with zero padding.
#[derive(Default)]
pub struct EncodeStream {
    buffer: Vec<u8>,
}

impl EncodeStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn offset(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }

    /// Grow the buffer with zero padding to the next multiple of `alignment`.
    pub fn align(&mut self, alignment: usize) {
        if alignment <= 1 {
            return;
        }
        let mask = alignment - 1;
        let aligned = (self.buffer.len() + mask) & !mask;
        self.buffer.resize(aligned, 0);
    }

    /// Emit `count` zero bytes.
    pub fn skip(&mut self, count: usize) {
        let target = self.buffer.len() + count;
        self.buffer.resize(target, 0);
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buffer.push(value as u8);
    }

    impl_write!(write_u16, u16, 2);
    impl_write!(write_u32, u32, 4);
    impl_write!(write_u64, u64, 8);
    impl_write!(write_i16, i16, 2);
    impl_write!(write_i32, i32, 4);
    impl_write!(write_i64, i64, 8);

    pub fn write_f32(&mut self, value: f32, order: ByteOrder) {
        self.write_u32(value.to_bits(), order);
    }

    pub fn write_f64(&mut self, value: f64, order: ByteOrder) {
        self.write_u64(value.to_bits(), order);
    }
}
