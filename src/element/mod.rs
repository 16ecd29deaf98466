// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element trees: typed value holders and their wire transfer.

pub(crate) mod codec;
pub mod data_element;
pub mod factory;
pub mod value;
pub mod wrappers;

pub use data_element::{DataElement, ElementKind};
pub use factory::default_element;
pub use value::ScalarValue;
