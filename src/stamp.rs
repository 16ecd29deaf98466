// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared update/dirty tracking for element trees.
//!
//! Every element in one tree holds a clone of the same `Stamp`, so a write
//! anywhere in the tree is visible at the root without parent back-pointers.
//! Children created after attachment inherit the stamp at construction time.

use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct StampState {
    /// Seconds; the host supplies the clock and the meaning.
    timestamp: f64,
    valid: bool,
    dirty: bool,
}

/// Cheaply clonable handle to shared tree state. Clones observe each other's
/// updates.
#[derive(Debug, Clone, Default)]
pub struct Stamp(Arc<Mutex<StampState>>);

impl Stamp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an update time and mark the carried value valid.
    pub fn touch(&self, timestamp: f64) {
        let mut state = self.0.lock();
        state.timestamp = timestamp;
        state.valid = true;
    }

    pub fn timestamp(&self) -> f64 {
        self.0.lock().timestamp
    }

    pub fn is_valid(&self) -> bool {
        self.0.lock().valid
    }

    pub fn set_valid(&self, valid: bool) {
        self.0.lock().valid = valid;
    }

    pub fn is_dirty(&self) -> bool {
        self.0.lock().dirty
    }

    /// Set by element mutators; decode deliberately leaves it untouched so
    /// received values are not echoed back as local changes.
    pub fn mark_dirty(&self) {
        self.0.lock().dirty = true;
    }

    pub fn clear_dirty(&self) {
        self.0.lock().dirty = false;
    }

    /// Whether two handles share the same underlying state.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let a = Stamp::new();
        let b = a.clone();
        assert!(a.ptr_eq(&b));

        b.touch(12.5);
        assert_eq!(a.timestamp(), 12.5);
        assert!(a.is_valid());

        b.mark_dirty();
        assert!(a.is_dirty());
        a.clear_dirty();
        assert!(!b.is_dirty());
    }

    #[test]
    fn test_fresh_stamps_are_distinct() {
        let a = Stamp::new();
        let b = Stamp::new();
        assert!(!a.ptr_eq(&b));
        a.mark_dirty();
        assert!(!b.is_dirty());
    }
}
