//! Bounded navigation history.
//!
//! `History` is an ordered log of previously selected content with a cursor
//! marking the entry on screen. It never grows past `capacity`: inserting at
//! either end evicts the oldest entry (index 0) first when full.
//!
//! The cursor is `Some(i)` with `i < len()` whenever the history is
//! non-empty, and `None` otherwise.

use std::collections::VecDeque;

use crate::error::ConfigError;

/// Bounded, cursor-addressed sequence of content references.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    capacity: usize,
    cursor: Option<usize>,
}

impl<T> History<T> {
    /// Create an empty history holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            entries: VecDeque::new(),
            capacity,
            cursor: None,
        })
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` before the first selection.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position, `None` when empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    /// Entries oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Cursor sits on the newest entry (or the history is empty).
    pub fn at_tail(&self) -> bool {
        match self.cursor {
            None => true,
            Some(i) => i + 1 == self.entries.len(),
        }
    }

    /// Cursor sits on the oldest entry (or the history is empty).
    pub fn at_head(&self) -> bool {
        matches!(self.cursor, None | Some(0))
    }

    /// Move the cursor one entry towards the tail.
    ///
    /// Returns `None` (cursor unchanged) when already at the tail.
    pub fn step_forward(&mut self) -> Option<&T> {
        if self.at_tail() {
            return None;
        }
        let next = self.cursor.map_or(0, |i| i + 1);
        self.cursor = Some(next);
        self.entries.get(next)
    }

    /// Move the cursor one entry towards the head.
    ///
    /// Returns `None` (cursor unchanged) when already at the head.
    pub fn step_back(&mut self) -> Option<&T> {
        let prev = self.cursor?.checked_sub(1)?;
        self.cursor = Some(prev);
        self.entries.get(prev)
    }

    /// Append `item` and move the cursor onto it.
    ///
    /// Returns the evicted oldest entry when the history was full.
    pub fn push_back(&mut self, item: T) -> Option<T> {
        self.entries.push_back(item);
        let evicted = if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.cursor = Some(self.entries.len() - 1);
        evicted
    }

    /// Prepend `item` at index 0 and move the cursor onto it.
    ///
    /// When full, index 0 is evicted before the insert, so the new entry is
    /// never the one dropped. Returns the evicted entry.
    pub fn push_front(&mut self, item: T) -> Option<T> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_front(item);
        self.cursor = Some(0);
        evicted
    }

    /// Replace everything with `[item]`, cursor 0.
    pub fn reset(&mut self, item: T) {
        self.entries.clear();
        self.entries.push_back(item);
        self.cursor = Some(0);
    }
}

impl<T: PartialEq> History<T> {
    /// `true` when `item` appears anywhere in the history.
    pub fn contains(&self, item: &T) -> bool {
        self.entries.contains(item)
    }
}
