//! History engine.
//!
//! `HistoryEngine` owns the content pool, the navigation [`History`] and the
//! [`Picker`]. It answers "what comes next / what came before" with a content
//! reference only; turning that reference into pixels is the renderer's job
//! and happens outside the scheduler lock.
//!
//! Navigation rules:
//!
//! - `advance` at the newest entry (or on an empty history) draws new content
//!   and appends it; anywhere else it steps the cursor forward.
//! - `retreat` at the oldest entry (or on an empty history) draws new content
//!   and prepends it; anywhere else it steps the cursor back.
//! - `reset(to)` truncates the history to `[to]`.

use core::fmt;

use crate::error::ConfigError;
use crate::history::History;
use crate::selection::{self, Picker, Pool};

/// Pool + history + selection policy.
#[derive(Debug)]
pub struct HistoryEngine<T, P> {
    pool: Pool<T>,
    history: History<T>,
    picker: P,
}

impl<T, P> HistoryEngine<T, P>
where
    T: Clone + PartialEq + fmt::Display,
    P: Picker,
{
    /// Create an engine over `pool` with an empty history.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyPool`] when `pool` is empty
    /// - [`ConfigError::ZeroCapacity`] when `capacity` is zero
    pub fn new(pool: Vec<T>, capacity: usize, picker: P) -> Result<Self, ConfigError> {
        let pool = Pool::new(pool).ok_or(ConfigError::EmptyPool)?;
        Ok(Self {
            pool,
            history: History::new(capacity)?,
            picker,
        })
    }

    /// Move forward: step to the next entry, or draw and append at the tail.
    pub fn advance(&mut self) -> T {
        if !self.history.at_tail() {
            if let Some(next) = self.history.step_forward().cloned() {
                tracing::debug!(cursor = ?self.history.cursor(), item = %next, "advance within history");
                return next;
            }
        }
        let item = self.draw();
        if let Some(evicted) = self.history.push_back(item.clone()) {
            tracing::debug!(evicted = %evicted, "history full, dropped oldest entry");
        }
        tracing::debug!(history_len = self.history.len(), item = %item, "advance drew new content");
        item
    }

    /// Move back: step to the previous entry, or draw and prepend at the head.
    pub fn retreat(&mut self) -> T {
        if !self.history.at_head() {
            if let Some(prev) = self.history.step_back().cloned() {
                tracing::debug!(cursor = ?self.history.cursor(), item = %prev, "retreat within history");
                return prev;
            }
        }
        let item = self.draw();
        if let Some(evicted) = self.history.push_front(item.clone()) {
            tracing::debug!(evicted = %evicted, "history full, dropped oldest entry");
        }
        tracing::debug!(history_len = self.history.len(), item = %item, "retreat drew new content");
        item
    }

    /// Replace the whole history with `[to]`, cursor 0.
    pub fn reset(&mut self, to: T) {
        tracing::debug!(dropped = self.history.len(), item = %to, "history reset");
        self.history.reset(to);
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.history.current()
    }

    /// Navigation history.
    pub fn history(&self) -> &History<T> {
        &self.history
    }

    /// The content pool.
    pub fn pool(&self) -> &[T] {
        self.pool.as_slice()
    }

    fn draw(&mut self) -> T {
        let current = self.history.current();
        selection::select(&self.pool, current, &self.history, &mut self.picker).item
    }
}
