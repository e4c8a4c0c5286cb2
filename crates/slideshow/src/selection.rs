//! Random selection policy.
//!
//! A new draw is uniform over the pool, is never the content currently on
//! screen (unless the pool offers nothing else), and makes a bounded,
//! best-effort attempt to avoid content already in the history.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::history::History;

/// Extra draws spent trying to avoid entries already in the history.
pub const DEDUP_ATTEMPTS: usize = 10;

/// Source of pool indices.
///
/// Kept behind a trait so tests can force specific draws.
pub trait Picker {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform picker backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomPicker<R = StdRng> {
    rng: R,
}

impl RandomPicker<StdRng> {
    /// Picker seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic picker; the same seed replays the same slideshow.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomPicker<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Picker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Content pool with at least one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Pool<T> {
    /// Wrap `items`, or `None` when there is nothing to show.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    /// Number of entries, never zero.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Entries in scan order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn pick<P: Picker + ?Sized>(&self, picker: &mut P) -> &T {
        &self.items[picker.pick(self.items.len()) % self.items.len()]
    }
}

/// Result of one draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    /// The chosen content.
    pub item: T,
    /// De-duplication redraws spent (at most [`DEDUP_ATTEMPTS`]).
    pub dedup_attempts: usize,
    /// The pool had nothing but the current content to offer.
    pub repeats_current: bool,
}

/// Draw a new content reference from `pool`.
pub fn select<T, P>(
    pool: &Pool<T>,
    current: Option<&T>,
    history: &History<T>,
    picker: &mut P,
) -> Selection<T>
where
    T: Clone + PartialEq,
    P: Picker + ?Sized,
{
    let can_avoid_current = pool.as_slice().iter().any(|p| Some(p) != current);
    let mut item = draw(pool, current, can_avoid_current, picker);

    let mut dedup_attempts = 0;
    if !history.is_empty() && history.len() < pool.len() {
        while dedup_attempts < DEDUP_ATTEMPTS && history.contains(&item) {
            dedup_attempts += 1;
            item = draw(pool, current, can_avoid_current, picker);
        }
        if history.contains(&item) {
            tracing::info!(
                attempts = dedup_attempts,
                history_len = history.len(),
                "could not avoid a recent picture, accepting it"
            );
        }
    }

    if !can_avoid_current {
        tracing::info!(pool_len = pool.len(), "pool has a single picture, repeating it");
    }

    Selection {
        item,
        dedup_attempts,
        repeats_current: !can_avoid_current && current.is_some(),
    }
}

/// One uniform draw, redrawn while it equals `current` when avoidable.
fn draw<T, P>(pool: &Pool<T>, current: Option<&T>, avoid_current: bool, picker: &mut P) -> T
where
    T: Clone + PartialEq,
    P: Picker + ?Sized,
{
    loop {
        let candidate = pool.pick(picker);
        if !avoid_current || Some(candidate) != current {
            return candidate.clone();
        }
    }
}

/// Picker replaying fixed indices, then counting upwards.
///
/// Scripted indices are taken modulo the pool length. Once the script runs
/// out the picker walks the pool round-robin, so a redraw loop always
/// terminates.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedPicker {
    script: std::collections::VecDeque<usize>,
    next: usize,
}

#[cfg(test)]
impl ScriptedPicker {
    /// Create a picker that returns `indices` in order.
    pub(crate) fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: indices.into_iter().collect(),
            next: 0,
        }
    }
}

#[cfg(test)]
impl Picker for ScriptedPicker {
    fn pick(&mut self, len: usize) -> usize {
        if let Some(i) = self.script.pop_front() {
            return i % len;
        }
        let i = self.next % len;
        self.next = self.next.wrapping_add(1);
        i
    }
}
