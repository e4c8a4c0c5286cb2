//! Helpers shared by the integration tests.

use std::collections::VecDeque;

use slideshow::Picker;

/// Picker replaying fixed indices, then walking the pool round-robin.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    script: VecDeque<usize>,
    next: usize,
}

impl ScriptedPicker {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: indices.into_iter().collect(),
            next: 0,
        }
    }
}

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
