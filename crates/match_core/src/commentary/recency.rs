//! Fixed-capacity window of recently selected templates.

use std::collections::HashMap;

/// Ring buffer of the last `capacity` selections plus a multiset for O(1) membership.
///
/// Storage never grows past `capacity`; the oldest entry is overwritten in place.
#[derive(Debug, Clone, Default)]
pub struct RecencyWindow {
    capacity: usize,
    slots: Vec<String>,
    /// Next slot to overwrite once `slots` is full.
    head: usize,
    counts: HashMap<String, u32>,
}

impl RecencyWindow {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, slots: Vec::with_capacity(capacity), head: 0, counts: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, template: &str) -> bool {
        self.counts.contains_key(template)
    }

    /// Records a selection, evicting the oldest one when full. A zero capacity records nothing.
    pub fn push(&mut self, template: &str) {
        if self.capacity == 0 {
            return;
        }

        if self.slots.len() < self.capacity {
            self.slots.push(template.to_owned());
        } else {
            let evicted = std::mem::replace(&mut self.slots[self.head], template.to_owned());
            self.forget(&evicted);
            self.head = (self.head + 1) % self.capacity;
        }
        *self.counts.entry(template.to_owned()).or_insert(0) += 1;
    }

    fn forget(&mut self, template: &str) {
        if let Some(n) = self.counts.get_mut(template) {
            *n -= 1;
            if *n == 0 {
                self.counts.remove(template);
            }
        }
    }
}
