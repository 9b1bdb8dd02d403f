use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Logical indices that may be vacant, smallest first.
///
/// Every vacant index is always pooled. An index that got occupied through a
/// direct `insert` stays in the pool until `take` pops and skips it.
#[derive(Debug, Clone)]
pub(crate) struct FreeIndices {
    heap:   BinaryHeap<Reverse<usize>>,
    pooled: Vec<bool>,
}

impl FreeIndices {
    pub fn new(capacity: usize) -> Self {
        FreeIndices {
            heap:   (0..capacity).map(Reverse).collect(),
            pooled: vec![true; capacity],
        }
    }

    /// Pop pooled indices until one satisfies `vacant`.
    pub fn take(&mut self, vacant: impl Fn(usize) -> bool) -> Option<usize> {
        while let Some(Reverse(index)) = self.heap.pop() {
            self.pooled[index] = false;
            if vacant(index) {
                return Some(index);
            }
        }

        None
    }

    pub fn release(&mut self, index: usize) {
        if !self.pooled[index] {
            self.pooled[index] = true;
            self.heap.push(Reverse(index));
        }
    }

    #[cfg(test)]
    pub fn is_pooled(&self, index: usize) -> bool {
        self.pooled[index]
    }
}
