use std::fmt;

use log::trace;

use crate::error::QueueError;
use crate::pool::FreeIndices;

/// Marks a logical index without a value, or a physical slot without an owner
const VACANT: usize = usize::MAX;

fn natural_less<T: Ord>(a: &T, b: &T) -> bool {
    a < b
}

/// Physical children of `slot`. The root's only child is slot 1.
fn children(slot: usize) -> (usize, usize) {
    if slot == 0 {
        (1, 1)
    } else {
        (2 * slot, 2 * slot + 1)
    }
}

/// Fixed-capacity binary heap whose values are also addressable by a stable
/// logical index in `0..capacity`.
///
/// `pq` maps logical index to physical slot and `qp` maps it back. Both are
/// updated together on every exchange, so a value can be read or replaced by
/// its logical index no matter where the heap has moved it.
#[derive(Clone)]
pub struct IndexedPriorityQueue<T, F = fn(&T, &T) -> bool> {
    elements: Vec<T>,
    pq:       Vec<usize>,
    qp:       Vec<usize>,
    free:     FreeIndices,
    less:     F,
}

impl<T: Ord> IndexedPriorityQueue<T> {
    /// Min-queue under the natural ordering of `T`
    pub fn new(capacity: usize) -> Self {
        Self::with_comparator(capacity, natural_less::<T>)
    }
}

impl<T, F> IndexedPriorityQueue<T, F> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pq.len()
    }

    /// Whether `position` is a valid logical index that currently holds a value
    pub fn contains(&self, position: usize) -> bool {
        self.pq.get(position).map_or(false, |&slot| slot != VACANT)
    }

    pub fn get(&self, position: usize) -> Result<&T, QueueError> {
        match self.pq.get(position) {
            Some(&slot) if slot != VACANT => Ok(&self.elements[slot]),
            _ => Err(QueueError::InvalidPosition { position }),
        }
    }

    /// Value that the next `pop` returns
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Logical index of the value that the next `pop` returns
    pub fn peek_index(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.qp[0])
        }
    }

    /// `(logical index, value)` pairs in heap order, not priority order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.elements.iter().enumerate().map(move |(slot, value)| (self.qp[slot], value))
    }

    /// Exchange two physical slots, keeping both maps in step.
    fn exchange(&mut self, a: usize, b: usize) {
        self.elements.swap(a, b);
        self.qp.swap(a, b);
        self.pq[self.qp[a]] = a;
        self.pq[self.qp[b]] = b;
    }
}

impl<T, F> IndexedPriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Queue ordered by `less`: the value for which `less` holds against
    /// every other value is popped first, so `|a, b| a > b` makes a max-queue.
    pub fn with_comparator(capacity: usize, less: F) -> Self {
        IndexedPriorityQueue {
            elements: Vec::with_capacity(capacity),
            pq: vec![VACANT; capacity],
            qp: vec![VACANT; capacity],
            free: FreeIndices::new(capacity),
            less,
        }
    }

    /// Put `value` at logical `position`, replacing whatever was there.
    pub fn insert(&mut self, position: usize, value: T) -> Result<(), QueueError> {
        if position >= self.capacity() {
            return Err(QueueError::OutOfRange {
                position,
                capacity: self.capacity(),
            });
        }

        match self.pq[position] {
            VACANT => {
                let slot = self.elements.len();
                trace!("logical {} appended at slot {}", position, slot);

                self.elements.push(value);
                self.pq[position] = slot;
                self.qp[slot] = position;
                self.swim(position);
            }
            slot => {
                trace!("logical {} overwritten at slot {}", position, slot);

                self.elements[slot] = value;
                self.restore(position);
            }
        }

        Ok(())
    }

    /// Insert at the lowest vacant logical index and return that index.
    pub fn push(&mut self, value: T) -> Result<usize, QueueError> {
        let capacity = self.capacity();
        let pq = &self.pq;
        let position = self
            .free
            .take(|index| pq[index] == VACANT)
            .ok_or(QueueError::CapacityExhausted { capacity })?;

        self.insert(position, value)?;
        Ok(position)
    }

    pub fn pop(&mut self) -> Result<T, QueueError> {
        self.pop_entry().map(|(_, value)| value)
    }

    /// Like `pop`, but also reports the logical index that got released
    pub fn pop_entry(&mut self) -> Result<(usize, T), QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }

        let position = self.qp[0];
        Ok((position, self.detach(0)))
    }

    /// Take the value out of logical `position`, wherever it sits in the heap.
    pub fn remove(&mut self, position: usize) -> Result<T, QueueError> {
        if !self.contains(position) {
            return Err(QueueError::InvalidPosition { position });
        }

        let slot = self.pq[position];
        Ok(self.detach(slot))
    }

    pub fn clear(&mut self) {
        let capacity = self.capacity();

        self.elements.clear();
        self.pq.iter_mut().for_each(|slot| *slot = VACANT);
        self.qp.iter_mut().for_each(|position| *position = VACANT);
        self.free = FreeIndices::new(capacity);
    }

    /// Drain the queue in pop order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(value) = self.pop() {
            sorted.push(value);
        }

        sorted
    }

    fn less_at(&self, a: usize, b: usize) -> bool {
        (self.less)(&self.elements[a], &self.elements[b])
    }

    /// Remove the value at physical `slot`: the last slot moves into the hole
    /// and the logical owner of `slot` becomes vacant.
    fn detach(&mut self, slot: usize) -> T {
        let last = self.elements.len() - 1;
        let position = self.qp[slot];
        let moved = self.qp[last];

        let value = self.elements.swap_remove(slot);
        self.qp[slot] = moved;
        self.pq[moved] = slot;
        self.qp[last] = VACANT;
        // after the rebinding above, covers slot == last too
        self.pq[position] = VACANT;
        self.free.release(position);

        trace!("logical {} released from slot {}", position, slot);

        if slot < last {
            self.restore(moved);
        }

        value
    }

    /// Move the value at logical `position` in whichever direction it has to.
    fn restore(&mut self, position: usize) {
        let slot = self.pq[position];

        if slot > 0 && self.less_at(slot, slot / 2) {
            self.swim(position);
        } else {
            self.sink(position);
        }
    }

    fn swim(&mut self, position: usize) {
        let mut slot = self.pq[position];

        while slot > 0 {
            let parent = slot / 2;
            if !self.less_at(slot, parent) {
                break;
            }

            self.exchange(slot, parent);
            slot = parent;
        }
    }

    fn sink(&mut self, position: usize) {
        let mut slot = self.pq[position];

        loop {
            let (left, right) = children(slot);
            if left >= self.len() {
                break;
            }

            let child = if right < self.len() && self.less_at(right, left) {
                right
            } else {
                left
            };

            if !self.less_at(child, slot) {
                break;
            }

            self.exchange(slot, child);
            slot = child;
        }
    }

    /// Panics if the maps, the heap order or the free pool are inconsistent
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let len = self.len();
        let capacity = self.capacity();
        assert!(len <= capacity, "length {} exceeds capacity {}", len, capacity);
        assert_eq!(self.qp.len(), capacity);

        for slot in 0..len {
            let position = self.qp[slot];
            assert!(position < capacity, "slot {} owned by {}", slot, position);
            assert_eq!(self.pq[position], slot, "pq/qp disagree at slot {}", slot);
        }

        for slot in len..capacity {
            assert_eq!(self.qp[slot], VACANT, "free slot {} has an owner", slot);
        }

        let mut occupied = 0;
        for (position, &slot) in self.pq.iter().enumerate() {
            if slot == VACANT {
                assert!(self.free.is_pooled(position), "vacant {} is not pooled", position);
            } else {
                occupied += 1;
                assert!(slot < len, "logical {} points past the heap", position);
                assert_eq!(self.qp[slot], position);
            }
        }
        assert_eq!(occupied, len);

        for slot in 1..len {
            assert!(!self.less_at(slot, slot / 2), "heap order broken at slot {}", slot);
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for IndexedPriorityQueue<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedPriorityQueue")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
