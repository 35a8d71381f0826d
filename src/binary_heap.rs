//! A binary heap whose elements can be reached again after insertion.
//!
//! [`IndexedHeap::push`] hands out a [`HeapHandle`]. The handle stays valid
//! while its element is in the heap, and lets the caller change the element's
//! priority or pull it out of the middle of the heap in O(log n).

use alloc::vec::Vec;
use core::fmt;

use log::debug;

use crate::order::{Compare, Natural};

/// Refers to one element pushed onto an [`IndexedHeap`].
///
/// Handles carry a generation, so a handle whose element has been removed is
/// recognised as stale even after its storage slot is reused.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct HeapHandle {
    slot: usize,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    value: Option<T>,
    /// Index into `IndexedHeap::order` while occupied.
    position: usize,
    generation: u32,
}

/// An array-backed binary heap with handle-based update and removal.
///
/// `P::less(a, b)` means `a` has the higher priority, so with [`Natural`] the
/// smallest element is on top. Use [`Reverse`](crate::order::Reverse) for a
/// max-heap.
///
/// # Examples
///
/// ```
/// use ordtree::IndexedHeap;
///
/// let mut tasks = IndexedHeap::new();
/// let write = tasks.push(30);
/// let read = tasks.push(10);
/// tasks.push(20);
///
/// assert_eq!(tasks.peek(), Some((&10, read)));
///
/// // Demote `read` below everything else.
/// assert!(tasks.update(read, 40));
/// assert_eq!(tasks.peek().map(|(v, _)| *v), Some(20));
///
/// assert_eq!(tasks.remove(write), Some(30));
/// assert_eq!(tasks.remove(write), None);
///
/// assert_eq!(tasks.pop(), Some(20));
/// assert_eq!(tasks.pop(), Some(40));
/// assert_eq!(tasks.pop(), None);
/// ```
pub struct IndexedHeap<T, P = Natural> {
    /// Slot indices laid out as an implicit binary tree, highest priority first.
    order: Vec<usize>,
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    priority: P,
}

impl<T> IndexedHeap<T> {
    /// Makes a new, empty min-heap ordered by [`Ord`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_priority(Natural)
    }
}

impl<T, P> IndexedHeap<T, P> {
    /// Makes a new, empty heap where `priority.less(a, b)` puts `a` above `b`.
    #[must_use]
    pub fn with_priority(priority: P) -> Self {
        debug!("creating indexed heap");
        Self { order: Vec::new(), slots: Vec::new(), free: Vec::new(), priority }
    }

    /// Returns the number of queued elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the priority comparator.
    #[must_use]
    pub fn priority(&self) -> &P {
        &self.priority
    }

    /// Returns the highest-priority element and its handle.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn peek(&self) -> Option<(&T, HeapHandle)> {
        let &slot = self.order.first()?;
        Some((self.value_at(slot), self.handle_of(slot)))
    }

    /// Returns the element behind `handle`, or `None` if it has left the heap.
    #[must_use]
    pub fn get(&self, handle: HeapHandle) -> Option<&T> {
        self.live_slot(handle).map(|slot| self.value_at(slot))
    }

    /// Returns `true` if `handle` still refers to a queued element.
    #[must_use]
    pub fn contains(&self, handle: HeapHandle) -> bool {
        self.live_slot(handle).is_some()
    }

    /// Iterates over the elements and their handles in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (HeapHandle, &T)> + '_ {
        self.order.iter().map(move |&slot| (self.handle_of(slot), self.value_at(slot)))
    }

    /// Removes every element. Outstanding handles become stale.
    pub fn clear(&mut self) {
        debug!("clearing indexed heap of {} elements", self.order.len());
        for slot in self.order.drain(..) {
            let entry = &mut self.slots[slot];
            entry.value = None;
            entry.generation = entry.generation.wrapping_add(1);
            self.free.push(slot);
        }
    }

    fn value_at(&self, slot: usize) -> &T {
        self.slots[slot].value.as_ref().expect("`IndexedHeap::value_at()` - slot is vacant!")
    }

    fn handle_of(&self, slot: usize) -> HeapHandle {
        HeapHandle { slot, generation: self.slots[slot].generation }
    }

    fn live_slot(&self, handle: HeapHandle) -> Option<usize> {
        let entry = self.slots.get(handle.slot)?;
        (entry.value.is_some() && entry.generation == handle.generation).then_some(handle.slot)
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
        self.slots[self.order[i]].position = i;
        self.slots[self.order[j]].position = j;
    }
}

impl<T, P: Compare<T>> IndexedHeap<T, P> {
    /// Builds a heap from `values` in O(n).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::IndexedHeap;
    /// use ordtree::order::{Natural, Reverse};
    ///
    /// let mut heap = IndexedHeap::from_vec(vec![3, 9, 1, 7], Reverse(Natural));
    /// assert_eq!(heap.pop(), Some(9));
    /// assert_eq!(heap.pop(), Some(7));
    /// ```
    #[must_use]
    pub fn from_vec(values: Vec<T>, priority: P) -> Self {
        debug!("heapifying {} elements", values.len());
        let slots: Vec<Slot<T>> = values
            .into_iter()
            .enumerate()
            .map(|(position, value)| Slot { value: Some(value), position, generation: 0 })
            .collect();
        let mut heap = Self { order: (0..slots.len()).collect(), slots, free: Vec::new(), priority };
        for position in (0..heap.order.len() / 2).rev() {
            heap.sift_down(position);
        }
        heap
    }

    /// Adds `value` and returns a handle to it.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn push(&mut self, value: T) -> HeapHandle {
        let position = self.order.len();
        let slot = match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot];
                entry.value = Some(value);
                entry.position = position;
                slot
            }
            None => {
                self.slots.push(Slot { value: Some(value), position, generation: 0 });
                self.slots.len() - 1
            }
        };
        self.order.push(slot);
        self.sift_up(position);
        self.handle_of(slot)
    }

    /// Removes and returns the highest-priority element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop(&mut self) -> Option<T> {
        (!self.order.is_empty()).then(|| self.remove_at(0))
    }

    /// Replaces the element behind `handle` with `value` and restores heap
    /// order. Returns `false` if the handle is stale.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn update(&mut self, handle: HeapHandle, value: T) -> bool {
        let Some(slot) = self.live_slot(handle) else {
            return false;
        };
        self.slots[slot].value = Some(value);
        self.sift(self.slots[slot].position);
        true
    }

    /// Removes the element behind `handle` from wherever it sits in the heap.
    /// Returns `None` if the handle is stale.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, handle: HeapHandle) -> Option<T> {
        let slot = self.live_slot(handle)?;
        Some(self.remove_at(self.slots[slot].position))
    }

    fn remove_at(&mut self, position: usize) -> T {
        let last = self.order.len() - 1;
        self.swap(position, last);
        let slot = self.order.pop().expect("`IndexedHeap::remove_at()` - heap is empty!");
        let entry = &mut self.slots[slot];
        let value = entry.value.take().expect("`IndexedHeap::remove_at()` - slot is vacant!");
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(slot);
        if position < self.order.len() {
            self.sift(position);
        }
        value
    }

    fn outranks(&self, i: usize, j: usize) -> bool {
        self.priority.less(self.value_at(self.order[i]), self.value_at(self.order[j]))
    }

    /// Moves the element at `position` up or down, whichever its neighbours
    /// call for.
    fn sift(&mut self, position: usize) {
        if position > 0 && self.outranks(position, (position - 1) / 2) {
            self.sift_up(position);
        } else {
            self.sift_down(position);
        }
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.outranks(position, parent) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        let len = self.order.len();
        loop {
            let left = 2 * position + 1;
            let right = left + 1;
            let mut top = position;
            if left < len && self.outranks(left, top) {
                top = left;
            }
            if right < len && self.outranks(right, top) {
                top = right;
            }
            if top == position {
                return;
            }
            self.swap(position, top);
            position = top;
        }
    }
}

impl<T: Clone, P: Clone> Clone for IndexedHeap<T, P> {
    fn clone(&self) -> Self {
        Self {
            order: self.order.clone(),
            slots: self.slots.clone(),
            free: self.free.clone(),
            priority: self.priority.clone(),
        }
    }
}

impl<T: fmt::Debug, P> fmt::Debug for IndexedHeap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|(_, value)| value)).finish()
    }
}

impl<T, P: Default> Default for IndexedHeap<T, P> {
    fn default() -> Self {
        Self::with_priority(P::default())
    }
}

impl<T, P: Compare<T> + Default> FromIterator<T> for IndexedHeap<T, P> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect(), P::default())
    }
}

impl<T, P: Compare<T>> Extend<T> for IndexedHeap<T, P> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}
