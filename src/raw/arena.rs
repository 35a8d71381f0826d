use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes.
///
/// Slot 0 holds the sentinel for the whole lifetime of the arena; it is
/// placed there by the constructors and can never be taken or freed.
/// Released slots go onto a vacancy stack and are handed out again before
/// the backing vector grows.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    cells: Vec<Option<T>>,
    vacant: Vec<Handle>,
}

impl<T> Arena<T> {
    #[cfg(test)]
    pub(crate) fn new(sentinel: T) -> Self {
        Self::with_capacity(sentinel, 0)
    }

    pub(crate) fn with_capacity(sentinel: T, capacity: usize) -> Self {
        let mut cells = Vec::with_capacity(capacity.saturating_add(1));
        cells.push(Some(sentinel));
        Self { cells, vacant: Vec::new() }
    }

    /// Node slots available without reallocating, excluding the sentinel.
    pub(crate) fn capacity(&self) -> usize {
        self.cells.capacity() - 1
    }

    /// Live nodes, excluding the sentinel.
    pub(crate) fn len(&self) -> usize {
        self.cells.len() - 1 - self.vacant.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, node: T) -> Handle {
        match self.vacant.pop() {
            Some(handle) => {
                self.cells[handle.to_index()] = Some(node);
                handle
            }
            None => {
                let index = self.cells.len();
                assert!(index <= Handle::MAX, "`Arena::alloc()` - no handles left (limit {})!", Handle::MAX);
                self.cells.push(Some(node));
                Handle::from_index(index)
            }
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.cells[handle.to_index()] {
            Some(node) => node,
            None => panic!("`Arena::get()` - slot {} is vacant!", handle.to_index()),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.cells[handle.to_index()] {
            Some(node) => node,
            None => panic!("`Arena::get_mut()` - slot {} is vacant!", handle.to_index()),
        }
    }

    /// Moves a node out and marks its slot for reuse.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        assert!(!handle.is_sentinel(), "`Arena::take()` - the sentinel cannot be released!");
        let Some(node) = self.cells[handle.to_index()].take() else {
            panic!("`Arena::take()` - slot {} is already vacant!", handle.to_index());
        };
        self.vacant.push(handle);
        node
    }

    /// Drops every node except the sentinel.
    pub(crate) fn clear(&mut self) {
        self.cells.truncate(1);
        self.vacant.clear();
    }
}
