#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a node slot in an [`Arena`](super::arena::Arena).
///
/// Index 0 is reserved for the sentinel, so "is this the sentinel" is a plain
/// integer comparison.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(RawHandle);

impl Handle {
    pub(crate) const SENTINEL: Self = Self(0);
    pub(crate) const MAX: usize = RawHandle::MAX as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        Self(index as RawHandle)
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) const fn is_sentinel(self) -> bool {
        self.0 == 0
    }
}
