mod arena;
mod avl;
mod cursor;
mod handle;
mod node;
mod red_black;
mod tree;

pub(crate) use cursor::{Direction, IntoIter, Iter, RawCursor, RawCursorMut};
pub(crate) use handle::Handle;
pub(crate) use tree::RawTree;
