//! Position-based access into a `RingBuffer`.
//!
//! A cursor is a signed logical offset from the front of the buffer plus a
//! borrow of the buffer. The offset is only turned into a physical slot when
//! the cursor is read, using the buffer's head and capacity at that moment.
//! Offsets outside `[0, len())` are legal positions that simply resolve to
//! nothing; `cursor_end` sits at offset `len()`.
//!
//! Because the physical slot is derived from the current head, a position
//! names "the n-th element from the front", not a particular value: pushing
//! or popping at the front through a `CursorMut` shifts what the same offset
//! resolves to, and after `set_capacity` only the logical order is preserved.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::allocator::{Heap, SlotAllocator};
use crate::ring::RingBuffer;

/// Read-only cursor.
///
/// Cursors are `Copy`. Comparing or subtracting cursors is only meaningful
/// for cursors of the same buffer.
pub struct Cursor<'a, T, A: SlotAllocator = Heap> {
    ring: &'a RingBuffer<T, A>,
    offset: isize,
}

impl<'a, T, A: SlotAllocator> Cursor<'a, T, A> {
    pub(crate) fn new(ring: &'a RingBuffer<T, A>, offset: isize) -> Self {
        Self { ring, offset }
    }

    /// Logical offset from the front of the buffer.
    #[must_use]
    pub fn offset(&self) -> isize {
        self.offset
    }

    /// The element at this position, or `None` outside `[0, len())`.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        let index = usize::try_from(self.offset).ok()?;
        self.ring.get(index)
    }

    pub fn move_next(&mut self) {
        self.offset += 1;
    }

    pub fn move_prev(&mut self) {
        self.offset -= 1;
    }
}

impl<T, A: SlotAllocator> Clone for Cursor<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A: SlotAllocator> Copy for Cursor<'_, T, A> {}

impl<T, A: SlotAllocator> PartialEq for Cursor<'_, T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl<T, A: SlotAllocator> Eq for Cursor<'_, T, A> {}

impl<T, A: SlotAllocator> PartialOrd for Cursor<'_, T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, A: SlotAllocator> Ord for Cursor<'_, T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

/// Signed logical distance between two positions.
impl<'a, T, A: SlotAllocator> Sub for Cursor<'a, T, A> {
    type Output = isize;

    fn sub(self, rhs: Self) -> isize {
        self.offset - rhs.offset
    }
}

impl<T, A: SlotAllocator> Add<isize> for Cursor<'_, T, A> {
    type Output = Self;

    fn add(mut self, rhs: isize) -> Self {
        self.offset += rhs;
        self
    }
}

impl<T, A: SlotAllocator> AddAssign<isize> for Cursor<'_, T, A> {
    fn add_assign(&mut self, rhs: isize) {
        self.offset += rhs;
    }
}

impl<T, A: SlotAllocator> SubAssign<isize> for Cursor<'_, T, A> {
    fn sub_assign(&mut self, rhs: isize) {
        self.offset -= rhs;
    }
}

impl<T: fmt::Debug, A: SlotAllocator> fmt::Debug for Cursor<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset)
            .field("element", &self.get())
            .finish()
    }
}

/// Read-write cursor.
///
/// Holds the buffer exclusively, so it can also hand the buffer out for
/// mutation while keeping its offset.
pub struct CursorMut<'a, T, A: SlotAllocator = Heap> {
    ring: &'a mut RingBuffer<T, A>,
    offset: isize,
}

impl<'a, T, A: SlotAllocator> CursorMut<'a, T, A> {
    pub(crate) fn new(ring: &'a mut RingBuffer<T, A>, offset: isize) -> Self {
        Self { ring, offset }
    }

    #[must_use]
    pub fn offset(&self) -> isize {
        self.offset
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        let index = usize::try_from(self.offset).ok()?;
        self.ring.get(index)
    }

    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let index = usize::try_from(self.offset).ok()?;
        self.ring.get_mut(index)
    }

    pub fn move_next(&mut self) {
        self.offset += 1;
    }

    pub fn move_prev(&mut self) {
        self.offset -= 1;
    }

    /// A read-only cursor at the same position.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T, A> {
        Cursor::new(&*self.ring, self.offset)
    }

    #[must_use]
    pub fn buffer(&self) -> &RingBuffer<T, A> {
        &*self.ring
    }

    /// The underlying buffer. The cursor keeps its offset across whatever is
    /// done to the buffer through this reference.
    pub fn buffer_mut(&mut self) -> &mut RingBuffer<T, A> {
        &mut *self.ring
    }
}

impl<T, A: SlotAllocator> AddAssign<isize> for CursorMut<'_, T, A> {
    fn add_assign(&mut self, rhs: isize) {
        self.offset += rhs;
    }
}

impl<T, A: SlotAllocator> SubAssign<isize> for CursorMut<'_, T, A> {
    fn sub_assign(&mut self, rhs: isize) {
        self.offset -= rhs;
    }
}

impl<T: fmt::Debug, A: SlotAllocator> fmt::Debug for CursorMut<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("offset", &self.offset)
            .field("element", &self.get())
            .finish()
    }
}
