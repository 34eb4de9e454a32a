use core::fmt;
use core::ops::{Index, IndexMut};

use crate::allocator::{Heap, SlotAllocator};
use crate::cursor::{Cursor, CursorMut};
use crate::error::RingBufferError;
use crate::iter::{Iter, IterMut};
use crate::slots::SlotBlock;

/// A fixed-capacity, double-ended ring buffer that overwrites on full.
///
/// The live elements form a window of `len` slots starting at physical slot
/// `head`; logical index `i` lives at `(head + i) mod capacity`. Slots outside
/// the window are uninitialized.
///
/// # Invariants
/// - `len <= capacity`
/// - `head < capacity` whenever `capacity > 0`, otherwise `head == 0`
pub struct RingBuffer<T, A: SlotAllocator = Heap> {
    slots: SlotBlock<T>,
    head: usize,
    len: usize,
    alloc: A,
}

// Safe: the buffer exclusively owns its elements and its block, like `Vec`.
#[allow(unsafe_code)]
unsafe impl<T: Send, A: SlotAllocator + Send> Send for RingBuffer<T, A> {}
#[allow(unsafe_code)]
unsafe impl<T: Sync, A: SlotAllocator + Sync> Sync for RingBuffer<T, A> {}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer with capacity 0. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self::new_in(Heap)
    }

    /// Creates an empty buffer with room for exactly `capacity` elements.
    ///
    /// # Errors
    ///
    /// - `RingBufferError::CapacityOverflow` if `capacity` elements do not fit
    ///   in the address space
    /// - `RingBufferError::AllocationFailure` if the heap refuses the block
    pub fn with_capacity(capacity: usize) -> Result<Self, RingBufferError> {
        Self::with_capacity_in(capacity, Heap)
    }

    /// Creates a buffer holding the items of `iter` in order, with capacity
    /// equal to the iterator's reported length.
    ///
    /// # Errors
    ///
    /// Same as `with_capacity`.
    pub fn from_exact_iter<I>(iter: I) -> Result<Self, RingBufferError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        Self::from_exact_iter_in(iter, Heap)
    }
}

impl<T, A: SlotAllocator> RingBuffer<T, A> {
    /// Creates an empty buffer with capacity 0 that will allocate through
    /// `alloc` once it is given a capacity.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            slots: SlotBlock::empty(),
            head: 0,
            len: 0,
            alloc,
        }
    }

    /// Creates an empty buffer with room for exactly `capacity` elements,
    /// allocated through `alloc`.
    ///
    /// # Errors
    ///
    /// - `RingBufferError::CapacityOverflow` if `capacity` elements do not fit
    ///   in the address space
    /// - `RingBufferError::AllocationFailure` if `alloc` refuses the block
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, RingBufferError> {
        let slots = SlotBlock::allocate(&alloc, capacity)?;
        Ok(Self {
            slots,
            head: 0,
            len: 0,
            alloc,
        })
    }

    /// Creates a buffer holding the items of `iter` in order, allocated
    /// through `alloc`, with capacity equal to the iterator's reported length.
    ///
    /// An iterator that yields more items than it reported only keeps the
    /// newest ones, as if they were pushed one by one.
    ///
    /// # Errors
    ///
    /// Same as `with_capacity_in`.
    pub fn from_exact_iter_in<I>(iter: I, alloc: A) -> Result<Self, RingBufferError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let mut ring = Self::with_capacity_in(iter.len(), alloc)?;
        ring.extend(iter);
        Ok(ring)
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the backing block.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns true when the next push evicts an element.
    ///
    /// A buffer with capacity 0 is always full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.capacity()
    }

    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Physical slot of the logical `index`. Requires `index < capacity`.
    #[inline]
    fn slot_of(&self, index: usize) -> usize {
        self.slots.wrap(self.head, index)
    }

    /// Appends `value` at the back.
    ///
    /// If the buffer is full, the front element is evicted first and returned.
    /// On a buffer with capacity 0 there is nowhere to put `value`, so it is
    /// handed straight back.
    #[allow(unsafe_code)]
    pub fn push_back(&mut self, value: T) -> Option<T> {
        if self.capacity() == 0 {
            return Some(value);
        }
        let evicted = if self.is_full() { self.pop_front() } else { None };

        let slot = self.slot_of(self.len);
        // SAFETY: len < capacity after eviction, so the slot is outside the window.
        unsafe { self.slots.write(slot, value) };
        self.len += 1;

        evicted
    }

    /// Prepends `value` at the front.
    ///
    /// If the buffer is full, the back element is evicted first and returned.
    /// On a buffer with capacity 0 `value` is handed straight back.
    #[allow(unsafe_code)]
    pub fn push_front(&mut self, value: T) -> Option<T> {
        if self.capacity() == 0 {
            return Some(value);
        }
        let evicted = if self.is_full() { self.pop_back() } else { None };

        let slot = self.slots.wrap_back(self.head);
        // SAFETY: len < capacity after eviction, so the slot before head is free.
        unsafe { self.slots.write(slot, value) };
        self.head = slot;
        self.len += 1;

        evicted
    }

    /// Constructs an element at the back from `make` and returns a reference
    /// to it.
    ///
    /// If the buffer is full, the front element is dropped before `make` runs.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::ZeroCapacity` without calling `make` if the
    /// buffer has no slots.
    #[allow(unsafe_code)]
    pub fn emplace_back<F>(&mut self, make: F) -> Result<&mut T, RingBufferError>
    where
        F: FnOnce() -> T,
    {
        if self.capacity() == 0 {
            return Err(RingBufferError::ZeroCapacity);
        }
        if self.is_full() {
            drop(self.pop_front());
        }

        let value = make();
        let slot = self.slot_of(self.len);
        self.len += 1;
        // SAFETY: the slot was past the end of the window before len grew.
        Ok(unsafe { self.slots.write(slot, value) })
    }

    /// Constructs an element at the front from `make` and returns a reference
    /// to it.
    ///
    /// If the buffer is full, the back element is dropped before `make` runs.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::ZeroCapacity` without calling `make` if the
    /// buffer has no slots.
    #[allow(unsafe_code)]
    pub fn emplace_front<F>(&mut self, make: F) -> Result<&mut T, RingBufferError>
    where
        F: FnOnce() -> T,
    {
        if self.capacity() == 0 {
            return Err(RingBufferError::ZeroCapacity);
        }
        if self.is_full() {
            drop(self.pop_back());
        }

        let value = make();
        let slot = self.slots.wrap_back(self.head);
        self.head = slot;
        self.len += 1;
        // SAFETY: the slot was right before the window before head moved.
        Ok(unsafe { self.slots.write(slot, value) })
    }

    /// Removes and returns the front element.
    ///
    /// Returns `None` if the buffer is empty.
    #[allow(unsafe_code)]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.head;
        self.head = self.slots.wrap_next(slot);
        self.len -= 1;
        // SAFETY: the slot was the first of the window and is now outside it.
        Some(unsafe { self.slots.read(slot) })
    }

    /// Removes and returns the back element.
    ///
    /// Returns `None` if the buffer is empty.
    #[allow(unsafe_code)]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let slot = self.slot_of(self.len);
        // SAFETY: the slot was the last of the window and is now outside it.
        Some(unsafe { self.slots.read(slot) })
    }

    /// Drops every element, front to back. The capacity is kept.
    pub fn clear(&mut self) {
        while let Some(value) = self.pop_front() {
            drop(value);
        }
        self.head = 0;
    }

    /// Returns the front element.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::Underflow` if the buffer is empty.
    pub fn front(&self) -> Result<&T, RingBufferError> {
        self.get(0).ok_or(RingBufferError::Underflow)
    }

    /// # Errors
    ///
    /// Returns `RingBufferError::Underflow` if the buffer is empty.
    pub fn front_mut(&mut self) -> Result<&mut T, RingBufferError> {
        self.get_mut(0).ok_or(RingBufferError::Underflow)
    }

    /// Returns the back element.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::Underflow` if the buffer is empty.
    pub fn back(&self) -> Result<&T, RingBufferError> {
        let last = self.len.checked_sub(1).ok_or(RingBufferError::Underflow)?;
        self.get(last).ok_or(RingBufferError::Underflow)
    }

    /// # Errors
    ///
    /// Returns `RingBufferError::Underflow` if the buffer is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, RingBufferError> {
        let last = self.len.checked_sub(1).ok_or(RingBufferError::Underflow)?;
        self.get_mut(last).ok_or(RingBufferError::Underflow)
    }

    /// Returns the element at logical `index`, counted from the front.
    ///
    /// Returns `None` if the index is out of range.
    #[must_use]
    #[allow(unsafe_code)]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: index < len, so the slot is inside the window.
        Some(unsafe { self.slots.get(self.slot_of(index)) })
    }

    #[must_use]
    #[allow(unsafe_code)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let slot = self.slot_of(index);
        // SAFETY: index < len, so the slot is inside the window.
        Some(unsafe { self.slots.get_mut(slot) })
    }

    /// Returns the element at logical `index`, counted from the front.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::OutOfRange` if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, RingBufferError> {
        let length = self.len;
        self.get(index)
            .ok_or(RingBufferError::OutOfRange { index, length })
    }

    /// # Errors
    ///
    /// Returns `RingBufferError::OutOfRange` if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, RingBufferError> {
        let length = self.len;
        self.get_mut(index)
            .ok_or(RingBufferError::OutOfRange { index, length })
    }

    /// Returns the element at logical `index` without a range check.
    ///
    /// Debug builds still assert the range.
    ///
    /// # Safety
    ///
    /// `index < len()`.
    #[must_use]
    #[allow(unsafe_code)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(
            index < self.len,
            "index {index} out of range for ring buffer of length {}",
            self.len
        );
        // SAFETY: index < len per the contract.
        unsafe { self.slots.get(self.slot_of(index)) }
    }

    /// Changes the capacity to `new_capacity`, moving the elements into a new
    /// block starting at slot 0.
    ///
    /// Shrinking below `len()` keeps the first `new_capacity` elements and
    /// drops the rest from the back.
    ///
    /// # Errors
    ///
    /// - `RingBufferError::CapacityOverflow` if `new_capacity` elements do not
    ///   fit in the address space
    /// - `RingBufferError::AllocationFailure` if the allocator refuses the block
    ///
    /// On error the buffer is left untouched.
    #[allow(unsafe_code)]
    pub fn set_capacity(&mut self, new_capacity: usize) -> Result<(), RingBufferError> {
        let mut fresh = SlotBlock::allocate(&self.alloc, new_capacity)?;

        let old_capacity = self.capacity();
        let (old_head, old_len) = (self.head, self.len);
        let kept = old_len.min(new_capacity);
        for index in 0..kept {
            let slot = self.slot_of(index);
            // SAFETY: the source slot is inside the old window and is read
            // exactly once; the target slot is below kept <= new_capacity.
            unsafe { fresh.write(index, self.slots.read(slot)) };
        }

        let mut old = core::mem::replace(&mut self.slots, fresh);
        self.head = 0;
        self.len = kept;

        for index in kept..old_len {
            let slot = old.wrap(old_head, index);
            // SAFETY: the truncated tail of the old window still holds live
            // values and nothing else refers to them.
            unsafe { old.drop_in_place(slot) };
        }
        // SAFETY: the old block came from self.alloc and is empty now.
        unsafe { old.release(&self.alloc) };

        log::trace!(
            "ring buffer capacity {} -> {}: kept {} of {} elements",
            old_capacity,
            new_capacity,
            kept,
            old_len
        );
        Ok(())
    }

    /// The elements as two slices, in order: the part up to the end of the
    /// block, then the part that wrapped around to slot 0.
    #[must_use]
    #[allow(unsafe_code)]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        // SAFETY: the window is exactly the live range.
        unsafe { self.slots.window(self.head, self.len) }
    }

    #[must_use]
    #[allow(unsafe_code)]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        // SAFETY: the window is exactly the live range.
        unsafe { self.slots.window_mut(self.head, self.len) }
    }

    /// Returns an iterator over the elements, front to back.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter::new(self)
    }

    /// Returns an iterator over the elements, back to front.
    #[must_use]
    pub fn iter_rev(&self) -> core::iter::Rev<Iter<'_, T, A>> {
        self.iter().rev()
    }

    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (first, second) = self.as_mut_slices();
        IterMut::new(first, second)
    }

    /// Cursor at the front element (offset 0).
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, 0)
    }

    /// Cursor one past the back element (offset `len()`).
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn cursor_end(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.len as isize)
    }

    #[must_use]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, A> {
        CursorMut::new(self, 0)
    }

    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T, A> {
        let end = self.len as isize;
        CursorMut::new(self, end)
    }

    /// Clones the buffer, keeping its capacity.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::AllocationFailure` if the allocator refuses
    /// the new block.
    pub fn try_clone(&self) -> Result<Self, RingBufferError>
    where
        T: Clone,
        A: Clone,
    {
        let mut copy = Self::with_capacity_in(self.capacity(), self.alloc.clone())?;
        copy.extend(self.iter().cloned());
        Ok(copy)
    }
}

/// Turns an allocation error into the global OOM handler, and anything else
/// into a panic, for trait impls that cannot return `Result`.
fn infallible<T>(result: Result<T, RingBufferError>) -> T {
    match result {
        Ok(value) => value,
        Err(RingBufferError::AllocationFailure { layout, .. }) => {
            alloc::alloc::handle_alloc_error(layout)
        }
        Err(err) => panic!("{err}"),
    }
}

impl<T, A: SlotAllocator> Drop for RingBuffer<T, A> {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        self.clear();
        let slots = core::mem::replace(&mut self.slots, SlotBlock::empty());
        // SAFETY: the block came from self.alloc and holds no live values.
        unsafe { slots.release(&self.alloc) };
    }
}

impl<T, A: SlotAllocator + Default> Default for RingBuffer<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: SlotAllocator + Clone> Clone for RingBuffer<T, A> {
    fn clone(&self) -> Self {
        infallible(self.try_clone())
    }
}

impl<T: fmt::Debug, A: SlotAllocator> fmt::Debug for RingBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, A: SlotAllocator, B: SlotAllocator> PartialEq<RingBuffer<T, B>>
    for RingBuffer<T, A>
{
    fn eq(&self, other: &RingBuffer<T, B>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: SlotAllocator> Eq for RingBuffer<T, A> {}

impl<T, A: SlotAllocator> Index<usize> for RingBuffer<T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "Index {} out of bounds for ring buffer of length {}",
                index, self.len
            ),
        }
    }
}

impl<T, A: SlotAllocator> IndexMut<usize> for RingBuffer<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let length = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("Index {index} out of bounds for ring buffer of length {length}"),
        }
    }
}

impl<T, A: SlotAllocator> Extend<T> for RingBuffer<T, A> {
    /// Pushes every item to the back, evicting from the front when full.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            drop(self.push_back(value));
        }
    }
}

impl<'a, T: Copy + 'a, A: SlotAllocator> Extend<&'a T> for RingBuffer<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for RingBuffer<T> {
    /// Collects every item; the capacity equals the number of items.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: alloc::vec::Vec<T> = iter.into_iter().collect();
        infallible(Self::from_exact_iter(items))
    }
}
