use core::alloc::Layout;
use core::marker::PhantomData;
use core::ptr::NonNull;
use core::slice;

use crate::allocator::SlotAllocator;
use crate::error::RingBufferError;

/// A block of `capacity` slots of `T`, any of which may be uninitialized.
///
/// The block does not know which slots hold live values and never drops them.
/// It does not free itself either: the owner hands it back to the allocator it
/// came from with `release`.
pub(crate) struct SlotBlock<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T> SlotBlock<T> {
    pub(crate) const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Obtains a block of `capacity` slots from `alloc`.
    ///
    /// Zero-sized requests (no slots, or a zero-sized `T`) are served with a
    /// dangling pointer and never reach the allocator.
    ///
    /// # Errors
    ///
    /// - `RingBufferError::CapacityOverflow` if the block size overflows `isize`
    /// - `RingBufferError::AllocationFailure` if the allocator refuses the request
    pub(crate) fn allocate<A: SlotAllocator>(
        alloc: &A,
        capacity: usize,
    ) -> Result<Self, RingBufferError> {
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| RingBufferError::CapacityOverflow { capacity })?;

        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        match alloc.allocate(layout) {
            Some(ptr) => Ok(Self {
                ptr: ptr.cast(),
                capacity,
                _marker: PhantomData,
            }),
            None => {
                log::debug!(
                    "slot allocation refused: {} slots, {} bytes",
                    capacity,
                    layout.size()
                );
                Err(RingBufferError::AllocationFailure { capacity, layout })
            }
        }
    }

    /// Returns the block to `alloc`.
    ///
    /// # Safety
    ///
    /// `alloc` must be the allocator the block was obtained from. Values still
    /// living in the block are leaked, not dropped.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn release<A: SlotAllocator>(self, alloc: &A) {
        // The layout was computed successfully when the block was allocated.
        let Ok(layout) = Layout::array::<T>(self.capacity) else {
            return;
        };
        if layout.size() != 0 {
            // SAFETY: same allocator and layout as the allocation, per the contract.
            unsafe { alloc.deallocate(self.ptr.cast(), layout) }
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Physical slot that lies `index` positions after `head`, wrapping at the
    /// end of the block.
    ///
    /// Written without `head + index` so it cannot overflow even for
    /// zero-sized `T`, where the capacity may be close to `usize::MAX`.
    #[inline]
    pub(crate) fn wrap(&self, head: usize, index: usize) -> usize {
        debug_assert!(head < self.capacity, "head {head} outside block");
        debug_assert!(index < self.capacity, "index {index} outside block");
        let room = self.capacity - head;
        if index >= room {
            index - room
        } else {
            head + index
        }
    }

    /// Physical slot right after `slot`, wrapping to slot 0.
    #[inline]
    pub(crate) fn wrap_next(&self, slot: usize) -> usize {
        debug_assert!(slot < self.capacity, "slot {slot} outside block");
        if slot == self.capacity - 1 {
            0
        } else {
            slot + 1
        }
    }

    /// Physical slot right before `slot`, wrapping to the last slot.
    #[inline]
    pub(crate) fn wrap_back(&self, slot: usize) -> usize {
        debug_assert!(slot < self.capacity, "slot {slot} outside block");
        if slot == 0 {
            self.capacity - 1
        } else {
            slot - 1
        }
    }

    #[inline]
    #[allow(unsafe_code)]
    fn slot_ptr(&self, slot: usize) -> *mut T {
        debug_assert!(slot < self.capacity, "slot {slot} outside block");
        // SAFETY: slot < capacity keeps the offset inside the block.
        unsafe { self.ptr.as_ptr().add(slot) }
    }

    /// Constructs `value` in `slot` and returns a reference to it.
    ///
    /// # Safety
    ///
    /// `slot < capacity` and the slot holds no live value.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn write(&mut self, slot: usize, value: T) -> &mut T {
        let ptr = self.slot_ptr(slot);
        // SAFETY: in-bounds and uninitialized per the contract.
        unsafe {
            ptr.write(value);
            &mut *ptr
        }
    }

    /// Moves the value out of `slot`, leaving it uninitialized.
    ///
    /// # Safety
    ///
    /// `slot < capacity` and the slot holds a live value, which the caller
    /// must treat as gone afterwards.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn read(&mut self, slot: usize) -> T {
        // SAFETY: in-bounds and initialized per the contract.
        unsafe { self.slot_ptr(slot).read() }
    }

    /// Drops the value in `slot` in place.
    ///
    /// # Safety
    ///
    /// Same as `read`.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn drop_in_place(&mut self, slot: usize) {
        // SAFETY: in-bounds and initialized per the contract.
        unsafe { self.slot_ptr(slot).drop_in_place() }
    }

    /// # Safety
    ///
    /// `slot < capacity` and the slot holds a live value.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn get(&self, slot: usize) -> &T {
        // SAFETY: in-bounds and initialized per the contract.
        unsafe { &*self.slot_ptr(slot) }
    }

    /// # Safety
    ///
    /// `slot < capacity` and the slot holds a live value.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn get_mut(&mut self, slot: usize) -> &mut T {
        // SAFETY: in-bounds and initialized per the contract.
        unsafe { &mut *self.slot_ptr(slot) }
    }

    /// Splits the window of `len` values starting at `head` into the part up
    /// to the end of the block and the part wrapped around to slot 0.
    fn window_bounds(&self, head: usize, len: usize) -> (usize, usize) {
        let first = len.min(self.capacity - head);
        (first, len - first)
    }

    /// The window as two contiguous slices, in logical order.
    ///
    /// # Safety
    ///
    /// `len <= capacity`, `head < capacity` unless `len == 0`, and every slot of
    /// the window holds a live value.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn window(&self, head: usize, len: usize) -> (&[T], &[T]) {
        if len == 0 {
            return (&[], &[]);
        }
        let (first, second) = self.window_bounds(head, len);
        let base = self.ptr.as_ptr();
        // SAFETY: both ranges are in-bounds, initialized and disjoint.
        unsafe {
            (
                slice::from_raw_parts(base.add(head), first),
                slice::from_raw_parts(base, second),
            )
        }
    }

    /// Mutable counterpart of `window`.
    ///
    /// # Safety
    ///
    /// Same as `window`.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn window_mut(&mut self, head: usize, len: usize) -> (&mut [T], &mut [T]) {
        if len == 0 {
            return (&mut [], &mut []);
        }
        let (first, second) = self.window_bounds(head, len);
        let base = self.ptr.as_ptr();
        // SAFETY: both ranges are in-bounds, initialized and disjoint, and
        // `&mut self` guarantees exclusive access to the block.
        unsafe {
            (
                slice::from_raw_parts_mut(base.add(head), first),
                slice::from_raw_parts_mut(base, second),
            )
        }
    }
}
