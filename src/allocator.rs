use core::alloc::Layout;
use core::ptr::NonNull;

/// Allocation strategy for the slot block of a `RingBuffer`.
///
/// The buffer only ever asks for a single block of `capacity` slots at a time
/// and hands it back with the same layout. Zero-sized layouts never reach the
/// allocator.
///
/// # Safety
///
/// A returned pointer must be valid for reads and writes of `layout.size()`
/// bytes, aligned to `layout.align()`, and must stay valid until it is passed
/// back to `deallocate` with the same layout.
pub unsafe trait SlotAllocator {
    /// Allocates a block described by `layout`, or returns `None` if the
    /// request cannot be satisfied.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Releases a block previously returned by `allocate`.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this allocator with the same `layout`,
    /// and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The global heap, through `alloc::alloc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heap;

// Safe: delegates to the global allocator, which upholds the contract.
#[allow(unsafe_code)]
unsafe impl SlotAllocator for Heap {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() != 0, "zero-sized layouts are not allocated");
        // SAFETY: the layout has a non-zero size.
        NonNull::new(unsafe { alloc::alloc::alloc(layout) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded from the caller's contract.
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

#[allow(unsafe_code)]
unsafe impl<A: SlotAllocator + ?Sized> SlotAllocator for &A {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded from the caller's contract.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}
