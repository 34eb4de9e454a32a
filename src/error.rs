use core::alloc::Layout;

use thiserror::Error;

/// Error types for `RingBuffer` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum RingBufferError {
    /// `front`/`back` was called on an empty buffer
    #[error("Underflow: tried to access an element of an empty ring buffer")]
    Underflow,
    /// Index is beyond the current buffer length
    #[error("Index out of range: index {index} is beyond ring buffer length {length}")]
    OutOfRange {
        /// Index that was accessed
        index: usize,
        /// Current length of the buffer
        length: usize,
    },
    /// The allocator refused to provide storage
    #[error("Allocation failure: could not allocate {capacity} slots ({} bytes)", .layout.size())]
    AllocationFailure {
        /// Number of slots requested
        capacity: usize,
        /// Layout passed to the allocator
        layout: Layout,
    },
    /// The requested number of slots does not fit in the address space
    #[error("Capacity overflow: {capacity} slots exceed the addressable size")]
    CapacityOverflow {
        /// Number of slots requested
        capacity: usize,
    },
    /// In-place construction was requested on a buffer without slots
    #[error("Zero capacity: ring buffer has no slot to construct into")]
    ZeroCapacity,
}
