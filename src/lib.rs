#![no_std]

//! `RingBuffer`: a fixed-capacity, double-ended ring buffer.
//!
//! `RingBuffer<T>` stores up to `capacity` elements in a single block of slots
//! addressed circularly. Elements can be pushed and popped at both ends; once
//! the buffer is full, every push evicts the element at the opposite end
//! instead of growing. The capacity only changes through `set_capacity`.
//!
//! This crate is `no_std` compatible and only needs `alloc`.
//!
//! Internal layout: a block of `capacity` slots, a `head` slot and a `len`.
//! Logical index `i` lives in slot `(head + i) mod capacity`; slots outside the
//! window `[head, head + len)` are uninitialized and never dropped.
//!
//! # Performance Characteristics
//!
//! ## Time Complexity
//! - `push_back()`, `push_front()`, `emplace_*()`: O(1), including eviction
//! - `pop_front()`, `pop_back()`: O(1)
//! - `get()`, `at()`, indexing, `front()`, `back()`: O(1)
//! - `clear()`, `set_capacity()`, range construction: O(len)
//! - Iterator and cursor steps: O(1)
//!
//! ## Space Complexity
//! - One allocation of `capacity * size_of::<T>()` bytes, none for capacity 0
//!   or zero-sized `T`
//! - Three words of bookkeeping plus the allocator
//!
//! # Overwrite on Full
//!
//! ```
//! # use circbuf::RingBuffer;
//! let mut ring = RingBuffer::with_capacity(8).unwrap();
//! for c in "Hello World".chars() {
//!     ring.push_back(c);
//! }
//!
//! // Only the last 8 characters survive
//! assert_eq!(ring.len(), 8);
//! assert_eq!(ring.iter().collect::<String>(), "lo World");
//!
//! // The evicted element is handed back to the caller
//! assert_eq!(ring.push_back('!'), Some('l'));
//! ```
//!
//! Pushing at the front evicts from the back:
//!
//! ```
//! # use circbuf::RingBuffer;
//! let mut ring = RingBuffer::with_capacity(8).unwrap();
//! for c in "Hello World".chars() {
//!     ring.push_front(c);
//! }
//! assert_eq!(ring.iter().collect::<String>(), "dlroW ol");
//! ```
//!
//! # Access
//!
//! `front()`, `back()` and `at()` report misuse as `RingBufferError`; `get()`
//! returns `Option`; indexing panics like slice indexing does.
//!
//! ```
//! # use circbuf::{RingBuffer, RingBufferError};
//! let mut ring: RingBuffer<u32> = RingBuffer::new();
//! assert_eq!(ring.front(), Err(RingBufferError::Underflow));
//!
//! ring.set_capacity(4).unwrap();
//! ring.extend([10, 20, 30]);
//! assert_eq!(ring.at(2), Ok(&30));
//! assert_eq!(
//!     ring.at(3),
//!     Err(RingBufferError::OutOfRange { index: 3, length: 3 })
//! );
//! assert_eq!(ring[1], 20);
//! ```
//!
//! # Capacity Changes
//!
//! `set_capacity()` moves the elements, in order, into a fresh block. When the
//! new capacity is smaller than the length, the first elements are kept and the
//! back is dropped. If the allocator refuses the new block, the buffer is left
//! as it was.
//!
//! ```
//! # use circbuf::RingBuffer;
//! let mut ring: RingBuffer<char> = "Hello".chars().collect();
//! assert_eq!(ring.capacity(), 5);
//!
//! ring.set_capacity(64).unwrap();
//! assert_eq!(ring.capacity(), 64);
//! assert_eq!(ring.iter().collect::<String>(), "Hello");
//!
//! ring.set_capacity(2).unwrap();
//! assert_eq!(ring.iter().collect::<String>(), "He");
//! ```
//!
//! # Iterator and Cursor Support
//!
//! ```
//! # use circbuf::RingBuffer;
//! let mut ring: RingBuffer<i32> = RingBuffer::with_capacity(3).unwrap();
//! ring.extend([1, 2, 3, 4]);
//!
//! let forward: Vec<_> = ring.iter().copied().collect();
//! let backward: Vec<_> = ring.iter_rev().copied().collect();
//! assert_eq!(forward, [2, 3, 4]);
//! assert_eq!(backward, [4, 3, 2]);
//!
//! let mut cursor = ring.cursor_front();
//! cursor.move_next();
//! assert_eq!(cursor.get(), Some(&3));
//! assert_eq!(ring.cursor_end() - cursor, 2);
//! ```
//!
//! # Allocation Strategy
//!
//! Storage comes from a `SlotAllocator`, `Heap` by default. Custom strategies
//! are passed to the `*_in` constructors.

extern crate alloc;

mod allocator;
mod cursor;
mod error;
mod iter;
mod ring;
mod slots;

// Re-export public types and traits
pub use allocator::{Heap, SlotAllocator};
pub use cursor::{Cursor, CursorMut};
pub use error::RingBufferError;
pub use iter::{IntoIter, Iter, IterMut};
pub use ring::RingBuffer;
