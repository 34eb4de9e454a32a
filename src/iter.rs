use core::iter::{Chain, FusedIterator};
use core::slice;

use crate::allocator::{Heap, SlotAllocator};
use crate::ring::RingBuffer;

/// Iterator over the elements of a `RingBuffer`, front to back.
///
/// Every step resolves a logical index against the buffer, so the walk
/// crosses the end of the block without noticing it.
///
/// This iterator implements `Clone`.
pub struct Iter<'a, T, A: SlotAllocator = Heap> {
    ring: &'a RingBuffer<T, A>,
    front: usize,
    back: usize,
}

impl<'a, T, A: SlotAllocator> Iter<'a, T, A> {
    pub(crate) fn new(ring: &'a RingBuffer<T, A>) -> Self {
        Self {
            ring,
            front: 0,
            back: ring.len(),
        }
    }
}

impl<T, A: SlotAllocator> Clone for Iter<'_, T, A> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T, A: SlotAllocator> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let item = self.ring.get(self.front);
            self.front += 1;
            item
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, A: SlotAllocator> DoubleEndedIterator for Iter<'_, T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            self.ring.get(self.back)
        } else {
            None
        }
    }
}

impl<T, A: SlotAllocator> ExactSizeIterator for Iter<'_, T, A> {}

impl<T, A: SlotAllocator> FusedIterator for Iter<'_, T, A> {}

/// Mutable iterator over the elements of a `RingBuffer`, front to back.
///
/// Walks the two contiguous halves of the window one after the other.
pub struct IterMut<'a, T> {
    halves: Chain<slice::IterMut<'a, T>, slice::IterMut<'a, T>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(first: &'a mut [T], second: &'a mut [T]) -> Self {
        Self {
            halves: first.iter_mut().chain(second.iter_mut()),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.halves.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.halves.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.halves.next_back()
    }
}

// Both halves report exact lengths, so the chain does too.
impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator that pops elements off a `RingBuffer`.
///
/// Elements not consumed are dropped with the iterator.
pub struct IntoIter<T, A: SlotAllocator = Heap> {
    ring: RingBuffer<T, A>,
}

impl<T, A: SlotAllocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.ring.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.len();
        (remaining, Some(remaining))
    }
}

impl<T, A: SlotAllocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ring.pop_back()
    }
}

impl<T, A: SlotAllocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: SlotAllocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: SlotAllocator> IntoIterator for RingBuffer<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { ring: self }
    }
}

impl<'a, T, A: SlotAllocator> IntoIterator for &'a RingBuffer<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<'a, T, A: SlotAllocator> IntoIterator for &'a mut RingBuffer<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
