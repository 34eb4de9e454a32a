use circbuf::{Heap, RingBuffer};

fn contents(ring: &RingBuffer<char>) -> String {
    ring.iter().collect()
}

#[test]
fn test_default_buffer_is_unallocated() {
    let ring: RingBuffer<char> = RingBuffer::new();

    assert_eq!(ring.len(), 0);
    assert_eq!(ring.capacity(), 0);
    assert!(ring.is_empty());
    assert!(ring.cursor_front() == ring.cursor_end());
}

#[test]
fn test_default_trait_matches_new() {
    let ring: RingBuffer<u8> = RingBuffer::default();
    assert_eq!(ring.capacity(), 0);
    assert_eq!(ring.allocator(), &Heap);
}

#[test]
fn test_sized_buffer_starts_empty() {
    let ring: RingBuffer<char> = RingBuffer::with_capacity(8).unwrap();

    assert_eq!(ring.len(), 0);
    assert_eq!(ring.capacity(), 8);
    assert!(ring.is_empty());
    assert!(!ring.is_full());
}

#[test]
fn test_push_back_overwrites_front_when_full() {
    let mut ring = RingBuffer::with_capacity(8).unwrap();
    for c in "Hello World".chars() {
        ring.push_back(c);
    }

    assert_eq!(ring.len(), 8);
    assert!(ring.is_full());
    assert_eq!(contents(&ring), "lo World");
}

#[test]
fn test_push_front_overwrites_back_when_full() {
    let mut ring = RingBuffer::with_capacity(8).unwrap();
    for c in "Hello World".chars() {
        ring.push_front(c);
    }

    assert_eq!(ring.len(), 8);
    assert_eq!(contents(&ring), "dlroW ol");
}

#[test]
fn test_at_on_partially_filled_buffer() {
    let mut ring = RingBuffer::with_capacity(8).unwrap();
    for c in "Hello".chars() {
        ring.push_back(c);
    }

    assert!(ring.at(8).is_err());
    assert_eq!(ring.at(4), Ok(&'o'));
}

#[test]
fn test_grow_keeps_contents() {
    let mut ring = RingBuffer::with_capacity(8).unwrap();
    for c in "Hello".chars() {
        ring.push_back(c);
    }

    ring.set_capacity(64).unwrap();

    assert_eq!(contents(&ring), "Hello");
    assert_eq!(ring.capacity(), 64);
    assert_eq!(ring.len(), 5);
}

#[test]
fn test_from_exact_iter_sizes_capacity_to_range() {
    let ring = RingBuffer::from_exact_iter(vec![1, 2, 3, 4]).unwrap();

    assert_eq!(ring.capacity(), 4);
    assert_eq!(ring.len(), 4);
    assert!(ring.is_full());
    assert_eq!(ring.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
}

#[test]
fn test_from_exact_iter_empty_range() {
    let ring = RingBuffer::<u64>::from_exact_iter(Vec::new()).unwrap();
    assert_eq!(ring.capacity(), 0);
    assert!(ring.is_empty());
}

#[test]
fn test_collect_sizes_capacity_to_item_count() {
    let ring: RingBuffer<char> = "ring".chars().collect();

    assert_eq!(ring.capacity(), 4);
    assert_eq!(contents(&ring), "ring");
}

#[test]
fn test_clone_is_deep_and_keeps_capacity() {
    let mut ring = RingBuffer::with_capacity(4).unwrap();
    for word in ["a", "b", "c", "d", "e"] {
        ring.push_back(String::from(word));
    }

    let mut copy = ring.clone();
    copy[0].push('!');
    copy.push_back(String::from("f"));

    assert_eq!(copy.capacity(), 4);
    assert_eq!(ring.iter().map(String::as_str).collect::<Vec<_>>(), ["b", "c", "d", "e"]);
    assert_eq!(copy.iter().map(String::as_str).collect::<Vec<_>>(), ["c", "d", "e", "f"]);
}

#[test]
fn test_clone_from_replaces_contents() {
    let source: RingBuffer<i32> = (0..3).collect();
    let mut target: RingBuffer<i32> = RingBuffer::with_capacity(10).unwrap();
    target.extend([7, 8, 9, 10]);

    target.clone_from(&source);

    assert_eq!(target, source);
    assert_eq!(target.capacity(), 3);
}

#[test]
fn test_take_leaves_empty_unallocated_source() {
    let mut ring: RingBuffer<String> = RingBuffer::with_capacity(2).unwrap();
    ring.push_back(String::from("kept"));

    let moved = std::mem::take(&mut ring);

    assert_eq!(ring.capacity(), 0);
    assert!(ring.is_empty());
    assert_eq!(moved.len(), 1);
    assert_eq!(moved.front().map(String::as_str), Ok("kept"));
}

#[test]
fn test_equality_ignores_capacity_and_layout() {
    let mut wrapped: RingBuffer<i32> = RingBuffer::with_capacity(3).unwrap();
    wrapped.extend([0, 1, 2, 3]);
    let mut roomy: RingBuffer<i32> = RingBuffer::with_capacity(10).unwrap();
    roomy.extend([1, 2, 3]);

    assert_eq!(wrapped, roomy);
    roomy.push_back(4);
    assert_ne!(wrapped, roomy);
}

#[test]
fn test_debug_lists_elements_in_order() {
    let mut ring: RingBuffer<i32> = RingBuffer::with_capacity(3).unwrap();
    ring.extend([1, 2, 3, 4]);
    assert_eq!(format!("{ring:?}"), "[2, 3, 4]");
}

#[test]
fn test_as_slices_splits_at_wrap_point() {
    let mut ring: RingBuffer<i32> = RingBuffer::with_capacity(4).unwrap();
    ring.extend([1, 2, 3, 4, 5, 6]);

    let (first, second) = ring.as_slices();
    assert_eq!(first, &[3, 4]);
    assert_eq!(second, &[5, 6]);

    let (first, second) = ring.as_mut_slices();
    first[0] = 30;
    second[1] = 60;
    assert_eq!(ring.iter().copied().collect::<Vec<_>>(), [30, 4, 5, 60]);
}

#[test]
fn test_as_slices_contiguous_and_empty() {
    let mut ring: RingBuffer<i32> = RingBuffer::with_capacity(4).unwrap();
    assert_eq!(ring.as_slices(), (&[][..], &[][..]));

    ring.extend([1, 2]);
    assert_eq!(ring.as_slices(), (&[1, 2][..], &[][..]));
}

#[test]
fn test_extend_by_reference() {
    let mut ring: RingBuffer<u8> = RingBuffer::with_capacity(3).unwrap();
    let values = [1u8, 2, 3, 4];
    ring.extend(values.iter());
    assert_eq!(ring.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
}

#[test]
fn test_zero_sized_elements() {
    let mut ring = RingBuffer::with_capacity(3).unwrap();
    for _ in 0..5 {
        ring.push_back(());
    }
    assert_eq!(ring.len(), 3);
    assert_eq!(ring.pop_front(), Some(()));
    assert_eq!(ring.len(), 2);
}

#[test]
fn test_buffer_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RingBuffer<String>>();
}
