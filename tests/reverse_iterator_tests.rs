use circbuf::RingBuffer;

#[test]
fn test_reverse_iterator_populated_buffer() {
    let mut ring: RingBuffer<&str> = RingBuffer::with_capacity(8).unwrap();

    ring.push_back("first");
    ring.push_back("second");
    ring.push_back("third");

    let items: Vec<_> = ring.iter_rev().collect();
    assert_eq!(items.len(), 3);
    assert_eq!(*items[0], "third");
    assert_eq!(*items[1], "second");
    assert_eq!(*items[2], "first");
}

#[test]
fn test_reverse_iterator_empty_buffer() {
    let ring: RingBuffer<&str> = RingBuffer::with_capacity(8).unwrap();

    let items: Vec<_> = ring.iter_rev().collect();
    assert_eq!(items.len(), 0);
}

#[test]
fn test_reverse_iterator_single_item() {
    let mut ring: RingBuffer<&str> = RingBuffer::with_capacity(8).unwrap();

    ring.push_back("only");

    let items: Vec<_> = ring.iter_rev().collect();
    assert_eq!(items, [&"only"]);
}

#[test]
fn test_reverse_iterator_partial_consumption() {
    let mut ring: RingBuffer<&str> = RingBuffer::with_capacity(8).unwrap();

    ring.push_back("first");
    ring.push_back("second");
    ring.push_back("third");
    ring.push_back("fourth");

    let mut iter = ring.iter_rev();
    assert_eq!(iter.next(), Some(&"fourth"));
    assert_eq!(iter.next(), Some(&"third"));
    // Don't consume the rest
}

#[test]
fn test_reverse_iterator_size_hint() {
    let mut ring: RingBuffer<&str> = RingBuffer::with_capacity(8).unwrap();

    ring.push_back("first");
    ring.push_back("second");
    ring.push_back("third");

    let mut iter = ring.iter_rev();
    assert_eq!(iter.size_hint(), (3, Some(3)));

    iter.next();
    assert_eq!(iter.size_hint(), (2, Some(2)));

    iter.next();
    assert_eq!(iter.size_hint(), (1, Some(1)));

    iter.next();
    assert_eq!(iter.size_hint(), (0, Some(0)));
}

#[test]
fn test_reverse_iterator_compare_with_forward() {
    let mut ring: RingBuffer<&str> = RingBuffer::with_capacity(3).unwrap();

    for item in ["alpha", "beta", "gamma", "delta"] {
        ring.push_back(item);
    }

    let forward: Vec<_> = ring.iter().collect();
    let mut reverse: Vec<_> = ring.iter_rev().collect();
    reverse.reverse(); // Reverse it back to compare

    assert_eq!(forward, reverse);
    assert_eq!(forward, [&"beta", &"gamma", &"delta"]);
}

#[test]
fn test_reverse_iterator_after_push_front() {
    let mut ring: RingBuffer<u8> = RingBuffer::with_capacity(4).unwrap();
    for byte in b"abcdef" {
        ring.push_front(*byte);
    }

    let reversed: Vec<u8> = ring.iter_rev().copied().collect();
    assert_eq!(reversed, b"cdef");
}
