use ringq_rs::error::TryGetError;
use ringq_rs::AtomicQueue;
use std::sync::Arc;
use std::thread;

#[test]
fn empty_rejection() {
    let q: AtomicQueue<u32> = AtomicQueue::with_capacity(4);
    assert_eq!(q.try_get(), Err(TryGetError::Empty));
}

#[test]
fn round_trip() {
    let q = AtomicQueue::with_capacity(4);
    q.try_put(42u32).unwrap();
    assert_eq!(q.try_get().unwrap(), 42);
    assert_eq!(q.try_get(), Err(TryGetError::Empty));
}

#[test]
fn fifo_order() {
    let q = AtomicQueue::with_capacity(64);
    for i in 0..64u32 {
        q.try_put(i).unwrap();
    }
    for i in 0..64u32 {
        assert_eq!(q.try_get().unwrap(), i);
    }
}

#[test]
fn full_rejection_and_wraparound() {
    let q = AtomicQueue::with_capacity(3);

    q.try_put(1).unwrap();
    q.try_put(2).unwrap();
    q.try_put(3).unwrap();

    let err = q.try_put(4).unwrap_err();
    assert!(err.is_full());
    assert_eq!(err.into_inner(), 4);

    assert_eq!(q.try_get().unwrap(), 1);
    q.try_put(4).unwrap();

    assert_eq!(q.try_get().unwrap(), 2);
    assert_eq!(q.try_get().unwrap(), 3);
    assert_eq!(q.try_get().unwrap(), 4);
    assert_eq!(q.try_get(), Err(TryGetError::Empty));
}

#[test]
fn len_tracks_occupancy() {
    let q = AtomicQueue::with_capacity(2);
    assert_eq!(q.capacity(), 2);
    assert!(q.is_empty());

    q.try_put(0).unwrap();
    assert_eq!(q.len(), 1);
    assert!(!q.is_empty());
    assert!(!q.is_full());

    q.try_put(0).unwrap();
    assert_eq!(q.len(), 2);
    assert!(q.is_full());

    q.try_get().unwrap();
    q.try_get().unwrap();
    assert!(q.is_empty());
}

#[test]
fn debug_snapshot() {
    let q = AtomicQueue::with_capacity(3);
    q.try_put(7u8).unwrap();

    let s = format!("{:?}", q);
    assert!(s.contains("AtomicQueue"));
    assert!(s.contains("capacity: 3"));
    assert!(s.contains("len: 1"));
}

#[test]
fn dropping_queue_drops_buffered_values() {
    let token = Arc::new(());
    let q = AtomicQueue::with_capacity(8);

    for _ in 0..5 {
        q.try_put(token.clone()).unwrap();
    }
    // Wrap around so live values straddle the end of the buffer.
    for _ in 0..4 {
        drop(q.try_get().unwrap());
        q.try_put(token.clone()).unwrap();
    }
    assert_eq!(Arc::strong_count(&token), 6);

    drop(q);
    assert_eq!(Arc::strong_count(&token), 1);
}

#[test]
#[should_panic(expected = "capacity must be positive")]
fn zero_capacity_is_rejected() {
    let _ = AtomicQueue::<u32>::with_capacity(0);
}

#[test]
#[cfg_attr(miri, ignore)]
fn mpmc_stress() {
    const PRODUCERS: usize = 4;
    const CONSUMERS: usize = 4;
    const PER_PRODUCER: usize = 10_000;

    let q = Arc::new(AtomicQueue::with_capacity(16));
    let mut handles = Vec::new();

    for p in 0..PRODUCERS {
        let q = q.clone();
        handles.push(thread::spawn(move || {
            for i in 0..PER_PRODUCER {
                let mut val = p * PER_PRODUCER + i;
                // Full and Contended are both transient here: consumers
                // keep draining, so spin until the put lands.
                loop {
                    match q.try_put(val) {
                        Ok(()) => break,
                        Err(err) => {
                            val = err.into_inner();
                            std::hint::spin_loop();
                        }
                    }
                }
            }
        }));
    }

    let mut collectors = Vec::new();
    for _ in 0..CONSUMERS {
        let q = q.clone();
        collectors.push(thread::spawn(move || {
            let mut got = Vec::new();
            while got.len() < PRODUCERS * PER_PRODUCER / CONSUMERS {
                match q.try_get() {
                    Ok(v) => got.push(v),
                    Err(_) => std::hint::spin_loop(),
                }
            }
            got
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    let mut all = Vec::new();
    for c in collectors {
        all.extend(c.join().unwrap());
    }

    // Nothing lost, nothing delivered twice.
    all.sort_unstable();
    let expected: Vec<usize> = (0..PRODUCERS * PER_PRODUCER).collect();
    assert_eq!(all, expected);
    assert_eq!(q.try_get(), Err(TryGetError::Empty));
}

#[test]
#[cfg_attr(miri, ignore)]
fn per_producer_order_is_preserved() {
    const AMT: u32 = 50_000;

    let q = Arc::new(AtomicQueue::with_capacity(8));
    let q1 = q.clone();

    let t = thread::spawn(move || {
        for i in 0..AMT {
            let mut val = i;
            loop {
                match q1.try_put(val) {
                    Ok(()) => break,
                    Err(err) => {
                        val = err.into_inner();
                        std::hint::spin_loop();
                    }
                }
            }
        }
    });

    let mut next = 0;
    while next < AMT {
        match q.try_get() {
            Ok(v) => {
                assert_eq!(v, next);
                next += 1;
            }
            Err(_) => std::hint::spin_loop(),
        }
    }

    t.join().unwrap();
}
