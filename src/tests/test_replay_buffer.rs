use ndarray::array;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::MinervaError;
use crate::replay_buffer::{ReplayBuffer, Transition};

fn transition(id: usize) -> Transition {
    Transition {
        state: array![id as f32],
        action: id,
        reward: id as f32,
        next_state: array![(id + 1) as f32],
        done: false,
    }
}

#[test]
fn test_push_and_sample() {
    let mut buffer = ReplayBuffer::new(10);
    let mut rng = StdRng::seed_from_u64(7);

    buffer.push(transition(0));
    assert_eq!(buffer.len(), 1);

    let sample = buffer.sample(&mut rng, 1).unwrap();
    assert_eq!(sample[0], &transition(0));
}

#[test]
fn test_capacity_invariant_and_fifo_eviction() {
    let mut buffer = ReplayBuffer::new(3);

    for i in 0..7 {
        buffer.push(transition(i));
        assert!(buffer.len() <= 3);
    }

    // Only the three most recent transitions remain, oldest first.
    let ids: Vec<usize> = buffer.iter_oldest_first().map(|t| t.action).collect();
    assert_eq!(ids, vec![4, 5, 6]);
}

#[test]
fn test_ordering_before_wraparound() {
    let mut buffer = ReplayBuffer::new(5);
    for i in 0..3 {
        buffer.push(transition(i));
    }
    let ids: Vec<usize> = buffer.iter_oldest_first().map(|t| t.action).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn test_sample_without_replacement() {
    let mut buffer = ReplayBuffer::new(10);
    let mut rng = StdRng::seed_from_u64(42);

    for i in 0..10 {
        buffer.push(transition(i));
    }

    let sample = buffer.sample(&mut rng, 10).unwrap();
    assert_eq!(sample.len(), 10);

    // Without replacement: every stored transition appears exactly once.
    let mut ids: Vec<usize> = sample.iter().map(|t| t.action).collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_sample_only_returns_live_entries() {
    let mut buffer = ReplayBuffer::new(4);
    let mut rng = StdRng::seed_from_u64(3);

    for i in 0..9 {
        buffer.push(transition(i));
    }

    for _ in 0..20 {
        let sample = buffer.sample(&mut rng, 2).unwrap();
        for t in sample {
            assert!(t.action >= 5, "evicted transition {} resurfaced", t.action);
        }
    }
}

#[test]
fn test_sample_insufficient_data() {
    let mut buffer = ReplayBuffer::new(10);
    let mut rng = StdRng::seed_from_u64(0);

    buffer.push(transition(0));
    buffer.push(transition(1));

    let err = buffer.sample(&mut rng, 3).unwrap_err();
    match err {
        MinervaError::InsufficientData { requested, available } => {
            assert_eq!(requested, 3);
            assert_eq!(available, 2);
        }
        other => panic!("unexpected error: {}", other),
    }

    // Exactly at the boundary sampling succeeds.
    assert!(buffer.sample(&mut rng, 2).is_ok());
}

#[test]
fn test_is_empty_and_capacity() {
    let mut buffer = ReplayBuffer::new(5);
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), 5);

    buffer.push(transition(0));
    assert!(!buffer.is_empty());
}
