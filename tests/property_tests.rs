use minerva::agent::{AgentConfig, DoubleDqnAgent};
use minerva::replay_buffer::{ReplayBuffer, Transition};
use ndarray::array;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn transition(id: usize) -> Transition {
    Transition {
        state: array![id as f32, 0.0],
        action: id % 4,
        reward: 0.0,
        next_state: array![(id + 1) as f32, 0.0],
        done: false,
    }
}

proptest! {
    #[test]
    fn buffer_never_exceeds_capacity(
        capacity in 1usize..64,
        appends in 0usize..300,
    ) {
        let mut buffer = ReplayBuffer::new(capacity);
        for i in 0..appends {
            buffer.push(transition(i));
            prop_assert!(buffer.len() <= capacity);
        }
        prop_assert_eq!(buffer.len(), appends.min(capacity));
    }

    #[test]
    fn buffer_retains_most_recent_in_order(
        capacity in 1usize..32,
        appends in 0usize..200,
    ) {
        let mut buffer = ReplayBuffer::new(capacity);
        for i in 0..appends {
            buffer.push(transition(i));
        }

        let kept: Vec<usize> = buffer.iter_oldest_first().map(|t| t.action).collect();
        let expected: Vec<usize> = (appends.saturating_sub(capacity)..appends)
            .map(|i| i % 4)
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn sample_size_is_exact_or_rejected(
        capacity in 1usize..32,
        appends in 0usize..64,
        n in 0usize..64,
    ) {
        let mut buffer = ReplayBuffer::new(capacity);
        for i in 0..appends {
            buffer.push(transition(i));
        }
        let mut rng = StdRng::seed_from_u64(9);

        match buffer.sample(&mut rng, n) {
            Ok(sample) => {
                prop_assert!(n <= buffer.len());
                prop_assert_eq!(sample.len(), n);
            }
            Err(_) => prop_assert!(n > buffer.len()),
        }
    }

    #[test]
    fn epsilon_is_monotone_and_floored(
        decay in 0.5f32..1.0,
        floor in 0.0f32..0.5,
        steps in 0usize..150,
    ) {
        let config = AgentConfig {
            epsilon: 1.0,
            epsilon_min: floor,
            epsilon_decay: decay,
            buffer_capacity: 200,
            ..AgentConfig::default()
        };
        let mut agent = DoubleDqnAgent::with_default_network(2, 4, config).unwrap();

        let mut previous = agent.epsilon();
        for i in 0..steps {
            agent.remember(transition(i));
            let current = agent.epsilon();
            prop_assert!(current <= previous);
            prop_assert!(current >= floor);
            prop_assert!(current <= 1.0);
            previous = current;
        }
    }
}
