use ndarray::array;

use crate::environment::{Environment, GridWorld};

const LEFT: usize = 0;
const DOWN: usize = 1;
const RIGHT: usize = 2;
const UP: usize = 3;

#[test]
fn test_reset_returns_origin() {
    let mut env = GridWorld::new();
    assert_eq!(env.reset(), array![0.0, 0.0]);
    assert_eq!(env.cell(), 0);
    assert_eq!(env.state_size(), 2);
    assert_eq!(env.action_size(), 4);
}

#[test]
fn test_moves_and_wall_clamping() {
    let mut env = GridWorld::new();
    env.reset();

    // Off-board moves stay put.
    let step = env.step(LEFT);
    assert_eq!(step.next_state, array![0.0, 0.0]);
    assert!(!step.done);
    let step = env.step(UP);
    assert_eq!(step.next_state, array![0.0, 0.0]);

    let step = env.step(RIGHT);
    assert_eq!(step.next_state, array![1.0, 0.0]);
    assert_eq!(step.reward, 0.0);
    assert!(!step.done);
}

#[test]
fn test_falling_into_hole_terminates_without_reward() {
    let mut env = GridWorld::new();
    env.reset();

    env.step(RIGHT); // cell 1
    let step = env.step(DOWN); // cell 5, a hole
    assert!(step.done);
    assert_eq!(step.reward, 0.0);
    assert_eq!(env.cell(), 5);
}

#[test]
fn test_safe_path_reaches_goal_with_bonus() {
    let mut env = GridWorld::new();
    env.reset();

    // 0 -> 4 -> 8 -> 9 -> 13 -> 14 -> 15, skirting every hole.
    for (action, expect_done) in [
        (DOWN, false),
        (DOWN, false),
        (RIGHT, false),
        (DOWN, false),
        (RIGHT, false),
        (RIGHT, true),
    ] {
        let step = env.step(action);
        assert_eq!(step.done, expect_done);
        if expect_done {
            assert_eq!(step.reward, 100.0);
            assert_eq!(step.next_state, array![3.0, 3.0]);
        } else {
            assert_eq!(step.reward, 0.0);
        }
    }
}

#[test]
fn test_step_limit_terminates_episode() {
    let mut env = GridWorld::new();
    env.reset();

    // Pacing in place against the wall never reaches a terminal cell,
    // so only the step limit can end the episode.
    for i in 0..99 {
        let step = env.step(LEFT);
        assert!(!step.done, "terminated early at step {}", i);
    }
    let step = env.step(LEFT);
    assert!(step.done);
    assert_eq!(step.reward, 0.0);
}

#[test]
fn test_reset_clears_step_count() {
    let mut env = GridWorld::new();
    env.reset();
    for _ in 0..50 {
        env.step(LEFT);
    }
    env.reset();
    // A fresh episode gets the full budget again.
    for _ in 0..99 {
        assert!(!env.step(LEFT).done);
    }
}
