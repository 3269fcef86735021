pub mod test_environment;
pub mod test_replay_buffer;
