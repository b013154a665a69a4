#[derive(Debug, thiserror::Error)]
pub enum GarbleError {
    #[error("input A has {actual} bits, circuit expects {expected}")]
    InputLengthMismatch { expected: usize, actual: usize },
    #[error("secure randomness unavailable")]
    RandomnessUnavailable(#[from] rand::Error),
}
