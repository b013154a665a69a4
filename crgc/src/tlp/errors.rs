use circuit::CircuitEvalError;

#[derive(Debug, thiserror::Error)]
pub enum TlpError {
    #[error("sequential circuit must map {lambda} bits to {lambda} bits with no second input")]
    SequentialCircuitMismatch { lambda: usize },
    #[error("puzzle dimensions do not match the public parameters")]
    PuzzleMismatch,
    #[error("secure randomness unavailable")]
    RandomnessUnavailable(#[from] rand::Error),
    #[error("garbled circuit evaluation failed")]
    Eval(#[from] CircuitEvalError),
}
