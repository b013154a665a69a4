#[derive(Debug, thiserror::Error)]
pub enum CircuitLoadError {
    #[error("encountered error while parsing circuit")]
    ParsingError(#[from] anyhow::Error),
    /// An I/O error occurred.
    #[error("encountered io error while loading circuit")]
    IoError(#[from] std::io::Error),
    #[error("expected {declared} gates, found {found}")]
    GateCountMismatch { declared: usize, found: usize },
    #[error("gate writing wire {output} reads the later wire {parent}")]
    NonTopological { output: usize, parent: usize },
    #[error("wire {0} is written by more than one gate")]
    DuplicateOutputWire(usize),
    #[error("unknown gate operator `{0}`")]
    UnknownOperator(String),
    #[error("malformed gate line `{0}`")]
    ArityMismatch(String),
    #[error("circuit output wire {0} is not produced by any gate")]
    UnwrittenOutputWire(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum CircuitEvalError {
    #[error("input {name} has {actual} bits, circuit expects {expected}")]
    InputLengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("gate output wire {output} does not follow its parents")]
    TopologyViolation { output: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum CircuitStoreError {
    #[error("encountered io error while storing circuit")]
    IoError(#[from] std::io::Error),
    #[error("gate writing wire {output} has no Bristol operator")]
    UnsupportedGate { output: usize },
    #[error("input A has {actual} bits, circuit expects {expected}")]
    InputLengthMismatch { expected: usize, actual: usize },
}
