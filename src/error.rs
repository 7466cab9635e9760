use std::fmt;

/// errors that stop a run before the simulator starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// the cache geometry is out of range
    InvalidConfiguration(String),
    /// a trace line could not be turned into an instruction, `line` is 1-based
    MalformedInstruction { line: usize, reason: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfiguration(reason) => {
                write!(f, "invalid cache configuration: {reason}")
            }
            SimError::MalformedInstruction { line, reason } => {
                write!(f, "malformed instruction at line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for SimError {}
