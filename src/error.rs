// src/error.rs
//
// Error kinds surfaced by the sieve core. See spec/design notes on
// recovery policy: ParametersTooSmall and "not enough relations" are
// recovered from locally by the orchestrator; everything else propagates.

use std::fmt;

#[derive(Debug, Clone)]
pub enum MpqsError {
    /// Factor base empty, k suitable primes unavailable, a cofactor doesn't
    /// fit a machine word, or the relation stream cannot widen further.
    ParametersTooSmall(String),
    /// n is even, a perfect square, or otherwise not an odd composite the
    /// sieve can make progress on.
    InputNotComposite(String),
    /// A sieve-time invariant was violated (e.g. a modular inverse that must
    /// exist did not). Indicates a logic error, not a recoverable condition.
    InternalInconsistency(String),
}

impl fmt::Display for MpqsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MpqsError::ParametersTooSmall(msg) => write!(f, "parameters too small: {}", msg),
            MpqsError::InputNotComposite(msg) => write!(f, "input not composite: {}", msg),
            MpqsError::InternalInconsistency(msg) => {
                write!(f, "internal inconsistency: {}", msg)
            }
        }
    }
}

impl std::error::Error for MpqsError {}

pub type MpqsResult<T> = Result<T, MpqsError>;
