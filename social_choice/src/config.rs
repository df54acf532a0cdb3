// ********* Public data structures ***********

use std::error::Error;
use std::fmt::Display;

/// Identifier of a voter, 1-based and unique within a profile.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct Agent(pub u32);

/// Identifier of a candidate option, 1-based and unique within a profile.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct Alternative(pub u32);

/// Deterministic policy for resolving a tied winner set.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakRule {
    /// The tied alternative with the largest identifier wins.
    Max,
    /// The tied alternative with the smallest identifier wins.
    Min,
    /// The designated agent decides: the first alternative of that agent's
    /// ranking that belongs to the tied set wins.
    AgentPriority(Agent),
}

/// Errors that prevent a rule from completing successfully.
///
/// Every failure here is a caller-input defect; nothing is transient and
/// nothing is worth retrying.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingError {
    /// Malformed input: an empty or ragged value matrix, a score vector of
    /// the wrong length, an empty candidate set.
    InvalidArgument(String),
    /// A referenced agent or alternative is absent from the profile.
    NotFound(String),
}

impl Error for VotingError {}

impl Display for VotingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            VotingError::NotFound(msg) => write!(f, "not found: {}", msg),
        }
    }
}
