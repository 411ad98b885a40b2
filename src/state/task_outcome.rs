/// Task outcome definitions
///
/// Every fetch task ends in exactly one of these states, which travels with its
/// finish event to the termination detector.
use std::fmt;

/// How a single fetch task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskOutcome {
    // ===== Success =====
    /// Page was fetched and handed to the result stream
    Emitted,

    // ===== Skips =====
    /// Depth budget was used up before this task could fetch
    DepthExhausted,

    /// Scheme is not http or https
    SchemeRejected,

    /// Another task already claimed this URL
    AlreadyVisited,

    // ===== Failures =====
    /// URL could not be parsed
    InvalidUrl,

    /// Request could not be sent or no response came back
    TransportFailed,

    /// Response body could not be read
    ReadFailed,

    /// The result stream was dropped by the caller
    ConsumerGone,

    /// Task ended without recording an outcome (e.g. it panicked)
    Abandoned,
}

impl TaskOutcome {
    /// Returns true if the task produced a page result
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Emitted)
    }

    /// Returns true for the quiet skip conditions
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::DepthExhausted | Self::SchemeRejected | Self::AlreadyVisited
        )
    }

    /// Returns true if this represents an error worth reporting
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl
                | Self::TransportFailed
                | Self::ReadFailed
                | Self::ConsumerGone
                | Self::Abandoned
        )
    }

    /// Short snake_case label used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emitted => "emitted",
            Self::DepthExhausted => "depth_exhausted",
            Self::SchemeRejected => "scheme_rejected",
            Self::AlreadyVisited => "already_visited",
            Self::InvalidUrl => "invalid_url",
            Self::TransportFailed => "transport_failed",
            Self::ReadFailed => "read_failed",
            Self::ConsumerGone => "consumer_gone",
            Self::Abandoned => "abandoned",
        }
    }

    /// Returns all possible outcomes
    pub fn all() -> [Self; 9] {
        [
            Self::Emitted,
            Self::DepthExhausted,
            Self::SchemeRejected,
            Self::AlreadyVisited,
            Self::InvalidUrl,
            Self::TransportFailed,
            Self::ReadFailed,
            Self::ConsumerGone,
            Self::Abandoned,
        ]
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
