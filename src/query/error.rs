use thiserror::Error;

/// Reasons a search request is rejected before any search work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("missing facing option")]
    MissingFacing,

    #[error("unsupported facing '{0}' (expected north, east, south or west)")]
    InvalidFacing(String),

    #[error("unsupported direction '{0}' (expected x, y or z)")]
    InvalidDirection(String),

    #[error("predicate is empty")]
    EmptyPredicate,

    #[error("rotation list and constraint objects are mutually exclusive")]
    ConflictingPredicates,

    #[error("invalid integer string '{0}'")]
    InvalidInteger(String),

    #[error("rotation {0} is out of range (expected 0, 1, 2 or 3)")]
    RotationOutOfRange(i32),

    #[error("unknown constraint key '{0}'")]
    UnknownKey(String),

    #[error("duplicate constraint key '{0}'")]
    DuplicateKey(String),

    #[error("incomplete constraint object: {0}")]
    IncompleteConstraint(String),

    #[error("malformed constraint object '{0}'")]
    MalformedConstraint(String),

    #[error("missing bound {0}")]
    MissingBound(&'static str),

    #[error("invalid block range: {axis} min {min} is greater than max {max}")]
    InvertedRange { axis: char, min: i32, max: i32 },

    #[error("worker count must be at least 1")]
    ZeroWorkers,
}
