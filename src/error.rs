//! Error types for pruf.

use thiserror::Error;

/// The error type for every fallible relation, operator and configuration call.
#[derive(Debug, Error)]
pub enum PrufError {
    /// Empty schema, duplicate or empty attribute names
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// Membership outside (0, 1]
    #[error("invalid membership {value}: memberships must lie in (0, 1]")]
    InvalidMembership { value: f64 },

    /// Tuple length differs from the schema length
    #[error("arity mismatch: expected {expected} values, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("schema mismatch: {left:?} vs {right:?}")]
    SchemaMismatch { left: Vec<String>, right: Vec<String> },

    #[error("attribute '{attribute}' is in both schemas")]
    SchemaOverlap { attribute: String },

    #[error("the schemas {left:?} and {right:?} share no attribute")]
    NoCommonAttribute { left: Vec<String>, right: Vec<String> },

    #[error("{target:?} is not a permutation of {schema:?}")]
    NotAPermutation { schema: Vec<String>, target: Vec<String> },

    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// An operator was called with an operand outside [0, 1]
    #[error("operand {value} is outside the operator domain [0, 1]")]
    Domain { value: f64 },

    #[error("division by a relation of zero cardinality")]
    DivisionByZero,

    #[error("collapse needs at least two elements, found {len}")]
    InsufficientElements { len: usize },

    /// A name that does not belong to the requested operator family
    #[error("'{name}' is not a {kind} operator")]
    InvalidOperatorKind { kind: &'static str, name: String },

    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Bad membership function shape or sampling parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for pruf operations.
pub type Result<T> = std::result::Result<T, PrufError>;
