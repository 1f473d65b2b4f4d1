//! Error-handling module for the crate

use thiserror::Error;

use crate::model::symbol::{Arity, SymbolKind};

/// Errors caused by a structure that violates the invariants of a [Model][crate::model::Model].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// The universe of a structure must not be empty
    #[error("a structure must have at least one element")]
    EmptyUniverse,
    /// The number of elements of a product does not fit into `usize`
    #[error("a product of structures with {left} and {right} elements is too large")]
    UniverseTooLarge {
        /// Cardinality of the first factor
        left: usize,
        /// Cardinality of the second factor
        right: usize,
    },
    /// A row of a table does not have one entry per element
    #[error("{kind} `{symbol}` has a row of length {found}, expected {expected}")]
    JaggedTable {
        /// Whether the table belongs to an operation or relation
        kind: SymbolKind,
        /// Symbol owning the table
        symbol: String,
        /// Cardinality of the structure
        expected: usize,
        /// Length of the offending row
        found: usize,
    },
    /// Operations may have arity at most two
    #[error("operation `{symbol}` has arity {arity}, but operations are at most binary")]
    UnsupportedArity {
        /// Symbol owning the table
        symbol: String,
        /// Arity inferred from the table
        arity: Arity,
    },
    /// An operation table contains a value outside of the universe
    #[error("operation `{symbol}` maps to {value}, which is not below the cardinality {cardinality}")]
    ValueOutOfRange {
        /// Symbol owning the table
        symbol: String,
        /// The offending entry
        value: usize,
        /// Cardinality of the structure
        cardinality: usize,
    },
    /// A relation table contains something other than 0 or 1
    #[error("relation `{symbol}` contains {value}, but relation entries must be 0 or 1")]
    NotBoolean {
        /// Symbol owning the table
        symbol: String,
        /// The offending entry
        value: usize,
    },
    /// Two structures interpret the same symbol with different arities
    #[error("{kind} `{symbol}` has arity {left} in one structure and arity {right} in the other")]
    ArityMismatch {
        /// Whether the symbol is an operation or relation
        kind: SymbolKind,
        /// The shared symbol
        symbol: String,
        /// Arity in the first structure
        left: Arity,
        /// Arity in the second structure
        right: Arity,
    },
    /// A symbol of one structure is not interpreted by the other
    #[error("{kind} `{symbol}` is not interpreted by the structure it is compared with")]
    MissingSymbol {
        /// Whether the symbol is an operation or relation
        kind: SymbolKind,
        /// The missing symbol
        symbol: String,
    },
    /// A structure uses a symbol the query builder needs for itself
    #[error("symbol `{symbol}` is reserved for {purpose} and cannot be used by the structure")]
    ReservedSymbol {
        /// The clashing symbol
        symbol: String,
        /// What the query uses the symbol for
        purpose: &'static str,
    },
}

/// Errors raised while reading a mapping back out of a model returned by a backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WitnessError {
    /// A symbol listed in the witness manifest is not interpreted by the model
    #[error("the returned model does not interpret the witness symbol `{symbol}`")]
    MissingSymbol {
        /// The missing symbol
        symbol: String,
    },
    /// A symbol listed in the witness manifest has the wrong arity
    #[error("witness symbol `{symbol}` has arity {found}, expected arity {expected}")]
    WrongArity {
        /// The symbol in question
        symbol: String,
        /// Arity the manifest requires
        expected: Arity,
        /// Arity found in the model
        found: Arity,
    },
    /// The returned model does not have the requested domain size
    #[error("the returned model has {found} elements, but the query asked for {expected}")]
    DomainSize {
        /// Requested domain size
        expected: usize,
        /// Cardinality of the returned model
        found: usize,
    },
    /// The returned model is smaller than the range the manifest refers to
    #[error("witness symbol `{symbol}` has {found} entries, but entries up to {expected} are needed")]
    TooSmall {
        /// The symbol in question
        symbol: String,
        /// Number of entries the manifest needs
        expected: usize,
        /// Number of entries available
        found: usize,
    },
    /// A witness value lies outside the universe it is supposed to land in
    #[error("witness symbol `{symbol}` takes value {value}, which is outside of the target range 0..{bound}")]
    OutOfTarget {
        /// The symbol in question
        symbol: String,
        /// The offending value
        value: usize,
        /// Size of the target universe
        bound: usize,
    },
}

/// Error while parsing a backend interpretation, with its location in the input.
#[derive(Error, Debug)]
#[error("unable to parse interpretation on line {line}, column {column}: expected {expected}\nat {fragment}")]
pub struct InterpretationError {
    /// What the parser was looking for
    pub expected: String,
    /// Line of the failing fragment (starting at 1)
    pub line: usize,
    /// Column of the failing fragment (starting at 1)
    pub column: usize,
    /// Beginning of the input that could not be parsed
    pub fragment: String,
}

/// Error-Collection for all the possible Errors occurring in this crate
#[allow(variant_size_differences)]
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed structure
    #[error(transparent)]
    Structure(#[from] StructureError),
    /// Witness could not be extracted
    #[error(transparent)]
    Witness(#[from] WitnessError),
    /// Backend output could not be parsed
    #[error(transparent)]
    Interpretation(#[from] InterpretationError),
    /// The search backend failed
    #[error("model search backend failed: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),
    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// IO Error
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

impl Error {
    /// Wrap an arbitrary failure of a search backend.
    pub fn backend<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Backend(error.into())
    }
}
