//! This module defines all the errors that can occur while executing fom.

use std::path::PathBuf;

use thiserror::Error;

/// Error that occur during execution of the `fom` command line app
#[derive(Error, Debug)]
pub enum CliError {
    /// Error while reading an input file
    #[error("unable to read `{filename}`: {error}")]
    Reading {
        /// File that could not be read
        filename: PathBuf,
        /// Underlying io error
        error: std::io::Error,
    },
    /// Error while reading a structure from JSON
    #[error("`{filename}` does not contain a valid structure: {error}")]
    InvalidStructure {
        /// File containing the structure
        filename: PathBuf,
        /// Underlying JSON or validation error
        error: serde_json::Error,
    },
    /// The structures of a relationship query have incompatible sizes
    #[error("a structure with {left} elements cannot be {relationship} one with {right} elements")]
    Cardinality {
        /// Which relationship was asked for
        relationship: &'static str,
        /// Cardinality of the first structure
        left: usize,
        /// Cardinality of the second structure
        right: usize,
    },
    /// Error while writing JSON output
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Error originating from fomodel
    #[error(transparent)]
    FomodelError(#[from] fomodel::error::Error),
    /// Malformed structures
    #[error(transparent)]
    StructureError(#[from] fomodel::error::StructureError),
}
