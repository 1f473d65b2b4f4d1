//! Translation of structures and structural relationships into sentences.
//!
//! A [Query] bundles the sentences with the size of the model to search for
//! and a [Witness] telling where a satisfying model holds the answer.

pub mod diagram;
pub mod query;
pub mod witness;

pub use self::{diagram::ConstantNaming, query::Query, witness::Witness};
