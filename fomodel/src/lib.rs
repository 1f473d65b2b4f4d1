//! Finite first-order structures and their encoding as sentences for finite model search

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

pub mod backend;
pub mod encoding;
pub mod error;
pub mod formula;
pub mod model;
pub mod product;
pub mod relationship;

pub use self::{
    backend::{ModelSearch, SearchOptions, SearchReport, SearchRequest},
    encoding::{ConstantNaming, Query, Witness},
    error::Error,
    formula::{Formula, Term},
    model::{table::Table, Model},
    relationship::{Outcome, Refutation},
};
