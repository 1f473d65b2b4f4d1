//! Boundary to an external finite model search program.
//!
//! The search itself is not part of this crate. Implementations of [ModelSearch]
//! receive the sentences of a query together with the exact domain size and
//! return the models they found. The submodules render requests in the input
//! syntax of Mace4 and read its `interpretation(...)` output back into [Model]s.

pub mod interpretation;
pub mod ladr;

use std::time::Duration;

use crate::{error::Error, formula::Formula, model::Model};

/// Time budget of a search unless specified otherwise
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(60);
/// Time budget of the searches deciding relationships between two structures
pub const RELATIONSHIP_TIME_BUDGET: Duration = Duration::from_secs(6000);

/// Limits and extra settings of a model search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Wall clock time the backend may spend
    time_budget: Duration,
    /// Stop after this many models; `None` asks for all of them
    max_models: Option<usize>,
    /// Backend settings passed on verbatim
    parameters: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
            max_models: None,
            parameters: Vec::new(),
        }
    }
}

impl SearchOptions {
    /// Options for deciding a relationship: one witness suffices.
    pub fn relationship() -> Self {
        Self::default()
            .with_time_budget(RELATIONSHIP_TIME_BUDGET)
            .with_max_models(Some(1))
    }

    /// Set the time budget.
    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    /// Set the maximal number of models, `None` for all models.
    pub fn with_max_models(mut self, max_models: Option<usize>) -> Self {
        self.max_models = max_models;
        self
    }

    /// Add a backend setting, e.g. `assign(max_megs, 500).`
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameters.push(parameter.into());
        self
    }

    /// Wall clock time the backend may spend.
    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    /// Maximal number of models, `None` for all models.
    pub fn max_models(&self) -> Option<usize> {
        self.max_models
    }

    /// Backend settings passed on verbatim.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }
}

/// Everything a backend needs to search for models
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Sentences built by this crate
    pub sentences: Vec<Formula>,
    /// Additional axioms in backend syntax, e.g. the theory of lattices
    pub axioms: Vec<String>,
    /// Exact number of elements of the models to find
    pub domain_size: usize,
    /// Limits of the search
    pub options: SearchOptions,
}

impl SearchRequest {
    /// Create a request without additional axioms.
    pub fn new(sentences: Vec<Formula>, domain_size: usize, options: SearchOptions) -> Self {
        Self {
            sentences,
            axioms: Vec::new(),
            domain_size,
            options,
        }
    }

    /// Add axioms in backend syntax.
    pub fn with_axioms<Axioms: IntoIterator<Item = String>>(mut self, axioms: Axioms) -> Self {
        self.axioms.extend(axioms);
        self
    }
}

/// Answer of a backend
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchReport {
    /// Models found, each of the requested size
    pub models: Vec<Model>,
    /// Whether the backend searched the whole space,
    /// so that finding fewer models than allowed proves there are no more
    pub exhausted: bool,
}

impl SearchReport {
    /// Report of a search that ran to completion.
    pub fn exhausted(models: Vec<Model>) -> Self {
        Self {
            models,
            exhausted: true,
        }
    }

    /// Report of a search that stopped early, e.g. because it ran out of time.
    pub fn interrupted(models: Vec<Model>) -> Self {
        Self {
            models,
            exhausted: false,
        }
    }
}

/// A finite model finder
///
/// Implementations run the search synchronously and report
/// failures to run at all as [Error::Backend].
pub trait ModelSearch {
    /// Search for models of the requested size satisfying all sentences and axioms.
    fn search(&self, request: &SearchRequest) -> Result<SearchReport, Error>;
}

impl<T: ModelSearch + ?Sized> ModelSearch for &T {
    fn search(&self, request: &SearchRequest) -> Result<SearchReport, Error> {
        (**self).search(request)
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    #[test]
    fn relationship_options() {
        let options = SearchOptions::relationship();
        assert_eq!(options.time_budget(), Duration::from_secs(6000));
        assert_eq!(options.max_models(), Some(1));
        assert!(options.parameters().is_empty());

        let default = SearchOptions::default();
        assert_eq!(default.time_budget(), Duration::from_secs(60));
        assert_eq!(default.max_models(), None);
    }
}
