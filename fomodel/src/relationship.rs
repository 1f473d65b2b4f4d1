//! Deciding relationships between structures with the help of a model search backend.

use crate::{
    backend::{ModelSearch, SearchOptions, SearchReport, SearchRequest},
    encoding::Query,
    error::{Error, WitnessError},
    model::Model,
};

/// Why a relationship does not hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refutation {
    /// The structures have incompatible sizes; no search was run
    Cardinality,
    /// The backend searched the whole space without finding a witness
    SearchExhausted,
}

/// Answer to the question whether two structures are related
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The relationship holds; the mapping gives the image of every source element
    Witnessed(Vec<usize>),
    /// The relationship does not hold
    Refuted(Refutation),
    /// The backend found no witness, but did not rule one out either,
    /// e.g. because it ran out of time
    Inconclusive,
}

impl Outcome {
    /// The witnessing mapping, if there is one.
    pub fn mapping(&self) -> Option<&[usize]> {
        match self {
            Outcome::Witnessed(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Whether the relationship was shown to hold.
    pub fn holds(&self) -> bool {
        matches!(self, Outcome::Witnessed(_))
    }
}

impl Model {
    /// Decide whether this structure embeds into `target`.
    ///
    /// A witness maps element `i` of this structure to element `mapping[i]` of `target`.
    pub fn is_substructure_of(
        &self,
        target: &Model,
        backend: &dyn ModelSearch,
        options: &SearchOptions,
    ) -> Result<Outcome, Error> {
        match self.substructure_query(target)? {
            Some(query) => decide("substructure", query, backend, options),
            None => Ok(Outcome::Refuted(Refutation::Cardinality)),
        }
    }

    /// Decide whether there is a homomorphism from this structure into `target`.
    pub fn has_homomorphism_into(
        &self,
        target: &Model,
        backend: &dyn ModelSearch,
        options: &SearchOptions,
    ) -> Result<Outcome, Error> {
        decide(
            "homomorphism",
            self.homomorphism_query(target)?,
            backend,
            options,
        )
    }

    /// Decide whether this structure is a homomorphic image of `source`.
    ///
    /// A witness maps element `i` of `source` to element `mapping[i]` of this structure.
    pub fn is_homomorphic_image_of(
        &self,
        source: &Model,
        backend: &dyn ModelSearch,
        options: &SearchOptions,
    ) -> Result<Outcome, Error> {
        match self.homomorphic_image_query(source)? {
            Some(query) => decide("homomorphic image", query, backend, options),
            None => Ok(Outcome::Refuted(Refutation::Cardinality)),
        }
    }

    /// Search for models of `axioms` with `cardinality` elements
    /// that contain a homomorphic image of this structure on distinct elements.
    ///
    /// Returns every model reported by the backend.
    pub fn find_extensions(
        &self,
        axioms: &[String],
        cardinality: usize,
        backend: &dyn ModelSearch,
        options: &SearchOptions,
    ) -> Result<Vec<Model>, Error> {
        if cardinality < self.cardinality() {
            log::info!(
                "no extension of a structure with {} elements has {cardinality} elements",
                self.cardinality()
            );
            return Ok(Vec::new());
        }

        let request = SearchRequest::new(self.extension_sentences(), cardinality, options.clone())
            .with_axioms(axioms.iter().cloned());

        log::info!(
            "searching for extensions with {cardinality} elements ({} sentences, {} axioms)",
            request.sentences.len(),
            request.axioms.len()
        );
        let report = backend.search(&request)?;
        log::info!("found {} extensions", report.models.len());

        check_report(&report, &request)?;
        Ok(report.models)
    }
}

fn decide(
    relationship: &str,
    query: Query,
    backend: &dyn ModelSearch,
    options: &SearchOptions,
) -> Result<Outcome, Error> {
    let Query {
        sentences,
        domain_size,
        witness,
    } = query;
    let request = SearchRequest::new(sentences, domain_size, options.clone());

    log::info!(
        "searching for a {relationship} witness of size {domain_size} ({} sentences)",
        request.sentences.len()
    );
    let report = backend.search(&request)?;
    check_report(&report, &request)?;

    let Some(model) = report.models.first() else {
        return Ok(if report.exhausted {
            log::info!("no {relationship} witness exists");
            Outcome::Refuted(Refutation::SearchExhausted)
        } else {
            log::info!("no {relationship} witness found within the search limits");
            Outcome::Inconclusive
        });
    };

    let mapping = witness.extract(model)?;
    log::info!("found {relationship} witness {mapping:?}");

    Ok(Outcome::Witnessed(mapping))
}

/// Check that the backend answered the question it was asked.
fn check_report(report: &SearchReport, request: &SearchRequest) -> Result<(), WitnessError> {
    if let Some(limit) = request.options.max_models() {
        if report.models.len() > limit {
            log::warn!(
                "backend returned {} models, but only {limit} were requested",
                report.models.len()
            );
        }
    }

    match report
        .models
        .iter()
        .find(|model| model.cardinality() != request.domain_size)
    {
        Some(model) => Err(WitnessError::DomainSize {
            expected: request.domain_size,
            found: model.cardinality(),
        }),
        None => Ok(()),
    }
}
