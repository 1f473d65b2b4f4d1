//! Queries that ask a model search backend whether two structures are related.

use crate::{
    error::StructureError,
    formula::{Formula, Term},
    model::{
        symbol::{Notation, SymbolKind},
        Model,
    },
};

use super::{
    diagram::{distinctness, is_nullary, operation_facts, relation_facts, ConstantNaming, Polarity},
    witness::Witness,
};

/// Prefix of the constants naming the elements of the source structure
pub const SOURCE_PREFIX: &str = "a";
/// Prefix of the constants naming the elements of a structure to be extended
pub const EXTENSION_PREFIX: &str = "c";
/// Unary relation marking the elements of the image in a homomorphic-image query
pub const IMAGE_PREDICATE: &str = "A";
/// Unary relation marking the elements of the preimage in a homomorphic-image query
pub const PREIMAGE_PREDICATE: &str = "B";
/// Unary operation representing the homomorphism in a homomorphic-image query
pub const HOMOMORPHISM_SYMBOL: &str = "h";

const VARIABLES: [&str; 3] = ["x", "y", "z"];

/// Sentences to be satisfied by a model of a fixed size,
/// together with the place where a satisfying model holds the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Sentences the model must satisfy
    pub sentences: Vec<Formula>,
    /// Exact number of elements of the model
    pub domain_size: usize,
    /// How to read the mapping from a satisfying model
    pub witness: Witness,
}

impl Model {
    /// Build the query asking whether this structure embeds into `target`.
    ///
    /// The query is the diagram of this structure under the prefix `a`
    /// together with the diagram of `target` whose elements are named by numerals,
    /// to be satisfied in a model of the size of `target`.
    /// The constant `a{i}` then holds the image of element `i`.
    ///
    /// Returns `None` if this structure is larger than `target`.
    pub fn substructure_query(&self, target: &Model) -> Result<Option<Query>, StructureError> {
        if self.cardinality() > target.cardinality() {
            log::debug!(
                "a structure with {} elements cannot embed into one with {}",
                self.cardinality(),
                target.cardinality()
            );
            return Ok(None);
        }

        self.check_signature_within(target)?;

        let mut sentences = self.diagram(SOURCE_PREFIX, 0);
        sentences.extend(target.diagram("", 0));

        log::debug!("substructure query: {} sentences", sentences.len());

        Ok(Some(Query {
            sentences,
            domain_size: target.cardinality(),
            witness: Witness::Constants {
                symbols: self.constant_names(&ConstantNaming::unshifted(SOURCE_PREFIX)),
                target: target.cardinality(),
            },
        }))
    }

    /// Build the query asking whether there is a homomorphism from this structure into `target`.
    ///
    /// Like [Model::substructure_query], but with the positive diagram of this structure,
    /// so the mapping need neither be injective nor reflect relations.
    pub fn homomorphism_query(&self, target: &Model) -> Result<Query, StructureError> {
        self.check_signature_within(target)?;

        let mut sentences = self.positive_diagram(SOURCE_PREFIX);
        sentences.extend(target.diagram("", 0));

        log::debug!("homomorphism query: {} sentences", sentences.len());

        Ok(Query {
            sentences,
            domain_size: target.cardinality(),
            witness: Witness::Constants {
                symbols: self.constant_names(&ConstantNaming::unshifted(SOURCE_PREFIX)),
                target: target.cardinality(),
            },
        })
    }

    /// Build the query asking whether this structure is a homomorphic image of `source`.
    ///
    /// Both structures are placed side by side in one model:
    /// this structure on `0..m`, marked by `A`, and `source` on `m..m+n`, marked by `B`.
    /// The unary operation `h` must map the second block onto the first
    /// while preserving every operation and relation of `source`.
    ///
    /// Returns `None` if this structure is larger than `source`.
    pub fn homomorphic_image_query(&self, source: &Model) -> Result<Option<Query>, StructureError> {
        let image_size = self.cardinality();
        let preimage_size = source.cardinality();
        if image_size > preimage_size {
            log::debug!(
                "a structure with {image_size} elements cannot be the image of one with {preimage_size}"
            );
            return Ok(None);
        }

        for model in [self, source] {
            for (symbol, purpose) in [
                (IMAGE_PREDICATE, "marking the image"),
                (PREIMAGE_PREDICATE, "marking the preimage"),
                (HOMOMORPHISM_SYMBOL, "the homomorphism"),
            ] {
                if model.uses_symbol(symbol) {
                    return Err(StructureError::ReservedSymbol {
                        symbol: symbol.to_string(),
                        purpose,
                    });
                }
            }
        }
        source.check_signature_within(self)?;

        let image_naming = ConstantNaming::unshifted("");
        let preimage_naming = ConstantNaming::new("", image_size);

        let mut sentences = side_by_side_facts(self, &image_naming, Polarity::Complete);
        sentences.extend(side_by_side_facts(
            source,
            &preimage_naming,
            Polarity::Positive,
        ));

        for element in 0..image_size + preimage_size {
            let in_image = element < image_size;
            for (predicate, holds) in [(IMAGE_PREDICATE, in_image), (PREIMAGE_PREDICATE, !in_image)] {
                let atom = marker(predicate, image_naming.name(element));
                sentences.push(if holds { atom } else { atom.negate() });
            }
        }

        sentences.push(preserves_operations(source));
        sentences.extend(preserves_relations(source));

        for (symbol, class, table) in source.symbols(SymbolKind::Operation) {
            if !is_nullary(&class) {
                continue;
            }
            if let (Some(preimage), Some(image)) = (
                table.as_nullary(),
                self.operation(symbol).and_then(|table| table.as_nullary()),
            ) {
                sentences.push(Formula::equals(
                    homomorphism(preimage_naming.name(preimage)),
                    image_naming.name(image),
                ));
            }
        }

        let x = Term::variable(VARIABLES[0]);
        let y = Term::variable(VARIABLES[1]);
        sentences.push(marker(IMAGE_PREDICATE, y.clone()).implies(Formula::exists(
            VARIABLES[0],
            Formula::and([
                marker(PREIMAGE_PREDICATE, x.clone()),
                Formula::equals(homomorphism(x), y),
            ]),
        )));

        log::debug!("homomorphic image query: {} sentences", sentences.len());

        Ok(Some(Query {
            sentences,
            domain_size: image_size + preimage_size,
            witness: Witness::Function {
                symbol: HOMOMORPHISM_SYMBOL.to_string(),
                domain: image_size..image_size + preimage_size,
                target: image_size,
            },
        }))
    }

    /// Sentences whose models of a given size contain a homomorphic image of this structure
    /// on `cardinality` distinct elements.
    ///
    /// Consists of the distinctness of the constants `c0..` and the positive diagram
    /// under the prefix `c`.
    pub fn extension_sentences(&self) -> Vec<Formula> {
        let naming = ConstantNaming::unshifted(EXTENSION_PREFIX);
        let mut sentences = distinctness(self.cardinality(), &naming);
        sentences.extend(self.positive_diagram(EXTENSION_PREFIX));

        log::debug!("extension query: {} sentences", sentences.len());

        sentences
    }
}

/// Diagram of one block of a homomorphic-image query.
///
/// Constants are left out: they are tied together by `h` instead.
/// Nullary relations are asserted with the given polarity.
fn side_by_side_facts(
    model: &Model,
    naming: &ConstantNaming,
    nullary_relations: Polarity,
) -> Vec<Formula> {
    let mut sentences = distinctness(model.cardinality(), naming);

    for (symbol, class, table) in model.symbols(SymbolKind::Operation) {
        if !is_nullary(&class) {
            sentences.extend(operation_facts(
                symbol,
                class,
                table,
                model.cardinality(),
                naming,
            ));
        }
    }
    for (symbol, class, table) in model.symbols(SymbolKind::Relation) {
        let polarity = if is_nullary(&class) {
            nullary_relations
        } else {
            Polarity::Complete
        };
        sentences.extend(relation_facts(
            symbol,
            class,
            table,
            model.cardinality(),
            naming,
            polarity,
        ));
    }

    sentences
}

fn marker(predicate: &str, term: Term) -> Formula {
    Formula::atom(predicate, Notation::Prefix, [term])
}

fn homomorphism(term: Term) -> Term {
    Term::apply(HOMOMORPHISM_SYMBOL, Notation::Prefix, [term])
}

/// `B(x) & B(y) -> A(h(x)) & A(h(y)) & h(x * y) = h(x) * h(y) & ...`
fn preserves_operations(source: &Model) -> Formula {
    let variables = VARIABLES[..2]
        .iter()
        .map(|name| Term::variable(name))
        .collect::<Vec<_>>();

    let premise = Formula::and(
        variables
            .iter()
            .map(|variable| marker(PREIMAGE_PREDICATE, variable.clone())),
    );

    let mut conclusion = variables
        .iter()
        .map(|variable| marker(IMAGE_PREDICATE, homomorphism(variable.clone())))
        .collect::<Vec<_>>();
    for (symbol, class, _) in source.symbols(SymbolKind::Operation) {
        if is_nullary(&class) {
            continue;
        }
        let arguments = &variables[..class.arity.count()];
        conclusion.push(Formula::equals(
            homomorphism(Term::apply(symbol, class.notation, arguments.iter().cloned())),
            Term::apply(
                symbol,
                class.notation,
                arguments.iter().cloned().map(homomorphism),
            ),
        ));
    }

    premise.implies(Formula::and(conclusion))
}

/// `B(x) & B(y) & R(x,y) -> R(h(x),h(y))` for every relation `R` with arguments.
fn preserves_relations(source: &Model) -> Vec<Formula> {
    source
        .symbols(SymbolKind::Relation)
        .filter(|(_, class, _)| !is_nullary(class))
        .map(|(symbol, class, _)| {
            let variables = VARIABLES[..class.arity.count()]
                .iter()
                .map(|name| Term::variable(name))
                .collect::<Vec<_>>();

            let mut premise = variables
                .iter()
                .map(|variable| marker(PREIMAGE_PREDICATE, variable.clone()))
                .collect::<Vec<_>>();
            premise.push(Formula::atom(
                symbol,
                class.notation,
                variables.iter().cloned(),
            ));

            Formula::and(premise).implies(Formula::atom(
                symbol,
                class.notation,
                variables.into_iter().map(homomorphism),
            ))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;
    use crate::model::table::Table;

    fn meet_semilattice() -> Model {
        Model::new(2)
            .unwrap()
            .with_operation("*", Table::Binary(vec![vec![0, 0], vec![0, 1]]))
            .unwrap()
    }

    fn render(sentences: &[Formula]) -> Vec<String> {
        sentences.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn substructure_of_meet_semilattice() {
        let model = meet_semilattice();
        let query = model.substructure_query(&model).unwrap().unwrap();

        assert_eq!(query.domain_size, 2);
        assert_eq!(
            query.witness,
            Witness::Constants {
                symbols: vec!["a0".to_string(), "a1".to_string()],
                target: 2
            }
        );
        assert_eq!(
            render(&query.sentences),
            vec![
                "-(a0 = a1)",
                "a0 * a0 = a0",
                "a0 * a1 = a0",
                "a1 * a0 = a0",
                "a1 * a1 = a1",
                "-(0 = 1)",
                "0 * 0 = 0",
                "0 * 1 = 0",
                "1 * 0 = 0",
                "1 * 1 = 1",
            ]
        );
    }

    #[test]
    fn larger_structure_is_no_substructure() {
        let large = Model::new(3).unwrap();
        let small = Model::new(2).unwrap();

        assert_eq!(large.substructure_query(&small), Ok(None));
        assert_eq!(large.homomorphic_image_query(&small), Ok(None));
        assert!(large.homomorphism_query(&small).is_ok());
    }

    #[test]
    fn cardinality_is_decided_before_signatures() {
        let chain = Model::new(3)
            .unwrap()
            .with_relation(
                "<=",
                Table::Binary(vec![vec![1, 1, 1], vec![0, 1, 1], vec![0, 0, 1]]),
            )
            .unwrap();

        assert_eq!(chain.substructure_query(&meet_semilattice()), Ok(None));
        assert_eq!(chain.homomorphic_image_query(&meet_semilattice()), Ok(None));
    }

    #[test]
    fn signatures_must_fit() {
        let order = Model::new(1)
            .unwrap()
            .with_relation("<=", Table::Binary(vec![vec![1]]))
            .unwrap();

        assert!(matches!(
            order.substructure_query(&meet_semilattice()),
            Err(StructureError::MissingSymbol { .. })
        ));
    }

    #[test]
    fn homomorphism_uses_positive_diagram() {
        let order = Model::new(2)
            .unwrap()
            .with_relation("<=", Table::Binary(vec![vec![1, 1], vec![0, 1]]))
            .unwrap();
        let query = order.homomorphism_query(&order).unwrap();

        assert_eq!(
            render(&query.sentences[..3]),
            vec!["a0 <= a0", "a0 <= a1", "a1 <= a1"]
        );
        assert_eq!(query.sentences.len(), 3 + 1 + 4);
    }

    #[test]
    fn homomorphic_image_of_meet_semilattice() {
        let image = Model::new(1)
            .unwrap()
            .with_operation("*", Table::Binary(vec![vec![0]]))
            .unwrap();
        let query = image
            .homomorphic_image_query(&meet_semilattice())
            .unwrap()
            .unwrap();

        assert_eq!(query.domain_size, 3);
        assert_eq!(
            query.witness,
            Witness::Function {
                symbol: "h".to_string(),
                domain: 1..3,
                target: 1
            }
        );
        assert_eq!(
            render(&query.sentences),
            vec![
                "0 * 0 = 0",
                "-(1 = 2)",
                "1 * 1 = 1",
                "1 * 2 = 1",
                "2 * 1 = 1",
                "2 * 2 = 2",
                "A(0)",
                "-B(0)",
                "-A(1)",
                "B(1)",
                "-A(2)",
                "B(2)",
                "B(x) & B(y) -> A(h(x)) & A(h(y)) & h(x * y) = h(x) * h(y)",
                "A(y) -> exists x (B(x) & h(x) = y)",
            ]
        );
    }

    #[test]
    fn homomorphic_image_constants_and_relations() {
        let model = Model::new(2)
            .unwrap()
            .with_operation("'", Table::Unary(vec![1, 0]))
            .unwrap()
            .with_operation("e", Table::Nullary(1))
            .unwrap()
            .with_relation("R", Table::Binary(vec![vec![0, 1], vec![1, 0]]))
            .unwrap()
            .with_relation("p", Table::Nullary(1))
            .unwrap();
        let query = model.homomorphic_image_query(&model).unwrap().unwrap();
        let sentences = render(&query.sentences);

        assert!(sentences.contains(&"B(x) & B(y) -> A(h(x)) & A(h(y)) & h(x') = h(x)'".to_string()));
        assert!(sentences.contains(&"B(x) & B(y) & R(x,y) -> R(h(x),h(y))".to_string()));
        assert!(sentences.contains(&"h(3) = 1".to_string()));
        assert!(!sentences.iter().any(|sentence| sentence.starts_with("e =")));
        assert_eq!(sentences.iter().filter(|sentence| *sentence == "p").count(), 2);
    }

    #[test]
    fn reserved_symbols_are_rejected() {
        let model = Model::new(1)
            .unwrap()
            .with_relation("A", Table::Unary(vec![1]))
            .unwrap();

        assert_eq!(
            model.homomorphic_image_query(&model),
            Err(StructureError::ReservedSymbol {
                symbol: "A".to_string(),
                purpose: "marking the image"
            })
        );
    }

    #[test]
    fn extension_sentences_keep_constants_apart() {
        let model = Model::new(2)
            .unwrap()
            .with_relation("P", Table::Unary(vec![0, 1]))
            .unwrap();

        assert_eq!(
            render(&model.extension_sentences()),
            vec!["-(c0 = c1)", "P(c1)"]
        );
    }
}
