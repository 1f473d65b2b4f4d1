//! Diagrams: descriptions of a structure by ground sentences over named elements.

use crate::{
    formula::{Formula, Term},
    model::{
        symbol::{Arity, SymbolClass, SymbolKind},
        table::Table,
        Model,
    },
};

/// How the elements of a structure are named in its diagram.
///
/// Element `i` becomes the constant `{prefix}{i + shift}`.
/// With an empty prefix the names are numerals,
/// which the backend reads as the elements of its own domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantNaming {
    prefix: String,
    shift: usize,
}

impl ConstantNaming {
    /// Name elements by `prefix` followed by the element index plus `shift`.
    pub fn new(prefix: &str, shift: usize) -> Self {
        Self {
            prefix: prefix.to_string(),
            shift,
        }
    }

    /// Name elements by `prefix` followed by the element index.
    pub fn unshifted(prefix: &str) -> Self {
        Self::new(prefix, 0)
    }

    /// Constant naming `element`.
    pub fn name(&self, element: usize) -> Term {
        Term::element(&self.prefix, element + self.shift)
    }

    /// Textual name of `element`.
    pub fn symbol(&self, element: usize) -> String {
        format!("{}{}", self.prefix, element + self.shift)
    }
}

/// Which relation facts a diagram asserts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Polarity {
    /// Every tuple, negated where the relation does not hold
    Complete,
    /// Only the tuples in the relation
    Positive,
}

/// `-(c_x = c_y)` for all elements `x < y`.
pub(crate) fn distinctness(cardinality: usize, naming: &ConstantNaming) -> Vec<Formula> {
    (0..cardinality)
        .flat_map(|x| ((x + 1)..cardinality).map(move |y| (x, y)))
        .map(|(x, y)| Formula::equals(naming.name(x), naming.name(y)).negate())
        .collect()
}

/// One equation per argument tuple, fixing the value of the operation.
pub(crate) fn operation_facts(
    symbol: &str,
    class: SymbolClass,
    table: &Table,
    cardinality: usize,
    naming: &ConstantNaming,
) -> Vec<Formula> {
    table
        .entries(cardinality)
        .map(|(tuple, value)| {
            let arguments = tuple.into_iter().map(|element| naming.name(element));
            Formula::equals(
                Term::apply(symbol, class.notation, arguments),
                naming.name(value),
            )
        })
        .collect()
}

/// One atom per argument tuple; tuples outside the relation are
/// asserted negatively or left out depending on `polarity`.
pub(crate) fn relation_facts(
    symbol: &str,
    class: SymbolClass,
    table: &Table,
    cardinality: usize,
    naming: &ConstantNaming,
    polarity: Polarity,
) -> Vec<Formula> {
    table
        .entries(cardinality)
        .filter_map(|(tuple, value)| {
            let arguments = tuple.into_iter().map(|element| naming.name(element));
            let atom = Formula::atom(symbol, class.notation, arguments);

            match (value, polarity) {
                (1, _) => Some(atom),
                (_, Polarity::Complete) => Some(atom.negate()),
                (_, Polarity::Positive) => None,
            }
        })
        .collect()
}

impl Model {
    /// Return the diagram of this structure.
    ///
    /// Element `i` is named `{prefix}{i + shift}`. The diagram consists of
    /// 1. `-(c_x = c_y)` for every pair of elements `x < y`,
    /// 2. for every operation and argument tuple, the equation fixing its value,
    /// 3. for every relation and argument tuple, the atom if the relation holds
    ///    and its negation otherwise.
    ///
    /// Any structure satisfying the diagram contains an isomorphic copy
    /// of this one on the named constants.
    pub fn diagram(&self, prefix: &str, shift: usize) -> Vec<Formula> {
        let naming = ConstantNaming::new(prefix, shift);
        let mut sentences = distinctness(self.cardinality(), &naming);

        for (symbol, class, table) in self.symbols(SymbolKind::Operation) {
            sentences.extend(operation_facts(
                symbol,
                class,
                table,
                self.cardinality(),
                &naming,
            ));
        }
        for (symbol, class, table) in self.symbols(SymbolKind::Relation) {
            sentences.extend(relation_facts(
                symbol,
                class,
                table,
                self.cardinality(),
                &naming,
                Polarity::Complete,
            ));
        }

        log::debug!(
            "diagram of a structure with {} elements under prefix `{prefix}` shifted by {shift}: {} sentences",
            self.cardinality(),
            sentences.len()
        );

        sentences
    }

    /// Return the positive diagram of this structure.
    ///
    /// Contains the operation equations of the [diagram][Model::diagram] (unshifted)
    /// and the atoms of tuples in a relation, but neither distinctness
    /// nor negated relation facts.
    pub fn positive_diagram(&self, prefix: &str) -> Vec<Formula> {
        let naming = ConstantNaming::unshifted(prefix);
        let mut sentences = Vec::new();

        for (symbol, class, table) in self.symbols(SymbolKind::Operation) {
            sentences.extend(operation_facts(
                symbol,
                class,
                table,
                self.cardinality(),
                &naming,
            ));
        }
        for (symbol, class, table) in self.symbols(SymbolKind::Relation) {
            sentences.extend(relation_facts(
                symbol,
                class,
                table,
                self.cardinality(),
                &naming,
                Polarity::Positive,
            ));
        }

        log::debug!(
            "positive diagram of a structure with {} elements under prefix `{prefix}`: {} sentences",
            self.cardinality(),
            sentences.len()
        );

        sentences
    }

    /// Return the constants introduced by the diagrams of this structure
    /// under the given naming, in element order.
    pub fn constant_names(&self, naming: &ConstantNaming) -> Vec<String> {
        (0..self.cardinality())
            .map(|element| naming.symbol(element))
            .collect()
    }
}

/// Whether the symbol is a constant, i.e. its facts mention no argument.
pub(crate) fn is_nullary(class: &SymbolClass) -> bool {
    class.arity == Arity::Nullary
}
