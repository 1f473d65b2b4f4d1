//! Reading mappings out of models returned by a backend.

use std::ops::Range;

use crate::{
    error::WitnessError,
    model::{symbol::Arity, Model},
};

/// Describes where a query leaves its answer in a satisfying model.
///
/// Built together with the sentences of a [Query][super::query::Query],
/// so that extraction never has to guess symbol names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Witness {
    /// The image of source element `i` is the value of the constant `symbols[i]`.
    Constants {
        /// One constant per source element
        symbols: Vec<String>,
        /// Size of the universe the images must lie in
        target: usize,
    },
    /// The image of source element `i` is the value of the unary operation
    /// `symbol` at `domain.start + i`.
    Function {
        /// Unary operation symbol
        symbol: String,
        /// Arguments of the operation that represent the source elements
        domain: Range<usize>,
        /// Size of the universe the images must lie in
        target: usize,
    },
}

impl Witness {
    /// Number of source elements, i.e. length of the extracted mapping.
    pub fn len(&self) -> usize {
        match self {
            Witness::Constants { symbols, .. } => symbols.len(),
            Witness::Function { domain, .. } => domain.len(),
        }
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the mapping from `model`.
    ///
    /// The result has one entry per source element, giving its image.
    pub fn extract(&self, model: &Model) -> Result<Vec<usize>, WitnessError> {
        let mapping = match self {
            Witness::Constants { symbols, target } => symbols
                .iter()
                .map(|symbol| {
                    let table = model.operation(symbol).ok_or_else(|| {
                        WitnessError::MissingSymbol {
                            symbol: symbol.clone(),
                        }
                    })?;
                    let value = table.as_nullary().ok_or_else(|| WitnessError::WrongArity {
                        symbol: symbol.clone(),
                        expected: Arity::Nullary,
                        found: table.arity(),
                    })?;

                    check_target(symbol, value, *target)
                })
                .collect::<Result<Vec<_>, _>>()?,
            Witness::Function {
                symbol,
                domain,
                target,
            } => {
                let table =
                    model
                        .operation(symbol)
                        .ok_or_else(|| WitnessError::MissingSymbol {
                            symbol: symbol.clone(),
                        })?;
                let values = table.as_unary().ok_or_else(|| WitnessError::WrongArity {
                    symbol: symbol.clone(),
                    expected: Arity::Unary,
                    found: table.arity(),
                })?;
                let images = values
                    .get(domain.clone())
                    .ok_or_else(|| WitnessError::TooSmall {
                        symbol: symbol.clone(),
                        expected: domain.end,
                        found: values.len(),
                    })?;

                images
                    .iter()
                    .map(|&value| check_target(symbol, value, *target))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        log::trace!("extracted witness {mapping:?}");
        Ok(mapping)
    }
}

fn check_target(symbol: &str, value: usize, target: usize) -> Result<usize, WitnessError> {
    if value < target {
        Ok(value)
    } else {
        Err(WitnessError::OutOfTarget {
            symbol: symbol.to_string(),
            value,
            bound: target,
        })
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;
    use crate::model::table::Table;

    #[test]
    fn constants() {
        let model = Model::new(3)
            .unwrap()
            .with_operation("a0", Table::Nullary(2))
            .unwrap()
            .with_operation("a1", Table::Nullary(0))
            .unwrap();
        let witness = Witness::Constants {
            symbols: vec!["a0".to_string(), "a1".to_string()],
            target: 3,
        };
        assert_eq!(witness.extract(&model), Ok(vec![2, 0]));

        let missing = Witness::Constants {
            symbols: vec!["a2".to_string()],
            target: 3,
        };
        assert_eq!(
            missing.extract(&model),
            Err(WitnessError::MissingSymbol {
                symbol: "a2".to_string()
            })
        );
    }

    #[test]
    fn function_restricted_to_domain() {
        let model = Model::new(5)
            .unwrap()
            .with_operation("h", Table::Unary(vec![0, 1, 0, 1, 1]))
            .unwrap();
        let witness = Witness::Function {
            symbol: "h".to_string(),
            domain: 2..5,
            target: 2,
        };
        assert_eq!(witness.len(), 3);
        assert_eq!(witness.extract(&model), Ok(vec![0, 1, 1]));

        let outside = Witness::Function {
            symbol: "h".to_string(),
            domain: 0..5,
            target: 1,
        };
        assert!(matches!(
            outside.extract(&model),
            Err(WitnessError::OutOfTarget { value: 1, .. })
        ));
    }

    #[test]
    fn wrong_arity() {
        let model = Model::new(2)
            .unwrap()
            .with_operation("h", Table::Nullary(1))
            .unwrap();
        let witness = Witness::Function {
            symbol: "h".to_string(),
            domain: 0..2,
            target: 2,
        };
        assert_eq!(
            witness.extract(&model),
            Err(WitnessError::WrongArity {
                symbol: "h".to_string(),
                expected: Arity::Unary,
                found: Arity::Nullary
            })
        );
    }
}
