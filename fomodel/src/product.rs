//! Direct products of structures.

use crate::{
    error::StructureError,
    model::{
        symbol::SymbolKind,
        table::Table,
        Model,
    },
};

/// Pairs `(a, b)` of a product universe, numbered in row-major order.
#[derive(Debug, Clone, Copy)]
struct PairIndex {
    right: usize,
}

impl PairIndex {
    fn index(&self, left: usize, right: usize) -> usize {
        left * self.right + right
    }

    fn split(&self, index: usize) -> (usize, usize) {
        (index / self.right, index % self.right)
    }

    /// Project a tuple of pairs onto its first and second coordinates.
    fn project(&self, tuple: &[usize]) -> (Vec<usize>, Vec<usize>) {
        tuple.iter().map(|&index| self.split(index)).unzip()
    }
}

impl Model {
    /// Return the direct product of this structure and `other`.
    ///
    /// The product has `m * n` elements, where the pair `(a, b)` is the element `a * n + b`.
    /// Operations act coordinatewise and a relation holds on a tuple of pairs
    /// if it holds on the first coordinates in this structure
    /// and on the second coordinates in `other`.
    ///
    /// Only symbols interpreted by both factors are kept;
    /// the result carries no index and no attributes.
    pub fn product(&self, other: &Model) -> Result<Model, StructureError> {
        let pairs = PairIndex {
            right: other.cardinality(),
        };
        let cardinality = self
            .cardinality()
            .checked_mul(other.cardinality())
            .ok_or(StructureError::UniverseTooLarge {
                left: self.cardinality(),
                right: other.cardinality(),
            })?;
        let mut product = Model::new(cardinality)?;

        for kind in [SymbolKind::Operation, SymbolKind::Relation] {
            for (symbol, class, left) in self.symbols(kind) {
                let right = match kind {
                    SymbolKind::Operation => other.operation(symbol),
                    SymbolKind::Relation => other.relation(symbol),
                };
                let Some(right) = right else {
                    log::debug!("{kind} `{symbol}` is missing in the second factor, dropping it");
                    continue;
                };
                if right.arity() != class.arity {
                    return Err(StructureError::ArityMismatch {
                        kind,
                        symbol: symbol.to_string(),
                        left: class.arity,
                        right: right.arity(),
                    });
                }

                let table = Table::tabulate(class.arity, cardinality, |tuple| {
                    let (first, second) = pairs.project(tuple);
                    match kind {
                        SymbolKind::Operation => {
                            pairs.index(left.value(&first), right.value(&second))
                        }
                        SymbolKind::Relation => left.value(&first) & right.value(&second),
                    }
                });

                product = match kind {
                    SymbolKind::Operation => product.with_operation(symbol, table)?,
                    SymbolKind::Relation => product.with_relation(symbol, table)?,
                };
            }
        }

        log::debug!(
            "product of structures with {} and {} elements has {} operations and {} relations",
            self.cardinality(),
            other.cardinality(),
            product.operations().count(),
            product.relations().count()
        );

        Ok(product)
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;
    use serde_json::json;
    use test_log::test;

    use super::*;
    use crate::model::symbol::Arity;

    #[quickcheck]
    fn product_cardinality(left: Model, right: Model) -> bool {
        let product = left.product(&right).unwrap();
        product.cardinality() == left.cardinality() * right.cardinality()
    }

    #[quickcheck]
    fn trivial_factor_is_neutral(model: Model) -> bool {
        let mut trivial = Model::new(1).unwrap();
        for (symbol, table) in model.operations() {
            trivial = trivial
                .with_operation(symbol, Table::tabulate(table.arity(), 1, |_| 0))
                .unwrap();
        }
        for (symbol, table) in model.relations() {
            trivial = trivial
                .with_relation(symbol, Table::tabulate(table.arity(), 1, |_| 1))
                .unwrap();
        }

        // (x, 0) is the element x
        model.product(&trivial).unwrap() == model
    }

    #[test]
    fn noncommutative_operation_is_not_transposed() {
        let left_zero = Model::new(2)
            .unwrap()
            .with_operation("*", Table::Binary(vec![vec![0, 0], vec![1, 1]]))
            .unwrap();
        let right_zero = Model::new(2)
            .unwrap()
            .with_operation("*", Table::Binary(vec![vec![0, 1], vec![0, 1]]))
            .unwrap();

        let product = left_zero.product(&right_zero).unwrap();
        let table = product.operation("*").unwrap();

        // (a, b) * (c, d) = (a, d)
        for p in 0..4 {
            for q in 0..4 {
                let (a, _) = (p / 2, p % 2);
                let (_, d) = (q / 2, q % 2);
                assert_eq!(table.value(&[p, q]), a * 2 + d);
            }
        }
    }

    #[test]
    fn relations_are_intersected() {
        let chain = Model::new(2)
            .unwrap()
            .with_relation("<=", Table::Binary(vec![vec![1, 1], vec![0, 1]]))
            .unwrap()
            .with_relation("P", Table::Unary(vec![0, 1]))
            .unwrap()
            .with_attribute("labels", json!(["0", "1"]))
            .with_index(4);

        let square = chain.product(&chain).unwrap();
        assert_eq!(square.index(), None);
        assert!(square.attributes().is_empty());
        assert_eq!(square.relation("P"), Some(&Table::Unary(vec![0, 0, 0, 1])));
        assert_eq!(
            square.relation("<="),
            Some(&Table::Binary(vec![
                vec![1, 1, 1, 1],
                vec![0, 1, 0, 1],
                vec![0, 0, 1, 1],
                vec![0, 0, 0, 1],
            ]))
        );
    }

    #[test]
    fn only_shared_symbols_survive() {
        let left = Model::new(2)
            .unwrap()
            .with_operation("'", Table::Unary(vec![1, 0]))
            .unwrap()
            .with_operation("e", Table::Nullary(1))
            .unwrap();
        let right = Model::new(3)
            .unwrap()
            .with_operation("e", Table::Nullary(2))
            .unwrap();

        let product = left.product(&right).unwrap();
        assert_eq!(product.cardinality(), 6);
        assert_eq!(product.operation("'"), None);
        assert_eq!(product.operation("e"), Some(&Table::Nullary(5)));
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        let left = Model::new(2)
            .unwrap()
            .with_relation("R", Table::Unary(vec![1, 0]))
            .unwrap();
        let right = Model::new(2)
            .unwrap()
            .with_relation("R", Table::Binary(vec![vec![1, 0], vec![0, 1]]))
            .unwrap();

        assert_eq!(
            left.product(&right),
            Err(StructureError::ArityMismatch {
                kind: SymbolKind::Relation,
                symbol: "R".to_string(),
                left: Arity::Unary,
                right: Arity::Binary
            })
        );
    }

    #[test]
    fn oversized_product_is_an_error() {
        let huge = Model::new(1 << 40).unwrap();

        assert_eq!(
            huge.product(&huge),
            Err(StructureError::UniverseTooLarge {
                left: 1 << 40,
                right: 1 << 40
            })
        );
    }
}
