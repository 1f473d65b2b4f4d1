//! This module defines [Model], a finite first-order structure.

pub mod attributes;
pub mod symbol;
pub mod table;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StructureError;

use self::{
    attributes::Attributes,
    symbol::{SymbolClass, SymbolKind},
    table::Table,
};

/// A finite structure: the universe `0..cardinality`
/// together with named operations and relations on it.
///
/// Every table is checked against the cardinality when it is added,
/// so a [Model] always satisfies:
/// * each axis of each table has length `cardinality`,
/// * operation entries lie in `0..cardinality` and operations are at most binary,
/// * relation entries are `0` or `1`.
///
/// Models are built once and not modified afterwards;
/// operations that combine models produce new ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelData")]
pub struct Model {
    /// Number of elements
    cardinality: usize,
    /// Position of this model in a family of models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    /// Operation tables by symbol
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    operations: BTreeMap<String, Table>,
    /// Relation tables by symbol
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    relations: BTreeMap<String, Table>,
    /// Data not interpreted by this crate
    #[serde(flatten)]
    attributes: Attributes,
}

/// Unchecked form of a [Model] as read from JSON.
#[derive(Debug, Deserialize)]
struct ModelData {
    cardinality: usize,
    #[serde(default)]
    index: Option<usize>,
    #[serde(default)]
    operations: BTreeMap<String, Table>,
    #[serde(default)]
    relations: BTreeMap<String, Table>,
    #[serde(flatten)]
    attributes: Attributes,
}

impl TryFrom<ModelData> for Model {
    type Error = StructureError;

    fn try_from(data: ModelData) -> Result<Self, Self::Error> {
        Model::from_parts(
            data.cardinality,
            data.index,
            data.operations,
            data.relations,
            data.attributes,
        )
    }
}

impl Model {
    /// Create a structure with `cardinality` elements and no symbols.
    pub fn new(cardinality: usize) -> Result<Self, StructureError> {
        if cardinality == 0 {
            return Err(StructureError::EmptyUniverse);
        }

        Ok(Self {
            cardinality,
            index: None,
            operations: BTreeMap::new(),
            relations: BTreeMap::new(),
            attributes: Attributes::default(),
        })
    }

    /// Create a structure from all of its components, validating every table.
    pub fn from_parts(
        cardinality: usize,
        index: Option<usize>,
        operations: BTreeMap<String, Table>,
        relations: BTreeMap<String, Table>,
        attributes: Attributes,
    ) -> Result<Self, StructureError> {
        let mut model = Self::new(cardinality)?;
        model.index = index;
        model.attributes = attributes;

        for (symbol, table) in operations {
            model = model.with_operation(symbol, table)?;
        }
        for (symbol, table) in relations {
            model = model.with_relation(symbol, table)?;
        }

        Ok(model)
    }

    /// Set the position of this model within a family of models.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Add an operation, replacing any previous table for `symbol`.
    pub fn with_operation(
        mut self,
        symbol: impl Into<String>,
        table: Table,
    ) -> Result<Self, StructureError> {
        let symbol = symbol.into();
        table.validate(SymbolKind::Operation, &symbol, self.cardinality)?;
        self.operations.insert(symbol, table);
        Ok(self)
    }

    /// Add a relation, replacing any previous table for `symbol`.
    pub fn with_relation(
        mut self,
        symbol: impl Into<String>,
        table: Table,
    ) -> Result<Self, StructureError> {
        let symbol = symbol.into();
        table.validate(SymbolKind::Relation, &symbol, self.cardinality)?;
        self.relations.insert(symbol, table);
        Ok(self)
    }

    /// Attach an auxiliary attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key, value);
        self
    }

    /// Number of elements of the universe.
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Position of this model in a family of models.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Table of the operation `symbol`.
    pub fn operation(&self, symbol: &str) -> Option<&Table> {
        self.operations.get(symbol)
    }

    /// Table of the relation `symbol`.
    pub fn relation(&self, symbol: &str) -> Option<&Table> {
        self.relations.get(symbol)
    }

    /// Iterate over all operations, ordered by symbol.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.operations
            .iter()
            .map(|(symbol, table)| (symbol.as_str(), table))
    }

    /// Iterate over all relations, ordered by symbol.
    pub fn relations(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.relations
            .iter()
            .map(|(symbol, table)| (symbol.as_str(), table))
    }

    /// Iterate over all symbols of the given kind together with their classification.
    pub fn symbols(&self, kind: SymbolKind) -> impl Iterator<Item = (&str, SymbolClass, &Table)> {
        let tables = match kind {
            SymbolKind::Operation => &self.operations,
            SymbolKind::Relation => &self.relations,
        };

        tables.iter().map(move |(symbol, table)| {
            (
                symbol.as_str(),
                SymbolClass::of_table(kind, symbol, table),
                table,
            )
        })
    }

    /// Auxiliary attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable access to the auxiliary attributes.
    ///
    /// Operations and relations cannot be changed through this.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Whether any operation or relation uses `symbol`.
    pub fn uses_symbol(&self, symbol: &str) -> bool {
        self.operations.contains_key(symbol) || self.relations.contains_key(symbol)
    }

    /// Check that every symbol of this model is interpreted by `other` with the same arity.
    pub fn check_signature_within(&self, other: &Model) -> Result<(), StructureError> {
        for kind in [SymbolKind::Operation, SymbolKind::Relation] {
            for (symbol, class, _) in self.symbols(kind) {
                let other_table = match kind {
                    SymbolKind::Operation => other.operation(symbol),
                    SymbolKind::Relation => other.relation(symbol),
                };

                let Some(other_table) = other_table else {
                    return Err(StructureError::MissingSymbol {
                        kind,
                        symbol: symbol.to_string(),
                    });
                };

                if other_table.arity() != class.arity {
                    return Err(StructureError::ArityMismatch {
                        kind,
                        symbol: symbol.to_string(),
                        left: class.arity,
                        right: other_table.arity(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Model {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use self::symbol::Arity;

        let cardinality = <usize as quickcheck::Arbitrary>::arbitrary(g) % 4 + 1;
        let element =
            |g: &mut quickcheck::Gen| <usize as quickcheck::Arbitrary>::arbitrary(g) % cardinality;
        let truth =
            |g: &mut quickcheck::Gen| usize::from(<bool as quickcheck::Arbitrary>::arbitrary(g));

        let mut model = Model {
            cardinality,
            index: None,
            operations: BTreeMap::new(),
            relations: BTreeMap::new(),
            attributes: Attributes::default(),
        };

        let operations = [
            ("e", Arity::Nullary),
            ("'", Arity::Unary),
            ("f", Arity::Unary),
            ("*", Arity::Binary),
        ];
        for (symbol, arity) in operations {
            if <bool as quickcheck::Arbitrary>::arbitrary(g) {
                let values = (0..cardinality.pow(arity.count() as u32))
                    .map(|_| element(g))
                    .collect::<Vec<_>>();
                let table = Table::unflatten(arity, cardinality, &values)
                    .expect("generated the right number of entries");
                model.operations.insert(symbol.to_string(), table);
            }
        }

        let relations = [
            ("p", Arity::Nullary),
            ("P", Arity::Unary),
            ("<=", Arity::Binary),
            ("R", Arity::Binary),
            ("T", Arity::Ternary),
        ];
        for (symbol, arity) in relations {
            if <bool as quickcheck::Arbitrary>::arbitrary(g) {
                let values = (0..cardinality.pow(arity.count() as u32))
                    .map(|_| truth(g))
                    .collect::<Vec<_>>();
                let table = Table::unflatten(arity, cardinality, &values)
                    .expect("generated the right number of entries");
                model.relations.insert(symbol.to_string(), table);
            }
        }

        model
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use test_log::test;

    use super::*;
    use crate::model::symbol::{Arity, Notation};

    #[test]
    fn empty_universe_is_rejected() {
        assert_eq!(Model::new(0), Err(StructureError::EmptyUniverse));
    }

    #[test]
    fn builder_validates_tables() {
        let model = Model::new(2)
            .unwrap()
            .with_operation("*", Table::Binary(vec![vec![0, 0], vec![0, 1]]))
            .unwrap();
        assert_eq!(model.operation("*").map(Table::arity), Some(Arity::Binary));

        let error = model
            .with_relation("<=", Table::Binary(vec![vec![1, 1], vec![0, 1, 1]]))
            .unwrap_err();
        assert!(matches!(error, StructureError::JaggedTable { found: 3, .. }));
    }

    #[test]
    fn json_with_attributes() {
        let model: Model = serde_json::from_value(json!({
            "cardinality": 2,
            "index": 3,
            "operations": { "'": [1, 0], "e": 0 },
            "relations": { "<=": [[1, 1], [0, 1]] },
            "labels": ["bottom", "top"],
            "is_lattice": true
        }))
        .unwrap();

        assert_eq!(model.cardinality(), 2);
        assert_eq!(model.index(), Some(3));
        assert_eq!(model.attributes().len(), 2);
        assert_eq!(
            model.attributes().get_as::<Vec<String>>("labels").unwrap().unwrap(),
            vec!["bottom", "top"]
        );

        let classes = model
            .symbols(SymbolKind::Operation)
            .map(|(symbol, class, _)| (symbol.to_string(), class.notation))
            .collect::<Vec<_>>();
        assert_eq!(
            classes,
            vec![
                ("'".to_string(), Notation::Postfix),
                ("e".to_string(), Notation::Constant)
            ]
        );

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["labels"], json!(["bottom", "top"]));
        assert_eq!(serde_json::from_value::<Model>(value).unwrap(), model);
    }

    #[test]
    fn attributes_are_kept_apart() {
        let mut model = Model::new(2)
            .unwrap()
            .with_operation("'", Table::Unary(vec![1, 0]))
            .unwrap()
            .with_attribute("labels", json!(["bottom", "top"]));
        let diagram = model.diagram("a", 0);

        let attributes = model.attributes_mut();
        assert_eq!(attributes.insert("is_lattice", json!(true)), None);
        assert_eq!(
            attributes.insert("labels", json!(["0", "1"])),
            Some(json!(["bottom", "top"]))
        );
        assert_eq!(attributes.remove("is_lattice"), Some(json!(true)));
        assert_eq!(attributes.remove("is_lattice"), None);

        let entries = model
            .attributes()
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect::<Vec<_>>();
        assert_eq!(entries, vec![("labels".to_string(), json!(["0", "1"]))]);
        assert_eq!(
            entries.into_iter().collect::<Attributes>(),
            model.attributes().clone()
        );

        assert_eq!(model.diagram("a", 0), diagram);
    }

    #[test]
    fn json_is_validated() {
        let result = serde_json::from_value::<Model>(json!({
            "cardinality": 2,
            "operations": { "f": [0, 2] }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn signature_containment() {
        let small = Model::new(1)
            .unwrap()
            .with_operation("*", Table::Binary(vec![vec![0]]))
            .unwrap();
        let large = Model::new(2)
            .unwrap()
            .with_operation("*", Table::Unary(vec![0, 1]))
            .unwrap();

        assert!(matches!(
            small.check_signature_within(&large),
            Err(StructureError::ArityMismatch { .. })
        ));
        assert!(matches!(
            small.check_signature_within(&Model::new(2).unwrap()),
            Err(StructureError::MissingSymbol { .. })
        ));
    }
}
