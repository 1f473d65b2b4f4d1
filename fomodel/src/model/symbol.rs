//! Classification of operation and relation symbols.
//!
//! The arity of a symbol is given by the shape of its [Table];
//! how it is written in a sentence depends on its arity, its kind and its name.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::table::Table;

/// The unary operation symbol that is written after its argument, as in `x'`.
pub const POSTFIX_SYMBOL: &str = "'";

/// Number of arguments of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Arity {
    /// No arguments
    Nullary,
    /// One argument
    Unary,
    /// Two arguments
    Binary,
    /// Three arguments
    Ternary,
}

impl Arity {
    /// Return the number of arguments.
    pub fn count(self) -> usize {
        match self {
            Arity::Nullary => 0,
            Arity::Unary => 1,
            Arity::Binary => 2,
            Arity::Ternary => 3,
        }
    }

    /// Return the [Arity] with the given number of arguments, if supported.
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            0 => Some(Arity::Nullary),
            1 => Some(Arity::Unary),
            2 => Some(Arity::Binary),
            3 => Some(Arity::Ternary),
            _ => None,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Whether a symbol denotes an operation or a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Function symbol
    Operation,
    /// Predicate symbol
    Relation,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Operation => f.write_str("operation"),
            SymbolKind::Relation => f.write_str("relation"),
        }
    }
}

/// Position of a symbol relative to its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    /// Symbol without arguments: `e`
    Constant,
    /// Symbol before a parenthesized argument list: `f(x)`, `R(x,y)`
    Prefix,
    /// Symbol between two arguments: `x + y`, `x <= y`
    Infix,
    /// Symbol after its single argument: `x'`
    Postfix,
}

/// Result of classifying a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolClass {
    /// Operation or relation
    pub kind: SymbolKind,
    /// Number of arguments
    pub arity: Arity,
    /// How the symbol is written
    pub notation: Notation,
}

impl SymbolClass {
    /// Classify a symbol of the given kind and arity by its name.
    ///
    /// * nullary symbols are constants,
    /// * the operation [POSTFIX_SYMBOL] is postfix, other unary symbols are prefix,
    /// * binary operations are infix,
    /// * binary relations are prefix if their name starts with an uppercase letter
    ///   and infix otherwise,
    /// * ternary relations are prefix.
    pub fn new(kind: SymbolKind, symbol: &str, arity: Arity) -> Self {
        let notation = match (kind, arity) {
            (_, Arity::Nullary) => Notation::Constant,
            (SymbolKind::Operation, Arity::Unary) if symbol == POSTFIX_SYMBOL => Notation::Postfix,
            (_, Arity::Unary) => Notation::Prefix,
            (SymbolKind::Operation, _) => Notation::Infix,
            (SymbolKind::Relation, Arity::Binary) if starts_uppercase(symbol) => Notation::Prefix,
            (SymbolKind::Relation, Arity::Binary) => Notation::Infix,
            (SymbolKind::Relation, Arity::Ternary) => Notation::Prefix,
        };

        Self {
            kind,
            arity,
            notation,
        }
    }

    /// Classify a symbol by the shape of its table.
    pub fn of_table(kind: SymbolKind, symbol: &str, table: &Table) -> Self {
        Self::new(kind, symbol, table.arity())
    }
}

fn starts_uppercase(symbol: &str) -> bool {
    symbol.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}
