//! This module defines [Term].

use std::fmt::Display;

use crate::model::symbol::Notation;

/// Term of a first-order language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Named constant, e.g. `a0`, or a domain element written as a numeral, e.g. `3`
    Constant(String),
    /// Variable
    Variable(String),
    /// Operation symbol applied to terms
    Application {
        /// Operation symbol
        symbol: String,
        /// How the symbol is written
        notation: Notation,
        /// Arguments
        arguments: Vec<Term>,
    },
}

impl Term {
    /// Create a constant.
    pub fn constant(name: &str) -> Self {
        Self::Constant(name.to_string())
    }

    /// Create the constant naming element `index` under the given prefix, e.g. `a3`.
    pub fn element(prefix: &str, index: usize) -> Self {
        Self::Constant(format!("{prefix}{index}"))
    }

    /// Create a variable.
    pub fn variable(name: &str) -> Self {
        Self::Variable(name.to_string())
    }

    /// Apply an operation symbol to a list of terms.
    pub fn apply<Arguments: IntoIterator<Item = Term>>(
        symbol: &str,
        notation: Notation,
        arguments: Arguments,
    ) -> Self {
        Self::Application {
            symbol: symbol.to_string(),
            notation,
            arguments: arguments.into_iter().collect(),
        }
    }

    fn needs_parentheses(&self) -> bool {
        matches!(
            self,
            Term::Application {
                notation: Notation::Infix,
                ..
            }
        )
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Constant(name) | Term::Variable(name) => f.write_str(name),
            Term::Application {
                symbol,
                notation,
                arguments,
            } => fmt_application(f, symbol, *notation, arguments),
        }
    }
}

/// Operand of an infix or postfix symbol; nested infix applications are parenthesized.
#[derive(Debug)]
struct Operand<'a>(&'a Term);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.needs_parentheses() {
            write!(f, "({})", self.0)
        } else {
            self.0.fmt(f)
        }
    }
}

/// Write `symbol` applied to `arguments` according to `notation`.
///
/// Shared by operation terms and relation atoms.
pub(crate) fn fmt_application(
    f: &mut std::fmt::Formatter<'_>,
    symbol: &str,
    notation: Notation,
    arguments: &[Term],
) -> std::fmt::Result {
    match (notation, arguments) {
        (Notation::Infix, [left, right]) => {
            write!(f, "{} {symbol} {}", Operand(left), Operand(right))
        }
        (Notation::Postfix, [argument]) => write!(f, "{}{symbol}", Operand(argument)),
        (Notation::Constant, []) => f.write_str(symbol),
        _ => {
            f.write_str(symbol)?;
            f.write_str("(")?;
            for (index, argument) in arguments.iter().enumerate() {
                if index > 0 {
                    f.write_str(",")?;
                }
                argument.fmt(f)?;
            }
            f.write_str(")")
        }
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    #[test]
    fn notations() {
        let x = Term::element("a", 0);
        let y = Term::element("a", 1);

        assert_eq!(
            Term::apply("*", Notation::Infix, [x.clone(), y.clone()]).to_string(),
            "a0 * a1"
        );
        assert_eq!(Term::apply("'", Notation::Postfix, [x.clone()]).to_string(), "a0'");
        assert_eq!(Term::apply("f", Notation::Prefix, [x.clone()]).to_string(), "f(a0)");
        assert_eq!(Term::apply("e", Notation::Constant, []).to_string(), "e");
        assert_eq!(Term::element("", 12).to_string(), "12");
    }

    #[test]
    fn nested_infix_is_parenthesized() {
        let x = Term::variable("x");
        let y = Term::variable("y");
        let product = Term::apply("*", Notation::Infix, [x.clone(), y.clone()]);

        assert_eq!(
            Term::apply("+", Notation::Infix, [product.clone(), x.clone()]).to_string(),
            "(x * y) + x"
        );
        assert_eq!(
            Term::apply("'", Notation::Postfix, [product.clone()]).to_string(),
            "(x * y)'"
        );
        assert_eq!(
            Term::apply("h", Notation::Prefix, [product]).to_string(),
            "h(x * y)"
        );
    }
}
