//! Sentences about structures.
//!
//! Encodings build [Formula] trees; text is only produced by their [Display]
//! implementation, which writes the syntax read by Prover9 and Mace4 (LADR).

pub mod term;

use std::fmt::{Display, Write};

use crate::model::symbol::Notation;

pub use self::term::Term;

/// A first-order formula
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// Equality of two terms
    Equals(Term, Term),
    /// Relation symbol applied to terms
    Atom {
        /// Relation symbol
        symbol: String,
        /// How the symbol is written
        notation: Notation,
        /// Arguments
        arguments: Vec<Term>,
    },
    /// Negation
    Not(Box<Formula>),
    /// Conjunction of any number of formulas
    And(Vec<Formula>),
    /// Implication
    Implies(Box<Formula>, Box<Formula>),
    /// Existential quantification of a variable
    Exists(String, Box<Formula>),
}

impl Formula {
    /// Create the equation `left = right`.
    pub fn equals(left: Term, right: Term) -> Self {
        Self::Equals(left, right)
    }

    /// Create the atom `symbol(arguments)`.
    pub fn atom<Arguments: IntoIterator<Item = Term>>(
        symbol: &str,
        notation: Notation,
        arguments: Arguments,
    ) -> Self {
        Self::Atom {
            symbol: symbol.to_string(),
            notation,
            arguments: arguments.into_iter().collect(),
        }
    }

    /// Create the conjunction of the given formulas.
    pub fn and<Formulas: IntoIterator<Item = Formula>>(conjuncts: Formulas) -> Self {
        Self::And(conjuncts.into_iter().collect())
    }

    /// Negate this formula.
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Return `self -> conclusion`.
    pub fn implies(self, conclusion: Formula) -> Self {
        Self::Implies(Box::new(self), Box::new(conclusion))
    }

    /// Return `exists variable (body)`.
    pub fn exists(variable: &str, body: Formula) -> Self {
        Self::Exists(variable.to_string(), Box::new(body))
    }

    /// Whether this formula is a negation.
    pub fn is_negation(&self) -> bool {
        matches!(self, Formula::Not(_))
    }

    /// Whether this formula is the negation of an equation between two constants.
    pub fn is_distinctness(&self) -> bool {
        matches!(
            self,
            Formula::Not(inner)
                if matches!(**inner, Formula::Equals(Term::Constant(_), Term::Constant(_)))
        )
    }

    /// Relation symbol of this formula if it is an atom or a negated atom.
    pub fn relation_symbol(&self) -> Option<&str> {
        match self {
            Formula::Atom { symbol, .. } => Some(symbol),
            Formula::Not(inner) => match &**inner {
                Formula::Atom { symbol, .. } => Some(symbol),
                _ => None,
            },
            _ => None,
        }
    }

    fn fmt_implication_operand(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Implies(_, _) => write!(f, "({self})"),
            _ => self.fmt(f),
        }
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Equals(left, right) => write!(f, "{left} = {right}"),
            Formula::Atom {
                symbol,
                notation,
                arguments,
            } => term::fmt_application(f, symbol, *notation, arguments),
            Formula::Not(inner) => match &**inner {
                Formula::Atom {
                    notation: Notation::Prefix | Notation::Constant,
                    ..
                } => write!(f, "-{inner}"),
                _ => write!(f, "-({inner})"),
            },
            Formula::And(conjuncts) if conjuncts.is_empty() => f.write_str("$T"),
            Formula::And(conjuncts) => {
                for (index, conjunct) in conjuncts.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" & ")?;
                    }
                    match conjunct {
                        Formula::Implies(_, _) => write!(f, "({conjunct})")?,
                        _ => conjunct.fmt(f)?,
                    }
                }
                Ok(())
            }
            Formula::Implies(premise, conclusion) => {
                premise.fmt_implication_operand(f)?;
                f.write_str(" -> ")?;
                conclusion.fmt_implication_operand(f)
            }
            Formula::Exists(variable, body) => write!(f, "exists {variable} ({body})"),
        }
    }
}

/// Render a list of sentences, one per line, each terminated by a period.
pub fn render_sentences<'a, Sentences>(sentences: Sentences) -> String
where
    Sentences: IntoIterator<Item = &'a Formula>,
{
    let mut result = String::new();
    for sentence in sentences {
        // writing into a String cannot fail
        let _ = writeln!(result, "{sentence}.");
    }
    result
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    fn c(name: &str) -> Term {
        Term::constant(name)
    }

    fn x() -> Term {
        Term::variable("x")
    }

    #[test]
    fn atoms() {
        let prefix = Formula::atom("R", Notation::Prefix, [c("a0"), c("a1")]);
        assert_eq!(prefix.to_string(), "R(a0,a1)");
        assert_eq!(prefix.negate().to_string(), "-R(a0,a1)");

        let infix = Formula::atom("<=", Notation::Infix, [c("0"), c("1")]);
        assert_eq!(infix.to_string(), "0 <= 1");
        assert_eq!(infix.negate().to_string(), "-(0 <= 1)");

        assert_eq!(Formula::atom("p", Notation::Constant, []).negate().to_string(), "-p");
    }

    #[test]
    fn distinctness() {
        let sentence = Formula::equals(c("a0"), c("a1")).negate();
        assert_eq!(sentence.to_string(), "-(a0 = a1)");
        assert!(sentence.is_distinctness());
        assert!(!Formula::atom("P", Notation::Prefix, [c("a0")])
            .negate()
            .is_distinctness());
    }

    #[test]
    fn implications() {
        let h = |t: Term| Term::apply("h", Notation::Prefix, [t]);
        let premise = Formula::and([
            Formula::atom("B", Notation::Prefix, [x()]),
            Formula::atom("B", Notation::Prefix, [Term::variable("y")]),
        ]);
        let conclusion = Formula::and([
            Formula::atom("A", Notation::Prefix, [h(x())]),
            Formula::equals(
                h(Term::apply(
                    "*",
                    Notation::Infix,
                    [x(), Term::variable("y")],
                )),
                Term::apply(
                    "*",
                    Notation::Infix,
                    [h(x()), h(Term::variable("y"))],
                ),
            ),
        ]);
        assert_eq!(
            premise.implies(conclusion).to_string(),
            "B(x) & B(y) -> A(h(x)) & h(x * y) = h(x) * h(y)"
        );

        let surjective = Formula::atom("A", Notation::Prefix, [Term::variable("y")]).implies(
            Formula::exists(
                "x",
                Formula::and([
                    Formula::atom("B", Notation::Prefix, [x()]),
                    Formula::equals(h(x()), Term::variable("y")),
                ]),
            ),
        );
        assert_eq!(
            surjective.to_string(),
            "A(y) -> exists x (B(x) & h(x) = y)"
        );
    }

    #[test]
    fn nested_implication_is_parenthesized() {
        let p = Formula::atom("p", Notation::Constant, []);
        let q = Formula::atom("q", Notation::Constant, []);
        let nested = p.clone().implies(q.clone()).implies(p.clone());
        assert_eq!(nested.to_string(), "(p -> q) -> p");
        assert_eq!(Formula::and([p.clone().implies(q), p]).to_string(), "(p -> q) & p");
        assert_eq!(Formula::and([]).to_string(), "$T");
    }

    #[test]
    fn rendering_terminates_sentences() {
        let sentences = [
            Formula::equals(c("e"), c("a0")),
            Formula::equals(c("a0"), c("a1")).negate(),
        ];
        assert_eq!(render_sentences(&sentences), "e = a0.\n-(a0 = a1).\n");
    }
}
