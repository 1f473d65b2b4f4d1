//! Reading and writing models in the `interpretation(...)` format of Mace4.
//!
//! ```text
//! interpretation( 2, [number = 1, seconds = 0], [
//!     function(*(_,_), [0, 0, 0, 1]),
//!     relation(P(_), [0, 1])]).
//! ```
//!
//! Tables are listed in row-major order; the arity of a symbol
//! is given by the number of `_` after it.

use std::fmt::Write;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, cut, map, map_opt, map_res, opt, value},
    error::{context, VerboseError, VerboseErrorKind},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, preceded, separated_pair, terminated, tuple},
    IResult,
};

use fomodel_macros::traced;

use crate::{
    error::{Error, InterpretationError, StructureError},
    model::{
        symbol::{Arity, SymbolKind},
        table::Table,
        Model,
    },
};

/// Keyword opening an interpretation
const KEYWORD: &str = "interpretation";

type IntermediateResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Render `model` as a Mace4 interpretation.
///
/// The model index is written as the interpretation `number`, `0` if there is none.
pub fn render(model: &Model) -> String {
    let mut entries = Vec::new();

    for (kind, tables) in [
        ("function", model.operations().collect::<Vec<_>>()),
        ("relation", model.relations().collect::<Vec<_>>()),
    ] {
        for (symbol, table) in tables {
            let signature = match table.arity().count() {
                0 => String::new(),
                count => format!("({})", vec!["_"; count].join(",")),
            };
            let values = table
                .flatten()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            entries.push(format!("    {kind}({symbol}{signature}, [{values}])"));
        }
    }

    let mut result = String::new();
    // writing into a String cannot fail
    let _ = write!(
        result,
        "{KEYWORD}( {}, [number = {}, seconds = 0], [\n{}]).",
        model.cardinality(),
        model.index().unwrap_or(0),
        entries.join(",\n")
    );
    result
}

/// Parse a single interpretation, surrounded by nothing but whitespace.
pub fn parse_interpretation(input: &str) -> Result<Model, Error> {
    let (_, raw) = all_consuming(terminated(interpretation, multispace0))(input)
        .map_err(|error| locate(input, error))?;

    raw.into_model()
}

/// Parse every interpretation contained in `input`, e.g. the full output of Mace4.
///
/// Text between interpretations is ignored.
pub fn parse_interpretations(input: &str) -> Result<Vec<Model>, Error> {
    let models = input
        .match_indices(KEYWORD)
        .filter(|(position, _)| {
            input[position + KEYWORD.len()..]
                .trim_start()
                .starts_with('(')
        })
        .map(|(position, _)| {
            interpretation(&input[position..])
                .map_err(|error| Error::from(locate(input, error)))
                .and_then(|(_, raw)| raw.into_model())
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("parsed {} interpretations", models.len());

    Ok(models)
}

/// An interpretation as written, before its tables are checked
#[derive(Debug)]
struct RawInterpretation<'a> {
    cardinality: usize,
    number: Option<usize>,
    entries: Vec<RawEntry<'a>>,
}

/// A single `function(...)` or `relation(...)` entry
#[derive(Debug)]
struct RawEntry<'a> {
    kind: SymbolKind,
    symbol: &'a str,
    arity: Arity,
    values: Vec<usize>,
}

impl RawInterpretation<'_> {
    fn into_model(self) -> Result<Model, Error> {
        let mut model = Model::new(self.cardinality)?;
        if let Some(number) = self.number {
            model = model.with_index(number);
        }

        for entry in self.entries {
            let table = Table::unflatten(entry.arity, self.cardinality, &entry.values).ok_or_else(
                || StructureError::JaggedTable {
                    kind: entry.kind,
                    symbol: entry.symbol.to_string(),
                    expected: self
                        .cardinality
                        .checked_pow(entry.arity.count() as u32)
                        .unwrap_or(usize::MAX),
                    found: entry.values.len(),
                },
            )?;

            model = match entry.kind {
                SymbolKind::Operation => model.with_operation(entry.symbol, table)?,
                SymbolKind::Relation => model.with_relation(entry.symbol, table)?,
            };
        }

        Ok(model)
    }
}

fn token<'a>(text: &'static str) -> impl FnMut(&'a str) -> IntermediateResult<'a, &'a str> {
    preceded(multispace0, tag(text))
}

#[traced("fomodel::interpretation")]
fn number(input: &str) -> IntermediateResult<'_, usize> {
    context(
        "a number",
        preceded(
            multispace0,
            map_res(digit1, |digits: &str| digits.parse::<usize>()),
        ),
    )(input)
}

#[traced("fomodel::interpretation")]
fn number_list(input: &str) -> IntermediateResult<'_, Vec<usize>> {
    delimited(
        token("["),
        separated_list0(token(","), number),
        context("`]`", token("]")),
    )(input)
}

/// `[number = 1, seconds = 0]`, only the number is kept
#[traced("fomodel::interpretation")]
fn header(input: &str) -> IntermediateResult<'_, Option<usize>> {
    let setting = separated_pair(
        preceded(
            multispace0,
            take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        ),
        token("="),
        preceded(
            multispace0,
            take_while1(|c: char| !(c == ',' || c == ']' || c.is_whitespace())),
        ),
    );

    map(
        delimited(
            token("["),
            separated_list0(token(","), setting),
            context("`]`", token("]")),
        ),
        |settings| {
            settings
                .into_iter()
                .find(|(key, _)| *key == "number")
                .and_then(|(_, value)| value.parse().ok())
        },
    )(input)
}

/// `(_,_)` after a symbol
#[traced("fomodel::interpretation")]
fn signature(input: &str) -> IntermediateResult<'_, Arity> {
    context(
        "a signature of arity at most 3",
        map_opt(
            opt(delimited(
                token("("),
                separated_list1(token(","), token("_")),
                token(")"),
            )),
            |placeholders| Arity::from_count(placeholders.map_or(0, |list| list.len())),
        ),
    )(input)
}

#[traced("fomodel::interpretation")]
fn symbol(input: &str) -> IntermediateResult<'_, &str> {
    context(
        "a symbol",
        preceded(
            multispace0,
            take_till1(|c: char| c == '(' || c == ',' || c.is_whitespace()),
        ),
    )(input)
}

#[traced("fomodel::interpretation")]
fn entry(input: &str) -> IntermediateResult<'_, RawEntry<'_>> {
    let kind = alt((
        value(SymbolKind::Operation, token("function")),
        value(SymbolKind::Relation, token("relation")),
    ));

    map(
        tuple((
            kind,
            token("("),
            cut(tuple((
                symbol,
                signature,
                preceded(context("`,`", token(",")), number_list),
                context("`)`", token(")")),
            ))),
        )),
        |(kind, _, (symbol, arity, values, _))| RawEntry {
            kind,
            symbol,
            arity,
            values,
        },
    )(input)
}

#[traced("fomodel::interpretation")]
fn interpretation(input: &str) -> IntermediateResult<'_, RawInterpretation<'_>> {
    map(
        preceded(
            token(KEYWORD),
            cut(tuple((
                preceded(token("("), number),
                preceded(token(","), header),
                preceded(
                    token(","),
                    delimited(
                        token("["),
                        separated_list0(token(","), entry),
                        context("`]`", token("]")),
                    ),
                ),
                context("`).`", tuple((token(")"), preceded(multispace0, char('.'))))),
            ))),
        ),
        |(cardinality, number, entries, _)| RawInterpretation {
            cardinality,
            number,
            entries,
        },
    )(input)
}

/// Turn a nom error into an [InterpretationError] pointing into `input`.
fn locate(input: &str, error: nom::Err<VerboseError<&str>>) -> InterpretationError {
    let errors = match error {
        nom::Err::Error(error) | nom::Err::Failure(error) => error.errors,
        nom::Err::Incomplete(_) => Vec::new(),
    };

    let (fragment, expected) = errors
        .iter()
        .find_map(|(fragment, kind)| match kind {
            VerboseErrorKind::Context(context) => Some((*fragment, context.to_string())),
            _ => None,
        })
        .or_else(|| {
            errors.first().map(|(fragment, kind)| {
                let expected = match kind {
                    VerboseErrorKind::Char(c) => format!("`{c}`"),
                    VerboseErrorKind::Nom(kind) => kind.description().to_string(),
                    VerboseErrorKind::Context(context) => context.to_string(),
                };
                (*fragment, expected)
            })
        })
        .unwrap_or(("", "more input".to_string()));

    let fragment = fragment.trim_start();
    let offset = input.len() - fragment.len();
    let consumed = &input[..offset];
    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rfind('\n')
        .map_or(offset, |newline| offset - newline - 1)
        + 1;

    InterpretationError {
        expected,
        line,
        column,
        fragment: fragment.lines().next().unwrap_or_default().to_string(),
    }
}
