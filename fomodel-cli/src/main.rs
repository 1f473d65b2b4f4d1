/*!
  Binary for the CLI of fomodel: fom
*/

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

pub mod cli;
pub mod error;

use std::{fs::read_to_string, path::Path};

use clap::Parser;
use cli::{CliApp, Command, PairArgs, QueryCommand};
use colored::Colorize;
use error::CliError;
use fomodel::{
    backend::{interpretation::parse_interpretations, ladr::render_input},
    formula::render_sentences,
    Model, Query, SearchOptions, SearchRequest,
};

fn read_file(filename: &Path) -> Result<String, CliError> {
    read_to_string(filename).map_err(|error| CliError::Reading {
        filename: filename.to_path_buf(),
        error,
    })
}

fn read_model(filename: &Path) -> Result<Model, CliError> {
    let content = read_file(filename)?;
    let model =
        serde_json::from_str(&content).map_err(|error| CliError::InvalidStructure {
            filename: filename.to_path_buf(),
            error,
        })?;

    log::debug!("read structure from {}", filename.display());
    Ok(model)
}

fn to_json(value: &serde_json::Value, pretty: bool) -> Result<String, CliError> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

/// Render a relationship query between the structures named in `pair` as Mace4 input.
fn relationship_input(
    pair: &PairArgs,
    relationship: &'static str,
    build: impl Fn(&Model, &Model) -> Result<Option<Query>, fomodel::error::StructureError>,
) -> Result<String, CliError> {
    let left = read_model(&pair.left)?;
    let right = read_model(&pair.right)?;

    let query = build(&left, &right)?.ok_or(CliError::Cardinality {
        relationship,
        left: left.cardinality(),
        right: right.cardinality(),
    })?;
    log::info!(
        "answers are read from {:?} in a model with {} elements",
        query.witness,
        query.domain_size
    );

    let request = SearchRequest::new(
        query.sentences,
        query.domain_size,
        pair.search.apply(SearchOptions::relationship()),
    );
    Ok(render_input(&request))
}

fn run(cli: CliApp) -> Result<(), CliError> {
    match cli.command {
        Command::Diagram {
            model,
            prefix,
            shift,
            positive,
        } => {
            let model = read_model(&model)?;
            let sentences = if positive {
                model.positive_diagram(&prefix)
            } else {
                model.diagram(&prefix, shift)
            };
            print!("{}", render_sentences(&sentences));
        }
        Command::Product {
            left,
            right,
            pretty,
        } => {
            let product = read_model(&left)?.product(&read_model(&right)?)?;
            println!("{}", to_json(&serde_json::to_value(&product)?, pretty)?);
        }
        Command::Query { query } => {
            let input = match query {
                QueryCommand::Substructure(pair) => {
                    relationship_input(&pair, "a substructure of", Model::substructure_query)?
                }
                QueryCommand::Homomorphism(pair) => {
                    relationship_input(&pair, "mapped into", |left, right| {
                        left.homomorphism_query(right).map(Some)
                    })?
                }
                QueryCommand::Image(pair) => relationship_input(
                    &pair,
                    "a homomorphic image of",
                    Model::homomorphic_image_query,
                )?,
                QueryCommand::Extension {
                    model,
                    size,
                    axioms,
                    search,
                } => {
                    let model = read_model(&model)?;
                    if size < model.cardinality() {
                        return Err(CliError::Cardinality {
                            relationship: "extended to",
                            left: model.cardinality(),
                            right: size,
                        });
                    }

                    let axioms = match axioms {
                        Some(filename) => read_file(&filename)?
                            .lines()
                            .map(str::trim)
                            .filter(|line| !line.is_empty())
                            .map(String::from)
                            .collect(),
                        None => Vec::new(),
                    };
                    let request = SearchRequest::new(
                        model.extension_sentences(),
                        size,
                        search.apply(SearchOptions::default()),
                    )
                    .with_axioms(axioms);
                    render_input(&request)
                }
            };
            print!("{input}");
        }
        Command::Decode { output, pretty } => {
            let models = parse_interpretations(&read_file(&output)?)?;
            log::info!("decoded {} models", models.len());
            println!("{}", to_json(&serde_json::to_value(&models)?, pretty)?);
        }
    }

    Ok(())
}

fn main() {
    let cli = CliApp::parse();

    cli.logging.initialize_logging();
    log::info!("Version: {}", clap::crate_version!());
    log::debug!("Command: {:?}", cli.command);

    run(cli).unwrap_or_else(|err| {
        log::error!("{} {err}", "error:".red().bold());
        std::process::exit(1)
    })
}
