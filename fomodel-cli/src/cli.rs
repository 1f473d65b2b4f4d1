//! Contains structures and functionality for the binary
use std::{path::PathBuf, time::Duration};

use fomodel::SearchOptions;

/// Default prefix of the constants naming the elements in a diagram
const DEFAULT_PREFIX: &str = "a";

/// Cli Arguments related to logging
#[derive(clap::Args, Debug)]
pub(crate) struct LoggingArgs {
    /// Increase log verbosity (multiple uses increase verbosity further)
    #[arg(short, long, action = clap::builder::ArgAction::Count, group = "verbosity")]
    verbose: u8,
    /// Reduce log verbosity to show only errors (equivalent to --log error)
    #[arg(short, long, group = "verbosity")]
    quiet: bool,
    /// Set log verbosity (default is "warn")
    #[arg(long = "log", value_parser=clap::builder::PossibleValuesParser::new(["error", "warn", "info", "debug", "trace"]), group = "verbosity")]
    log_level: Option<String>,
}

impl LoggingArgs {
    /// Initialising Logging
    ///
    /// Sets the logging verbosity to the given log-level in the following order:
    ///  * `Info`, `Debug`, `Trace`; depending on the count of `-v`
    ///  * `Error` when `-q` is used
    ///  * The `FOM_LOG` environment variable value
    ///  * `Warn` otherwise
    pub(crate) fn initialize_logging(&self) {
        let mut builder = env_logger::Builder::new();

        // Default log level
        builder.filter_level(log::LevelFilter::Warn);

        builder.parse_env("FOM_LOG");
        if let Some(ref level) = self.log_level {
            builder.parse_filters(level);
        } else if self.quiet {
            builder.filter_level(log::LevelFilter::Error);
        } else if self.verbose > 0 {
            builder.filter_level(match self.verbose {
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                3 => log::LevelFilter::Trace,
                _ => log::LevelFilter::Warn,
            });
        }
        builder.init();
    }
}

/// Cli arguments related to the backend search
#[derive(Debug, clap::Args)]
pub(crate) struct SearchArgs {
    /// Time budget of the search in seconds
    #[arg(long = "seconds")]
    seconds: Option<u64>,
    /// Additional backend setting, e.g. "assign(max_megs, 500)"
    #[arg(long = "param")]
    parameters: Vec<String>,
}

impl SearchArgs {
    /// Apply the given settings to `options`
    pub(crate) fn apply(&self, options: SearchOptions) -> SearchOptions {
        let options = match self.seconds {
            Some(seconds) => options.with_time_budget(Duration::from_secs(seconds)),
            None => options,
        };

        self.parameters
            .iter()
            .fold(options, |options, parameter| options.with_parameter(parameter.as_str()))
    }
}

/// Cli arguments of a query about two structures
#[derive(Debug, clap::Args)]
pub(crate) struct PairArgs {
    /// Structure in JSON whose relationship to the other is asked for
    #[arg(value_parser)]
    pub(crate) left: PathBuf,
    /// Structure in JSON the first one is compared with
    #[arg(value_parser)]
    pub(crate) right: PathBuf,
    /// Arguments related to the search
    #[command(flatten)]
    pub(crate) search: SearchArgs,
}

/// Relationships that can be turned into Mace4 input
#[derive(Debug, clap::Subcommand)]
pub(crate) enum QueryCommand {
    /// Does the first structure embed into the second?
    Substructure(PairArgs),
    /// Is there a homomorphism from the first structure into the second?
    Homomorphism(PairArgs),
    /// Is the first structure a homomorphic image of the second?
    Image(PairArgs),
    /// Which models of the given size contain a homomorphic image of the structure?
    Extension {
        /// Structure in JSON to be extended
        #[arg(value_parser)]
        model: PathBuf,
        /// Number of elements of the extensions
        #[arg(long = "size")]
        size: usize,
        /// File with additional axioms in Mace4 syntax, one per line
        #[arg(long = "axioms")]
        axioms: Option<PathBuf>,
        /// Arguments related to the search
        #[command(flatten)]
        search: SearchArgs,
    },
}

/// Subcommands of fom
#[derive(Debug, clap::Subcommand)]
pub(crate) enum Command {
    /// Print the diagram of a structure, one sentence per line
    Diagram {
        /// Structure in JSON
        #[arg(value_parser)]
        model: PathBuf,
        /// Prefix of the constants naming the elements; empty for numerals
        #[arg(long = "prefix", default_value = DEFAULT_PREFIX)]
        prefix: String,
        /// Offset added to every element before naming it
        #[arg(long = "shift", default_value_t = 0, conflicts_with = "positive")]
        shift: usize,
        /// Print the positive diagram instead
        #[arg(long = "positive")]
        positive: bool,
    },
    /// Print the direct product of two structures in JSON
    Product {
        /// First factor in JSON
        #[arg(value_parser)]
        left: PathBuf,
        /// Second factor in JSON
        #[arg(value_parser)]
        right: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long = "pretty")]
        pretty: bool,
    },
    /// Print a Mace4 input file deciding a relationship
    Query {
        /// The relationship to decide
        #[command(subcommand)]
        query: QueryCommand,
    },
    /// Read Mace4 output and print the models it contains in JSON
    Decode {
        /// File with Mace4 output
        #[arg(value_parser)]
        output: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long = "pretty")]
        pretty: bool,
    },
}

/// fomodel CLI
#[derive(clap::Parser, Debug)]
#[command(author, version, about)]
pub struct CliApp {
    /// What to do
    #[command(subcommand)]
    pub(crate) command: Command,
    /// Arguments related to logging
    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}
