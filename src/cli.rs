//! Command-line interface for d3gem.

use std::ffi::OsString;
use std::io::Write;

use anyhow::Context;
use anyhow::Error;
use clap::CommandFactory;
use clap::FromArgMatches;
use clap::Parser;
use tracing::info;
use tracing::instrument;

use crate::converter::Converter;
use crate::formatter::list_classes;
use crate::report::assess;
use crate::report::render;

/// Tells you how many basic Diablo 3 gems you need for an upgraded one.
#[derive(Clone, Debug, Parser)]
#[command(name = "d3gem", version)]
pub struct Cli {
    /// Gem you want to make, e.g. '2pst'.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Gems you have in stock for making TARGET. Specify them as
    /// comma-separated list, e.g. '1fst,27fsq'. May be given many times.
    #[arg(long, short = 's', value_name = "SPEC")]
    pub stock: Vec<String>,

    /// Output the missing or remaining gems conveniently converted to several
    /// equivalent representations.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Returns the command-line parser, with the gem classes of the given
/// converter listed after the help.
pub fn command(converter: &Converter) -> clap::Command {
    Cli::command().after_help(list_classes(converter.table()))
}

/// Parses the process arguments, exiting on errors or `--help`.
pub fn parse(converter: &Converter) -> Cli {
    try_parse_from(converter, std::env::args_os()).unwrap_or_else(|error| error.exit())
}

/// Parses the given arguments.
pub fn try_parse_from<I, T>(converter: &Converter, arguments: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command(converter).try_get_matches_from(arguments)?;

    Cli::from_arg_matches(&matches)
}

/// Checks the stock against the target and writes the report to `writer`.
#[instrument(name = "cli.run", skip(converter, writer))]
pub fn run(cli: &Cli, converter: &Converter, writer: impl Write) -> Result<(), Error> {
    let assessment = assess(converter, &cli.target, &cli.stock)?;

    info!(outcome = ?assessment.outcome, "assessed stock");

    render(converter, &assessment, cli.verbose, writer).context("Failed to write report")?;

    Ok(())
}
