use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Error;
use tracing::error;

use d3gem::cli;
use d3gem::converter::Converter;
use d3gem::logging;

/// Parses the arguments, checks the stock and prints the report.
fn try_main() -> Result<(), Error> {
    let converter = Converter::embedded()?;
    let cli = cli::parse(&converter);

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    cli::run(&cli, &converter, &mut writer)?;

    writer.flush().context("Failed to flush output")?;

    Ok(())
}

fn main() -> ExitCode {
    if let Err(error) = logging::init_logging() {
        eprintln!("Failed to initialize logging: {}", error);
        return ExitCode::FAILURE;
    }

    if let Err(error) = try_main() {
        error!("{:#}", error);
        eprintln!("Error: {:#}", error);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
