//! Core library entry for the `surfboard` CLI.

pub mod adapters;
pub mod cassette;
pub mod chart;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod helm;
pub mod html;
pub mod logging;
pub mod notes;
pub mod ports;
pub mod report;
pub mod routes;
pub mod yaml;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or the run fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };

    logging::init(cli.verbose);
    let settings = config::Settings::load(&cli);
    commands::dispatch(&cli, &settings).map_err(|err| err.to_string())
}
