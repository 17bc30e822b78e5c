//! Command dispatch.

pub mod map;

use crate::cassette::session::RecordingSession;
use crate::cli::Cli;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::{Error, Result};

/// Build the service context for this run and execute the map command.
///
/// When `SURFBOARD_RECORD` names a directory, every port interaction is
/// recorded to per-port cassette files beneath it.
///
/// # Errors
///
/// Returns the first fatal error of the run, or a recording failure.
pub fn dispatch(cli: &Cli, settings: &Settings) -> Result<()> {
    let Some(record_dir) = &settings.record_dir else {
        let ctx = ServiceContext::live(settings)?;
        return report_written(map::run(&ctx, cli, settings));
    };

    let session = RecordingSession::new(record_dir).map_err(Error::Setup)?;
    let result = ServiceContext::recording(settings, &session)
        .and_then(|ctx| map::run(&ctx, cli, settings));

    // The context is gone by now, so the session holds the only recorder
    // references; finish even when the run failed.
    let output_dir = session.finish().map_err(Error::Setup)?;
    eprintln!("Recording saved to: {}", output_dir.display());

    report_written(result)
}

fn report_written(result: Result<map::MapOutput>) -> Result<()> {
    let output = result?;
    println!("map created: {}", output.path.display());
    Ok(())
}
