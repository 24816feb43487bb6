//! CLI subcommand implementations.

pub mod adhesions;
pub mod assistant;
pub mod atas;
pub mod dashboard;
pub mod items;
pub mod supplier;

use anyhow::{bail, Result};
use atasradar_lib::{validation, AtasRadarError};
use chrono::{Local, NaiveDate};
use tokio_util::sync::CancellationToken;

/// Forwards Ctrl-C to a view's teardown token.
pub(crate) fn cancel_on_shutdown(shutdown: &CancellationToken, view: CancellationToken) {
    let shutdown = shutdown.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown.cancelled() => view.cancel(),
            _ = view.cancelled() => {}
        }
    });
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses optional `--from`/`--to` dates, defaulting to the last year.
pub(crate) fn parse_window(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(NaiveDate, NaiveDate)> {
    let (default_from, default_to) = atasradar_lib::last_year_window(today());
    let from = match from {
        Some(s) => validation::validate_date(s)?,
        None => default_from,
    };
    let to = match to {
        Some(s) => validation::validate_date(s)?,
        None => default_to,
    };
    validation::validate_date_range(from, to)?;
    Ok((from, to))
}

/// Maps a failed view load to the command error.
pub(crate) fn bail_on_cancel(err: AtasRadarError) -> Result<()> {
    if err.is_cancelled() {
        bail!("cancelled");
    }
    Err(err.into())
}

/// Settles a view load before rendering. Cancellation and rejected input end
/// the command; a failed fetch has already been logged by the view, which
/// keeps its last-known or default value for display.
pub(crate) fn settle_view_load(result: Result<(), AtasRadarError>) -> Result<()> {
    match result {
        Err(e) if e.is_cancelled() => bail!("cancelled"),
        Err(e @ AtasRadarError::InvalidInput(_)) => Err(e.into()),
        _ => Ok(()),
    }
}
