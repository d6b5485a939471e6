mod candles;
mod table;

use std::io::Write;

use serde::Serialize;
use serde_json::json;
use stockdash_core::{DashboardError, DashboardView, SessionContext};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render_view<W: Write>(
    writer: &mut W,
    view: &DashboardView,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(writer, view, pretty),
        OutputFormat::Table => table::write_view(writer, view),
    }
}

/// Shown in place of the chart when a refresh pass fails.
pub fn render_failure<W: Write>(
    writer: &mut W,
    error: &DashboardError,
    session: &SessionContext,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = json!({
                "error": {
                    "code": error.code(),
                    "message": error.user_message(),
                },
                "last_refresh": session.last_refresh_label(),
            });
            write_json(writer, &payload, pretty)
        }
        OutputFormat::Table => {
            writeln!(writer, "{}", error.user_message())?;
            writeln!(writer, "{}", session.last_refresh_label())?;
            Ok(())
        }
    }
}

pub fn write_json<W: Write, T: Serialize>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(writer, "{payload}")?;
    Ok(())
}
