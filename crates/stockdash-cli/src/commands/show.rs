use std::io;
use std::process::ExitCode;

use stockdash_core::{Dashboard, Selection, SessionContext};
use time::OffsetDateTime;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

/// One refresh pass. A failed pass exits non-zero with the user-facing message.
pub async fn run(
    dashboard: &Dashboard,
    selection: &Selection,
    format: OutputFormat,
    pretty: bool,
) -> Result<ExitCode, CliError> {
    let outcome = dashboard
        .refresh(selection, SessionContext::default(), OffsetDateTime::now_utc())
        .await;
    let view = outcome.result?;

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    output::render_view(&mut writer, &view, format, pretty)?;
    Ok(ExitCode::SUCCESS)
}
