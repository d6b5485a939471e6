use std::io::{self, Write};
use std::process::ExitCode;

use serde::Serialize;
use stockdash_core::{Interval, PeriodWindow, StockChoice};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct CatalogResponseData {
    stocks: Vec<StockChoice>,
    intervals: Vec<Interval>,
    periods: Vec<PeriodWindow>,
}

impl CatalogResponseData {
    fn current() -> Self {
        Self {
            stocks: StockChoice::all().collect(),
            intervals: Interval::ALL.to_vec(),
            periods: PeriodWindow::ALL.to_vec(),
        }
    }
}

pub fn run(format: OutputFormat, pretty: bool) -> Result<ExitCode, CliError> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_catalog(&mut writer, format, pretty)?;
    Ok(ExitCode::SUCCESS)
}

fn write_catalog<W: Write>(
    writer: &mut W,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let data = CatalogResponseData::current();
    if format == OutputFormat::Json {
        return output::write_json(writer, &data, pretty);
    }

    writeln!(writer, "stocks:")?;
    for stock in &data.stocks {
        writeln!(writer, "  {:<10} {}", stock.name, stock.ticker)?;
    }
    writeln!(writer, "intervals:")?;
    for interval in &data.intervals {
        writeln!(writer, "  {interval}")?;
    }
    writeln!(writer, "periods:")?;
    for period in &data.periods {
        writeln!(writer, "  {period}")?;
    }
    Ok(())
}
