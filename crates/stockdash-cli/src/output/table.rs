use std::io::Write;

use stockdash_core::{DashboardView, Overview, TableRow};

use super::candles::render_candles;
use crate::error::CliError;

pub fn write_view<W: Write>(writer: &mut W, view: &DashboardView) -> Result<(), CliError> {
    write_overview(writer, &view.stock_name, &view.overview)?;
    writeln!(writer, "{}", view.last_refresh)?;
    writeln!(writer)?;

    for line in render_candles(&view.chart) {
        writeln!(writer, "{line}")?;
    }
    writeln!(writer)?;

    writeln!(writer, "{}", view.table.heading)?;
    write_rows(writer, &view.table.rows)?;
    Ok(())
}

fn write_overview<W: Write>(
    writer: &mut W,
    stock_name: &str,
    overview: &Overview,
) -> Result<(), CliError> {
    let title = overview.name.as_deref().unwrap_or(stock_name);
    writeln!(writer, "{title} ({})", overview.symbol)?;

    let fields = [
        ("asset type", &overview.asset_type),
        ("exchange", &overview.exchange),
        ("currency", &overview.currency),
        ("country", &overview.country),
        ("sector", &overview.sector),
        ("website", &overview.official_site),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            writeln!(writer, "  {label:<11}: {value}")?;
        }
    }

    if let Some(description) = &overview.description {
        writeln!(writer, "  {description}")?;
    }
    Ok(())
}

fn write_rows<W: Write>(writer: &mut W, rows: &[TableRow]) -> Result<(), CliError> {
    writeln!(
        writer,
        "{:<10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}",
        "Date", "Open", "High", "Low", "Close", "Volume"
    )?;
    for row in rows {
        writeln!(
            writer,
            "{:<10}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}  {:>12}",
            row.date.to_string(),
            row.open,
            row.high,
            row.low,
            row.close,
            row.volume
        )?;
    }
    Ok(())
}
