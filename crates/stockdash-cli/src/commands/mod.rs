mod catalog;
mod interactive;
mod show;

use std::process::ExitCode;

use stockdash_core::{
    AlphaVantageFetcher, Dashboard, DashboardConfig, Interval, PeriodWindow, Selection,
    StockChoice,
};

use crate::cli::{Cli, Command, SelectionArgs};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    match &cli.command {
        Command::Catalog => catalog::run(cli.format, cli.pretty),
        Command::Show(args) => {
            let selection = resolve_selection(&args.selection)?;
            let dashboard = build_dashboard(cli)?.with_table_rows(args.rows)?;
            show::run(&dashboard, &selection, cli.format, cli.pretty).await
        }
        Command::Interactive(args) => {
            let selection = resolve_selection(args)?;
            let dashboard = build_dashboard(cli)?;
            interactive::run(&dashboard, selection, cli.format, cli.pretty).await
        }
    }
}

/// Environment first, then command-line overrides.
fn build_dashboard(cli: &Cli) -> Result<Dashboard, CliError> {
    let mut config = DashboardConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str())?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms)?;
    }

    let fetcher = AlphaVantageFetcher::from_config(&config)?;
    Ok(Dashboard::new(fetcher))
}

fn resolve_selection(args: &SelectionArgs) -> Result<Selection, CliError> {
    Ok(Selection {
        stock: StockChoice::lookup(&args.stock)?,
        interval: Interval::from_label(&args.interval),
        period: PeriodWindow::from_label(&args.period),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdash_core::ValidationError;

    fn args(stock: &str, interval: &str, period: &str) -> SelectionArgs {
        SelectionArgs {
            stock: stock.to_owned(),
            interval: interval.to_owned(),
            period: period.to_owned(),
        }
    }

    #[test]
    fn resolves_labels_leniently() {
        let selection = resolve_selection(&args("tsla", "QUARTERLY", "2 Weeks")).expect("valid");
        assert_eq!(selection.stock.name, "Tesla");
        assert_eq!(selection.interval, Interval::Daily);
        assert_eq!(selection.period, PeriodWindow::Max);
    }

    #[test]
    fn unknown_stock_is_a_validation_error() {
        let err = resolve_selection(&args("Netflix", "Daily", "1 Month")).expect_err("must fail");
        assert!(matches!(
            err,
            CliError::Validation(ValidationError::UnknownStock { .. })
        ));
        assert_eq!(err.exit_code(), 2);
    }
}
