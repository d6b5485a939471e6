//! Line-driven selection loop.
//!
//! Every selection change triggers a refresh pass, the same way a widget change
//! would. The session context returned by one pass feeds the next.

use std::io::{self, Write};
use std::process::ExitCode;

use stockdash_core::{Dashboard, Interval, PeriodWindow, Selection, SessionContext, StockChoice};
use time::OffsetDateTime;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

const HELP: &str = "\
commands:
  stock NAME     switch stock (Apple, Microsoft, Google, Amazon, Tesla)
  interval I     Daily, Weekly, or Monthly
  period P       1 Month, 3 Months, 6 Months, 1 Year, 5 Years, 10 Years, max
  refresh        fetch again with the current selection
  help           show this message
  quit           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Stock(String),
    Interval(String),
    Period(String),
    Refresh,
    Help,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    /// `None` for blank lines.
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word.to_ascii_lowercase().as_str(), rest.is_empty()) {
            ("stock", false) => Self::Stock(rest.to_owned()),
            ("interval", false) => Self::Interval(rest.to_owned()),
            ("period", false) => Self::Period(rest.to_owned()),
            ("refresh", true) => Self::Refresh,
            ("help", true) => Self::Help,
            ("quit" | "exit", true) => Self::Quit,
            _ => Self::Unknown(line.to_owned()),
        };
        Some(command)
    }
}

pub async fn run(
    dashboard: &Dashboard,
    selection: Selection,
    format: OutputFormat,
    pretty: bool,
) -> Result<ExitCode, CliError> {
    let reader = BufReader::new(tokio::io::stdin());
    let mut writer = io::stdout();
    run_session(dashboard, selection, reader, &mut writer, format, pretty).await?;
    Ok(ExitCode::SUCCESS)
}

async fn run_session<R, W>(
    dashboard: &Dashboard,
    mut selection: Selection,
    reader: R,
    writer: &mut W,
    format: OutputFormat,
    pretty: bool,
) -> Result<SessionContext, CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if format == OutputFormat::Table {
        writeln!(writer, "{HELP}")?;
    }

    let mut session = refresh(dashboard, &selection, SessionContext::default(), writer, format, pretty).await?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = ShellCommand::parse(&line) else {
            continue;
        };

        match command {
            ShellCommand::Stock(name) => match StockChoice::lookup(&name) {
                Ok(stock) => selection.stock = stock,
                Err(error) => {
                    writeln!(writer, "{error}")?;
                    continue;
                }
            },
            ShellCommand::Interval(label) => selection.interval = Interval::from_label(&label),
            ShellCommand::Period(label) => selection.period = PeriodWindow::from_label(&label),
            ShellCommand::Refresh => {}
            ShellCommand::Help => {
                writeln!(writer, "{HELP}")?;
                continue;
            }
            ShellCommand::Quit => break,
            ShellCommand::Unknown(input) => {
                writeln!(writer, "unknown command '{input}', type 'help' for commands")?;
                continue;
            }
        }

        session = refresh(dashboard, &selection, session, writer, format, pretty).await?;
    }

    Ok(session)
}

async fn refresh<W: Write>(
    dashboard: &Dashboard,
    selection: &Selection,
    session: SessionContext,
    writer: &mut W,
    format: OutputFormat,
    pretty: bool,
) -> Result<SessionContext, CliError> {
    let outcome = dashboard
        .refresh(selection, session, OffsetDateTime::now_utc())
        .await;

    match &outcome.result {
        Ok(view) => output::render_view(writer, view, format, pretty)?,
        Err(error) => {
            warn!(code = error.code(), stock = selection.stock.ticker, "refresh failed");
            output::render_failure(writer, error, &outcome.session, format, pretty)?;
        }
    }
    Ok(outcome.session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use stockdash_core::{
        AlphaVantageFetcher, ApiKey, DashboardConfig, HttpClient, HttpResponse, StaticHttpClient,
    };

    const OVERVIEW_BODY: &str = r#"{"Symbol":"AAPL","Name":"Apple Inc"}"#;

    fn dashboard_over(client: &Arc<StaticHttpClient>) -> Dashboard {
        let config = DashboardConfig::new(ApiKey::new("test-key").expect("valid key"));
        let transport: Arc<dyn HttpClient> = client.clone();
        Dashboard::new(AlphaVantageFetcher::new(transport, &config))
    }

    fn series_body(key: &str) -> String {
        format!(
            r#"{{"{key}":{{"2024-01-02":{{"1. open":"10","2. high":"12","3. low":"9","4. close":"11","5. volume":"1000"}}}}}}"#
        )
    }

    #[test]
    fn parses_commands_with_multi_word_arguments() {
        assert_eq!(
            ShellCommand::parse("period 3 Months"),
            Some(ShellCommand::Period(String::from("3 Months")))
        );
        assert_eq!(
            ShellCommand::parse("  STOCK tesla "),
            Some(ShellCommand::Stock(String::from("tesla")))
        );
        assert_eq!(ShellCommand::parse("quit"), Some(ShellCommand::Quit));
        assert_eq!(ShellCommand::parse("   "), None);
        assert_eq!(
            ShellCommand::parse("stock"),
            Some(ShellCommand::Unknown(String::from("stock")))
        );
    }

    #[tokio::test]
    async fn each_selection_change_refreshes_until_quit() {
        // Given: A provider that serves every function
        let client = Arc::new(
            StaticHttpClient::new()
                .with_response("function=TIME_SERIES_DAILY", HttpResponse::ok_json(series_body("Time Series (Daily)")))
                .with_response("function=TIME_SERIES_MONTHLY", HttpResponse::ok_json(series_body("Monthly Time Series")))
                .with_response("function=OVERVIEW", HttpResponse::ok_json(OVERVIEW_BODY)),
        );
        let dashboard = dashboard_over(&client);
        let input = b"interval Monthly\nperiod max\nstock Netflix\nhelp\nquit\nstock TSLA\n".as_slice();

        // When: The session runs over scripted input
        let mut buffer = Vec::new();
        let session = run_session(
            &dashboard,
            Selection::default(),
            input,
            &mut buffer,
            OutputFormat::Table,
            false,
        )
        .await
        .expect("session should run");

        // Then: Initial pass plus two changes, two requests each; nothing after quit
        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 6);
        assert!(requests[2].url.contains("function=TIME_SERIES_MONTHLY"));
        assert!(requests.iter().all(|request| !request.url.contains("TSLA")));
        assert!(session.last_refresh.is_some());

        let text = String::from_utf8(buffer).expect("utf8 output");
        assert!(text.contains("AAPL Stock Price - Monthly - max"));
        assert!(text.contains("unknown stock 'Netflix'"));
    }

    #[tokio::test]
    async fn failed_pass_shows_message_and_keeps_never_label() {
        let client = Arc::new(StaticHttpClient::new());
        let dashboard = dashboard_over(&client);

        let mut buffer = Vec::new();
        let session = run_session(
            &dashboard,
            Selection::default(),
            b"quit\n".as_slice(),
            &mut buffer,
            OutputFormat::Json,
            false,
        )
        .await
        .expect("session should run");

        assert_eq!(session.last_refresh, None);
        let first_line = String::from_utf8(buffer).expect("utf8 output");
        let value: serde_json::Value =
            serde_json::from_str(first_line.trim()).expect("one JSON object");
        assert_eq!(value["error"]["code"], "dashboard.transport");
        assert_eq!(
            value["error"]["message"],
            "Request error: TIME_SERIES_DAILY returned HTTP status 404"
        );
        assert_eq!(value["last_refresh"], "Last Refresh: Never");
    }
}
