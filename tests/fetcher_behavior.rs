//! Behavior-driven tests for the Data Fetcher
//!
//! All requests go through an offline transport, so these tests pin down the
//! request shapes and failure classification without network access.

use std::sync::Arc;

use stockdash_core::{
    AlphaVantageFetcher, ApiKey, DashboardConfig, DashboardError, DataShapeError, HttpClient,
    HttpError, HttpResponse, Interval, StaticHttpClient, Symbol, TransportError,
};

const API_KEY: &str = "demo-key-123";

fn config() -> DashboardConfig {
    DashboardConfig::new(ApiKey::new(API_KEY).expect("valid key"))
}

fn fetcher_over(client: &Arc<StaticHttpClient>) -> AlphaVantageFetcher {
    let transport: Arc<dyn HttpClient> = client.clone();
    AlphaVantageFetcher::new(transport, &config())
}

fn symbol(ticker: &str) -> Symbol {
    Symbol::parse(ticker).expect("valid symbol")
}

const DAILY_BODY: &str = r#"{"Time Series (Daily)":{"2024-01-02":{"1. open":"10","2. high":"12","3. low":"9","4. close":"11","5. volume":"1000"}}}"#;
const OVERVIEW_BODY: &str = r#"{"Symbol":"AAPL","Name":"Apple Inc"}"#;

// =============================================================================
// Fetcher: Request Shape
// =============================================================================

#[tokio::test]
async fn fetch_issues_series_then_overview_requests() {
    // Given: A transport that answers both functions
    let client = Arc::new(
        StaticHttpClient::new()
            .with_response("function=TIME_SERIES_DAILY", HttpResponse::ok_json(DAILY_BODY))
            .with_response("function=OVERVIEW", HttpResponse::ok_json(OVERVIEW_BODY)),
    );
    let fetcher = fetcher_over(&client);

    // When: Fetching daily data for Apple
    let raw = fetcher
        .fetch(&symbol("AAPL"), Interval::Daily)
        .await
        .expect("fetch should succeed");

    // Then: Two requests were made in order with the expected query parameters
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].url,
        "https://www.alphavantage.co/query?function=TIME_SERIES_DAILY&symbol=AAPL&apikey=demo-key-123"
    );
    assert_eq!(
        requests[1].url,
        "https://www.alphavantage.co/query?function=OVERVIEW&symbol=AAPL&apikey=demo-key-123"
    );
    assert!(requests.iter().all(|request| request.timeout_ms == 10_000));

    // And: Both bodies are returned as parsed JSON
    assert_eq!(raw.overview["Symbol"], "AAPL");
    assert!(raw.market.get("Time Series (Daily)").is_some());
}

#[tokio::test]
async fn each_interval_maps_to_its_function_name() {
    for (interval, function) in [
        (Interval::Daily, "TIME_SERIES_DAILY"),
        (Interval::Weekly, "TIME_SERIES_WEEKLY"),
        (Interval::Monthly, "TIME_SERIES_MONTHLY"),
    ] {
        let client = Arc::new(
            StaticHttpClient::new()
                .with_response("function=TIME_SERIES", HttpResponse::ok_json("{}"))
                .with_response("function=OVERVIEW", HttpResponse::ok_json(OVERVIEW_BODY)),
        );
        let fetcher = fetcher_over(&client);

        fetcher
            .fetch(&symbol("MSFT"), interval)
            .await
            .expect("fetch should succeed");

        let first = &client.recorded_requests()[0];
        assert!(first.url.contains(&format!("function={function}&")));
        assert!(first.url.contains("symbol=MSFT"));
    }
}

#[tokio::test]
async fn configured_timeout_is_applied_per_request() {
    let client = Arc::new(
        StaticHttpClient::new()
            .with_response("function=TIME_SERIES_DAILY", HttpResponse::ok_json(DAILY_BODY))
            .with_response("function=OVERVIEW", HttpResponse::ok_json(OVERVIEW_BODY)),
    );
    let config = config().with_timeout_ms(2_500).expect("valid timeout");
    let transport: Arc<dyn HttpClient> = client.clone();
    let fetcher = AlphaVantageFetcher::new(transport, &config);

    fetcher
        .fetch(&symbol("AAPL"), Interval::Daily)
        .await
        .expect("fetch should succeed");

    assert!(client
        .recorded_requests()
        .iter()
        .all(|request| request.timeout_ms == 2_500));
}

// =============================================================================
// Fetcher: Transport Failures
// =============================================================================

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    // Given: The provider answers the series request with 503
    let client = Arc::new(StaticHttpClient::new().with_response(
        "function=TIME_SERIES_DAILY",
        HttpResponse::with_status(503, "unavailable"),
    ));
    let fetcher = fetcher_over(&client);

    // When: Fetching
    let err = fetcher
        .fetch(&symbol("AAPL"), Interval::Daily)
        .await
        .expect_err("503 must fail");

    // Then: The failure is classified as transport, and the overview is never requested
    assert_eq!(
        err,
        DashboardError::Transport(TransportError::Status {
            function: String::from("TIME_SERIES_DAILY"),
            status: 503,
        })
    );
    assert_eq!(client.recorded_requests().len(), 1);
}

#[tokio::test]
async fn timeout_is_a_transport_error() {
    let client = Arc::new(StaticHttpClient::new().with_error(
        "function=TIME_SERIES_WEEKLY",
        HttpError::timeout("request timeout: operation timed out"),
    ));
    let fetcher = fetcher_over(&client);

    let err = fetcher
        .fetch(&symbol("TSLA"), Interval::Weekly)
        .await
        .expect_err("timeout must fail");

    assert_eq!(
        err,
        DashboardError::Transport(TransportError::Timeout {
            function: String::from("TIME_SERIES_WEEKLY"),
            timeout_ms: 10_000,
        })
    );
    assert!(err.user_message().starts_with("Request error:"));
}

#[tokio::test]
async fn overview_failure_after_series_success_is_reported() {
    let client = Arc::new(
        StaticHttpClient::new()
            .with_response("function=TIME_SERIES_DAILY", HttpResponse::ok_json(DAILY_BODY))
            .with_error("function=OVERVIEW", HttpError::connect("connection failed: refused")),
    );
    let fetcher = fetcher_over(&client);

    let err = fetcher
        .fetch(&symbol("AAPL"), Interval::Daily)
        .await
        .expect_err("overview failure must fail the fetch");

    assert!(matches!(
        err,
        DashboardError::Transport(TransportError::Network { ref function, .. }) if function == "OVERVIEW"
    ));
}

#[tokio::test]
async fn api_key_never_appears_in_error_text() {
    // Given: A transport error whose message echoes the request URL
    let client = Arc::new(StaticHttpClient::new().with_error(
        "function=TIME_SERIES_DAILY",
        HttpError::connect(format!(
            "connection failed for https://www.alphavantage.co/query?apikey={API_KEY}"
        )),
    ));
    let fetcher = fetcher_over(&client);

    // When: The fetch fails
    let err = fetcher
        .fetch(&symbol("AAPL"), Interval::Daily)
        .await
        .expect_err("connect error must fail");

    // Then: Neither the display text nor the debug text leaks the key
    assert!(!err.to_string().contains(API_KEY));
    assert!(!format!("{err:?}").contains(API_KEY));
    assert!(err.to_string().contains("<redacted>"));
}

// =============================================================================
// Fetcher: Body Failures
// =============================================================================

#[tokio::test]
async fn malformed_json_is_a_data_shape_error() {
    let client = Arc::new(StaticHttpClient::new().with_response(
        "function=TIME_SERIES_DAILY",
        HttpResponse::ok_json("<html>gateway</html>"),
    ));
    let fetcher = fetcher_over(&client);

    let err = fetcher
        .fetch(&symbol("AAPL"), Interval::Daily)
        .await
        .expect_err("non-JSON body must fail");

    assert!(matches!(
        err,
        DashboardError::DataShape(DataShapeError::MalformedJson { .. })
    ));
    assert!(err.user_message().starts_with("Unexpected error:"));
}

#[tokio::test]
async fn provider_rate_limit_note_is_surfaced() {
    // Given: The provider answers 200 with a throttling note instead of data
    let client = Arc::new(StaticHttpClient::new().with_response(
        "function=TIME_SERIES_DAILY",
        HttpResponse::ok_json(r#"{"Note":"API call frequency is 5 calls per minute."}"#),
    ));
    let fetcher = fetcher_over(&client);

    // When: Fetching
    let err = fetcher
        .fetch(&symbol("AAPL"), Interval::Daily)
        .await
        .expect_err("notice must fail");

    // Then: The notice text reaches the user instead of a missing-key error
    assert_eq!(
        err,
        DashboardError::DataShape(DataShapeError::ProviderNotice {
            function: String::from("TIME_SERIES_DAILY"),
            message: String::from("API call frequency is 5 calls per minute."),
        })
    );
    assert_eq!(client.recorded_requests().len(), 1);
}
