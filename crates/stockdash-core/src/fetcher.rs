//! Data Fetcher: two GET requests against the provider's query endpoint.
//!
//! A fetch issues the time series request first and the overview request only
//! if that succeeded. Nothing is retried or cached; a failed refresh is
//! reported to the caller and the user triggers the next attempt.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ApiKey, DashboardConfig};
use crate::http_client::{HttpClient, HttpError, HttpErrorKind, HttpRequest, ReqwestHttpClient};
use crate::{DashboardError, DataShapeError, Interval, Symbol, TransportError};

pub const OVERVIEW_FUNCTION: &str = "OVERVIEW";

/// Keys the provider uses to report throttling or bad requests inside a 200 response.
const NOTICE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Both parsed bodies from one successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuoteData {
    pub market: Value,
    pub overview: Value,
}

#[derive(Clone)]
pub struct AlphaVantageFetcher {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    api_key: ApiKey,
    timeout_ms: u64,
}

impl AlphaVantageFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &DashboardConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            timeout_ms: config.http.timeout_ms,
        }
    }

    /// Fetcher over a reqwest transport built from `config.http`.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, HttpError> {
        let client = ReqwestHttpClient::from_config(&config.http)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub async fn fetch(
        &self,
        symbol: &Symbol,
        interval: Interval,
    ) -> Result<RawQuoteData, DashboardError> {
        let market = self.query(interval.function_name(), symbol).await?;
        let overview = self.query(OVERVIEW_FUNCTION, symbol).await?;
        Ok(RawQuoteData { market, overview })
    }

    fn endpoint(&self, function: &str, symbol: &Symbol) -> String {
        format!(
            "{}/query?function={}&symbol={}&apikey={}",
            self.base_url,
            function,
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(self.api_key.expose())
        )
    }

    async fn query(&self, function: &str, symbol: &Symbol) -> Result<Value, DashboardError> {
        let url = self.endpoint(function, symbol);
        debug!(function, url = %self.redact(&url), "requesting provider");

        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| self.transport_error(function, &error))?;

        if !response.is_success() {
            return Err(TransportError::Status {
                function: function.to_owned(),
                status: response.status,
            }
            .into());
        }

        let body: Value =
            serde_json::from_str(&response.body).map_err(|e| DataShapeError::MalformedJson {
                function: function.to_owned(),
                message: e.to_string(),
            })?;

        if let Some(message) = provider_notice(&body) {
            warn!(function, notice = %message, "provider returned a notice instead of data");
            return Err(DataShapeError::ProviderNotice {
                function: function.to_owned(),
                message: self.redact(message),
            }
            .into());
        }

        Ok(body)
    }

    fn transport_error(&self, function: &str, error: &HttpError) -> DashboardError {
        let function = function.to_owned();
        match error.kind() {
            HttpErrorKind::Timeout => TransportError::Timeout {
                function,
                timeout_ms: self.timeout_ms,
            },
            HttpErrorKind::Connect | HttpErrorKind::Other => TransportError::Network {
                function,
                message: self.redact(error.message()),
            },
        }
        .into()
    }

    fn redact(&self, text: &str) -> String {
        let key = self.api_key.expose();
        let encoded = urlencoding::encode(key);
        text.replace(&*encoded, "<redacted>").replace(key, "<redacted>")
    }
}

fn provider_notice(body: &Value) -> Option<&str> {
    let object = body.as_object()?;
    NOTICE_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
}
