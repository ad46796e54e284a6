//! Stock time-series fetching with latest-wins supersession.
//!
//! [`StockDataClient`] issues one authenticated GET per request, retries
//! transient failures with exponential backoff, and classifies everything
//! else into a small error taxonomy. [`SeriesFeed`] sits on top for a
//! single logical consumer: every `refresh` supersedes the one before it,
//! and a superseded fetch is discarded without touching observable state,
//! whether it eventually succeeds or fails.

use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::http_client::{HttpClient, HttpRequest};
use crate::retry::RetryPolicy;
use crate::session::SessionProvider;
use crate::{DateRange, SeriesBundle, Symbol, Timeframe, ValidationError};

/// Classification of fetch failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// HTTP 401 or no live session; caller must re-authenticate.
    AuthExpired,
    /// HTTP 429; never retried here, cool-down is caller policy.
    RateLimited,
    /// Network failure or 5xx, surfaced after retries are exhausted.
    Transport,
    /// Backend answered but the envelope was not usable.
    Upstream,
    /// The request itself was invalid.
    InvalidRequest,
}

/// Structured fetch error: a kind for dispatch plus a human-readable
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn auth_expired() -> Self {
        Self {
            kind: FetchErrorKind::AuthExpired,
            message: String::from("session expired; please log in again"),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::RateLimited,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Upstream,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Distinguishable flag for cool-down UI policy.
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self.kind, FetchErrorKind::RateLimited)
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::AuthExpired => "fetch.auth_expired",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::Upstream => "fetch.upstream",
            FetchErrorKind::InvalidRequest => "fetch.invalid_request",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

impl From<ValidationError> for FetchError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

/// Validated fetch parameters: which tickers, over which window.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    tickers: Vec<Symbol>,
    timeframe: Timeframe,
    custom_range: Option<DateRange>,
}

impl FetchRequest {
    /// `custom_range` is required exactly when `timeframe` is
    /// [`Timeframe::Custom`]; for any other timeframe it is ignored.
    pub fn new(
        tickers: Vec<Symbol>,
        timeframe: Timeframe,
        custom_range: Option<DateRange>,
    ) -> Result<Self, FetchError> {
        let custom_range = match timeframe {
            Timeframe::Custom => Some(
                custom_range.ok_or_else(|| FetchError::from(ValidationError::MissingCustomRange))?,
            ),
            _ => None,
        };

        Ok(Self {
            tickers,
            timeframe,
            custom_range,
        })
    }

    pub fn tickers(&self) -> &[Symbol] {
        &self.tickers
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn custom_range(&self) -> Option<&DateRange> {
        self.custom_range.as_ref()
    }

    /// Query-string portion of the backend request.
    pub fn query_string(&self) -> String {
        let csv = self
            .tickers
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let mut query = format!(
            "tickers={}&timeframe={}",
            urlencoding::encode(&csv),
            self.timeframe.as_str()
        );

        if let Some(range) = &self.custom_range {
            query.push_str(&format!(
                "&start={}&end={}",
                urlencoding::encode(&range.start().format_date()),
                urlencoding::encode(&range.end().format_date())
            ));
        }

        query
    }
}

#[derive(Debug, Deserialize)]
struct WireEnvelope {
    status: String,
    #[serde(default)]
    data: Option<SeriesBundle>,
    #[serde(default)]
    message: Option<String>,
}

/// One-shot authenticated fetch of a [`SeriesBundle`].
pub struct StockDataClient {
    http: Arc<dyn HttpClient>,
    session: Arc<dyn SessionProvider>,
    base_url: String,
    retry: RetryPolicy,
    timeout_ms: u64,
}

impl StockDataClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        session: Arc<dyn SessionProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            session,
            base_url: base_url.into(),
            retry: RetryPolicy::default(),
            timeout_ms: crate::http_client::DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Fetch the bundle for one request.
    ///
    /// An empty ticker set resolves to an empty bundle without touching the
    /// network. 401 and 429 surface immediately; network failures and 5xx
    /// are retried per the policy and surface as transport errors once
    /// exhausted.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<SeriesBundle, FetchError> {
        if request.tickers().is_empty() {
            return Ok(SeriesBundle::default());
        }

        let url = format!(
            "{}/stocks/data?{}",
            self.base_url.trim_end_matches('/'),
            request.query_string()
        );

        let mut attempt: u32 = 0;
        loop {
            let token = self
                .session
                .bearer_token()
                .ok_or_else(FetchError::auth_expired)?;

            let http_request = HttpRequest::get(&url)
                .with_bearer_token(&token)
                .with_timeout_ms(self.timeout_ms);

            match self.http.execute(http_request).await {
                Ok(response) if response.status == 401 => {
                    return Err(FetchError::auth_expired());
                }
                Ok(response) if response.status == 429 => {
                    return Err(FetchError::rate_limited(
                        "rate limited by backend; slow down before retrying",
                    ));
                }
                Ok(response) if response.is_success() => {
                    return decode_bundle(&response.body);
                }
                Ok(response) => {
                    if self.retry.should_retry_status(response.status)
                        && attempt < self.retry.max_retries
                    {
                        let delay = self.retry.delay_for_attempt(attempt);
                        warn!(
                            status = response.status,
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            "retrying stock data request after upstream failure"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(FetchError::transport(format!(
                        "backend returned status {}",
                        response.status
                    )));
                }
                Err(error) => {
                    if error.retryable()
                        && self.retry.should_retry_transport()
                        && attempt < self.retry.max_retries
                    {
                        let delay = self.retry.delay_for_attempt(attempt);
                        warn!(
                            error = %error,
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            "retrying stock data request after transport failure"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(FetchError::transport(error.message().to_owned()));
                }
            }
        }
    }
}

fn decode_bundle(body: &str) -> Result<SeriesBundle, FetchError> {
    let envelope: WireEnvelope = serde_json::from_str(body)
        .map_err(|e| FetchError::upstream(format!("undecodable stock data response: {e}")))?;

    if envelope.status != "success" {
        return Err(FetchError::upstream(
            envelope
                .message
                .unwrap_or_else(|| format!("backend reported status '{}'", envelope.status)),
        ));
    }

    Ok(envelope.data.unwrap_or_default())
}

/// Outcome of a [`SeriesFeed::refresh`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// This fetch was still the latest at resolution; the slot was updated.
    Applied,
    /// A newer fetch was issued meanwhile; this result was dropped whole.
    Superseded,
}

/// Latest-wins consumer of [`StockDataClient`].
///
/// A feed owns a generation counter and the consumer's latest-bundle slot.
/// Each `refresh` records the generation at issue time and compares it at
/// resolution time, so an earlier-issued fetch that resolves late can never
/// clobber a newer result regardless of network arrival order.
pub struct SeriesFeed {
    client: Arc<StockDataClient>,
    generation: AtomicU64,
    bundle: Mutex<Option<SeriesBundle>>,
    last_error: Mutex<Option<FetchError>>,
}

impl SeriesFeed {
    pub fn new(client: Arc<StockDataClient>) -> Self {
        Self {
            client,
            generation: AtomicU64::new(0),
            bundle: Mutex::new(None),
            last_error: Mutex::new(None),
        }
    }

    /// Issue a fetch, superseding any in-flight one from this feed.
    ///
    /// Returns `Ok(Superseded)` when a newer refresh won the race; in that
    /// case neither the bundle slot nor the error slot is touched, and a
    /// superseded failure is silently dropped rather than surfaced.
    pub async fn refresh(&self, request: &FetchRequest) -> Result<FetchStatus, FetchError> {
        let issued = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.client.fetch(request).await;

        if self.generation.load(Ordering::SeqCst) != issued {
            debug!(issued, "discarding superseded stock data fetch");
            return Ok(FetchStatus::Superseded);
        }

        match result {
            Ok(bundle) => {
                *self.bundle.lock().unwrap() = Some(bundle);
                *self.last_error.lock().unwrap() = None;
                Ok(FetchStatus::Applied)
            }
            Err(error) => {
                *self.last_error.lock().unwrap() = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Most recent applied bundle, if any fetch has completed.
    pub fn latest(&self) -> Option<SeriesBundle> {
        self.bundle.lock().unwrap().clone()
    }

    /// Error from the most recent non-superseded fetch, cleared on success.
    pub fn last_error(&self) -> Option<FetchError> {
        self.last_error.lock().unwrap().clone()
    }

    /// Teardown trigger: any outstanding fetch resolves as superseded.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
