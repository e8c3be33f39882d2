//! Dashboard view state
//!
//! Owns the query options for one account and the fetch state machine:
//!
//! ```text
//! Idle ──begin──▶ Loading ──ok──▶ Loaded(report)
//!                    │  ▲            │
//!                    │  └──begin─────┤
//!                    └──err──▶ Failed(message) ──begin──▶ Loading
//! ```
//!
//! Each `begin_fetch` bumps a generation counter and returns a
//! [`FetchTicket`]. Completing with a ticket from an older generation is a
//! no-op, so a slow response can never overwrite a newer one.

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::client::{FetchOptions, JsonFetcher};
use crate::consts::PNL_ENDPOINT;
use crate::errors::Result;
use crate::model::{CsvSection, Period, PnlReport};
use crate::prefs::Preferences;
use crate::route::{self, Route, QUERY_BASE, QUERY_PERIOD};

/// Where the dashboard is in its fetch cycle
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded(Box<PnlReport>),
    Failed(String),
}

/// Handle for one in-flight fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    url: String,
    options: FetchOptions,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn options(&self) -> FetchOptions {
        self.options
    }
}

/// Dashboard for a single account
#[derive(Debug)]
pub struct DashboardView {
    address: String,
    base_url: String,
    period: Period,
    show_positions: bool,
    show_closed: bool,
    state: FetchState,
    generation: u64,
    timeout_ms: u64,
    prefs: Preferences,
}

impl DashboardView {
    /// Mount the dashboard for `address`.
    ///
    /// Base URL and period resolve by precedence: route query, then stored
    /// preference, then built-in default. Unknown period names are skipped.
    pub fn mount(
        address: impl Into<String>,
        route: &Route,
        prefs: Preferences,
        default_base_url: &str,
        timeout_ms: u64,
    ) -> Self {
        let base_url = route
            .param(QUERY_BASE)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| prefs.base_url().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| default_base_url.to_string());

        let period = route
            .param(QUERY_PERIOD)
            .and_then(|p| p.parse::<Period>().ok())
            .or_else(|| prefs.period().and_then(|p| p.parse::<Period>().ok()))
            .unwrap_or_default();

        let address = address.into();
        info!(
            "Dashboard mounted for {} (base={}, period={})",
            address, base_url, period
        );

        Self {
            address,
            base_url,
            period,
            show_positions: true,
            show_closed: true,
            state: FetchState::Idle,
            generation: 0,
            timeout_ms,
            prefs,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn show_positions(&self) -> bool {
        self.show_positions
    }

    pub fn show_closed(&self) -> bool {
        self.show_closed
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&PnlReport> {
        match &self.state {
            FetchState::Loaded(report) => Some(report.as_ref()),
            _ => None,
        }
    }

    /// Edit the base URL (written through to preferences)
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
        self.prefs.set_base_url(&self.base_url);
    }

    /// Change the period (written through to preferences)
    pub fn set_period(&mut self, period: Period) {
        self.period = period;
        self.prefs.set_period(period.as_str());
    }

    /// Only affects what is requested next and what is rendered now
    pub fn set_show_positions(&mut self, show: bool) {
        self.show_positions = show;
    }

    pub fn set_show_closed(&mut self, show: bool) {
        self.show_closed = show;
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), PNL_ENDPOINT)
    }

    fn base_params(&self, now_secs: i64) -> Vec<(&'static str, String)> {
        vec![
            ("account", self.address.clone()),
            ("period", self.period.as_str().to_string()),
            ("_ts", now_secs.to_string()),
        ]
    }

    fn with_params(&self, params: Vec<(&'static str, String)>) -> String {
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.endpoint(), query)
    }

    /// JSON report URL for the current options
    pub fn query_url(&self, now_secs: i64) -> String {
        let mut params = self.base_params(now_secs);
        if self.show_positions {
            params.push(("positions", "1".to_string()));
        }
        if self.show_closed {
            params.push(("closed", "1".to_string()));
        }
        self.with_params(params)
    }

    /// Direct download URL for one table as CSV
    pub fn csv_url(&self, section: CsvSection, now_secs: i64) -> String {
        let mut params = self.base_params(now_secs);
        params.push(("csv", "1".to_string()));
        params.push(("section", section.as_str().to_string()));
        self.with_params(params)
    }

    /// Shareable link reopening this dashboard
    pub fn share_url(&self, origin: &str) -> String {
        route::share_url(origin, &self.address, &self.base_url)
    }

    /// Enter `Loading`, dropping any previous result or error
    pub fn begin_fetch(&mut self, now_secs: i64) -> FetchTicket {
        self.generation += 1;
        self.state = FetchState::Loading;

        let ticket = FetchTicket {
            generation: self.generation,
            url: self.query_url(now_secs),
            options: FetchOptions::with_timeout_ms(self.timeout_ms),
        };
        debug!("Fetch #{} -> {}", ticket.generation, ticket.url);
        ticket
    }

    /// Apply the outcome of a fetch.
    ///
    /// Returns `false` (and leaves state untouched) when the ticket is stale.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, result: Result<Value>) -> bool {
        if ticket.generation != self.generation || !self.is_loading() {
            warn!(
                "Discarding stale response #{} (current #{})",
                ticket.generation, self.generation
            );
            return false;
        }

        self.state = match result.and_then(PnlReport::from_response) {
            Ok(report) => {
                info!(
                    "Loaded report for {}: {} positions, {} closed trades",
                    self.address,
                    report.positions.len(),
                    report.closed.len()
                );
                FetchState::Loaded(Box::new(report))
            }
            Err(e) => {
                warn!("Fetch for {} failed: {}", self.address, e);
                FetchState::Failed(e.to_string())
            }
        };
        true
    }

    /// Fetch and apply in one step, for callers that own the view exclusively
    pub async fn run(&mut self, fetcher: &dyn JsonFetcher, now_secs: i64) -> bool {
        let ticket = self.begin_fetch(now_secs);
        let result = fetcher.fetch_json(ticket.url(), ticket.options()).await;
        self.complete_fetch(&ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::ScriptedFetcher;
    use crate::errors::Error;
    use crate::prefs::MemoryStore;
    use crate::{PREF_BASE_URL, PREF_PERIOD};
    use serde_json::json;
    use std::sync::Arc;

    const DEFAULT: &str = "https://default.test";
    const NOW: i64 = 1_700_000_000;

    fn view_for(fragment: &str, prefs: Preferences) -> DashboardView {
        let route = route::parse_route(fragment);
        let address = match &route {
            Route::Account { address, .. } => address.clone(),
            Route::Home => panic!("Expected account route"),
        };
        DashboardView::mount(address, &route, prefs, DEFAULT, 15_000)
    }

    fn ok_report() -> Value {
        json!({
            "ok": true,
            "period": "week",
            "positions": [{ "coin": "BTC" }],
            "closed": [{ "coin": "ETH" }]
        })
    }

    #[test]
    fn test_mount_defaults() {
        let view = view_for("#/acct/0xabc", Preferences::in_memory());
        assert_eq!(view.base_url(), DEFAULT);
        assert_eq!(view.period(), Period::Week);
        assert!(view.show_positions());
        assert!(view.show_closed());
        assert_eq!(view.state(), &FetchState::Idle);
    }

    #[test]
    fn test_mount_precedence() {
        let store = MemoryStore::with_entries([
            (PREF_BASE_URL, "https://stored.test"),
            (PREF_PERIOD, "month"),
        ]);
        let prefs = Preferences::new(Arc::new(store));

        let view = view_for("#/acct/0xabc", prefs.clone());
        assert_eq!(view.base_url(), "https://stored.test");
        assert_eq!(view.period(), Period::Month);

        let view = view_for(
            "#/acct/0xabc?base=https%3A%2F%2Fquery.test&period=perpAllTime",
            prefs.clone(),
        );
        assert_eq!(view.base_url(), "https://query.test");
        assert_eq!(view.period(), Period::PerpAllTime);

        // Unknown period in the query falls through to the stored one
        let view = view_for("#/acct/0xabc?period=fortnight", prefs);
        assert_eq!(view.period(), Period::Month);
    }

    #[test]
    fn test_edits_write_through() {
        let prefs = Preferences::in_memory();
        let mut view = view_for("#/acct/0xabc", prefs.clone());

        view.set_base_url("https://edited.test");
        view.set_period(Period::AllTime);

        assert_eq!(prefs.base_url().as_deref(), Some("https://edited.test"));
        assert_eq!(prefs.period().as_deref(), Some("allTime"));
    }

    #[test]
    fn test_query_url() {
        let mut view = view_for("#/acct/0xABCD?base=https%3A%2F%2Fapi.test%2F", Preferences::in_memory());
        assert_eq!(
            view.query_url(NOW),
            "https://api.test/pnlClean?account=0xABCD&period=week&_ts=1700000000&positions=1&closed=1"
        );

        view.set_show_positions(false);
        view.set_show_closed(false);
        assert_eq!(
            view.query_url(NOW),
            "https://api.test/pnlClean?account=0xABCD&period=week&_ts=1700000000"
        );
    }

    #[test]
    fn test_csv_url() {
        let view = view_for("#/acct/0xABCD?base=https%3A%2F%2Fapi.test", Preferences::in_memory());
        assert_eq!(
            view.csv_url(CsvSection::Closed, NOW),
            "https://api.test/pnlClean?account=0xABCD&period=week&_ts=1700000000&csv=1&section=closed"
        );
        assert!(view
            .csv_url(CsvSection::Positions, NOW)
            .ends_with("&csv=1&section=positions"));
    }

    #[test]
    fn test_share_url_round_trip() {
        let view = view_for("#/acct/0xABCD?base=https%3A%2F%2Fapi.test", Preferences::in_memory());
        let url = view.share_url("http://localhost:3000");
        assert_eq!(
            url,
            "http://localhost:3000/#/acct/0xABCD?base=https%3A%2F%2Fapi.test"
        );
    }

    #[tokio::test]
    async fn test_run_success() {
        let fetcher = ScriptedFetcher::new(vec![Ok(ok_report())]);
        let mut view = view_for("#/acct/0xABCD", Preferences::in_memory());

        assert!(view.run(&fetcher, NOW).await);

        assert!(!view.is_loading());
        let report = view.report().unwrap();
        assert_eq!(report.positions.len(), 1);
        assert_eq!(report.closed.len(), 1);
        assert_eq!(fetcher.calls(), vec![view.query_url(NOW)]);
    }

    #[tokio::test]
    async fn test_run_api_error() {
        let fetcher = ScriptedFetcher::new(vec![Ok(json!({ "ok": false, "error": "bad account" }))]);
        let mut view = view_for("#/acct/0xABCD", Preferences::in_memory());

        view.run(&fetcher, NOW).await;

        assert_eq!(view.error(), Some("bad account"));
        assert!(view.report().is_none());
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_run_failure_kinds() {
        let fetcher = ScriptedFetcher::new(vec![
            Err(Error::Http { status: 500 }),
            Err(Error::Timeout { ms: 15_000 }),
            Err(Error::Network("connection refused".into())),
        ]);
        let mut view = view_for("#/acct/0xABCD", Preferences::in_memory());

        view.run(&fetcher, NOW).await;
        assert_eq!(view.error(), Some("HTTP 500"));
        view.run(&fetcher, NOW).await;
        assert_eq!(view.error(), Some("Request timed out after 15000 ms"));
        view.run(&fetcher, NOW).await;
        assert_eq!(view.error(), Some("connection refused"));
    }

    #[test]
    fn test_begin_clears_previous_result() {
        let mut view = view_for("#/acct/0xABCD", Preferences::in_memory());
        let ticket = view.begin_fetch(NOW);
        assert!(view.complete_fetch(&ticket, Ok(ok_report())));
        assert!(view.report().is_some());

        view.begin_fetch(NOW);
        assert!(view.report().is_none());
        assert!(view.error().is_none());
        assert!(view.is_loading());
    }

    #[test]
    fn test_stale_ticket_discarded() {
        let mut view = view_for("#/acct/0xABCD", Preferences::in_memory());

        let first = view.begin_fetch(NOW);
        let second = view.begin_fetch(NOW + 1);
        assert_eq!(second.generation(), first.generation() + 1);

        assert!(!view.complete_fetch(&first, Ok(ok_report())));
        assert!(view.is_loading());

        assert!(view.complete_fetch(&second, Err(Error::Http { status: 503 })));
        assert_eq!(view.error(), Some("HTTP 503"));

        // Already settled
        assert!(!view.complete_fetch(&second, Ok(ok_report())));
        assert_eq!(view.error(), Some("HTTP 503"));
    }

    #[test]
    fn test_toggle_does_not_refetch() {
        let mut view = view_for("#/acct/0xABCD", Preferences::in_memory());
        let ticket = view.begin_fetch(NOW);
        view.complete_fetch(&ticket, Ok(ok_report()));

        view.set_show_closed(false);

        assert_eq!(view.generation(), 1);
        assert!(view.report().is_some());
    }

    #[tokio::test]
    async fn test_run_times_out_against_slow_server() {
        use crate::client::HttpClient;
        use axum::{routing::get, Json, Router};

        let app = Router::new().route(
            "/pnlClean",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Json(json!({ "ok": true }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let route = route::Route::account("0xABCD", Some(format!("http://{}", addr).as_str()));
        let mut view = DashboardView::mount("0xABCD", &route, Preferences::in_memory(), DEFAULT, 150);

        view.run(&HttpClient::new().unwrap(), NOW).await;

        assert!(!view.is_loading());
        assert_eq!(view.error(), Some("Request timed out after 150 ms"));
    }
}
