/// Built-in PnL API used when neither the route nor the preferences name one.
pub const DEFAULT_BASE_URL: &str = "https://pnl.hyperliquid-tools.xyz";

/// Request timeout applied to every PnL fetch.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Header carrying [`CLIENT_ID`] on every outgoing request.
pub const CLIENT_HEADER: &str = "x-client";
pub const CLIENT_ID: &str = concat!("hl-pnl-dashboard/", env!("CARGO_PKG_VERSION"));

/// Preference keys.
pub const PREF_BASE_URL: &str = "pnl.baseUrl";
pub const PREF_PERIOD: &str = "pnl.period";

/// Path on the PnL API serving both JSON reports and CSV exports.
pub(crate) const PNL_ENDPOINT: &str = "pnlClean";

/// Error text used when the API reports `ok: false` without a message.
pub(crate) const API_FALLBACK_ERROR: &str = "Request failed";
