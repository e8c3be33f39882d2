//! PnL report payload and reporting periods
//!
//! The report shape is owned by the remote API. Decoding is lenient: numeric
//! fields accept JSON numbers or numeric strings, and anything missing or
//! malformed decodes to `None` so the view renders an empty cell instead of
//! failing the whole report.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::consts::API_FALLBACK_ERROR;
use crate::errors::{Error, Result};

/// Named reporting window understood by the PnL API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    Day,
    #[default]
    Week,
    Month,
    AllTime,
    PerpDay,
    PerpWeek,
    PerpMonth,
    PerpAllTime,
}

impl Period {
    pub const ALL: [Period; 8] = [
        Period::Day,
        Period::Week,
        Period::Month,
        Period::AllTime,
        Period::PerpDay,
        Period::PerpWeek,
        Period::PerpMonth,
        Period::PerpAllTime,
    ];

    /// Wire name, as used in query strings and preferences
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::AllTime => "allTime",
            Period::PerpDay => "perpDay",
            Period::PerpWeek => "perpWeek",
            Period::PerpMonth => "perpMonth",
            Period::PerpAllTime => "perpAllTime",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Day => "Day",
            Period::Week => "Week",
            Period::Month => "Month",
            Period::AllTime => "All time",
            Period::PerpDay => "Perp day",
            Period::PerpWeek => "Perp week",
            Period::PerpMonth => "Perp month",
            Period::PerpAllTime => "Perp all time",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown period: {}", s))
    }
}

/// Which table a CSV export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvSection {
    Positions,
    Closed,
}

impl CsvSection {
    pub fn as_str(self) -> &'static str {
        match self {
            CsvSection::Positions => "positions",
            CsvSection::Closed => "closed",
        }
    }
}

/// Decoded `/pnlClean` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PnlReport {
    #[serde(default, deserialize_with = "lenient_text")]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub perp_pnl: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub balance_change: Option<f64>,
    #[serde(default, deserialize_with = "lenient_struct")]
    pub roi: Roi,
    #[serde(default, deserialize_with = "lenient_struct")]
    pub balances: Balances,
    #[serde(default, deserialize_with = "lenient_struct")]
    pub window: Window,
    #[serde(default, deserialize_with = "lenient_struct")]
    pub adjustments: Adjustments,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub positions: Vec<Position>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub closed: Vec<ClosedTrade>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roi {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub trading_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub portfolio_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub perp_now: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub portfolio_now: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Window {
    #[serde(rename = "startMs", default, deserialize_with = "lenient_f64")]
    pub start_ms: Option<f64>,
    #[serde(rename = "endMs", default, deserialize_with = "lenient_f64")]
    pub end_ms: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Adjustments {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub deposits: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub withdrawals: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub net_cashflow: Option<f64>,
}

/// Open perp position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, deserialize_with = "lenient_text")]
    pub coin: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub side: Option<String>,
    #[serde(default, alias = "szi", deserialize_with = "lenient_f64")]
    pub size: Option<f64>,
    #[serde(default, alias = "entryPx", deserialize_with = "lenient_f64")]
    pub entry_px: Option<f64>,
    #[serde(default, alias = "markPx", deserialize_with = "lenient_f64")]
    pub mark_px: Option<f64>,
    #[serde(default, alias = "positionValue", deserialize_with = "lenient_f64")]
    pub notional: Option<f64>,
    #[serde(default, alias = "unrealizedPnl", deserialize_with = "lenient_f64")]
    pub unrealized_pnl: Option<f64>,
    #[serde(default, alias = "roe", deserialize_with = "lenient_f64")]
    pub roe_pct: Option<f64>,
    #[serde(default, alias = "basisPct", deserialize_with = "lenient_f64")]
    pub basis_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub leverage: Option<f64>,
    #[serde(default, alias = "liquidationPx", deserialize_with = "lenient_f64")]
    pub liq_px: Option<f64>,
    #[serde(default, alias = "entryTime", deserialize_with = "lenient_f64")]
    pub entry_time: Option<f64>,
}

/// Closed (round-tripped) trade
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    #[serde(default, alias = "endTime", deserialize_with = "lenient_f64")]
    pub end_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub coin: Option<String>,
    #[serde(default, alias = "direction", deserialize_with = "lenient_text")]
    pub dir: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: Option<String>,
    #[serde(default, alias = "sizeClosed", deserialize_with = "lenient_f64")]
    pub size_closed: Option<f64>,
    #[serde(default, alias = "avgEntryPx", deserialize_with = "lenient_f64")]
    pub avg_entry_px: Option<f64>,
    #[serde(default, alias = "exitPx", deserialize_with = "lenient_f64")]
    pub exit_px: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pnl: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fees: Option<f64>,
    #[serde(default, alias = "netPnl", deserialize_with = "lenient_f64")]
    pub net_pnl: Option<f64>,
}

impl PnlReport {
    /// Decode a raw response, turning `ok != true` into [`Error::Api`]
    pub fn from_response(value: Value) -> Result<Self> {
        if value.get("ok").and_then(Value::as_bool) != Some(true) {
            let message = value
                .get("error")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or(API_FALLBACK_ERROR);
            return Err(Error::Api(message.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Read a number out of a JSON value.
///
/// Accepts numbers, numeric strings and `{ "value": ... }` wrappers (the
/// shape Hyperliquid uses for leverage). Non-finite results are dropped.
pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Object(map) => map.get("value").and_then(number_from_value),
        _ => None,
    };
    n.filter(|x| x.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Nested objects that are `null` or malformed decode to their default.
fn lenient_struct<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ Value::Object(_)) => serde_json::from_value(v).unwrap_or_default(),
        _ => T::default(),
    })
}

/// `null` or a non-array decodes to an empty list; rows that are not objects
/// are skipped.
fn lenient_vec<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(rows)) => rows
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect(),
        _ => Vec::new(),
    })
}
