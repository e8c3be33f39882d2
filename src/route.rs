//! Navigation fragment router
//!
//! The fragment grammar is small and closed:
//!
//! ```text
//! #/                                        -> Route::Home
//! #/acct/<address>?base=<enc>&period=<name> -> Route::Account
//! ```
//!
//! Anything else falls back to [`Route::Home`]; parsing never fails.

use std::collections::BTreeMap;

const ACCOUNT_SEGMENT: &str = "acct";

/// Query parameter carrying the API base URL.
pub const QUERY_BASE: &str = "base";
/// Query parameter carrying the reporting period.
pub const QUERY_PERIOD: &str = "period";

/// Parsed navigation fragment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Account {
        address: String,
        query: BTreeMap<String, String>,
    },
}

impl Route {
    /// Account route for `address`, with the base URL embedded when given.
    pub fn account(address: impl Into<String>, base_url: Option<&str>) -> Self {
        let mut query = BTreeMap::new();
        if let Some(base) = base_url {
            query.insert(QUERY_BASE.to_string(), base.to_string());
        }
        Route::Account {
            address: address.into(),
            query,
        }
    }

    /// Look up a query parameter (always `None` for `Home`).
    pub fn param(&self, key: &str) -> Option<&str> {
        match self {
            Route::Home => None,
            Route::Account { query, .. } => query.get(key).map(String::as_str),
        }
    }

    /// Render the canonical fragment, including the leading `#`.
    pub fn to_fragment(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::Account { address, query } => {
                let mut fragment = format!("#/{}/{}", ACCOUNT_SEGMENT, urlencoding::encode(address));
                if !query.is_empty() {
                    fragment.push('?');
                    fragment.push_str(&encode_query(query));
                }
                fragment
            }
        }
    }
}

/// Parse a navigation fragment such as `#/acct/0xabc?base=...`.
pub fn parse_route(fragment: &str) -> Route {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    let (path, query) = match raw.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (raw, None),
    };

    let mut segments = path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some(ACCOUNT_SEGMENT), Some(address)) => {
            let address = decode_component(address);
            if address.is_empty() {
                return Route::Home;
            }
            Route::Account {
                address,
                query: query.map(parse_query).unwrap_or_default(),
            }
        }
        _ => Route::Home,
    }
}

/// Shareable link reopening the dashboard for `address` against `base_url`.
pub fn share_url(origin: &str, address: &str, base_url: &str) -> String {
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        Route::account(address, Some(base_url)).to_fragment()
    )
}

/// Parse `a=1&b=2` the way browsers parse form-encoded query strings.
/// Later duplicates win.
pub(crate) fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode_component(k), decode_component(v)),
            None => (decode_component(pair), String::new()),
        })
        .collect()
}

pub(crate) fn encode_query(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        // Malformed escapes are kept as typed
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_fallbacks() {
        for f in [
            "", "#", "#/", "#/acct", "#/acct/", "#/acct//", "#/foo/0xabc", "#/ACCT/0xabc",
            "#?x=1", "#/acct?base=x", "garbage",
        ] {
            assert_eq!(parse_route(f), Route::Home, "fragment {f:?}");
        }
    }

    #[test]
    fn test_account_route_with_base() {
        let route = parse_route("#/acct/0xABCD?base=https%3A%2F%2Fexample.test");
        match &route {
            Route::Account { address, .. } => assert_eq!(address, "0xABCD"),
            Route::Home => panic!("Expected account route"),
        }
        assert_eq!(route.param(QUERY_BASE), Some("https://example.test"));
        assert_eq!(route.param(QUERY_PERIOD), None);
    }

    #[test]
    fn test_account_route_ignores_extra_segments_and_slashes() {
        let route = parse_route("#//acct//0xabc/extra?period=month&period=day");
        assert_eq!(
            route,
            Route::Account {
                address: "0xabc".into(),
                query: BTreeMap::from([("period".to_string(), "day".to_string())]),
            }
        );
    }

    #[test]
    fn test_query_plus_and_bare_keys() {
        let q = parse_query("a=hello+world&flag&&b=%E2%9C%93");
        assert_eq!(q.get("a").map(String::as_str), Some("hello world"));
        assert_eq!(q.get("flag").map(String::as_str), Some(""));
        assert_eq!(q.get("b").map(String::as_str), Some("✓"));
    }

    #[test]
    fn test_share_url_round_trip() {
        let cases = [
            ("0xABCD", "https://example.test"),
            ("0x1234", "http://localhost:8080/api?x=1&y=2"),
            ("vault one", "https://a.test/p+q"),
        ];
        for (addr, base) in cases {
            let url = share_url("http://127.0.0.1:3000/", addr, base);
            let fragment = &url[url.find('#').unwrap()..];
            let route = parse_route(fragment);
            match &route {
                Route::Account { address, .. } => assert_eq!(address, addr),
                Route::Home => panic!("Expected account route for {url}"),
            }
            assert_eq!(route.param(QUERY_BASE), Some(base));
        }
    }

    #[test]
    fn test_to_fragment() {
        assert_eq!(Route::Home.to_fragment(), "#/");
        assert_eq!(
            Route::account("0xabc", Some("https://x.test")).to_fragment(),
            "#/acct/0xabc?base=https%3A%2F%2Fx.test"
        );
        assert_eq!(Route::account("0xabc", None).to_fragment(), "#/acct/0xabc");
    }
}
