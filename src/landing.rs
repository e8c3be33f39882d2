//! Landing view state: address and base URL entry

use log::debug;

use crate::prefs::Preferences;
use crate::route::Route;

#[derive(Debug)]
pub struct LandingView {
    address: String,
    base_url: String,
    default_base_url: String,
    prefs: Preferences,
}

impl LandingView {
    /// Base URL starts from the stored preference, else the default
    pub fn mount(prefs: Preferences, default_base_url: &str) -> Self {
        let base_url = prefs
            .base_url()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_base_url.to_string());
        Self {
            address: String::new(),
            base_url,
            default_base_url: default_base_url.to_string(),
            prefs,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_base_url(&self) -> &str {
        &self.default_base_url
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    /// Every edit is persisted immediately
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
        self.prefs.set_base_url(&self.base_url);
    }

    pub fn reset_base_url(&mut self) {
        let default = self.default_base_url.clone();
        self.set_base_url(default);
    }

    /// Route to navigate to, or `None` when the address is blank
    pub fn submit(&self) -> Option<Route> {
        let address = self.address.trim();
        if address.is_empty() {
            debug!("Ignoring submit with empty address");
            return None;
        }
        Some(Route::account(address, Some(self.base_url.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{parse_route, QUERY_BASE};

    const DEFAULT: &str = "https://default.test";

    #[test]
    fn test_mount_uses_stored_base_url() {
        let prefs = Preferences::in_memory();
        assert_eq!(LandingView::mount(prefs.clone(), DEFAULT).base_url(), DEFAULT);

        prefs.set_base_url("https://stored.test");
        assert_eq!(
            LandingView::mount(prefs, DEFAULT).base_url(),
            "https://stored.test"
        );
    }

    #[test]
    fn test_base_url_write_through_and_reset() {
        let prefs = Preferences::in_memory();
        let mut view = LandingView::mount(prefs.clone(), DEFAULT);

        view.set_base_url("https://a");
        assert_eq!(prefs.base_url().as_deref(), Some("https://a"));
        view.set_base_url("https://ab");
        assert_eq!(prefs.base_url().as_deref(), Some("https://ab"));

        view.reset_base_url();
        assert_eq!(view.base_url(), DEFAULT);
        assert_eq!(prefs.base_url().as_deref(), Some(DEFAULT));
    }

    #[test]
    fn test_empty_submit_is_noop() {
        let mut view = LandingView::mount(Preferences::in_memory(), DEFAULT);
        assert_eq!(view.submit(), None);
        view.set_address("   ");
        assert_eq!(view.submit(), None);
    }

    #[test]
    fn test_submit_builds_account_route() {
        let mut view = LandingView::mount(Preferences::in_memory(), DEFAULT);
        view.set_address(" 0xABCD ");
        view.set_base_url("https://example.test/api");

        let route = view.submit().unwrap();
        let fragment = route.to_fragment();
        assert_eq!(
            fragment,
            "#/acct/0xABCD?base=https%3A%2F%2Fexample.test%2Fapi"
        );

        let parsed = parse_route(&fragment);
        assert_eq!(parsed, route);
        assert_eq!(parsed.param(QUERY_BASE), Some("https://example.test/api"));
    }
}
