//! Session: current route plus the mounted view
//!
//! Navigation always unmounts the previous view and mounts a fresh one. Each
//! mount gets a new epoch; a [`RunTicket`] only completes against the view
//! that issued it, so a response arriving after the user navigated away is
//! dropped.

use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::dashboard::{DashboardView, FetchState, FetchTicket};
use crate::errors::Result;
use crate::landing::LandingView;
use crate::model::Period;
use crate::prefs::Preferences;
use crate::route::{parse_route, Route};

#[derive(Debug)]
pub enum ActiveView {
    Landing(LandingView),
    Dashboard(DashboardView),
}

/// In-flight dashboard fetch, bound to the view that started it
#[derive(Debug, Clone)]
pub struct RunTicket {
    epoch: u64,
    fetch: FetchTicket,
}

impl RunTicket {
    pub fn fetch(&self) -> &FetchTicket {
        &self.fetch
    }
}

/// JSON snapshot served by `/api/state`
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub fragment: String,
    pub view: &'static str,
    pub address: Option<&'a str>,
    pub base_url: &'a str,
    pub period: Option<Period>,
    pub show_positions: Option<bool>,
    pub show_closed: Option<bool>,
    pub state: Option<&'a FetchState>,
}

#[derive(Debug)]
pub struct App {
    route: Route,
    view: ActiveView,
    epoch: u64,
    prefs: Preferences,
    default_base_url: String,
    timeout_ms: u64,
}

impl App {
    /// Start on the landing view
    pub fn new(prefs: Preferences, default_base_url: impl Into<String>, timeout_ms: u64) -> Self {
        let default_base_url = default_base_url.into();
        let view = ActiveView::Landing(LandingView::mount(prefs.clone(), &default_base_url));
        Self {
            route: Route::Home,
            view,
            epoch: 0,
            prefs,
            default_base_url,
            timeout_ms,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Handle a fragment change: re-parse and remount
    pub fn navigate(&mut self, fragment: &str) {
        let route = parse_route(fragment);
        self.epoch += 1;
        self.view = match &route {
            Route::Home => {
                ActiveView::Landing(LandingView::mount(self.prefs.clone(), &self.default_base_url))
            }
            Route::Account { address, .. } => ActiveView::Dashboard(DashboardView::mount(
                address.clone(),
                &route,
                self.prefs.clone(),
                &self.default_base_url,
                self.timeout_ms,
            )),
        };
        info!("Navigated to {}", route.to_fragment());
        self.route = route;
    }

    pub fn landing_mut(&mut self) -> Option<&mut LandingView> {
        match &mut self.view {
            ActiveView::Landing(view) => Some(view),
            ActiveView::Dashboard(_) => None,
        }
    }

    pub fn dashboard(&self) -> Option<&DashboardView> {
        match &self.view {
            ActiveView::Dashboard(view) => Some(view),
            ActiveView::Landing(_) => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut DashboardView> {
        match &mut self.view {
            ActiveView::Dashboard(view) => Some(view),
            ActiveView::Landing(_) => None,
        }
    }

    /// Start a dashboard fetch; `None` when the dashboard is not mounted
    pub fn begin_run(&mut self, now_secs: i64) -> Option<RunTicket> {
        let epoch = self.epoch;
        let view = self.dashboard_mut()?;
        Some(RunTicket {
            epoch,
            fetch: view.begin_fetch(now_secs),
        })
    }

    /// Apply a fetch result if its view is still mounted and current
    pub fn complete_run(&mut self, ticket: &RunTicket, result: Result<Value>) -> bool {
        if ticket.epoch != self.epoch {
            warn!(
                "Dropping response for unmounted view (epoch {} != {})",
                ticket.epoch, self.epoch
            );
            return false;
        }
        match self.dashboard_mut() {
            Some(view) => view.complete_fetch(&ticket.fetch, result),
            None => false,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        let fragment = self.route.to_fragment();
        match &self.view {
            ActiveView::Landing(view) => SessionSnapshot {
                fragment,
                view: "landing",
                address: None,
                base_url: view.base_url(),
                period: None,
                show_positions: None,
                show_closed: None,
                state: None,
            },
            ActiveView::Dashboard(view) => SessionSnapshot {
                fragment,
                view: "dashboard",
                address: Some(view.address()),
                base_url: view.base_url(),
                period: Some(view.period()),
                show_positions: Some(view.show_positions()),
                show_closed: Some(view.show_closed()),
                state: Some(view.state()),
            },
        }
    }
}
