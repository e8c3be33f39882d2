#![deny(unreachable_pub)]
pub mod app;
pub mod client;
pub mod config;
mod consts;
pub mod dashboard;
mod errors;
pub mod format;
pub mod landing;
pub mod model;
pub mod prefs;
pub mod route;
pub mod runner;
pub mod server;
pub mod ui;
pub use app::{ActiveView, App};
pub use client::{FetchOptions, HttpClient, JsonFetcher};
pub use consts::{
    CLIENT_HEADER, CLIENT_ID, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, PREF_BASE_URL, PREF_PERIOD,
};
pub use dashboard::{DashboardView, FetchState};
pub use errors::{Error, Result};
pub use landing::LandingView;
pub use model::{Period, PnlReport};
pub use route::{parse_route, share_url, Route};
