use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::app::App;
use crate::client::HttpClient;
use crate::config::Settings;
use crate::prefs::{JsonFileStore, Preferences};
use crate::server::{start_server, ServerState};

/// Runner for the dashboard server
pub struct DashboardRunner {
    config: Settings,
}

impl DashboardRunner {
    /// Create a new runner from a configuration file (which may be absent)
    pub fn new(config_path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let path = config_path.as_ref().to_string_lossy();
        let config = Settings::new(&path)?;
        Ok(Self { config })
    }

    pub fn from_settings(config: Settings) -> Self {
        Self { config }
    }

    pub fn settings(&self) -> &Settings {
        &self.config
    }

    /// Run the dashboard until ctrl-c
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        // 1. Setup Logging
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", &self.config.log.level);
        }
        env_logger::try_init().ok();

        info!("Starting DashboardRunner...");

        // 2. Preferences
        let dashboard = &self.config.dashboard;
        let store = JsonFileStore::open(&dashboard.prefs_file)?;
        info!("Preferences stored in {:?}", store.path());
        let prefs = Preferences::new(Arc::new(store));

        // 3. Session & client
        let app = App::new(prefs, dashboard.default_base_url.clone(), dashboard.timeout_ms);
        let client = HttpClient::new()?;
        let state = ServerState::new(app, Arc::new(client), self.config.server.origin());

        // 4. Serve
        start_server(state, &self.config.server.host, self.config.server.port).await?;
        Ok(())
    }
}
