use hl_pnl_dashboard::runner::DashboardRunner;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; APP__* variables may come from either place
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let default_config = "config.toml".to_string();
    let config_path = args.get(1).unwrap_or(&default_config);
    if !std::path::Path::new(config_path).exists() {
        eprintln!(
            "Config file '{}' not found, using defaults and environment.",
            config_path
        );
    }

    let runner = match DashboardRunner::new(config_path) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runner.run().await {
        eprintln!("Dashboard error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
