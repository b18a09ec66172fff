use std::env;
use std::path::Path;

use dotenvy::dotenv;

use base_app::models::config::AppConfig;
use base_app::run;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match AppConfig::load(Path::new("config"), &app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading config: {err}");
            std::process::exit(1);
        }
    };

    let path = env::args().nth(1).unwrap_or_else(|| "/".to_string());

    let snapshot = match run(&config, &path).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Failed to render state: {err}");
            std::process::exit(1);
        }
    }
}
