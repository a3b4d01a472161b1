use tracing::{error, info};

use quill::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = quill::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        quill::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = run(config).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> quill::Result<()> {
    config.validate()?;

    info!("Quill - posts and comments");

    let db = Database::open(&config.database.path).await?;
    if config.database.seed_demo_data {
        quill::seed::seed_demo_data(&db).await?;
    }

    let server = WebServer::new(&config.web, &config.blog, db)?;
    info!("Server configured on {}", server.addr());
    server.run().await
}
