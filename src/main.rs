use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use estate_inventory::{
    config::Config,
    database::{Database, DynamoDocumentStore},
    seed::Seeder,
    storage::{ObjectStorage, S3ObjectStorage},
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "estate-inventory")]
#[command(about = "Real-estate inventory management backend")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("estate_inventory={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting estate inventory service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    let mut aws_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws.region.clone()));
    if let Some(endpoint) = &config.aws.endpoint_url {
        info!("Using custom AWS endpoint: {endpoint}");
        aws_loader = aws_loader.endpoint_url(endpoint);
    }
    let aws_config = aws_loader.load().await;

    let database = Database::new(Arc::new(DynamoDocumentStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.database.table_prefix.clone(),
    )));
    let object_storage: Arc<dyn ObjectStorage> = Arc::new(S3ObjectStorage::new(
        aws_sdk_s3::Client::new(&aws_config),
        config.storage.bucket.clone(),
        config.aws.region.clone(),
        config.storage.public_base_url.clone(),
    ));
    info!(
        "Document store and object storage clients initialized (bucket: {})",
        config.storage.bucket
    );

    let seed_config = config.seed.clone();
    let seed_enabled = config.seed.enabled;
    let state = AppState::new(config, database.clone(), object_storage);

    if seed_enabled {
        let seeder = Seeder {
            database: &database,
            users: &state.user_service,
            floors: &state.floor_service,
            apartments: &state.apartment_service,
            buyers: &state.buyer_service,
        };
        if let Err(e) = seeder.run(&seed_config).await {
            // Collections are required; without them every request fails
            error!("bootstrap failed: {e}");
            return Err(e.into());
        }
        info!("Bootstrap completed");
    }

    let server = WebServer::new(state)?;
    info!("Starting web server on {}", server.addr());
    server.serve().await
}
