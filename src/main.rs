use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lokaly_backend::{
    app,
    config::Config,
    store::{seed::demo_data, Store, StoreData},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lokaly_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting Lokaly Backend...");

    let data = if config.seed_demo_data {
        tracing::info!("Seeding demo data");
        demo_data()?
    } else {
        StoreData::default()
    };

    tracing::info!(
        users = data.users.len(),
        properties = data.properties.len(),
        bills = data.bills.len(),
        complaints = data.complaints.len(),
        "Store ready"
    );

    let state = AppState::new(Store::new(data), config.clone());
    let app = app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
