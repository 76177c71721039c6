use pink_room_rivalry::{
    app, AppConfig, AppState, InMemoryMatchRepository, LiveRivalry, RivalryService,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pink_room_rivalry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        table = %config.default_table,
        match_limit = config.match_limit,
        side_a = %config.sides.display_name(Some(pink_room_rivalry::Side::A)),
        side_b = %config.sides.display_name(Some(pink_room_rivalry::Side::B)),
        "Starting Pink Room rivalry server"
    );

    let repository = Arc::new(InMemoryMatchRepository::new());
    let rivalry_service = Arc::new(
        RivalryService::builder(repository)
            .with_config(&config)
            .build(),
    );

    // Keeps the default table's statistics current for the log
    let live = match LiveRivalry::spawn(Arc::clone(&rivalry_service), &config.default_table).await
    {
        Ok(live) => live,
        Err(e) => {
            error!(error = %e, "Failed to load rivalry statistics");
            std::process::exit(1);
        }
    };
    let mut updates = live.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            info!(
                table = %snapshot.table_id,
                wins_a = snapshot.summary.wins.a,
                wins_b = snapshot.summary.wins.b,
                leader = ?snapshot.summary.leader,
                "Rivalry updated"
            );
        }
    });

    let app_state = AppState::new(rivalry_service);
    let app = app(app_state);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind_addr = %config.bind_addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };
    info!("Server running on http://{}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
    }
    drop(live);
}
