use std::{env, fs, sync::Arc};

use axum::Router;
use dotenvy::dotenv;
use lazy_static::lazy_static;
use log::info;

use dice_stats::{
    data_layer::{BatchDataLayer, DbBatchDataLayer, memory::MemoryBatchDataLayer},
    dice::{Die, RandomDie},
    routes::{roll_routes, statistics_routes},
    services::{roll_service::{CoreRollService, RollService}, statistics_service::{CoreStatisticsService, StatisticsService}},
    settings::{ServerSettings, StoreKind},
};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::trace::{TraceLayer, self};
use tracing::Level;

const DEFAULT_DATABASE_URL: &str = "sqlite://dice.db?mode=rwc";

lazy_static! {
    static ref DATABASE_URL: String = {
        dotenv().ok();
        env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
    };
}

#[tokio::main]
async fn main() {
    // Setup tracing_subscriber
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Setup state
    let settings: ServerSettings = serde_json::from_str(
        &fs::read_to_string("./server_settings.json").expect("Could not read server_settings.json")
    ).expect("Could not parse server_settings.json");

    let data_layer: Arc<dyn BatchDataLayer> = match settings.store {
        StoreKind::Sqlite => {
            let db = SqlitePoolOptions::new()
                .max_connections(settings.max_db_connections)
                .connect(&DATABASE_URL).await
                .expect("Could not connect to database");
            let data_layer = DbBatchDataLayer::new(db);
            data_layer.create_schema().await.expect("Could not create database schema");
            Arc::new(data_layer)
        },
        StoreKind::Memory => Arc::new(MemoryBatchDataLayer::default()),
    };

    let die: Arc<dyn Die> = Arc::new(settings.rng_seed.map(RandomDie::seeded).unwrap_or_default());

    let roll_service: Arc<dyn RollService> = Arc::new(CoreRollService::new(data_layer.clone(), die));
    let statistics_service: Arc<dyn StatisticsService> = Arc::new(CoreStatisticsService::new(data_layer));

    let app = Router::new()
        // Routes
        .merge(roll_routes::routes(roll_service))
        .merge(statistics_routes::routes(statistics_service))
        // Logging
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO))
        );

    let addr = settings.addr();
    info!("Listening on {} with {:?} store", addr, settings.store);

    axum::Server::bind(&addr)
        .serve(app.into_make_service()).await
        .expect("Server stopped unexpectedly");
}
