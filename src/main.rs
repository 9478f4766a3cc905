use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod db;
mod error;
mod lolesports;
mod sync;

use api::AppState;
use config::Config;
use db::Database;
use lolesports::{EsportsApi, EsportsClient};
use sync::{
    startup_barrier, LeagueFetcher, LiveFetcher, ScheduleFetcher, SyncTask, TeamFetcher,
    TournamentFetcher,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;
    info!("Starting esports-sync in {:?} environment", config.environment);

    // Open database
    let db = Database::open(&config.database_url)?;
    info!("Database opened: {}", config.database_url);

    let api: Arc<dyn EsportsApi> = Arc::new(EsportsClient::new(
        &config.api_url,
        &config.api_key,
        &config.locale,
        config.http_timeout(),
    )?);

    // Tournaments and schedules are requested per stored league, so their
    // first tick waits for the first league tick.
    let (leagues_ready, leagues_gate) = startup_barrier();

    SyncTask::new(LeagueFetcher::new(api.clone()), db.clone(), config.leagues_period())
        .signals(leagues_ready)
        .spawn();
    SyncTask::new(
        TournamentFetcher::new(api.clone(), db.clone()),
        db.clone(),
        config.tournaments_period(),
    )
    .after(leagues_gate.clone())
    .spawn();
    SyncTask::new(
        ScheduleFetcher::new(
            api.clone(),
            db.clone(),
            config.schedule_page_delay(),
            config.schedule_max_pages,
        ),
        db.clone(),
        config.schedule_period(),
    )
    .after(leagues_gate)
    .spawn();
    SyncTask::new(TeamFetcher::new(api.clone()), db.clone(), config.teams_period()).spawn();
    SyncTask::new(LiveFetcher::new(api), db.clone(), config.live_period()).spawn();

    // Read API (blocks until shutdown)
    let app = api::router(AppState { db });
    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Read API listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
