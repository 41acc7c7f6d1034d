//! Main entry point for the backend server.
//!
//! Initializes the actor system, configures application state, and launches
//! the HTTP server with the WebSocket endpoint for the real-time 1v1 mode.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use server::auth::LocalVerifier;
use server::match_session::server::MatchManager;
use server::matchmaking::server::MatchmakingServer;
use server::stats::StatsRecorder;

pub mod config;
mod game;
mod server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::init();

    // Start the StatsRecorder actor (boundary to the stats/badge service).
    let stats = StatsRecorder::new().start();

    // Start the MatchManager actor (spawns and tracks live matches).
    let match_manager = MatchManager::new(stats).start();

    // Start the MatchmakingServer actor (queues and pairing).
    let matchmaking_addr = MatchmakingServer::new(match_manager).start();

    // Shared application state for the WebSocket handshake handler.
    let state = web::Data::new(server::state::AppState::new(
        matchmaking_addr,
        Arc::new(LocalVerifier),
    ));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080u16);

    // Start the HTTP server with the WebSocket endpoint.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
