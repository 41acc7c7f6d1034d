//! HTTP and WebSocket routing configuration.
//!
//! A single persistent WebSocket endpoint carries the whole real-time
//! protocol: queueing, match events, and answer submission all run over
//! one authenticated connection per player.

use actix_web::web;

use crate::server::session::ws_connect;

/// Configure the application's WebSocket route.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws").to(ws_connect));
}
