// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - WebSocket routing and per-connection session actors
//! - Credential verification at the handshake
//! - Matchmaking (per-game-type FIFO queues and pairing)
//! - Match orchestration (round lifecycle, resolution, scoring)
//! - Boundary to the stats/badge service

pub mod anti_spam;
pub mod auth;
pub mod match_session;
pub mod matchmaking;
pub mod protocol;
pub mod router;
pub mod session;
pub mod state;
pub mod stats;
pub mod ws_error;
