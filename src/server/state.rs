// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the matchmaking actor address and the injected credential
//! verifier. Used to share state between the WebSocket handshake handler
//! and the actor system.

use actix::Addr;
use std::sync::Arc;

use crate::server::auth::CredentialVerifier;
use crate::server::matchmaking::server::MatchmakingServer;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the matchmaking server actor (queues and pairing).
    pub matchmaking_addr: Addr<MatchmakingServer>,
    /// Token verification shared with the REST API.
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    /// Create a new AppState with the given actor address and verifier.
    pub fn new(
        matchmaking_addr: Addr<MatchmakingServer>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        AppState {
            matchmaking_addr,
            verifier,
        }
    }
}
