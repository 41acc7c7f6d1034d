//! WebSocket session handler for one connected player.
//!
//! This actor owns exactly one connection for the lifetime of that
//! connection. It authenticates at handshake time, relays client events to
//! the matchmaking server or the player's current match, and serializes
//! server events back to the client. On disconnect it fans out removal so
//! the queue and any live match react immediately.

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::debug;
use std::borrow::Cow;
use uuid::Uuid;

use super::anti_spam::AntiSpamState;
use super::match_session::messages::{
    MatchAssigned, MatchOver, ParticipantDisconnected, SubmitAnswer,
};
use super::match_session::server::MatchSession;
use super::matchmaking::messages::{Disconnect, JoinQueue, LeaveQueue};
use super::matchmaking::server::MatchmakingServer;
use super::matchmaking::types::{GameType, PlayerInfo};
use super::protocol::{ClientEvent, ServerEvent};
use super::ws_error::{http_error_response, ws_error_message};

pub struct PlayerSession {
    player: PlayerInfo,
    matchmaking: Addr<MatchmakingServer>,
    /// Match this session is bound to, if any. `idle` and `queued` are
    /// tracked by the matchmaking server; only match membership lives here
    /// because answer routing needs it synchronously.
    current_match: Option<(Uuid, Addr<MatchSession>)>,
    anti_spam: AntiSpamState,
}

impl PlayerSession {
    pub fn new(player: PlayerInfo, matchmaking: Addr<MatchmakingServer>) -> Self {
        Self {
            player,
            matchmaking,
            current_match: None,
            anti_spam: AntiSpamState::new(),
        }
    }

    fn join_queue(&self, game_type: GameType, ctx: &mut ws::WebsocketContext<Self>) {
        self.matchmaking.do_send(JoinQueue {
            player: self.player.clone(),
            addr: ctx.address(),
            game_type,
        });
    }

    /// Send a named error frame unless the same code was just sent.
    fn send_error(&mut self, ctx: &mut ws::WebsocketContext<Self>, code: &str, message: &str) {
        let user = self.player.id.to_string();
        if self.anti_spam.should_send_error(code, &user) {
            ctx.text(ws_error_message(code, message, None));
        }
    }

    fn send_ban_and_close(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let remaining = self.anti_spam.ban_remaining_secs();
        ctx.text(ws_error_message(
            "BANNED",
            "You have been banned for spamming. Please try again later.",
            Some(&remaining.to_string()),
        ));
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Policy,
            description: Some("Banned for spam".into()),
        }));
        ctx.stop();
    }

    fn handle_event(&mut self, event: ClientEvent, ctx: &mut ws::WebsocketContext<Self>) {
        match event {
            ClientEvent::JoinQueue { game_type }
            | ClientEvent::RequestNewOpponent { game_type } => {
                self.join_queue(game_type, ctx);
            }
            ClientEvent::LeaveQueue { game_type } => {
                self.matchmaking.do_send(LeaveQueue {
                    user: self.player.id,
                    game_type,
                });
            }
            ClientEvent::SubmitAnswer {
                match_id,
                answer,
                time_taken,
            } => match self.current_match.clone() {
                None => {
                    self.send_error(ctx, "NOT_IN_MATCH", "You are not in a match.");
                }
                Some((current_id, _)) if current_id != match_id => {
                    self.send_error(
                        ctx,
                        "FOREIGN_MATCH",
                        "Submission for a match you are not part of.",
                    );
                }
                Some((_, addr)) => {
                    addr.do_send(SubmitAnswer {
                        user: self.player.id,
                        answer,
                        time_taken,
                    });
                }
            },
            ClientEvent::Ping => {
                // Keepalive; nothing to do.
            }
        }
    }
}

impl Actor for PlayerSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        debug!(
            "[Session] {} ({}) connected",
            self.player.username, self.player.id
        );
    }

    /// Connection gone: leave the queue and tell any live match.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        debug!(
            "[Session] {} ({}) disconnected",
            self.player.username, self.player.id
        );
        self.matchmaking.do_send(Disconnect {
            user: self.player.id,
        });
        if let Some((_, match_addr)) = self.current_match.take() {
            match_addr.do_send(ParticipantDisconnected {
                user: self.player.id,
            });
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                let user = self.player.id.to_string();
                if self.anti_spam.record_request(&user) {
                    self.send_ban_and_close(ctx);
                    return;
                }
                match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => self.handle_event(event, ctx),
                    Err(_) => {
                        self.send_error(ctx, "INVALID_EVENT", "Invalid client message");
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(_)) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<ServerEvent> for PlayerSession {
    type Result = ();

    /// Relays server events to the client.
    fn handle(&mut self, msg: ServerEvent, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                debug!("[Session] failed to serialize server event: {}", e);
                ctx.text(ws_error_message("INTERNAL", "Internal server error", None));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

impl Handler<MatchAssigned> for PlayerSession {
    type Result = ();

    fn handle(&mut self, msg: MatchAssigned, _ctx: &mut Self::Context) {
        self.current_match = Some((msg.match_id, msg.addr));
        self.anti_spam.reset_error_suppression();
    }
}

impl Handler<MatchOver> for PlayerSession {
    type Result = ();

    fn handle(&mut self, msg: MatchOver, _ctx: &mut Self::Context) {
        if matches!(&self.current_match, Some((id, _)) if *id == msg.match_id) {
            self.current_match = None;
        }
    }
}

/// WebSocket endpoint for the real-time channel.
///
/// Expects query parameters: `token` (bearer token shared with the REST
/// API, required) and `username` (optional display-name override).
/// Unauthenticated connections are rejected at handshake.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let mut token: Option<String> = None;
    let mut username = String::new();

    // Parse query parameters for token and username.
    for kv in req.query_string().split('&') {
        let mut split = kv.split('=');
        match (split.next(), split.next()) {
            (Some("token"), Some(value)) => {
                token = Some(value.to_string());
            }
            (Some("username"), Some(name)) => {
                username = urlencoding::decode(name)
                    .unwrap_or_else(|_| Cow::Borrowed(""))
                    .into_owned();
            }
            _ => {}
        }
    }

    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => {
            let err = super::auth::AuthError::MissingToken;
            return Ok(http_error_response(
                err.code(),
                &err.to_string(),
                None,
                actix_web::http::StatusCode::UNAUTHORIZED,
            ));
        }
    };

    let mut player = match data.verifier.verify(&token) {
        Ok(player) => player,
        Err(err) => {
            return Ok(http_error_response(
                err.code(),
                &err.to_string(),
                None,
                actix_web::http::StatusCode::UNAUTHORIZED,
            ));
        }
    };
    if !username.is_empty() {
        player.username = username;
    }

    ws::start(
        PlayerSession::new(player, data.matchmaking_addr.clone()),
        &req,
        stream,
    )
}
