/// WebSocket trainer route.
///
/// Each connection owns one puzzle session. The socket task alternates
/// between client messages (board gestures, retry/next buttons) and a
/// one-second interval that drives the puzzle clock, and pushes a fresh
/// session view to the client after every change.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    Extension,
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use puzzle_trainer::board::relay_gesture;
use puzzle_trainer::session::PuzzleResult;
use puzzle_trainer::{Phase, PuzzleStore, Session, SessionView, Tick, TrainerConfig};
use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::config::Config;

// ---- Message types ----

/// Client → Server messages
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Move { from: String, to: String },
    Retry,
    Next,
    Load { index: usize },
    State,
}

/// Server → Client messages
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    State {
        view: SessionView,
    },
    #[serde(rename = "puzzle_result")]
    Resolved {
        puzzle_id: u32,
        result: PuzzleResult,
    },
    Error {
        message: String,
    },
}

fn state(session: &Session) -> ServerMessage {
    ServerMessage::State {
        view: SessionView::of(session),
    }
}

/// Apply one client message to the session and collect the replies.
pub fn apply(session: &mut Session, msg: ClientMessage) -> Vec<ServerMessage> {
    let mut replies = Vec::new();

    match msg {
        ClientMessage::Move { from, to } => {
            let puzzle_id = session.puzzle().map(|p| p.id);
            match relay_gesture(session, &from, &to) {
                Ok(outcome) => {
                    debug!(?outcome, "Move handled");
                    if let (Some(puzzle_id), Some(result)) = (puzzle_id, outcome.resolution()) {
                        replies.push(ServerMessage::Resolved { puzzle_id, result });
                    }
                }
                Err(e) => {
                    replies.push(ServerMessage::Error {
                        message: e.to_string(),
                    });
                    return replies;
                }
            }
        }
        ClientMessage::Retry => {
            session.retry();
        }
        ClientMessage::Next => {
            session.advance();
        }
        ClientMessage::Load { index } => {
            session.load(index);
        }
        ClientMessage::State => {}
    }

    replies.push(state(session));
    replies
}

/// Advance the session clock by one second.
pub fn on_tick(session: &mut Session) -> Vec<ServerMessage> {
    match session.tick() {
        Tick::Idle => Vec::new(),
        Tick::Running { .. } => vec![state(session)],
        Tick::Expired => {
            let mut replies = Vec::new();
            if let (Phase::TimedOut, Some(puzzle)) = (session.phase(), session.puzzle()) {
                replies.push(ServerMessage::Resolved {
                    puzzle_id: puzzle.id,
                    result: PuzzleResult::TimedOut,
                });
            }
            replies.push(state(session));
            replies
        }
    }
}

fn handle_text(session: &mut Session, text: &str) -> Vec<ServerMessage> {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => apply(session, msg),
        Err(e) => vec![ServerMessage::Error {
            message: format!("Invalid message: {}", e),
        }],
    }
}

// ---- WebSocket handler ----

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Extension(store): Extension<Arc<PuzzleStore>>,
    Extension(config): Extension<Config>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, store, config.trainer))
}

async fn handle_socket(socket: WebSocket, store: Arc<PuzzleStore>, trainer: TrainerConfig) {
    let (mut sender, mut receiver) = socket.split();

    let mut session = Session::new(store, trainer);
    session.load(0);
    info!("Trainer session started");

    if send_all(&mut sender, vec![state(&session)]).await.is_err() {
        return;
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        let starts = session.timer().starts();
        let replies = tokio::select! {
            msg = receiver.next() => match msg {
                Some(Ok(Message::Text(t))) => handle_text(&mut session, t.as_str()),
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    debug!(error = %e, "WebSocket receive failed");
                    break;
                }
            },
            _ = ticker.tick() => on_tick(&mut session),
        };

        // A fresh countdown gets a full first second.
        if session.timer().starts() != starts {
            ticker.reset();
        }

        if send_all(&mut sender, replies).await.is_err() {
            break;
        }
    }

    info!(tally = ?session.tally(), "Trainer session closed");
}

async fn send_all(
    sender: &mut SplitSink<WebSocket, Message>,
    messages: Vec<ServerMessage>,
) -> Result<(), axum::Error> {
    for msg in messages {
        let text = serde_json::to_string(&msg).map_err(axum::Error::new)?;
        sender.send(Message::Text(text.into())).await?;
    }
    Ok(())
}
