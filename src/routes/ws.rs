// WebSocket handler: live dashboard updates plus a per-connection wallet session

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::broadcast;
use tokio::time::{Duration, timeout};

use super::AppState;
use super::error::INVALID_PUBLIC_KEY;
use crate::models::{DashboardViewModel, PublicKey, WalletSession};
use crate::render;
use crate::rpc_repo::RpcRepo;
use crate::wallet;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

const WALLET_FETCH_ERROR: &str = "An error occurred while fetching the wallet balance";

/// Decrements the dashboard connection count on drop (connect = +1, drop = -1).
struct DashboardConnectionGuard(Arc<AtomicUsize>);

impl Drop for DashboardConnectionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum ServerFrame<'a> {
    Dashboard {
        view: &'a DashboardViewModel,
        html: String,
    },
    Wallet(&'a WalletSession),
    Error {
        error: &'a str,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum ClientFrame {
    ConnectWallet {
        #[serde(rename = "publicKey")]
        public_key: String,
    },
    DisconnectWallet,
}

type WsSender = SplitSink<WebSocket, Message>;

/// Sends one frame; false when the client is gone or too slow.
async fn send_frame(sender: &mut WsSender, frame: &ServerFrame<'_>) -> anyhow::Result<bool> {
    let json = serde_json::to_string(frame)?;
    let r = timeout(WS_SEND_TIMEOUT, sender.send(Message::Text(json.into()))).await;
    Ok(matches!(r, Ok(Ok(()))))
}

async fn send_dashboard(sender: &mut WsSender, vm: &DashboardViewModel) -> anyhow::Result<bool> {
    let frame = ServerFrame::Dashboard {
        view: vm,
        html: render::render_dashboard_body(vm),
    };
    send_frame(sender, &frame).await
}

enum WalletAction {
    /// Re-fetch for the current key, if any.
    Refresh,
    /// Client connected (Some) or disconnected (None) a wallet.
    SetKey(Option<PublicKey>),
}

/// Applies `action` to the session and pushes the wallet frame when something changed.
async fn push_wallet(
    sender: &mut WsSender,
    session: &mut WalletSession,
    rpc: &RpcRepo,
    action: WalletAction,
) -> anyhow::Result<bool> {
    let updated = match action {
        WalletAction::SetKey(key) => wallet::connect(session, key, rpc).await,
        WalletAction::Refresh => wallet::refresh_balance(session, rpc).await,
    };
    match updated {
        Ok(true) => send_frame(sender, &ServerFrame::Wallet(session)).await,
        Ok(false) => Ok(true),
        Err(e) => {
            tracing::warn!(error = %e, kind = e.kind(), operation = "wallet_balance", "wallet balance fetch failed");
            send_frame(
                sender,
                &ServerFrame::Error {
                    error: WALLET_FETCH_ERROR,
                },
            )
            .await
        }
    }
}

pub(super) async fn ws_dashboard(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        let mut rx = state.updates_tx.subscribe();
        if let Err(e) = stream_dashboard(socket, &mut rx, state).await {
            tracing::info!("Dashboard stream error: {}", e);
        }
    })
}

async fn stream_dashboard(
    socket: WebSocket,
    rx: &mut broadcast::Receiver<DashboardViewModel>,
    state: AppState,
) -> anyhow::Result<()> {
    let conn_count = state.dashboard_connections.clone();
    conn_count.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    let _guard = DashboardConnectionGuard(conn_count);
    tracing::info!("Client connected to dashboard stream");

    let (mut sender, mut receiver) = socket.split();
    let mut session = WalletSession::default();

    let current = state.view_rx.borrow().clone();
    if !send_dashboard(&mut sender, &current).await? {
        return Ok(());
    }

    // First ping after one full interval; the dashboard frame above already proved liveness.
    let mut ping_interval = tokio::time::interval_at(
        tokio::time::Instant::now() + WS_PING_INTERVAL,
        WS_PING_INTERVAL,
    );
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(vm) => {
                        if !send_dashboard(&mut sender, &vm).await? {
                            break;
                        }
                        if !push_wallet(&mut sender, &mut session, &state.gateway_rpc, WalletAction::Refresh).await? {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("WebSocket /ws/dashboard client lagged, skipped {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            incoming = receiver.next() => {
                let text = match incoming {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(_)) => continue,
                };
                let keep_going = match serde_json::from_str::<ClientFrame>(text.as_str()) {
                    Ok(ClientFrame::ConnectWallet { public_key }) => match public_key.parse::<PublicKey>() {
                        Ok(key) => push_wallet(&mut sender, &mut session, &state.gateway_rpc, WalletAction::SetKey(Some(key))).await?,
                        Err(e) => {
                            tracing::debug!(error = %e, "rejected wallet public key");
                            send_frame(&mut sender, &ServerFrame::Error { error: INVALID_PUBLIC_KEY }).await?
                        }
                    },
                    Ok(ClientFrame::DisconnectWallet) => {
                        push_wallet(&mut sender, &mut session, &state.gateway_rpc, WalletAction::SetKey(None)).await?
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "ignoring unknown client message");
                        true
                    }
                };
                if !keep_going {
                    break;
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, sender.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}
