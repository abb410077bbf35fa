// Shared test helpers: a local fake Solana RPC node + marketplace, built on axum

#![allow(dead_code)]

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing};
use serde_json::{Value, json};
use solana_dashboard::marketplace_repo::MarketplaceRepo;
use solana_dashboard::rpc_repo::{RpcRepo, build_http_client};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// System program address: a valid 32-byte base58 key.
pub const WALLET_KEY: &str = "11111111111111111111111111111111";

#[derive(Debug, Clone)]
pub enum Reply {
    Result(Value),
    RpcError(i64, &'static str),
    Http(u16),
    Garbage,
}

#[derive(Clone)]
pub struct FakeUpstream {
    replies: HashMap<String, Reply>,
    collections: Reply,
}

pub struct RunningUpstream {
    pub rpc_url: String,
    pub marketplace_url: String,
    /// JSON-RPC requests received, all methods.
    pub calls: Arc<AtomicUsize>,
}

impl RunningUpstream {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn rpc_repo(&self) -> RpcRepo {
        RpcRepo::new(http_client(), self.rpc_url.clone())
    }

    pub fn marketplace_repo(&self) -> MarketplaceRepo {
        MarketplaceRepo::new(http_client(), self.marketplace_url.clone())
    }
}

pub fn http_client() -> reqwest::Client {
    build_http_client(Duration::from_secs(5)).unwrap()
}

pub fn collections(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| {
                json!({
                    "symbol": format!("col_{i}"),
                    "name": format!("Collection {i}"),
                    "image": format!("https://img.example/{i}.png"),
                    "floorPrice": 1_000_000_000u64 * (i as u64 + 1),
                    "volumeAll": 50_000.5 * (i as f64 + 1.0),
                })
            })
            .collect(),
    )
}

impl FakeUpstream {
    /// Every method answers with a plausible result.
    pub fn healthy() -> Self {
        let mut replies = HashMap::new();
        let ctx = json!({ "slot": 12345 });
        let mut ok = |m: &str, v: Value| {
            replies.insert(m.to_string(), Reply::Result(v));
        };
        ok(
            "getLatestBlockhash",
            json!({ "context": ctx, "value": { "blockhash": "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N", "lastValidBlockHeight": 3090 } }),
        );
        ok("getSlot", json!(12345));
        ok("getBlockHeight", json!(11000));
        ok(
            "getEpochInfo",
            json!({ "epoch": 500, "slotIndex": 40, "slotsInEpoch": 100, "absoluteSlot": 12345, "blockHeight": 11000, "transactionCount": 987654 }),
        );
        ok("getBalance", json!({ "context": ctx, "value": 2_500_000_000u64 }));
        ok(
            "getAccountInfo",
            json!({ "context": ctx, "value": { "lamports": 2_500_000_000u64, "owner": WALLET_KEY, "executable": false, "rentEpoch": 0, "data": ["", "base64"], "space": 0 } }),
        );
        ok(
            "getSignaturesForAddress",
            json!([{ "signature": "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW", "slot": 114, "err": null, "memo": null, "blockTime": null, "confirmationStatus": "finalized" }]),
        );
        ok("getVoteAccounts", json!({ "current": [], "delinquent": [] }));
        ok(
            "getRecentPerformanceSamples",
            json!([
                { "slot": 12345, "numTransactions": 1000, "numSlots": 60, "samplePeriodSecs": 2, "numNonVoteTransactions": 400 },
                { "slot": 12285, "numTransactions": 3000, "numSlots": 60, "samplePeriodSecs": 60 }
            ]),
        );
        ok(
            "getSupply",
            json!({ "context": ctx, "value": { "total": 1000, "circulating": 700, "nonCirculating": 300, "nonCirculatingAccounts": [] } }),
        );
        Self {
            replies,
            collections: Reply::Result(collections(12)),
        }
    }

    pub fn with(mut self, method: &str, reply: Reply) -> Self {
        self.replies.insert(method.to_string(), reply);
        self
    }

    pub fn with_collections(mut self, reply: Reply) -> Self {
        self.collections = reply;
        self
    }

    pub async fn spawn(self) -> RunningUpstream {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = (Arc::new(self), calls.clone());
        let app = Router::new()
            .route("/", routing::post(rpc_handler))
            .route("/popular_collections", routing::get(collections_handler))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        RunningUpstream {
            rpc_url: format!("http://{addr}/"),
            marketplace_url: format!("http://{addr}/popular_collections"),
            calls,
        }
    }
}

type FakeState = (Arc<FakeUpstream>, Arc<AtomicUsize>);

fn reply_response(id: Value, reply: &Reply) -> axum::response::Response {
    match reply {
        Reply::Result(v) => Json(json!({ "jsonrpc": "2.0", "id": id, "result": v })).into_response(),
        Reply::RpcError(code, message) => Json(
            json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } }),
        )
        .into_response(),
        Reply::Http(status) => StatusCode::from_u16(*status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Reply::Garbage => "<html>gateway</html>".into_response(),
    }
}

async fn rpc_handler(State((upstream, calls)): State<FakeState>, Json(body): Json<Value>) -> axum::response::Response {
    calls.fetch_add(1, Ordering::SeqCst);
    let id = body.get("id").cloned().unwrap_or(Value::Null);
    let method = body.get("method").and_then(Value::as_str).unwrap_or_default();
    match upstream.replies.get(method) {
        Some(reply) => reply_response(id, reply),
        None => reply_response(id, &Reply::RpcError(-32601, "Method not found")),
    }
}

async fn collections_handler(State((upstream, _)): State<FakeState>) -> axum::response::Response {
    match &upstream.collections {
        Reply::Result(v) => Json(v.clone()).into_response(),
        other => reply_response(Value::Null, other),
    }
}

/// URL of a port nothing listens on (connection refused).
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}
