// Server-rendered dashboard page. Pure function of the view model.

use crate::models::{DashboardViewModel, NftCollection};
use std::fmt::Write;

/// Rows shown in the NFT collections table.
pub const NFT_TABLE_ROWS: usize = 10;

const LOADER: &str = r#"<div class="loader" role="status">Loading...</div>"#;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn opt_number(v: Option<f64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

fn card(out: &mut String, title: &str, body: &str) {
    let _ = write!(
        out,
        r#"<section class="card"><h2>{}</h2><div class="card-content">{}</div></section>"#,
        escape_html(title),
        body
    );
}

fn nft_row(out: &mut String, c: &NftCollection) {
    let image = c
        .image
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="/" width="40" height="40">"#, escape_html(src)))
        .unwrap_or_default();
    let _ = write!(
        out,
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        image,
        escape_html(&c.name),
        opt_number(c.floor_price),
        opt_number(c.volume_all),
    );
}

/// Cards and NFT table, or the loader while network health is still the zero placeholder.
pub fn render_dashboard_body(vm: &DashboardViewModel) -> String {
    let mut out = String::new();
    if let Some(err) = &vm.error {
        let _ = write!(out, r#"<p class="error">{}</p>"#, escape_html(err));
    }
    if vm.is_loading() {
        out.push_str(LOADER);
        return out;
    }

    out.push_str(r#"<div class="grid">"#);
    card(
        &mut out,
        "SOL Supply",
        &format!(
            "<p>Circulating: {}</p><p>Non-Circulating: {}</p>",
            vm.sol_supply.circulating, vm.sol_supply.non_circulating
        ),
    );
    card(
        &mut out,
        "Current Epoch",
        &format!(
            "<p>Slot Range: {} - {}</p><p>Time Remaining: {}</p>",
            vm.epoch.slot_range[0],
            vm.epoch.slot_range[1],
            escape_html(&vm.epoch.time_remaining)
        ),
    );
    card(
        &mut out,
        "Network Health",
        &format!(
            "<p>Block Height: {}</p><p>Slot Height: {}</p>",
            vm.network.block_height, vm.network.slot_height
        ),
    );
    card(&mut out, "TPS", &format!("<p>{}</p>", vm.network.tps));

    let mut table = String::from(
        "<table><thead><tr><th>Symbol</th><th>Name</th><th>Floor Price</th><th>Volume</th></tr></thead><tbody>",
    );
    for c in vm.top_collections(NFT_TABLE_ROWS) {
        nft_row(&mut table, c);
    }
    table.push_str("</tbody></table>");
    card(&mut out, "Solana NFTs", &table);
    out.push_str("</div>");
    out
}

/// Full HTML document. The script keeps the page live over /ws/dashboard.
pub fn render_dashboard_page(vm: &DashboardViewModel) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Solana Dashboard</title>
<style>
body {{ font-family: sans-serif; background: #0B2447; color: #fff; margin: 0; padding: 1rem; }}
.grid {{ display: grid; grid-template-columns: repeat(4, 1fr); gap: 2rem; }}
.card {{ background: #19376D; border-radius: 8px; padding: 1rem; }}
.card:last-child {{ grid-column: span 4; }}
.error {{ color: #ef4444; text-align: center; }}
img {{ border-radius: 25px; }}
.wallet {{ display: flex; gap: 0.5rem; justify-content: flex-end; }}
</style>
</head>
<body>
<h1>Solana Dashboard</h1>
<form id="wallet-form" class="wallet">
<input id="wallet-key" name="publicKey" placeholder="Wallet public key" autocomplete="off">
<button type="submit" id="wallet-connect">Connect Wallet</button>
<button type="button" id="wallet-disconnect">Disconnect</button>
</form>
<p id="wallet">Wallet: not connected</p>
<main id="dashboard">{body}</main>
<script>
(function () {{
  var proto = location.protocol === "https:" ? "wss://" : "ws://";
  var ws = new WebSocket(proto + location.host + "/ws/dashboard");
  ws.onmessage = function (ev) {{
    var msg = JSON.parse(ev.data);
    if (msg.type === "dashboard") {{ document.getElementById("dashboard").innerHTML = msg.html; }}
    if (msg.type === "wallet") {{ showWallet(msg); }}
    if (msg.type === "error") {{ walletLine.textContent = "Wallet: " + msg.error; }}
  }};
  var walletLine = document.getElementById("wallet");
  function showWallet(session) {{
    walletLine.textContent = session.publicKey
      ? "Wallet balance: " + session.balanceSol + " SOL"
      : "Wallet: not connected (last balance " + session.balanceSol + " SOL)";
  }}
  function send(frame) {{
    if (ws.readyState === WebSocket.OPEN) {{ ws.send(JSON.stringify(frame)); }}
  }}
  window.connectWallet = function (publicKey) {{ send({{ type: "connectWallet", publicKey: publicKey }}); }};
  window.disconnectWallet = function () {{ send({{ type: "disconnectWallet" }}); }};
  document.getElementById("wallet-form").addEventListener("submit", function (ev) {{
    ev.preventDefault();
    window.connectWallet(document.getElementById("wallet-key").value.trim());
  }});
  document.getElementById("wallet-disconnect").addEventListener("click", function () {{
    window.disconnectWallet();
  }});
}})();
</script>
</body>
</html>
"#,
        body = render_dashboard_body(vm)
    )
}
