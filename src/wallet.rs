// Wallet balance effect: re-derive the SOL balance when the connected key changes.
// With no key, nothing is fetched and the last balance stays on display.

use crate::error::UpstreamError;
use crate::models::{PublicKey, WalletSession};
use crate::rpc_repo::RpcRepo;

/// Fetches the balance for the session's key. Returns `Ok(false)` without any call when no key is set.
pub async fn refresh_balance(
    session: &mut WalletSession,
    rpc: &RpcRepo,
) -> Result<bool, UpstreamError> {
    let Some(key) = session.public_key.clone() else {
        return Ok(false);
    };
    let lamports = rpc.get_account_lamports(&key).await?;
    session.apply_lamports(lamports);
    tracing::debug!(public_key = %key, balance_sol = session.balance_sol, "wallet balance refreshed");
    Ok(true)
}

/// Sets the connected key; when it changed to a present value the balance is refetched.
/// Returns whether the session changed.
pub async fn connect(
    session: &mut WalletSession,
    key: Option<PublicKey>,
    rpc: &RpcRepo,
) -> Result<bool, UpstreamError> {
    if !session.set_public_key(key) {
        return Ok(false);
    }
    refresh_balance(session, rpc).await?;
    Ok(true)
}
