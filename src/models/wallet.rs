// Connected wallet: public key and its SOL balance

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublicKeyError {
    #[error("public key is empty")]
    Empty,
    #[error("public key is not valid base58")]
    NotBase58,
    #[error("public key must decode to 32 bytes, got {0}")]
    WrongLength(usize),
}

/// Base58-encoded 32-byte account address, validated on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey(String);

impl PublicKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PublicKey {
    type Err = PublicKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PublicKeyError::Empty);
        }
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| PublicKeyError::NotBase58)?;
        if bytes.len() != 32 {
            return Err(PublicKeyError::WrongLength(bytes.len()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for PublicKey {
    type Error = PublicKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PublicKey> for String {
    fn from(key: PublicKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Balance keeps its last known value when the key is cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSession {
    pub public_key: Option<PublicKey>,
    pub balance_sol: f64,
}

impl WalletSession {
    /// Replaces the key; returns true when it actually changed.
    pub fn set_public_key(&mut self, key: Option<PublicKey>) -> bool {
        if self.public_key == key {
            return false;
        }
        self.public_key = key;
        true
    }

    pub fn apply_lamports(&mut self, lamports: u64) {
        self.balance_sol = lamports_to_sol(lamports);
    }
}
