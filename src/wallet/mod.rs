//! Wallet provider abstraction.
//!
//! The authentication flow proves identity by having an external wallet
//! sign a server-issued challenge. The wallet is injected as a capability
//! (`WalletProvider`) rather than looked up ambiently, so tests and
//! non-interactive contexts can substitute their own (see `MockWallet`).

pub mod mock;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use mock::MockWallet;

/// Wallet account address. Opaque to this crate; sourced from and
/// validated by the wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signature produced by the wallet over a challenge string. Opaque;
/// verified server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    pub fn new(signature: impl Into<String>) -> Self {
        Self(signature.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// The wallet has no usable accounts
    #[error("Wallet has no accounts")]
    NoAccounts,

    /// The user rejected the request in the wallet UI
    #[error("Wallet request rejected: {0}")]
    Rejected(String),

    /// Any other provider-side failure
    #[error("Wallet provider error: {0}")]
    Provider(String),
}

/// External wallet capable of listing accounts and signing arbitrary
/// messages.
///
/// `sign` may suspend indefinitely while the user approves the request
/// out of process; callers must not assume it completes promptly.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// List the accounts this wallet controls.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Sign `message` with the key behind `account`.
    async fn sign(&self, message: &str, account: &Address) -> Result<Signature, WalletError>;
}
