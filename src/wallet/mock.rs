//! Deterministic in-process wallet for tests and non-interactive use.

use async_trait::async_trait;

use super::{Address, Signature, WalletError, WalletProvider};

/// Wallet provider backed by a fixed account list.
///
/// Signatures are derived deterministically from the message and account
/// unless a fixed signature is configured, so two different challenges
/// never collide.
#[derive(Debug, Clone, Default)]
pub struct MockWallet {
    accounts: Vec<Address>,
    fixed_signature: Option<Signature>,
    reject_signing: bool,
}

impl MockWallet {
    /// Create a wallet controlling the given accounts.
    pub fn new(accounts: Vec<Address>) -> Self {
        Self {
            accounts,
            fixed_signature: None,
            reject_signing: false,
        }
    }

    /// Create a wallet with a single account.
    pub fn single(account: impl Into<String>) -> Self {
        Self::new(vec![Address::new(account)])
    }

    /// Always answer `sign` with this signature.
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.fixed_signature = Some(Signature::new(signature));
        self
    }

    /// Simulate the user rejecting the signing request.
    pub fn rejecting(mut self) -> Self {
        self.reject_signing = true;
        self
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.accounts.clone())
    }

    async fn sign(&self, message: &str, account: &Address) -> Result<Signature, WalletError> {
        if self.reject_signing {
            return Err(WalletError::Rejected("signing declined".to_string()));
        }
        if !self.accounts.contains(account) {
            return Err(WalletError::Provider(format!("unknown account {}", account)));
        }
        match &self.fixed_signature {
            Some(signature) => Ok(signature.clone()),
            None => Ok(Signature::new(format!("0xmock:{}:{}", account, message))),
        }
    }
}
