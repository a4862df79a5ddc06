//! Wallet challenge/response authentication flow.
//!
//! The flow proves control of a wallet account in three steps: request a
//! single-use challenge for the account's address, have the wallet sign
//! it, then exchange the signature for a bearer token. A successful run
//! replaces the session through `SessionStore::authenticate`.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use reqwest::header;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::SessionStore;
use crate::wallet::{Address, Signature, WalletProvider};

/// Stage of an authentication attempt, in order. Logged as each
/// transition happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    Idle,
    ProviderCheck,
    ChallengeRequested,
    Signing,
    Authorising,
    Authenticated,
    Failed,
}

/// Terminal result of an attempt that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The session now holds a bearer token.
    Authenticated,
    /// No wallet provider is present; the flow stopped before any
    /// network call. Not an error.
    ProviderUnavailable,
}

/// Drives the challenge/response flow against the auth endpoints.
///
/// Holds the unauthenticated client (via the store) for the challenge and
/// authorise calls. Attempts are serialized: a second call waits for the
/// in-flight one rather than interleaving.
pub struct Authenticator {
    store: Arc<SessionStore>,
    provider: Option<Arc<dyn WalletProvider>>,
    attempt: Mutex<()>,
}

impl Authenticator {
    pub fn new(store: Arc<SessionStore>, provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self {
            store,
            provider,
            attempt: Mutex::new(()),
        }
    }

    /// Run one authentication attempt.
    ///
    /// Returns `Ok(AuthOutcome::ProviderUnavailable)` when no wallet is
    /// present. Every other failure surfaces as an error with a
    /// displayable message; the session is left at its prior value.
    pub async fn authenticate(&self) -> Result<AuthOutcome> {
        debug!(stage = ?AuthStage::Idle, "authentication attempt queued");
        let _attempt = self.attempt.lock().await;

        match self.run().await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!(stage = ?AuthStage::Failed, error = %err, "authentication attempt failed");
                Err(err)
            }
        }
    }

    async fn run(&self) -> Result<AuthOutcome> {
        debug!(stage = ?AuthStage::ProviderCheck, "checking wallet provider");
        let provider = match &self.provider {
            Some(provider) => provider,
            None => {
                info!("no wallet provider available, skipping authentication");
                return Ok(AuthOutcome::ProviderUnavailable);
            }
        };

        let accounts = provider
            .request_accounts()
            .await
            .context("Failed to request wallet accounts")?;
        // Pick first account for now
        let account = match accounts.first() {
            Some(account) => account.clone(),
            None => bail!("Wallet returned no accounts"),
        };
        debug!(account = %account, "selected wallet account");

        // 1. Request auth challenge
        debug!(stage = ?AuthStage::ChallengeRequested, "requesting challenge");
        let challenge: ChallengeResponse = self
            .store
            .api()
            .post(
                "/auth/challenge",
                &ChallengeRequest {
                    address: account.clone(),
                },
            )
            .await
            .context("Failed to request auth challenge")?;

        // 2. Request account signature
        debug!(stage = ?AuthStage::Signing, "awaiting wallet signature");
        let signature = provider
            .sign(&challenge.challenge, &account)
            .await
            .context("Failed to sign auth challenge")?;

        // 3. Finalise authentication process
        debug!(stage = ?AuthStage::Authorising, "submitting signature");
        let response = self
            .store
            .api()
            .post_raw(
                "/auth/authorise",
                &AuthoriseRequest {
                    address: account,
                    signature,
                },
            )
            .await
            .context("Failed to authorise")?;

        let token = response
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if token.is_empty() {
            bail!("Auth failed");
        }

        self.store.authenticate(token);
        info!(stage = ?AuthStage::Authenticated, "authentication complete");
        Ok(AuthOutcome::Authenticated)
    }
}

// Wire types for the auth endpoints

#[derive(Debug, Serialize)]
struct ChallengeRequest {
    address: Address,
}

#[derive(Debug, Deserialize)]
struct ChallengeResponse {
    challenge: String,
}

#[derive(Debug, Serialize)]
struct AuthoriseRequest {
    address: Address,
    signature: Signature,
}
