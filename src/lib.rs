//! Client library for the room booking API.
//!
//! Authentication works by proving control of a wallet account: the
//! backend issues a single-use challenge for an address, the wallet signs
//! it, and the signature is exchanged for a bearer token. From then on
//! every resource read goes through the authenticated client, which sends
//! the raw token in the `Authorization` header and namespaces its cache
//! identity by token.
//!
//! Typical setup:
//!
//! ```no_run
//! use std::sync::Arc;
//! use booking_client::{Authenticator, Config, MockWallet, WalletProvider};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(Config::from_env().session_store());
//! let wallet: Option<Arc<dyn WalletProvider>> =
//!     Some(Arc::new(MockWallet::single("0xAbC")));
//!
//! let auth = Authenticator::new(store.clone(), wallet);
//! auth.authenticate().await?;
//!
//! let rooms = store.current().client().fetch_rooms().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod models;
pub mod wallet;

pub use api::{ApiClient, ApiError, ErrorKind};
pub use auth::{AuthOutcome, AuthStage, Authenticator, Session, SessionStore};
pub use cache::RequestCache;
pub use config::Config;
pub use models::{Reservation, Room, TimeInterval};
pub use wallet::{Address, MockWallet, Signature, WalletError, WalletProvider};
