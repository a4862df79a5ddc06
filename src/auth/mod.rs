//! Authentication module: session state and the wallet login flow.
//!
//! This module provides:
//! - `Session` / `SessionStore`: the current token and its bound client,
//!   replaced atomically on authentication
//! - `Authenticator`: the challenge/response flow that drives the
//!   anonymous-to-authenticated transition
//!
//! Tokens live only for the running session; nothing is persisted.

pub mod flow;
pub mod session;

pub use flow::{AuthOutcome, AuthStage, Authenticator};
pub use session::{Session, SessionStore};
