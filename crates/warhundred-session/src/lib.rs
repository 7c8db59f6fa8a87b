//! Who the player is: credentials, login/logout, and the session state
//! machine.
//!
//! # Layers
//!
//! ```text
//! AuthState        reactive Session, one operation at a time
//!    └─ SessionService   login / two-phase logout / register
//!          └─ ApiClient        Transport + bearer token from the store
//!                └─ CredentialStore   the single persisted token
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use warhundred_session::{ApiClient, AuthState, MemoryCredentialStore, SessionService};
//! use warhundred_transport::HttpTransport;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(HttpTransport::new("http://localhost:8000", Duration::from_secs(10))?);
//! let client = ApiClient::new(transport, Arc::new(MemoryCredentialStore::new()));
//! let auth = AuthState::new(SessionService::new(client));
//!
//! auth.login("alice", "secret").await?;
//! println!("logged in as {:?}", auth.user());
//!
//! auth.logout().await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod error;
mod service;
mod session;
mod store;

pub use auth::{AuthState, PendingOperation};
pub use client::ApiClient;
pub use error::SessionError;
pub use service::{LoginGrant, LogoutTicket, SessionService};
pub use session::{AuthPhase, Session};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, TOKEN_KEY};
