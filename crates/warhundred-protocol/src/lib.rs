//! Wire protocol for the War Hundred client.
//!
//! This crate defines the "language" the client speaks with the game's
//! HTTP API:
//!
//! - **Types** ([`LoginRequest`], [`ZonePlayer`], [`PlayerProfile`], etc.):
//!   the request and response bodies of every endpoint.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those bodies are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw HTTP exchanges) and
//! session (who the player is). It doesn't know about connections or
//! tokens; it only knows how to serialize and deserialize bodies.
//!
//! ```text
//! Transport (bytes) → Protocol (typed bodies) → Session (player identity)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

// `pub use` makes items from submodules available at the crate root.
// Users can write `use warhundred_protocol::ZonePlayer` instead of
// `use warhundred_protocol::types::ZonePlayer`.

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    AccountId, ApiErrorBody, ChatMessage, LoginRequest, LoginResponse,
    LogoutRequest, PlayerProfile, PlayerStatistics, Rank, RegisterRequest,
    RegisterResponse, ZonePlayer,
};
