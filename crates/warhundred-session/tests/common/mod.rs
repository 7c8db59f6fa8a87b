//! A scripted `Transport` for driving the session without a server.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use warhundred_session::{ApiClient, AuthState, MemoryCredentialStore, SessionService};
use warhundred_transport::{ApiRequest, ApiResponse, Transport, TransportError};

/// What the stub answers to one request.
pub enum Reply {
    /// Answer immediately with this status and body.
    Status(u16, String),
    /// Wait until the `Notify` fires, then answer.
    Held(Arc<Notify>, u16, String),
    /// Fail the exchange as if the network were down.
    Down(String),
}

/// Answers each path from its own queue of replies and records every
/// request it sees. Unscripted paths get a 404.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&request.path)
            .and_then(VecDeque::pop_front);
        self.seen.lock().unwrap().push(request);

        match reply {
            Some(Reply::Status(status, body)) => Ok(ApiResponse {
                status,
                body: body.into_bytes(),
            }),
            Some(Reply::Held(gate, status, body)) => {
                gate.notified().await;
                Ok(ApiResponse {
                    status,
                    body: body.into_bytes(),
                })
            }
            Some(Reply::Down(reason)) => Err(TransportError::Unreachable(reason)),
            None => Ok(ApiResponse {
                status: 404,
                body: Vec::new(),
            }),
        }
    }
}

pub fn login_ok(nickname: &str, token: &str) -> Reply {
    Reply::Status(
        200,
        format!(r#"{{"access_token":"{token}","nickname":"{nickname}"}}"#),
    )
}

/// An `AuthState` over the given transport and a fresh in-memory store.
pub fn auth_state(
    transport: &Arc<ScriptedTransport>,
) -> (AuthState<ScriptedTransport>, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::new());
    let client = ApiClient::new(Arc::clone(transport), store.clone());
    (AuthState::new(SessionService::new(client)), store)
}
