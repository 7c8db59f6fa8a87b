//! The session service: the network half of login, logout and register.
//!
//! Every operation reports failure as a *list* of errors, because the
//! backend may reject a single request for several reasons at once
//! ("username taken", "password too short") and the entry form shows
//! them all.

use warhundred_protocol::{
    ApiErrorBody, LoginRequest, LoginResponse, LogoutRequest, ProtocolError, RegisterRequest,
    RegisterResponse,
};
use warhundred_transport::{ApiRequest, ApiResponse, Transport};

use crate::{ApiClient, SessionError};

/// What a successful login hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub nickname: String,
    pub token: String,
}

/// Proof that phase 1 of a logout has run.
///
/// Created by [`SessionService::begin_logout`] after the credential is
/// gone from the store; it carries what phase 2 needs to notify the
/// server. The only way to get one is to clear the store first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutTicket {
    nickname: Option<String>,
    token: Option<String>,
}

impl LogoutTicket {
    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    /// The token that was in the store when logout began.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Performs the session's network calls and keeps the credential store
/// in step with them.
pub struct SessionService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for SessionService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Transport> SessionService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// On success the token is written to the store before this returns.
    /// On failure the store is not touched.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginGrant, Vec<SessionError>> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.post("/login", &body).await?;

        let grant: LoginResponse = self
            .client
            .decode(&response)
            .map_err(|e| vec![SessionError::from(e)])?;
        if grant.access_token.is_empty() {
            let invalid = ProtocolError::InvalidMessage(
                "login response carried an empty access token".into(),
            );
            return Err(vec![SessionError::from(invalid)]);
        }

        self.client.store().set(&grant.access_token);
        tracing::info!(nickname = %grant.nickname, "login accepted, credential stored");
        Ok(LoginGrant {
            nickname: grant.nickname,
            token: grant.access_token,
        })
    }

    /// Phase 1 of logout: forget the credential. Always succeeds, never
    /// waits.
    pub fn begin_logout(&self, nickname: Option<&str>) -> LogoutTicket {
        let store = self.client.store();
        let token = store.get();
        store.clear();
        tracing::debug!(nickname, had_token = token.is_some(), "credential cleared");
        LogoutTicket {
            nickname: nickname.map(str::to_owned),
            token,
        }
    }

    /// Phase 2 of logout: tell the server, best effort.
    ///
    /// Without a nickname there is nobody to announce, so no request is
    /// sent and the phase succeeds.
    pub async fn finish_logout(&self, ticket: LogoutTicket) -> Result<(), Vec<SessionError>> {
        let Some(nickname) = ticket.nickname else {
            tracing::debug!("logout without nickname, skipping server notification");
            return Ok(());
        };
        let body = LogoutRequest {
            nickname,
            access_token: ticket.token,
        };
        self.post("/logout", &body).await?;
        Ok(())
    }

    /// Both logout phases back to back.
    pub async fn logout(&self, nickname: Option<&str>) -> Result<(), Vec<SessionError>> {
        let ticket = self.begin_logout(nickname);
        self.finish_logout(ticket).await
    }

    /// Creates an account. Has no effect on the stored credential.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisterResponse, Vec<SessionError>> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.post("/register", &body).await?;
        let registered: RegisterResponse = self
            .client
            .decode(&response)
            .map_err(|e| vec![SessionError::from(e)])?;
        tracing::info!(nickname = %registered.nickname, "account registered");
        Ok(registered)
    }

    /// POSTs a JSON body without credentials and turns anything but a
    /// 2xx into an error list.
    async fn post<M: serde::Serialize>(
        &self,
        path: &str,
        body: &M,
    ) -> Result<ApiResponse, Vec<SessionError>> {
        let request = self
            .client
            .json_body(ApiRequest::post(path), body)
            .map_err(|e| vec![SessionError::from(e)])?;

        let response = match self.client.send_public(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(path, error = %e, "request failed");
                return Err(vec![SessionError::from(e)]);
            }
        };

        if !response.is_success() {
            tracing::warn!(path, status = response.status, "request rejected");
            return Err(self.rejection(&response));
        }
        Ok(response)
    }

    /// One `AuthRejected` per message in the error body, or a single one
    /// carrying the status reason when the body has nothing usable.
    fn rejection(&self, response: &ApiResponse) -> Vec<SessionError> {
        let mut messages = self
            .client
            .decode::<ApiErrorBody>(response)
            .map(ApiErrorBody::into_messages)
            .unwrap_or_default();
        if messages.is_empty() {
            messages.push(response.status_text());
        }
        messages
            .into_iter()
            .map(|message| SessionError::AuthRejected {
                status: response.status,
                message,
            })
            .collect()
    }
}
