//! The authenticated API client shared by the session and every panel.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use warhundred_protocol::{Codec, JsonCodec, ProtocolError};
use warhundred_transport::{ApiRequest, ApiResponse, Transport, TransportError};

use crate::CredentialStore;

/// A [`Transport`] paired with the [`CredentialStore`].
///
/// [`send`](Self::send) reads the store on every call, so a token written
/// by login (or removed by logout) takes effect on the very next request
/// without anyone having to tell the client.
///
/// Cloning is cheap: both halves are behind `Arc`.
pub struct ApiClient<T> {
    transport: Arc<T>,
    store: Arc<dyn CredentialStore>,
    codec: JsonCodec,
}

// Derived `Clone` would require `T: Clone`, which the `Arc` makes
// unnecessary.
impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            store: Arc::clone(&self.store),
            codec: self.codec,
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: Arc<T>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            transport,
            store,
            codec: JsonCodec,
        }
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    /// Attaches the stored token as a bearer credential, if there is one.
    pub fn authorize(&self, request: ApiRequest) -> ApiRequest {
        match self.store.get() {
            Some(token) => request.with_bearer(token),
            None => request,
        }
    }

    /// Sends an authenticated request.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let request = self.authorize(request);
        self.transport.execute(request).await
    }

    /// Sends a request without consulting the store.
    pub async fn send_public(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.transport.execute(request).await
    }

    /// Encodes `body` with the client's codec and attaches it.
    pub fn json_body<M: Serialize>(
        &self,
        request: ApiRequest,
        body: &M,
    ) -> Result<ApiRequest, ProtocolError> {
        let bytes = self.codec.encode(body)?;
        Ok(request.with_body(bytes, self.codec.content_type()))
    }

    /// Decodes a response body.
    pub fn decode<M: DeserializeOwned>(&self, response: &ApiResponse) -> Result<M, ProtocolError> {
        self.codec.decode(&response.body)
    }
}
