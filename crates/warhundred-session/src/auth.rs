//! Auth state: the reactive container the rest of the client watches.
//!
//! [`AuthState`] owns the current [`Session`] inside a
//! `tokio::sync::watch` channel. Anything that needs to react to logins
//! and logouts (the route gate, a UI) calls [`AuthState::subscribe`] and
//! awaits `changed()` on the receiver.
//!
//! # One operation at a time
//!
//! Only one login or logout may be in flight. A second call made while
//! `is_loading` is set is turned away with
//! [`SessionError::OperationInFlight`] and the session is left exactly as
//! it was. The check-and-set happens inside `watch::Sender::send_if_modified`,
//! which holds the channel's write lock, so two racing callers can't both
//! win.
//!
//! # No cancellation
//!
//! The network half of each operation runs on its own Tokio task. Dropping
//! the future returned by `login()` or `logout()` does not stop the request;
//! the outcome is still written to the session when it arrives.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use warhundred_transport::Transport;

use crate::{AuthPhase, Session, SessionError, SessionService};

struct Inner<T> {
    service: SessionService<T>,
    state: watch::Sender<Session>,
}

/// Shared handle to the client's session.
///
/// Cloning is cheap and every clone sees the same session.
pub struct AuthState<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for AuthState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> AuthState<T> {
    /// Starts out `Anonymous`, whatever the store holds.
    pub fn new(service: SessionService<T>) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            inner: Arc::new(Inner { service, state }),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    pub fn user(&self) -> Option<String> {
        self.inner.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    /// The current phase, including [`AuthPhase::StaleIdentity`] when a
    /// user is set but the store no longer holds a credential.
    pub fn phase(&self) -> AuthPhase {
        let phase = self.inner.state.borrow().phase();
        if phase == AuthPhase::Authenticated && self.inner.service.client().store().get().is_none()
        {
            AuthPhase::StaleIdentity
        } else {
            phase
        }
    }

    pub fn service(&self) -> &SessionService<T> {
        &self.inner.service
    }

    /// Logs in and waits for the outcome.
    ///
    /// On failure the full error list lands in [`Session::errors`] for the
    /// entry form to show, and the first of them is returned.
    ///
    /// # Errors
    /// - [`SessionError::AuthRejected`], [`SessionError::Network`] or
    ///   [`SessionError::Protocol`] if the login itself failed.
    /// - [`SessionError::OperationInFlight`] if a login or logout is
    ///   already running.
    /// - [`SessionError::TaskAborted`] if the background task died or no
    ///   Tokio runtime is available.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        let runtime = self.start("login")?;
        tracing::info!(username, "login started");

        let inner = Arc::clone(&self.inner);
        let username = username.to_string();
        let password = password.to_string();
        let task = runtime.spawn(async move {
            let outcome = inner.service.login(&username, &password).await;
            let mut result = Ok(());
            inner.state.send_modify(|session| {
                session.is_loading = false;
                match outcome {
                    Ok(grant) => {
                        tracing::info!(user = %grant.nickname, "authenticated");
                        session.user = Some(grant.nickname);
                        session.errors.clear();
                    }
                    Err(errors) => {
                        tracing::info!(errors = errors.len(), "login failed");
                        result = first_error(&errors);
                        session.errors = errors;
                    }
                }
            });
            result
        });

        PendingOperation::running(task).await
    }

    /// Logs out.
    ///
    /// The credential is removed from the store *before this returns*; the
    /// returned future only tracks the server notification. It can be
    /// awaited or dropped, the outcome is written to the session either
    /// way: on success the user is cleared, on failure the user is kept
    /// and the errors recorded, leaving the session in
    /// [`AuthPhase::StaleIdentity`]. Awaiting it yields the first of
    /// those errors.
    ///
    /// Must be called from within a Tokio runtime; otherwise the returned
    /// future resolves to [`SessionError::TaskAborted`] and nothing
    /// happens.
    pub fn logout(&self) -> PendingOperation {
        let runtime = match self.start("logout") {
            Ok(runtime) => runtime,
            Err(e) => return PendingOperation::rejected(e),
        };

        let nickname = self.user();
        tracing::info!(user = ?nickname, "logout started");
        let ticket = self.inner.service.begin_logout(nickname.as_deref());

        let inner = Arc::clone(&self.inner);
        let task = runtime.spawn(async move {
            let outcome = inner.service.finish_logout(ticket).await;
            let mut result = Ok(());
            inner.state.send_modify(|session| {
                session.is_loading = false;
                match outcome {
                    Ok(()) => {
                        tracing::info!("logged out");
                        session.user = None;
                        session.errors.clear();
                    }
                    Err(errors) => {
                        tracing::warn!(
                            errors = errors.len(),
                            "logout notification failed, credential already cleared"
                        );
                        result = first_error(&errors);
                        session.errors = errors;
                    }
                }
            });
            result
        });

        PendingOperation::running(task)
    }

    /// Claims the single operation slot: sets `is_loading` and clears the
    /// previous errors, or refuses if the slot is taken.
    fn start(&self, operation: &'static str) -> Result<Handle, SessionError> {
        let runtime = Handle::try_current()
            .map_err(|e| SessionError::TaskAborted(format!("{operation}: {e}")))?;

        let claimed = self.inner.state.send_if_modified(|session| {
            if session.is_loading {
                return false;
            }
            session.is_loading = true;
            session.errors.clear();
            true
        });

        if claimed {
            Ok(runtime)
        } else {
            tracing::warn!(operation, "rejected: another login or logout is in flight");
            Err(SessionError::OperationInFlight)
        }
    }
}

/// The error an operation reports to its caller; the session keeps all of
/// them.
fn first_error(errors: &[SessionError]) -> Result<(), SessionError> {
    match errors.first() {
        Some(error) => Err(error.clone()),
        None => Err(SessionError::Protocol("failed without an error".into())),
    }
}

// ---------------------------------------------------------------------------
// PendingOperation
// ---------------------------------------------------------------------------

/// A login or logout whose network half is still running.
///
/// Resolves once the outcome has been written to the session. Dropping it
/// detaches from the operation but does not cancel it.
#[derive(Debug)]
pub struct PendingOperation {
    state: Pending,
}

#[derive(Debug)]
enum Pending {
    Running(JoinHandle<Result<(), SessionError>>),
    Rejected(Option<SessionError>),
}

impl PendingOperation {
    fn running(task: JoinHandle<Result<(), SessionError>>) -> Self {
        Self {
            state: Pending::Running(task),
        }
    }

    fn rejected(error: SessionError) -> Self {
        Self {
            state: Pending::Rejected(Some(error)),
        }
    }

    /// `true` once the outcome is in the session (or the call was refused).
    pub fn is_finished(&self) -> bool {
        match &self.state {
            Pending::Running(task) => task.is_finished(),
            Pending::Rejected(_) => true,
        }
    }
}

impl Future for PendingOperation {
    type Output = Result<(), SessionError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            Pending::Running(task) => Pin::new(task)
                .poll(cx)
                .map(|joined| joined.unwrap_or_else(|e| Err(SessionError::TaskAborted(e.to_string())))),
            Pending::Rejected(error) => {
                Poll::Ready(Err(error.take().unwrap_or(SessionError::OperationInFlight)))
            }
        }
    }
}
