//! Identity stream abstraction.
//!
//! The authentication provider is a black box that pushes "who is signed
//! in right now". This module normalizes it into a watch-style stream:
//!
//! - [`AuthStatus`] — the value the stream carries.
//! - [`IdentityStream`] — the subscription seam the session machine
//!   consumes.
//! - [`IdentityWatch`] — one active subscription; dropping it
//!   unregisters.
//! - [`IdentityHub`] — the in-memory stream implementation used by the
//!   demo driver and tests.
//!
//! # Subscription Contract
//!
//! A fresh subscriber can always read the stream's *current* status
//! immediately ([`IdentityWatch::current`]) — this is what lets a session
//! machine spawned after sign-in reconstruct state without waiting for
//! the next provider event. Every subsequent provider event notifies the
//! watch, **including re-entrant sign-ins of the same principal**: the
//! provider may re-announce an identity (token refresh, focus change) and
//! each announcement re-runs resolution downstream.

use bhoomi_types::Principal;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// What the identity stream currently reports.
///
/// `Pending` covers the startup window before the provider has restored
/// or rejected a persisted session. A machine that reads `Pending` stays
/// in its resolving phase rather than misreading "no event yet" as
/// signed-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthStatus {
    /// Provider has not announced anything yet.
    Pending,
    /// No principal is signed in.
    SignedOut,
    /// A principal is signed in.
    SignedIn(Principal),
}

impl AuthStatus {
    /// Returns `true` while the provider has not reported yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, AuthStatus::Pending)
    }

    /// Returns `true` if a principal is signed in.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthStatus::SignedIn(_))
    }

    /// Returns the signed-in principal, if any.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            AuthStatus::SignedIn(p) => Some(p),
            _ => None,
        }
    }
}

/// Push-based identity source.
///
/// Implementations wrap a real provider's callback registration (or, for
/// [`IdentityHub`], an in-memory channel). The session machine calls
/// [`subscribe`](Self::subscribe) exactly once per mounted instance.
pub trait IdentityStream: Send + Sync {
    /// Opens one subscription to the stream.
    ///
    /// The returned watch yields the current status immediately and
    /// notifies on every later provider event. Dropping it unregisters
    /// the subscription.
    fn subscribe(&self) -> IdentityWatch;
}

/// One active identity subscription.
///
/// Thin wrapper over a [`watch::Receiver`] so adapter implementations
/// outside this crate can produce one from their own channel.
#[derive(Debug)]
pub struct IdentityWatch {
    rx: watch::Receiver<AuthStatus>,
}

impl IdentityWatch {
    /// Wraps a receiver produced by an adapter's internal channel.
    #[must_use]
    pub fn new(rx: watch::Receiver<AuthStatus>) -> Self {
        Self { rx }
    }

    /// Reads the current status, marking it seen.
    #[must_use]
    pub fn current(&mut self) -> AuthStatus {
        self.rx.borrow_and_update().clone()
    }

    /// Waits for the next provider event and returns the fresh status.
    ///
    /// Returns `None` once the stream side has been dropped (provider
    /// gone); the subscription is useless from then on.
    pub async fn next(&mut self) -> Option<AuthStatus> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}

/// In-memory identity stream.
///
/// The driver side of the seam: tests and the demo binary announce
/// sign-ins/sign-outs here and every subscribed machine observes them.
/// Starts in [`AuthStatus::Pending`].
///
/// # Example
///
/// ```
/// use bhoomi_session::{AuthStatus, IdentityHub, IdentityStream};
/// use bhoomi_types::{Principal, PrincipalId};
///
/// let hub = IdentityHub::new();
/// let mut watch = hub.subscribe();
/// assert_eq!(watch.current(), AuthStatus::Pending);
///
/// hub.announce_signed_in(Principal::new(PrincipalId::new("uid-1")));
/// assert!(hub.status().is_signed_in());
/// ```
#[derive(Debug)]
pub struct IdentityHub {
    tx: watch::Sender<AuthStatus>,
}

impl IdentityHub {
    /// Creates a hub with no announcement yet.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthStatus::Pending);
        Self { tx }
    }

    /// Announces a signed-in principal.
    ///
    /// Announcing the same principal again is a real event: subscribers
    /// are notified and re-run resolution.
    pub fn announce_signed_in(&self, principal: Principal) {
        self.tx.send_replace(AuthStatus::SignedIn(principal));
    }

    /// Announces that nobody is signed in.
    pub fn announce_signed_out(&self) {
        self.tx.send_replace(AuthStatus::SignedOut);
    }

    /// Returns the status the hub currently reports.
    #[must_use]
    pub fn status(&self) -> AuthStatus {
        self.tx.borrow().clone()
    }

    /// Number of live subscriptions. Lets teardown tests confirm a
    /// machine released its watch.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for IdentityHub {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStream for IdentityHub {
    fn subscribe(&self) -> IdentityWatch {
        IdentityWatch::new(self.tx.subscribe())
    }
}
