//! Session state snapshot types.
//!
//! [`SessionState`] is the single authoritative answer to "who is here
//! and what may they reach". It is written by exactly one owner (the
//! session machine) and read everywhere else as an immutable snapshot.

use bhoomi_types::{Principal, Profile, Role};
use serde::{Deserialize, Serialize};

/// Why a session is unauthenticated.
///
/// All three reasons produce the same redirect at the gate; the reason
/// exists so a sign-in surface can tell "you signed out" from "your
/// account has no profile" from "the lookup failed, try again".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnauthReason {
    /// The identity stream reported signed-out.
    SignedOut,
    /// A principal is signed in but has no usable profile record.
    ProfileMissing,
    /// The profile lookup failed in transport; retry may succeed.
    LookupFailed,
}

impl UnauthReason {
    /// Returns `true` if re-running resolution may change the outcome
    /// without a fresh identity event.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, UnauthReason::LookupFailed)
    }

    /// Returns the snake_case tag for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UnauthReason::SignedOut => "signed_out",
            UnauthReason::ProfileMissing => "profile_missing",
            UnauthReason::LookupFailed => "lookup_failed",
        }
    }
}

impl std::fmt::Display for UnauthReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase discriminant of a [`SessionState`], for matching and logging
/// without borrowing the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Initial: the first resolution has not settled yet.
    Resolving,
    /// A principal is signed in with a resolved role.
    Authenticated,
    /// Nobody usable is signed in.
    Unauthenticated,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionPhase::Resolving => "resolving",
            SessionPhase::Authenticated => "authenticated",
            SessionPhase::Unauthenticated => "unauthenticated",
        };
        f.write_str(s)
    }
}

/// The authoritative session snapshot.
///
/// # Why an Enum?
///
/// The contract "role is present iff authenticated, principal is present
/// iff authenticated" is not an assertion here — it is the shape of the
/// type. `Authenticated` without a role, or `Resolving` with a stale
/// principal, cannot be constructed, so no interleaving of events can
/// ever expose a half-written state.
///
/// # Transitions
///
/// ```text
///             ┌───────────┐ signed-out / missing / failed
///   spawn ──► │ Resolving │ ───────────────────────────────┐
///             └───────────┘                                ▼
///                   │ signed-in + profile found   ┌─────────────────┐
///                   ▼                             │ Unauthenticated │
///             ┌───────────────┐   signed-out      └─────────────────┘
///             │ Authenticated │ ─────────────────────────▲  │
///             └───────────────┘ ◄──────────────────────────┘
///                                 signed-in + profile found
/// ```
///
/// `Resolving` is entered exactly once, at spawn. Re-resolution after
/// that (re-entrant sign-in, retry) keeps publishing the previous settled
/// state until the new one is ready — observers never see a transition
/// back to `Resolving`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum SessionState {
    /// First resolution in flight.
    Resolving,
    /// Signed in, role resolved.
    Authenticated {
        /// Who is signed in.
        principal: Principal,
        /// The role resolved from their profile.
        role: Role,
        /// The full profile record (opaque payload included).
        profile: Profile,
    },
    /// Nobody usable is signed in.
    Unauthenticated {
        /// Why (same redirect either way; see [`UnauthReason`]).
        reason: UnauthReason,
    },
}

impl SessionState {
    /// Returns the phase discriminant.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Resolving => SessionPhase::Resolving,
            SessionState::Authenticated { .. } => SessionPhase::Authenticated,
            SessionState::Unauthenticated { .. } => SessionPhase::Unauthenticated,
        }
    }

    /// Returns the resolved role, present iff authenticated.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::Authenticated { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Returns the signed-in principal, present iff authenticated.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionState::Authenticated { principal, .. } => Some(principal),
            _ => None,
        }
    }

    /// Returns the resolved profile, present iff authenticated.
    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            SessionState::Authenticated { profile, .. } => Some(profile),
            _ => None,
        }
    }

    /// Returns the unauthenticated reason, if in that phase.
    #[must_use]
    pub fn unauth_reason(&self) -> Option<UnauthReason> {
        match self {
            SessionState::Unauthenticated { reason } => Some(*reason),
            _ => None,
        }
    }

    /// Returns `true` while the first resolution is in flight.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        matches!(self, SessionState::Resolving)
    }

    /// Returns `true` if signed in with a resolved role.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}
