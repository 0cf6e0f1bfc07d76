//! Core types for the Bhoomi dashboard.
//!
//! This crate provides the foundational identity and role types shared by
//! every layer of the Bhoomi session/routing core.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Frontend Layer                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  bhoomi-cli     : interactive demo driver binary            │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Composition Layer                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  bhoomi-app     : config, wiring, frame rendering           │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  bhoomi-session : identity stream, profile store, machine   │
//! │  bhoomi-routes  : route trees, authorization gate           │
//! │  bhoomi-shell   : role chrome, viewport state               │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  bhoomi-types   : PrincipalId, Role, Profile, ErrorCode ◄── │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identity Design
//!
//! The authentication provider issues principal identifiers; the core never
//! mints them. [`PrincipalId`] is therefore an opaque string newtype rather
//! than a UUID. [`SessionId`] is the one identifier this crate does mint
//! (v4 UUID, one per mounted session machine) and exists purely for log
//! correlation.
//!
//! # Example
//!
//! ```
//! use bhoomi_types::{Principal, PrincipalId, Profile, Role};
//!
//! let principal = Principal::new(PrincipalId::new("uid-2041"))
//!     .with_display_name("Ravi");
//!
//! let profile = Profile::new(Role::Farmer);
//! assert_eq!(profile.role(), Role::Farmer);
//! assert_eq!(principal.label(), "Ravi");
//! ```

mod error;
mod id;
mod principal;
mod profile;
mod role;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{PrincipalId, SessionId};
pub use principal::Principal;
pub use profile::Profile;
pub use role::Role;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_id_round_trip() {
        let id = PrincipalId::new("uid-100");
        assert_eq!(id.as_str(), "uid-100");
        assert_eq!(format!("{id}"), "principal:uid-100");
    }

    #[test]
    fn session_id_uniqueness() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
    }

    // NOTE: SessionId does not implement Default intentionally.
    // See id.rs for rationale.

    #[test]
    fn role_is_closed_enumeration() {
        assert_eq!(Role::ALL.len(), 3);
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn profile_carries_role_and_payload() {
        let profile = Profile::new(Role::Officer)
            .with_attribute("district", serde_json::json!("Nashik"));
        assert_eq!(profile.role(), Role::Officer);
        assert_eq!(
            profile.attribute("district"),
            Some(&serde_json::json!("Nashik"))
        );
    }
}
