//! Profile store abstraction.
//!
//! The role resolver side of the core: an async lookup keyed by
//! [`PrincipalId`] that answers with a [`Profile`], "no record", or a
//! transport error. The distinction between the last two matters — "you
//! are not registered" and "the network blinked" must stay separable all
//! the way up to the session state.

use async_trait::async_trait;
use bhoomi_types::{ErrorCode, PrincipalId, Profile, Role};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Transport-level profile store failure.
///
/// Never used for "no record exists" — that is `Ok(None)` on
/// [`ProfileStore::fetch_profile`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or timed out.
    #[error("profile store unavailable: {reason}")]
    Unavailable {
        /// Human-readable transport detail.
        reason: String,
    },

    /// A stored record exists but is not decodable as a profile document.
    #[error("malformed profile record for {principal}: {detail}")]
    MalformedRecord {
        /// Principal the record belongs to.
        principal: PrincipalId,
        /// What made the record undecodable.
        detail: String,
    },
}

impl ErrorCode for StoreError {
    fn code(&self) -> &'static str {
        match self {
            StoreError::Unavailable { .. } => "STORE_UNAVAILABLE",
            StoreError::MalformedRecord { .. } => "STORE_MALFORMED_RECORD",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Transport may heal; a broken record will not.
        matches!(self, StoreError::Unavailable { .. })
    }
}

/// Async role lookup keyed by principal id.
///
/// # Contract
///
/// - `Ok(Some(profile))` — a usable record exists.
/// - `Ok(None)` — no record, **or** a record whose role tag is outside
///   the closed role set. An unusable role record must be reported as
///   absent, not as an error: the principal is treated as unregistered.
/// - `Err(_)` — transport failure distinct from absence.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches the profile record for `principal`.
    async fn fetch_profile(&self, principal: &PrincipalId)
        -> Result<Option<Profile>, StoreError>;
}

/// Decodes a raw profile document into a [`Profile`].
///
/// The reference decoding routine for store adapters:
///
/// - a non-object document is malformed (`Err`);
/// - an object without a usable `role` string tag decodes to `None`
///   (absent, per the [`ProfileStore`] contract) — this accepts any
///   casing of the three known tags and rejects everything else;
/// - every field other than `role` is carried as opaque payload.
///
/// # Example
///
/// ```
/// use bhoomi_session::decode_profile;
/// use bhoomi_types::{PrincipalId, Role};
///
/// let id = PrincipalId::new("uid-1");
/// let doc = serde_json::json!({ "role": "Farmer", "village": "Wagholi" });
/// let profile = decode_profile(&id, &doc).unwrap().unwrap();
/// assert_eq!(profile.role(), Role::Farmer);
///
/// let odd = serde_json::json!({ "role": "landlord" });
/// assert_eq!(decode_profile(&id, &odd).unwrap(), None);
/// ```
pub fn decode_profile(
    principal: &PrincipalId,
    raw: &Value,
) -> Result<Option<Profile>, StoreError> {
    let Some(doc) = raw.as_object() else {
        return Err(StoreError::MalformedRecord {
            principal: principal.clone(),
            detail: "document is not an object".to_string(),
        });
    };

    let Some(tag) = doc.get("role").and_then(Value::as_str) else {
        return Ok(None);
    };
    let Some(role) = Role::parse(tag) else {
        return Ok(None);
    };

    let mut profile = Profile::new(role);
    for (key, value) in doc {
        if key != "role" {
            profile = profile.with_attribute(key.clone(), value.clone());
        }
    }
    Ok(Some(profile))
}

/// In-memory profile store.
///
/// Backs the demo driver and every race test. Latency injection makes
/// lookup/stream interleavings reproducible; the availability switch
/// simulates an outage without touching the records.
///
/// # Example
///
/// ```
/// use bhoomi_session::MemoryProfileStore;
/// use bhoomi_types::{PrincipalId, Profile, Role};
///
/// let store = MemoryProfileStore::new();
/// store.insert(PrincipalId::new("uid-1"), Profile::new(Role::Officer));
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryProfileStore {
    records: RwLock<HashMap<PrincipalId, Profile>>,
    latency: Duration,
    unavailable: AtomicBool,
}

impl MemoryProfileStore {
    /// Creates an empty store answering instantly.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            latency: Duration::ZERO,
            unavailable: AtomicBool::new(false),
        }
    }

    /// Makes every lookup take at least `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Inserts or replaces a record.
    pub fn insert(&self, principal: PrincipalId, profile: Profile) {
        self.records.write().insert(principal, profile);
    }

    /// Decodes and inserts a raw JSON document.
    ///
    /// Returns `Ok(true)` if the record was usable and stored,
    /// `Ok(false)` if it decoded to "absent" (no usable role tag) and
    /// was skipped.
    pub fn insert_json(&self, principal: PrincipalId, raw: &str) -> Result<bool, StoreError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| StoreError::MalformedRecord {
                principal: principal.clone(),
                detail: e.to_string(),
            })?;
        match decode_profile(&principal, &value)? {
            Some(profile) => {
                self.insert(principal, profile);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes a record, returning it if present.
    pub fn remove(&self, principal: &PrincipalId) -> Option<Profile> {
        self.records.write().remove(principal)
    }

    /// Flips the outage switch: while `true`, every fetch fails with
    /// [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch_profile(
        &self,
        principal: &PrincipalId,
    ) -> Result<Option<Profile>, StoreError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "outage switch engaged".to_string(),
            });
        }
        Ok(self.records.read().get(principal).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhoomi_types::assert_error_codes;
    use serde_json::json;

    fn uid(id: &str) -> PrincipalId {
        PrincipalId::new(id)
    }

    #[tokio::test]
    async fn fetch_distinguishes_absent_from_error() {
        let store = MemoryProfileStore::new();
        store.insert(uid("known"), Profile::new(Role::Farmer));

        assert!(store.fetch_profile(&uid("known")).await.unwrap().is_some());
        assert!(store.fetch_profile(&uid("unknown")).await.unwrap().is_none());

        store.set_unavailable(true);
        let err = store.fetch_profile(&uid("known")).await.unwrap_err();
        assert_eq!(err.code(), "STORE_UNAVAILABLE");
        assert!(err.is_recoverable());

        store.set_unavailable(false);
        assert!(store.fetch_profile(&uid("known")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn latency_is_honored() {
        let store = MemoryProfileStore::new().with_latency(Duration::from_millis(30));
        store.insert(uid("slow"), Profile::new(Role::Admin));

        let start = std::time::Instant::now();
        let fetched = store.fetch_profile(&uid("slow")).await.unwrap();
        assert!(fetched.is_some());
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn decode_accepts_usable_record() {
        let profile = decode_profile(
            &uid("u"),
            &json!({ "role": "officer", "district": "Nashik" }),
        )
        .unwrap()
        .unwrap();
        assert_eq!(profile.role(), Role::Officer);
        assert_eq!(profile.attribute("district"), Some(&json!("Nashik")));
        assert_eq!(profile.attribute("role"), None);
    }

    #[test]
    fn decode_treats_unknown_role_as_absent() {
        assert_eq!(
            decode_profile(&uid("u"), &json!({ "role": "landlord" })).unwrap(),
            None
        );
        assert_eq!(
            decode_profile(&uid("u"), &json!({ "village": "Wagholi" })).unwrap(),
            None
        );
        assert_eq!(
            decode_profile(&uid("u"), &json!({ "role": 3 })).unwrap(),
            None
        );
    }

    #[test]
    fn decode_rejects_non_object_document() {
        let err = decode_profile(&uid("u"), &json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.code(), "STORE_MALFORMED_RECORD");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn insert_json_skips_unusable_records() {
        let store = MemoryProfileStore::new();
        assert!(store
            .insert_json(uid("good"), r#"{ "role": "farmer" }"#)
            .unwrap());
        assert!(!store
            .insert_json(uid("odd"), r#"{ "role": "landlord" }"#)
            .unwrap());
        assert_eq!(store.len(), 1);

        let err = store.insert_json(uid("broken"), "not json").unwrap_err();
        assert_eq!(err.code(), "STORE_MALFORMED_RECORD");
    }

    #[test]
    fn error_codes_follow_convention() {
        assert_error_codes(
            &[
                StoreError::Unavailable {
                    reason: "down".to_string(),
                },
                StoreError::MalformedRecord {
                    principal: uid("u"),
                    detail: "bad".to_string(),
                },
            ],
            "STORE_",
        );
    }
}
