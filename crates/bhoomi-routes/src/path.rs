//! Normalized request paths.
//!
//! Everything the gate and the trees compare against is a [`RoutePath`]:
//! absolute, no duplicate or trailing slashes, query/fragment stripped.
//! Normalizing once at the edge keeps matching segment-wise everywhere
//! else ("/dash" is never a prefix of "/dashboard").

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An absolute, normalized path.
///
/// Construction cannot fail: [`parse`](Self::parse) maps any input to a
/// canonical form, with the empty string becoming the root `/`.
///
/// # Example
///
/// ```
/// use bhoomi_routes::RoutePath;
///
/// let path = RoutePath::parse("dashboard//mandi/?tab=prices");
/// assert_eq!(path.as_str(), "/dashboard/mandi");
/// assert_eq!(path.segments().collect::<Vec<_>>(), vec!["dashboard", "mandi"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutePath {
    raw: String,
}

impl RoutePath {
    /// Normalizes `input` into an absolute path.
    ///
    /// Query strings and fragments are dropped; the core routes on the
    /// path component only.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let path_part = trimmed
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        let mut raw = String::with_capacity(path_part.len() + 1);
        for segment in path_part.split('/').filter(|s| !s.is_empty()) {
            raw.push('/');
            raw.push_str(segment);
        }
        if raw.is_empty() {
            raw.push('/');
        }
        Self { raw }
    }

    /// Returns the root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self { raw: "/".to_string() }
    }

    /// The canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` for the root path `/`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.raw == "/"
    }

    /// Iterates the non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('/').filter(|s| !s.is_empty())
    }

    /// Segment-wise prefix test.
    ///
    /// The root is a prefix of everything; otherwise every segment of
    /// `prefix` must match the corresponding segment of `self`.
    #[must_use]
    pub fn starts_with(&self, prefix: &RoutePath) -> bool {
        self.strip_prefix(prefix).is_some()
    }

    /// Removes `prefix` segment-wise, returning the remaining segments.
    ///
    /// `None` when `self` is not under `prefix`. An exact match yields
    /// an empty remainder — that is how index routes are requested.
    #[must_use]
    pub fn strip_prefix<'a>(&'a self, prefix: &RoutePath) -> Option<Vec<&'a str>> {
        let mut rest = self.segments();
        for want in prefix.segments() {
            if rest.next() != Some(want) {
                return None;
            }
        }
        Some(rest.collect())
    }

    /// Appends one segment, normalizing the result.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        Self::parse(&format!("{}/{segment}", self.raw))
    }
}

impl std::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for RoutePath {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

impl Serialize for RoutePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for RoutePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_messy_input() {
        assert_eq!(RoutePath::parse("dashboard").as_str(), "/dashboard");
        assert_eq!(RoutePath::parse("/dashboard/").as_str(), "/dashboard");
        assert_eq!(RoutePath::parse("//a///b//").as_str(), "/a/b");
        assert_eq!(RoutePath::parse("  /auth  ").as_str(), "/auth");
        assert_eq!(RoutePath::parse("").as_str(), "/");
        assert_eq!(RoutePath::parse("/").as_str(), "/");
    }

    #[test]
    fn strips_query_and_fragment() {
        assert_eq!(
            RoutePath::parse("/dashboard/mandi?commodity=onion").as_str(),
            "/dashboard/mandi"
        );
        assert_eq!(RoutePath::parse("/auth#signup").as_str(), "/auth");
        assert_eq!(RoutePath::parse("?x=1").as_str(), "/");
    }

    #[test]
    fn prefix_matching_is_segment_wise() {
        let dashboard = RoutePath::parse("/dashboard");
        assert!(RoutePath::parse("/dashboard/mandi").starts_with(&dashboard));
        assert!(RoutePath::parse("/dashboard").starts_with(&dashboard));
        // A string prefix that isn't a segment prefix.
        assert!(!RoutePath::parse("/dashboard-v2").starts_with(&dashboard));
        assert!(!RoutePath::parse("/auth").starts_with(&dashboard));
    }

    #[test]
    fn root_is_prefix_of_everything() {
        let root = RoutePath::root();
        assert!(RoutePath::parse("/anything/at/all").starts_with(&root));
        assert!(root.is_root());
        assert_eq!(
            RoutePath::parse("/a/b").strip_prefix(&root),
            Some(vec!["a", "b"])
        );
    }

    #[test]
    fn strip_prefix_yields_remainder() {
        let prefix = RoutePath::parse("/dashboard");
        let path = RoutePath::parse("/dashboard/schemes/irrigation");
        assert_eq!(
            path.strip_prefix(&prefix),
            Some(vec!["schemes", "irrigation"])
        );
        // Exact match: empty remainder, not None.
        assert_eq!(prefix.strip_prefix(&prefix), Some(vec![]));
        assert_eq!(RoutePath::parse("/auth").strip_prefix(&prefix), None);
    }

    #[test]
    fn join_appends_one_segment() {
        let base = RoutePath::parse("/dashboard");
        assert_eq!(base.join("mandi").as_str(), "/dashboard/mandi");
        assert_eq!(RoutePath::root().join("auth").as_str(), "/auth");
    }

    #[test]
    fn serde_uses_canonical_form() {
        let path: RoutePath = serde_json::from_str("\"dashboard//ndvi/\"").unwrap();
        assert_eq!(path.as_str(), "/dashboard/ndvi");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"/dashboard/ndvi\"");
    }
}
