//! Cache key generation.

use super::kind::CacheKind;
use super::normalize::normalize;
use crate::Result;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

/// Hex chars of the SHA-256 digest kept in a key.
const DIGEST_LEN: usize = 16;

/// Field merged into params when a lookup is scoped to one user.
const USER_CONTEXT_FIELD: &str = "userId";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: CacheKind,
    pub digest: String,
}

impl CacheKey {
    /// Derive the key for `params` under `kind`.
    ///
    /// Fails only if `params` cannot be represented as JSON (for example a
    /// map with non-string keys).
    pub fn generate<P: Serialize + ?Sized>(kind: &CacheKind, params: &P) -> Result<Self> {
        let value = serde_json::to_value(params)?;
        Ok(Self::from_value(kind, &value))
    }

    /// Like [`CacheKey::generate`], scoping the key to `user_id` when given.
    pub fn generate_for_user<P: Serialize + ?Sized>(
        kind: &CacheKind,
        params: &P,
        user_id: Option<&str>,
    ) -> Result<Self> {
        let mut value = serde_json::to_value(params)?;
        if let (Some(user_id), Value::Object(map)) = (user_id, &mut value) {
            map.insert(USER_CONTEXT_FIELD.to_string(), Value::String(user_id.to_string()));
        }
        Ok(Self::from_value(kind, &value))
    }

    pub fn from_value(kind: &CacheKind, params: &Value) -> Self {
        let canonical = normalize(params).to_string();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        let digest: String = hasher.finalize()[..DIGEST_LEN / 2]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        Self {
            kind: kind.clone(),
            digest,
        }
    }

    /// Full key string, `"{type}:{digest}"`.
    pub fn as_string(&self) -> String {
        format!("{}{}", self.kind.key_prefix(), self.digest)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_key_shape() {
        let key = CacheKey::generate(&CacheKind::Trends, &json!({ "platform": "tiktok" })).unwrap();
        let s = key.as_string();
        assert!(s.starts_with("trends:"));
        assert_eq!(key.digest.len(), 16);
        assert!(key.digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(s, key.to_string());
    }

    #[test]
    fn test_equivalent_params_share_key() {
        let a = CacheKey::generate(&CacheKind::Content, &json!({ "a": "X", "b": 1 })).unwrap();
        let b = CacheKey::generate(&CacheKind::Content, &json!({ "b": 1, "a": " x " })).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_type_tag_separates_keys() {
        let params = json!({ "platform": "youtube" });
        let a = CacheKey::generate(&CacheKind::Trends, &params).unwrap();
        let b = CacheKey::generate(&CacheKind::Content, &params).unwrap();
        assert_eq!(a.digest, b.digest);
        assert_ne!(a.as_string(), b.as_string());
    }

    #[test]
    fn test_different_values_differ() {
        let a = CacheKey::generate(&CacheKind::Trends, &json!({ "category": "fitness" })).unwrap();
        let b = CacheKey::generate(&CacheKind::Trends, &json!({ "category": "cooking" })).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_user_context_scopes_key() {
        let params = json!({ "title": "hello", "roastMode": true });
        let anon = CacheKey::generate_for_user(&CacheKind::Content, &params, None).unwrap();
        let alice = CacheKey::generate_for_user(&CacheKind::Content, &params, Some("u-1")).unwrap();
        let bob = CacheKey::generate_for_user(&CacheKind::Content, &params, Some("u-2")).unwrap();
        assert_eq!(anon, CacheKey::generate(&CacheKind::Content, &params).unwrap());
        assert_ne!(anon, alice);
        assert_ne!(alice, bob);
    }

    #[test]
    fn test_unserializable_params_error() {
        let mut params: HashMap<(u8, u8), u8> = HashMap::new();
        params.insert((1, 2), 3);
        assert!(CacheKey::generate(&CacheKind::Trends, &params).is_err());
    }
}
