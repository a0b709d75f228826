//! Identity claims carried by a session token.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Registered claim names set by the issuer; callers cannot supply them.
const RESERVED_CLAIMS: [&str; 3] = ["iat", "exp", "nbf"];

/// Who the bearer of a session token is.
///
/// `email` keys the user record used for role checks. Whatever else the
/// client submitted at login is carried along in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Identity {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Copy of this identity with issuer-owned claim names removed.
    pub(crate) fn without_reserved_claims(&self) -> Self {
        let mut identity = self.clone();
        for key in RESERVED_CLAIMS {
            identity.attributes.remove(key);
        }
        identity
    }
}

/// The signed payload: the identity plus issue and expiry times (Unix seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub identity: Identity,
    pub iat: usize,
    pub exp: usize,
}
