//! Access token claim set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the principal identifier.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch). Doubles as the session
    /// fence value under single-login policy.
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// JWT ID.
    pub jti: Uuid,
    /// Issuer, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Any additional claims carried by the token.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Creates a claim set for `sub` valid from `iat` until `exp`.
    pub fn new(sub: impl Into<String>, iat: i64, exp: i64) -> Self {
        Self {
            sub: sub.into(),
            iat,
            exp,
            jti: Uuid::new_v4(),
            iss: None,
            extra: Map::new(),
        }
    }

    /// Returns the principal from the subject claim.
    pub fn principal(&self) -> &str {
        &self.sub
    }

    /// Returns the issued-at timestamp in seconds.
    pub fn issued_at(&self) -> i64 {
        self.iat
    }

    /// Looks up a claim by name, registered or custom.
    pub fn claim(&self, name: &str) -> Option<Value> {
        match name {
            "sub" => Some(Value::from(self.sub.clone())),
            "iat" => Some(Value::from(self.iat)),
            "exp" => Some(Value::from(self.exp)),
            "jti" => Some(Value::from(self.jti.to_string())),
            "iss" => self.iss.clone().map(Value::from),
            other => self.extra.get(other).cloned(),
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
