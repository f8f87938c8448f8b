//! Wire and domain types for the Portainer API

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque stack identifier.
///
/// Older Portainer releases return numeric ids, some forks return strings.
/// Both are kept in their textual form since the id is only ever used as a
/// path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StackId(String);

impl StackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StackId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Num(serde_json::Number),
            Str(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Num(n) => Self(n.to_string()),
            RawId::Str(s) => Self(s),
        })
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StackId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StackId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i32> for StackId {
    fn from(n: i32) -> Self {
        Self(n.to_string())
    }
}

impl From<i64> for StackId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl From<u64> for StackId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// A stack as listed by `GET /api/stacks`.
///
/// Only the fields the sync engine needs are decoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Stack {
    #[serde(rename = "Id")]
    pub id: StackId,
    #[serde(rename = "Name")]
    pub name: String,
}

impl Stack {
    pub fn new(id: impl Into<StackId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Username and password for `POST /api/auth`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer token returned by a successful authentication.
///
/// Lives for a single invocation and is never written anywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(jwt: impl Into<String>) -> Self {
        Self(jwt.into())
    }

    /// The raw JWT, for the `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub jwt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StackFileResponse {
    #[serde(rename = "StackFileContent")]
    pub content: Option<String>,
}

/// Error body Portainer sends with non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stack_id_accepts_integer_and_string() {
        let stacks: Vec<Stack> =
            serde_json::from_str(r#"[{"Id": 1, "Name": "network-stack"}, {"Id": "abc", "Name": "home-stack"}]"#)
                .unwrap();

        assert_eq!(stacks[0], Stack::new(1, "network-stack"));
        assert_eq!(stacks[1], Stack::new("abc", "home-stack"));
    }

    #[test]
    fn stack_id_accepts_full_unsigned_range() {
        let stack: Stack =
            serde_json::from_str(r#"{"Id": 18446744073709551615, "Name": "big-stack"}"#).unwrap();
        assert_eq!(stack.id.as_str(), "18446744073709551615");
    }

    #[test]
    fn stack_ignores_unknown_fields() {
        let stack: Stack = serde_json::from_str(
            r#"{"Id": 7, "Name": "rss-stack", "Type": 2, "EndpointId": 1, "Env": []}"#,
        )
        .unwrap();

        assert_eq!(stack.id.as_str(), "7");
    }

    #[test]
    fn stack_requires_name() {
        let result: Result<Stack, _> = serde_json::from_str(r#"{"Id": 7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let token = AuthToken::new("eyJhbGciOi");
        let credentials = Credentials::new("admin", "hunter2");

        assert!(!format!("{:?}", token).contains("eyJhbGciOi"));
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }
}
