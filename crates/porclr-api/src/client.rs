//! Blocking HTTP client for the Portainer REST API

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::source::Session;
use crate::types::{
    AuthResponse, AuthToken, Credentials, ErrorBody, Stack, StackFileResponse, StackId,
};
use crate::{Error, Result};

/// Client for a single Portainer instance.
///
/// Calls are synchronous and never retried. Timeouts are left at the
/// transport defaults.
#[derive(Debug, Clone)]
pub struct PortainerClient {
    http: Client,
    base_url: Url,
}

impl PortainerClient {
    /// Create a client for `base_url`.
    ///
    /// A bare `host:port` is accepted and treated as plain HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL cannot be parsed, or
    /// [`Error::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let normalized = normalize_base_url(base_url)?;
        let base_url = Url::parse(&normalized).map_err(|e| Error::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                url: base_url.to_string(),
                message: "URL cannot carry a path".to_string(),
            });
        }

        let http = Client::builder()
            .user_agent(concat!("porclr/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Exchange credentials for a bearer token via `POST /api/auth`.
    ///
    /// # Errors
    ///
    /// Any non-success status, an undecodable body, or a missing/empty `jwt`
    /// is reported as [`Error::Authentication`]. Transport failures are
    /// [`Error::Http`].
    pub fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken> {
        let url = self.endpoint(&["api", "auth"]);
        tracing::debug!(url = %url, username = %credentials.username, "authenticating");

        let response = self.http.post(url).json(credentials).send()?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Authentication {
                message: describe_failure(status, response),
            });
        }

        let body = response.text()?;
        let auth: AuthResponse = serde_json::from_str(&body).map_err(|e| Error::Authentication {
            message: format!("malformed response: {}", e),
        })?;

        match auth.jwt {
            Some(jwt) if !jwt.is_empty() => Ok(AuthToken::new(jwt)),
            _ => Err(Error::Authentication {
                message: "response did not contain a token".to_string(),
            }),
        }
    }

    /// Authenticate and wrap the token in a [`Session`].
    pub fn login(&self, credentials: &Credentials) -> Result<Session<'_>> {
        let token = self.authenticate(credentials)?;
        Ok(Session::new(self, token))
    }

    /// List all stacks via `GET /api/stacks`.
    ///
    /// The response is assumed to be a single, unpaginated array.
    pub fn list_stacks(&self, token: &AuthToken) -> Result<Vec<Stack>> {
        let stacks: Vec<Stack> = self.get_json(&["api", "stacks"], token)?;
        tracing::debug!(count = stacks.len(), "listed stacks");
        Ok(stacks)
    }

    /// Fetch one stack's Compose content via `GET /api/stacks/{id}/file`.
    ///
    /// The id is sent as a single escaped path segment.
    pub fn fetch_compose_file(&self, id: &StackId, token: &AuthToken) -> Result<String> {
        let file: StackFileResponse =
            self.get_json(&["api", "stacks", id.as_str(), "file"], token)?;

        file.content.ok_or_else(|| Error::MissingField {
            endpoint: format!("/api/stacks/{}/file", id),
            field: "StackFileContent".to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str], token: &AuthToken) -> Result<T> {
        let url = self.endpoint(segments);
        let label = format!("/{}", segments.join("/"));
        tracing::debug!(url = %url, "GET");

        let response = self.http.get(url).bearer_auth(token.secret()).send()?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Api {
                endpoint: label,
                status: status.as_u16(),
                message: describe_failure(status, response),
            });
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|source| Error::Decode {
            endpoint: label,
            source,
        })
    }
}

/// Normalize an operator-supplied base URL.
///
/// Trims whitespace and trailing slashes and prepends `http://` when no
/// scheme is given.
///
/// # Example
///
/// ```
/// use porclr_api::normalize_base_url;
///
/// assert_eq!(normalize_base_url("localhost:9000/").unwrap(), "http://localhost:9000");
/// assert_eq!(normalize_base_url("https://portainer.lan").unwrap(), "https://portainer.lan");
/// ```
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl {
            url: raw.to_string(),
            message: "URL is empty".to_string(),
        });
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let parsed = Url::parse(&candidate).map_err(|e| Error::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl {
            url: raw.to_string(),
            message: format!("unsupported scheme {}", parsed.scheme()),
        });
    }

    Ok(candidate)
}

/// Build a human-readable reason from a failed response.
fn describe_failure(status: StatusCode, response: Response) -> String {
    let body = response.text().unwrap_or_default();
    let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();

    let reason = match (parsed.message, parsed.details) {
        (Some(message), Some(details)) if details != message => {
            format!("{}: {}", message, details)
        }
        (Some(message), _) => message,
        (None, Some(details)) => details,
        (None, None) if !body.trim().is_empty() => body.trim().to_string(),
        (None, None) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    format!("HTTP {}: {}", status.as_u16(), reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("localhost:9000", "http://localhost:9000")]
    #[case("  localhost:9000//  ", "http://localhost:9000")]
    #[case("http://10.0.0.2:9000", "http://10.0.0.2:9000")]
    #[case("https://portainer.example.com/", "https://portainer.example.com")]
    fn normalize_accepts_operator_forms(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_base_url(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("ftp://portainer.lan")]
    fn normalize_rejects_unusable_urls(#[case] raw: &str) {
        assert!(matches!(
            normalize_base_url(raw),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn endpoint_appends_segments() {
        let client = PortainerClient::new("localhost:9000").unwrap();
        assert_eq!(
            client.endpoint(&["api", "stacks"]).as_str(),
            "http://localhost:9000/api/stacks"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = PortainerClient::new("https://example.com/portainer/").unwrap();
        assert_eq!(
            client.endpoint(&["api", "auth"]).as_str(),
            "https://example.com/portainer/api/auth"
        );
    }

    #[rstest]
    #[case("a?b", "http://localhost:9000/api/stacks/a%3Fb/file")]
    #[case("a#b", "http://localhost:9000/api/stacks/a%23b/file")]
    #[case("a/b", "http://localhost:9000/api/stacks/a%2Fb/file")]
    #[case("42", "http://localhost:9000/api/stacks/42/file")]
    fn endpoint_escapes_stack_id(#[case] id: &str, #[case] expected: &str) {
        let client = PortainerClient::new("localhost:9000").unwrap();
        assert_eq!(
            client.endpoint(&["api", "stacks", id, "file"]).as_str(),
            expected
        );
    }
}
