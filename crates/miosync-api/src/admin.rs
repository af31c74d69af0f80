// MinIO admin API HTTP client.
//
// Wraps `reqwest::Client` with admin-path URL construction, SigV4
// signing, and structured error decoding. The object-lock (S3) surface
// lives in `lock.rs` as inherent methods on the same client.

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::sign;
use crate::transport::TransportConfig;

/// Static admin credentials (access key + secret key).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: SecretString,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: SecretString) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key,
        }
    }
}

/// Raw HTTP client for the MinIO admin API.
///
/// Every method signs its request with SigV4 and decodes error bodies
/// into [`Error::Admin`] with a structured code. Methods return the raw
/// JSON document the server sent -- interpretation happens in
/// `miosync-core`.
pub struct AdminClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl AdminClient {
    /// Create a new admin client from a `TransportConfig`.
    ///
    /// `base_url` is the server root, e.g. `http://minio.example.com:9000`.
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an admin API path: `{base}/minio/admin/v3/{path}`.
    pub(crate) fn admin_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, Error> {
        let mut url = Url::parse(&format!("{}minio/admin/v3/{path}", self.base_url))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // ── Request plumbing ─────────────────────────────────────────────

    /// Sign and send one request, returning the response body on success.
    pub(crate) async fn send(
        &self,
        method: reqwest::Method,
        url: Url,
        body: Vec<u8>,
    ) -> Result<String, Error> {
        debug!("{} {}", method, url);

        let sig = sign::sign_request(
            method.as_str(),
            &url,
            &body,
            &self.credentials.access_key,
            self.credentials.secret_key.expose_secret(),
            Utc::now(),
        );

        let resp = self
            .http
            .request(method, url)
            .header("x-amz-date", &sig.amz_date)
            .header("x-amz-content-sha256", &sig.content_sha256)
            .header("authorization", &sig.authorization)
            .body(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(decode_admin_error(status.as_u16(), &text))
        }
    }

    async fn send_json<T: Serialize>(
        &self,
        method: reqwest::Method,
        url: Url,
        body: &T,
    ) -> Result<String, Error> {
        let bytes = serde_json::to_vec(body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: String::new(),
        })?;
        self.send(method, url, bytes).await
    }

    fn parse_document(body: &str) -> Result<serde_json::Value, Error> {
        serde_json::from_str(body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.to_owned(),
        })
    }

    // ── Groups ───────────────────────────────────────────────────────

    /// Fetch the group description document.
    ///
    /// Fails with `Error::Admin { code: Some(NoSuchGroup), .. }` when the
    /// group does not exist.
    pub async fn group_info(&self, group: &str) -> Result<serde_json::Value, Error> {
        let url = self.admin_url("group", &[("group", group)])?;
        let body = self.send(reqwest::Method::GET, url, Vec::new()).await?;
        Self::parse_document(&body)
    }

    /// Add or remove members. Creates the group when it does not exist
    /// and `remove` is false.
    pub async fn update_group_members(
        &self,
        group: &str,
        members: &[String],
        remove: bool,
    ) -> Result<(), Error> {
        let url = self.admin_url("update-group-members", &[])?;
        let req = GroupMembersUpdate {
            group,
            members,
            is_remove: remove,
        };
        self.send_json(reqwest::Method::PUT, url, &req).await?;
        Ok(())
    }

    /// Enable or disable a group.
    pub async fn set_group_status(&self, group: &str, enabled: bool) -> Result<(), Error> {
        let status = if enabled { "enabled" } else { "disabled" };
        let url = self.admin_url("set-group-status", &[("group", group), ("status", status)])?;
        self.send(reqwest::Method::PUT, url, Vec::new()).await?;
        Ok(())
    }

    // ── Canned policies ──────────────────────────────────────────────

    /// Fetch the policy document.
    ///
    /// Fails with `Error::Admin { code: Some(NoSuchPolicy), .. }` when the
    /// policy does not exist.
    pub async fn info_canned_policy(&self, name: &str) -> Result<serde_json::Value, Error> {
        let url = self.admin_url("info-canned-policy", &[("name", name)])?;
        let body = self.send(reqwest::Method::GET, url, Vec::new()).await?;
        Self::parse_document(&body)
    }

    /// Create or overwrite a canned policy (add is an upsert).
    pub async fn add_canned_policy(
        &self,
        name: &str,
        document: &serde_json::Value,
    ) -> Result<(), Error> {
        let url = self.admin_url("add-canned-policy", &[("name", name)])?;
        self.send_json(reqwest::Method::PUT, url, document).await?;
        Ok(())
    }

    /// Delete a canned policy.
    pub async fn remove_canned_policy(&self, name: &str) -> Result<(), Error> {
        let url = self.admin_url("remove-canned-policy", &[("name", name)])?;
        self.send(reqwest::Method::DELETE, url, Vec::new()).await?;
        Ok(())
    }

    /// Attach a policy to a user or group. Exactly one of `user`/`group`
    /// should be set, matching the upstream SDK call shape.
    pub async fn attach_policy(
        &self,
        name: &str,
        user: Option<&str>,
        group: Option<&str>,
    ) -> Result<(), Error> {
        let url = self.admin_url("idp/builtin/policy/attach", &[])?;
        let req = PolicyAssociation::new(name, user, group);
        self.send_json(reqwest::Method::POST, url, &req).await?;
        Ok(())
    }

    /// Detach a policy from a user or group.
    pub async fn detach_policy(
        &self,
        name: &str,
        user: Option<&str>,
        group: Option<&str>,
    ) -> Result<(), Error> {
        let url = self.admin_url("idp/builtin/policy/detach", &[])?;
        let req = PolicyAssociation::new(name, user, group);
        self.send_json(reqwest::Method::POST, url, &req).await?;
        Ok(())
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Fetch the user description document.
    ///
    /// Fails with `Error::Admin { code: Some(NoSuchUser), .. }` when the
    /// user does not exist.
    pub async fn user_info(&self, access_key: &str) -> Result<serde_json::Value, Error> {
        let url = self.admin_url("user-info", &[("accessKey", access_key)])?;
        let body = self.send(reqwest::Method::GET, url, Vec::new()).await?;
        Self::parse_document(&body)
    }

    /// Create a user with the given secret key, enabled.
    pub async fn add_user(&self, access_key: &str, secret_key: &SecretString) -> Result<(), Error> {
        let url = self.admin_url("add-user", &[("accessKey", access_key)])?;
        let req = AddUserRequest {
            secret_key: secret_key.expose_secret(),
            status: "enabled",
        };
        self.send_json(reqwest::Method::PUT, url, &req).await?;
        Ok(())
    }

    /// Delete a user.
    pub async fn remove_user(&self, access_key: &str) -> Result<(), Error> {
        let url = self.admin_url("remove-user", &[("accessKey", access_key)])?;
        self.send(reqwest::Method::DELETE, url, Vec::new()).await?;
        Ok(())
    }

    /// Enable or disable a user.
    pub async fn set_user_status(&self, access_key: &str, enabled: bool) -> Result<(), Error> {
        let status = if enabled { "enabled" } else { "disabled" };
        let url = self.admin_url(
            "set-user-status",
            &[("accessKey", access_key), ("status", status)],
        )?;
        self.send(reqwest::Method::PUT, url, Vec::new()).await?;
        Ok(())
    }
}

// ── Wire types ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct GroupMembersUpdate<'a> {
    group: &'a str,
    members: &'a [String],
    #[serde(rename = "isRemove")]
    is_remove: bool,
}

#[derive(Serialize)]
struct PolicyAssociation<'a> {
    policies: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<&'a str>,
}

impl<'a> PolicyAssociation<'a> {
    fn new(name: &'a str, user: Option<&'a str>, group: Option<&'a str>) -> Self {
        Self {
            policies: vec![name],
            user,
            group,
        }
    }
}

#[derive(Serialize)]
struct AddUserRequest<'a> {
    #[serde(rename = "secretKey")]
    secret_key: &'a str,
    status: &'a str,
}

#[derive(Deserialize)]
struct AdminErrorBody {
    #[serde(rename = "Code")]
    code: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
}

/// Decode a non-2xx admin response into `Error::Admin`.
///
/// The body is expected to be a JSON `{Code, Message}` document; anything
/// else degrades to a code-less error carrying the raw body.
fn decode_admin_error(status: u16, body: &str) -> Error {
    if let Ok(parsed) = serde_json::from_str::<AdminErrorBody>(body) {
        let code = parsed.code.as_deref().map(crate::error::AdminCode::from);
        let message = parsed
            .message
            .or(parsed.code)
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Error::Admin {
            message,
            code,
            status,
        };
    }
    Error::Admin {
        message: if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body.to_owned()
        },
        code: None,
        status,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::AdminCode;

    #[test]
    fn decode_structured_error_body() {
        let err = decode_admin_error(
            404,
            r#"{"Code":"XMinioAdminNoSuchGroup","Message":"group does not exist"}"#,
        );
        match err {
            Error::Admin {
                code,
                message,
                status,
            } => {
                assert_eq!(code, Some(AdminCode::NoSuchGroup));
                assert_eq!(message, "group does not exist");
                assert_eq!(status, 404);
            }
            other => panic!("expected Admin error, got {other:?}"),
        }
    }

    #[test]
    fn decode_unstructured_error_body() {
        let err = decode_admin_error(500, "internal error");
        match err {
            Error::Admin { code, message, .. } => {
                assert!(code.is_none());
                assert_eq!(message, "internal error");
            }
            other => panic!("expected Admin error, got {other:?}"),
        }
    }

    #[test]
    fn decode_empty_error_body() {
        let err = decode_admin_error(403, "");
        match err {
            Error::Admin { code, message, .. } => {
                assert!(code.is_none());
                assert_eq!(message, "HTTP 403");
            }
            other => panic!("expected Admin error, got {other:?}"),
        }
    }
}
