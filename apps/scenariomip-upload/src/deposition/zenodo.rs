//! # Zenodo Client
//!
//! [`DepositionService`] over the Zenodo REST API. Every request carries
//! the token as a Bearer credential.
//!
//! | Operation           | Request                                                    |
//! |---------------------|------------------------------------------------------------|
//! | resolve_latest      | `GET  /api/deposit/depositions/{id}` → `links.latest`      |
//! | get_or_create_draft | `GET  .../{id}` → `links.latest_draft`, else `POST .../actions/newversion` |
//! | set_metadata        | `PUT  .../{id}` with the metadata document                 |
//! | clear_files         | `GET  .../{id}/files`, `DELETE .../{id}/files/{file_id}`   |
//! | resolve_bucket      | `GET  .../{id}` → `links.bucket`                           |
//! | upload              | `PUT  {bucket}/{file_name}`                                |
//! | publish             | `POST .../{id}/actions/publish`                            |

use super::{BucketLocation, DepositionError, DepositionId, DepositionService, remote_file_name};
use crate::config::UploadConfig;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// HTTP client for one Zenodo instance.
#[derive(Clone)]
pub struct ZenodoClient {
    http: reqwest::Client,
    domain: String,
    token: String,
}

impl ZenodoClient {
    /// Client for the instance and token in `config`.
    pub fn new(config: &UploadConfig) -> Self {
        Self::with_domain(&config.zenodo_domain, &config.token)
    }

    /// Client for an explicit base URL, e.g. `https://sandbox.zenodo.org`.
    pub fn with_domain(domain: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            domain: domain.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn deposition_url(&self, id: DepositionId) -> String {
        format!("{}/api/deposit/depositions/{}", self.domain, id)
    }

    /// Build a request with Bearer auth.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http.request(method, url).bearer_auth(&self.token)
    }

    /// Send a request, mapping transport failures and error statuses.
    async fn send(&self, req: RequestBuilder, what: &str) -> Result<Response, DepositionError> {
        let resp = req
            .send()
            .await
            .map_err(|e| DepositionError::Network(format!("{}: {e}", self.domain)))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %body, "{what} failed");
        Err(status_error(status, what, body))
    }

    /// Send a request and parse the JSON body.
    async fn send_json(&self, req: RequestBuilder, what: &str) -> Result<Value, DepositionError> {
        self.send(req, what)
            .await?
            .json::<Value>()
            .await
            .map_err(|e| DepositionError::MalformedResponse(format!("{what}: {e}")))
    }

    async fn get_deposition(&self, id: DepositionId) -> Result<Value, DepositionError> {
        let req = self.request(Method::GET, &self.deposition_url(id));
        self.send_json(req, &format!("deposition {id}")).await
    }
}

/// Entry of a deposition's file listing.
#[derive(Debug, Deserialize)]
struct RemoteFile {
    id: String,
    filename: Option<String>,
}

/// Map an error status to the error taxonomy.
fn status_error(status: StatusCode, what: &str, body: String) -> DepositionError {
    match status.as_u16() {
        400 | 422 => DepositionError::Validation(format!("{what}: {body}")),
        401 => DepositionError::Unauthorized,
        403 | 409 | 423 => DepositionError::Conflict(format!("{what}: {body}")),
        404 => DepositionError::NotFound(what.to_string()),
        code => DepositionError::UnexpectedStatus { status: code, body },
    }
}

/// String at `pointer` in `value`.
fn link<'a>(value: &'a Value, pointer: &str) -> Result<&'a str, DepositionError> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .ok_or_else(|| DepositionError::MalformedResponse(format!("missing {pointer}")))
}

/// Trailing path segment of a record or deposition URL, as an ID.
///
/// `https://zenodo.org/api/records/14870679` → `14870679`.
pub(crate) fn id_from_link(url: &str) -> Result<DepositionId, DepositionError> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u64>().ok())
        .map(DepositionId)
        .ok_or_else(|| DepositionError::MalformedResponse(format!("no ID in link '{url}'")))
}

#[async_trait]
impl DepositionService for ZenodoClient {
    async fn resolve_latest(&self, any: DepositionId) -> Result<DepositionId, DepositionError> {
        let deposition = self.get_deposition(any).await?;
        let latest = id_from_link(link(&deposition, "/links/latest")?)?;
        tracing::info!(%any, %latest, "Resolved latest deposition");
        Ok(latest)
    }

    async fn get_or_create_draft(
        &self,
        latest: DepositionId,
    ) -> Result<DepositionId, DepositionError> {
        let deposition = self.get_deposition(latest).await?;

        // A published deposition links `latest_draft` to itself until a
        // new version is opened.
        if let Some(existing) = deposition
            .pointer("/links/latest_draft")
            .and_then(Value::as_str)
        {
            let draft = id_from_link(existing)?;
            if draft != latest {
                tracing::info!(%draft, "Reusing open draft");
                return Ok(draft);
            }
        }

        let url = format!("{}/actions/newversion", self.deposition_url(latest));
        let created = self
            .send_json(self.request(Method::POST, &url), "new version")
            .await?;
        let draft = id_from_link(link(&created, "/links/latest_draft")?)?;
        tracing::info!(%draft, "Created new draft version");
        Ok(draft)
    }

    async fn set_metadata(
        &self,
        draft: DepositionId,
        metadata: &Value,
    ) -> Result<(), DepositionError> {
        let req = self
            .request(Method::PUT, &self.deposition_url(draft))
            .json(metadata);
        self.send(req, "metadata update").await?;
        tracing::info!(%draft, "Updated metadata");
        Ok(())
    }

    async fn clear_files(&self, draft: DepositionId) -> Result<(), DepositionError> {
        let files_url = format!("{}/files", self.deposition_url(draft));
        let files: Vec<RemoteFile> = self
            .send(self.request(Method::GET, &files_url), "file listing")
            .await?
            .json()
            .await
            .map_err(|e| DepositionError::MalformedResponse(format!("file listing: {e}")))?;

        for file in &files {
            let url = format!("{files_url}/{}", file.id);
            self.send(self.request(Method::DELETE, &url), "file delete")
                .await?;
            let name = file.filename.as_deref().unwrap_or(&file.id);
            tracing::info!(%draft, file = name, "Removed file");
        }
        Ok(())
    }

    async fn resolve_bucket(&self, draft: DepositionId) -> Result<BucketLocation, DepositionError> {
        let deposition = self.get_deposition(draft).await?;
        let bucket = link(&deposition, "/links/bucket")?;
        Ok(BucketLocation(bucket.to_string()))
    }

    async fn upload(&self, bucket: &BucketLocation, file: &Path) -> Result<(), DepositionError> {
        let name = remote_file_name(file)?;
        let bytes = tokio::fs::read(file).await?;
        let size = bytes.len();

        let url = format!("{}/{}", bucket.as_str().trim_end_matches('/'), name);
        let req = self
            .request(Method::PUT, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes);
        self.send(req, &format!("upload of {name}")).await?;
        tracing::info!(file = %name, bytes = size, "Uploaded");
        Ok(())
    }

    async fn publish(&self, draft: DepositionId) -> Result<(), DepositionError> {
        let url = format!("{}/actions/publish", self.deposition_url(draft));
        self.send(self.request(Method::POST, &url), "publish")
            .await?;
        tracing::info!(%draft, "Published");
        Ok(())
    }
}
