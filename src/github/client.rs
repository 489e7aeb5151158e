//! GitHub API client implementation

use crate::core::{RunnersError, RunnersResult};
use crate::di::traits::ReleasesProvider;
use crate::github::types::{ApiErrorBody, CreateReleaseBody, GitHubRelease, ReleaseRequest};
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// GitHub API client
pub struct GitHubClient {
    http_client: HttpClient,
    api_url: String,
    rate_limiter: Arc<RateLimiter>,
}

/// Rate limit state reported by the GitHub API
struct RateLimiter {
    remaining: Mutex<Option<u64>>,
    reset_time: Mutex<SystemTime>,
}

impl GitHubClient {
    /// Create a new GitHub client against `api_url` (e.g. `https://api.github.com`)
    pub fn new(api_url: &str) -> RunnersResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("runners-release-automation"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(RateLimiter {
                remaining: Mutex::new(None),
                reset_time: Mutex::new(SystemTime::now()),
            }),
        })
    }

    /// Create a release and upload its asset, if one is given
    pub async fn create_release(
        &self,
        request: &ReleaseRequest,
        token: &str,
    ) -> RunnersResult<GitHubRelease> {
        self.check_rate_limit().await?;

        let url = format!(
            "{}/repos/{}/{}/releases",
            self.api_url,
            urlencoding::encode(&request.owner),
            urlencoding::encode(&request.repo)
        );
        let body = CreateReleaseBody {
            tag_name: &request.tag,
            name: &request.name,
            body: &request.body,
            draft: request.draft,
            prerelease: request.prerelease,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let response = self.ensure_success(response).await?;
        let release: GitHubRelease = response.json().await?;

        info!(
            "Created release {} on {}/{}",
            release.tag_name, request.owner, request.repo
        );

        if let Some(asset) = &request.asset_path {
            self.upload_asset(&release, asset, token).await?;
        }

        Ok(release)
    }

    /// Upload a file to an existing release
    pub async fn upload_asset(
        &self,
        release: &GitHubRelease,
        asset_path: &Path,
        token: &str,
    ) -> RunnersResult<()> {
        let file_name = asset_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                RunnersError::Path(format!("Invalid asset path: {}", asset_path.display()))
            })?;
        let bytes = tokio::fs::read(asset_path).await?;

        let url = format!(
            "{}?name={}",
            release.upload_base(),
            urlencoding::encode(&file_name)
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await?;
        self.ensure_success(response).await?;

        info!("Uploaded {} to release {}", file_name, release.tag_name);
        Ok(())
    }

    /// Turn non-2xx responses into `RunnersError::GitHub`
    async fn ensure_success(&self, response: reqwest::Response) -> RunnersResult<reqwest::Response> {
        self.update_rate_limit(&response).await;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|b| b.message)
            .unwrap_or(text);

        Err(RunnersError::GitHub {
            status: status.as_u16(),
            message,
        })
    }

    /// Check if we're within rate limits
    async fn check_rate_limit(&self) -> RunnersResult<()> {
        let remaining = *self.rate_limiter.remaining.lock().await;
        let reset_time = *self.rate_limiter.reset_time.lock().await;

        if remaining == Some(0) {
            let now = SystemTime::now();
            if now < reset_time {
                let wait = reset_time.duration_since(now).unwrap_or(Duration::ZERO);
                return Err(RunnersError::GitHub {
                    status: 429,
                    message: format!(
                        "rate limit exceeded, resets in {} seconds",
                        wait.as_secs()
                    ),
                });
            }
        }

        Ok(())
    }

    /// Update rate limit from response headers
    async fn update_rate_limit(&self, response: &reqwest::Response) {
        let header_u64 = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
        };

        if let Some(remaining) = header_u64("x-ratelimit-remaining") {
            if remaining < 10 {
                warn!("GitHub API rate limit nearly exhausted ({} left)", remaining);
            }
            *self.rate_limiter.remaining.lock().await = Some(remaining);
        }

        if let Some(reset) = header_u64("x-ratelimit-reset") {
            *self.rate_limiter.reset_time.lock().await =
                SystemTime::UNIX_EPOCH + Duration::from_secs(reset);
        }
    }
}

#[async_trait]
impl ReleasesProvider for GitHubClient {
    async fn create(
        &self,
        request: &ReleaseRequest,
        token: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<GitHubRelease> {
        tokio::select! {
            result = self.create_release(request, token) => result,
            _ = cancel.cancelled() => Err(RunnersError::Cancelled),
        }
    }
}
