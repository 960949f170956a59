use crate::error::ApiError;
use crate::models::github::{Blob, Commit, FileContent, PutFileRequest, PutFileResponse, Repository};
use log::{debug, error};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Response, StatusCode};

pub const GITHUB_API_URL: &str = "https://api.github.com";

pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoScope {
    Authenticated,
    User(String),
}

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    authenticated: bool,
}

impl GitHubClient {
    pub fn new(token: Option<&str>) -> Result<Self, ApiError> {
        Self::with_base_url(token, GITHUB_API_URL)
    }

    pub fn with_base_url(token: Option<&str>, base_url: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("activity-log"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        if let Some(t) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", t))
                .map_err(|e| ApiError::Decode(format!("invalid token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            authenticated: token.is_some(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub async fn list_repositories(&self, scope: &RepoScope) -> Result<Vec<Repository>, ApiError> {
        let url = match scope {
            RepoScope::Authenticated => format!("{}/user/repos", self.base_url),
            RepoScope::User(name) => format!("{}/users/{}/repos", self.base_url, name),
        };
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", MAX_PAGE_SIZE)])
            .send()
            .await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    pub async fn list_commits(
        &self,
        full_name: &str,
        branch: &str,
        per_page: u32,
    ) -> Result<Vec<Commit>, ApiError> {
        let url = format!("{}/repos/{}/commits", self.base_url, full_name);
        debug!("GET {} (sha={}, per_page={})", url, branch, per_page);

        let response = self
            .client
            .get(&url)
            .query(&[("sha", branch.to_string()), ("per_page", per_page.min(MAX_PAGE_SIZE).to_string())])
            .send()
            .await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    pub async fn get_languages(&self, full_name: &str) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/repos/{}/languages", self.base_url, full_name);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;

        let body: serde_json::Value = response.json().await?;
        let languages = body
            .as_object()
            .ok_or_else(|| ApiError::Decode("languages payload is not an object".to_string()))?;

        Ok(languages.keys().cloned().collect())
    }

    pub async fn get_file_content(
        &self,
        full_name: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<FileContent>, ApiError> {
        let url = format!("{}/repos/{}/contents/{}", self.base_url, full_name, path);
        debug!("GET {} (ref={})", url, branch);

        let response = self.client.get(&url).query(&[("ref", branch)]).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;

        Ok(Some(response.json().await?))
    }

    pub async fn get_blob(&self, full_name: &str, sha: &str) -> Result<Blob, ApiError> {
        let url = format!("{}/repos/{}/git/blobs/{}", self.base_url, full_name, sha);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    pub async fn put_file_content(
        &self,
        full_name: &str,
        path: &str,
        request: &PutFileRequest,
    ) -> Result<Option<String>, ApiError> {
        let url = format!("{}/repos/{}/contents/{}", self.base_url, full_name, path);
        debug!("PUT {} (branch={}, sha={:?})", url, request.branch, request.sha);

        let response = self.client.put(&url).json(request).send().await?;
        let response = check_status(response).await?;

        let body: PutFileResponse = response.json().await?;
        Ok(body.content.map(|c| c.sha))
    }
}

pub(crate) async fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error!("API error {}: {}", status, body);
    Err(ApiError::Status { status, body })
}
