use serde::{Deserialize, Serialize};

pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub languages_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Repository {
    pub fn identifier(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }

    pub fn branch(&self) -> &str {
        self.default_branch
            .as_deref()
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BRANCH)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub sha: String,
    pub commit: CommitDetail,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub author: Option<CommitAuthor>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Kept as the API's ISO-8601 text so it renders unchanged.
    pub date: String,
}

impl Commit {
    pub fn author_name(&self) -> &str {
        self.commit
            .author
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown")
    }

    pub fn author_email(&self) -> Option<&str> {
        self.commit.author.as_ref().and_then(|a| a.email.as_deref())
    }

    pub fn author_date(&self) -> &str {
        self.commit
            .author
            .as_ref()
            .map(|a| a.date.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileContent {
    pub path: String,
    pub sha: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: String,
}

#[derive(Debug, Deserialize)]
pub struct Blob {
    pub sha: String,
    pub content: String,
    pub encoding: String,
}

#[derive(Debug, Serialize)]
pub struct PutFileRequest {
    pub message: String,
    pub content: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PutFileResponse {
    pub content: Option<FileContent>,
}
