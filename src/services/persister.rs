use crate::error::PersistError;
use crate::models::github::PutFileRequest;
use crate::services::github::GitHubClient;
use base64::{Engine as _, engine::general_purpose};
use log::info;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOCAL_FILE: &str = "activity_log.md";
pub const DEFAULT_REMOTE_FILE: &str = "README.md";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Updated Activity Log with new commit details";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum WriteMode {
    #[default]
    Append,
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub repo: String,
    pub path: String,
    pub branch: String,
    pub commit_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Local { path: PathBuf, mode: WriteMode },
    Remote(RemoteTarget),
}

impl std::fmt::Display for LogTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogTarget::Local { path, .. } => write!(f, "{}", path.display()),
            LogTarget::Remote(t) => write!(f, "{}:{}@{}", t.repo, t.path, t.branch),
        }
    }
}

pub fn write_local(path: &Path, mode: WriteMode, text: &str) -> Result<(), PersistError> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Append => options.append(true),
        WriteMode::Overwrite => options.write(true).truncate(true),
    };

    let mut file = options.open(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    info!("Wrote activity log to {}", path.display());
    Ok(())
}

pub fn merge_entry(existing: &str, entry: &str) -> String {
    if existing.is_empty() {
        entry.to_string()
    } else {
        format!("{}\n{}", existing, entry)
    }
}

/// Read-modify-write of a file in a remote repository. The PUT carries the sha
/// that was read, so a concurrent change comes back as a 409.
pub async fn append_remote(
    client: &GitHubClient,
    target: &RemoteTarget,
    entry: &str,
) -> Result<Option<String>, PersistError> {
    let current = client
        .get_file_content(&target.repo, &target.path, &target.branch)
        .await
        .map_err(PersistError::Fetch)?;

    let (existing, sha) = match current {
        Some(file) => {
            let encoded = match file.encoding.as_str() {
                "base64" => file.content,
                // files over 1 MB come back with empty content; read the blob instead
                "none" => {
                    info!("{} is too large for the contents API, reading blob {}", target.path, file.sha);
                    let blob = client
                        .get_blob(&target.repo, &file.sha)
                        .await
                        .map_err(PersistError::Fetch)?;
                    if blob.encoding != "base64" {
                        return Err(PersistError::Decode(format!("blob encoding {:?}", blob.encoding)));
                    }
                    blob.content
                }
                other => return Err(PersistError::Decode(format!("content encoding {:?}", other))),
            };
            (decode_content(&encoded)?, Some(file.sha))
        }
        None => {
            info!("{} not found. A new one will be created.", target.path);
            (String::new(), None)
        }
    };

    let request = PutFileRequest {
        message: target.commit_message.clone(),
        content: general_purpose::STANDARD.encode(merge_entry(&existing, entry)),
        branch: target.branch.clone(),
        sha: sha.clone(),
    };

    match client.put_file_content(&target.repo, &target.path, &request).await {
        Ok(new_sha) => {
            info!("{} updated successfully.", target.path);
            Ok(new_sha)
        }
        Err(e) if e.status() == Some(reqwest::StatusCode::CONFLICT) => Err(PersistError::Conflict {
            path: target.path.clone(),
            expected: sha.unwrap_or_else(|| "none".to_string()),
        }),
        Err(e) => Err(PersistError::Rejected(e)),
    }
}

/// The contents API wraps base64 at 60 columns.
fn decode_content(content: &str) -> Result<String, PersistError> {
    let cleaned: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = general_purpose::STANDARD
        .decode(cleaned)
        .map_err(|e| PersistError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| PersistError::Decode(e.to_string()))
}
