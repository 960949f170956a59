use super::github::{Commit, Repository};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct RepoActivity {
    pub repository: Repository,
    pub branch: String,
    pub commits: Vec<Commit>,
    pub languages: String,
}

impl RepoActivity {
    pub fn has_commits(&self) -> bool {
        !self.commits.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Watermark {
    pub repo: String,
    pub last_logged_sha: String,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NothingToLog,
    Written { repositories: usize, commits: usize },
}
