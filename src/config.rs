use crate::services::github::RepoScope;
use crate::services::persister::LogTarget;
use crate::services::renderer::LogStyle;
use crate::services::wakatime::CodingWindow;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub github_username: Option<String>,
    pub wakatime_api_key: Option<String>,
    pub github_api_url: String,
    pub wakatime_api_url: String,
    pub commits_per_repo: u32,
    pub style: LogStyle,
    /// `None` disables the coding-time fetch and its trailing line.
    pub coding_window: Option<CodingWindow>,
    pub target: LogTarget,
    pub state_file: Option<PathBuf>,
}

impl Config {
    pub fn repo_scope(&self) -> Option<RepoScope> {
        match (&self.github_token, &self.github_username) {
            (Some(_), _) => Some(RepoScope::Authenticated),
            (None, Some(user)) => Some(RepoScope::User(user.clone())),
            (None, None) => None,
        }
    }
}
