use crate::config::Config;
use crate::services::github::GITHUB_API_URL;
use crate::services::persister::{
    DEFAULT_COMMIT_MESSAGE, DEFAULT_LOCAL_FILE, DEFAULT_REMOTE_FILE, LogTarget, RemoteTarget,
    WriteMode,
};
use crate::services::renderer::LogStyle;
use crate::services::wakatime::{CodingWindow, WAKATIME_API_URL};
use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetKind {
    Local,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CodingTimeArg {
    #[value(name = "last7-days")]
    Last7Days,
    AllTime,
    Off,
}

#[derive(Debug, Parser)]
#[command(name = "activity-log")]
#[command(about = "Log recent GitHub commits and coding time to a Markdown file")]
#[command(version)]
pub struct Cli {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub personal access token")]
    pub token: Option<String>,

    #[arg(long, env = "GITHUB_USERNAME", help = "User whose public repositories are listed when no token is set")]
    pub username: Option<String>,

    #[arg(long, env = "WAKATIME_API_KEY", hide_env_values = true, help = "WakaTime API key")]
    pub wakatime_key: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_URL)]
    pub github_api_url: String,

    #[arg(long, env = "WAKATIME_API_URL", default_value = WAKATIME_API_URL)]
    pub wakatime_api_url: String,

    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=100), help = "Commits fetched per repository")]
    pub commits: u32,

    #[arg(long, value_enum, default_value_t = LogStyle::Summary)]
    pub style: LogStyle,

    #[arg(long, value_enum, default_value_t = CodingTimeArg::Last7Days)]
    pub coding_time: CodingTimeArg,

    #[arg(long, value_enum, default_value_t = TargetKind::Local)]
    pub target: TargetKind,

    #[arg(long, value_enum, default_value_t = WriteMode::Append, help = "How the local log file is written")]
    pub mode: WriteMode,

    #[arg(long, default_value = DEFAULT_LOCAL_FILE, help = "Local log file")]
    pub output: PathBuf,

    #[arg(long, env = "LOG_REPO", help = "Repository (owner/name) holding the remote log")]
    pub log_repo: Option<String>,

    #[arg(long, default_value = "main")]
    pub log_branch: String,

    #[arg(long, default_value = DEFAULT_REMOTE_FILE)]
    pub log_file: String,

    #[arg(long, help = "Remember the last logged commit per repository in this file")]
    pub state_file: Option<PathBuf>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// `fallback_token` covers the `GH_TOKEN` name used by CI secrets.
    pub fn into_config(self, fallback_token: Option<String>) -> Result<Config> {
        let target = match self.target {
            TargetKind::Local => LogTarget::Local {
                path: self.output,
                mode: self.mode,
            },
            TargetKind::Remote => {
                let repo = self
                    .log_repo
                    .filter(|r| r.contains('/'))
                    .ok_or_else(|| anyhow!("--log-repo owner/name is required for the remote target"))?;
                LogTarget::Remote(RemoteTarget {
                    repo,
                    path: self.log_file,
                    branch: self.log_branch,
                    commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
                })
            }
        };

        let coding_window = match self.coding_time {
            CodingTimeArg::Last7Days => Some(CodingWindow::Last7Days),
            CodingTimeArg::AllTime => Some(CodingWindow::AllTime),
            CodingTimeArg::Off => None,
        };

        Ok(Config {
            github_token: self
                .token
                .filter(|t| !t.is_empty())
                .or(fallback_token.filter(|t| !t.is_empty())),
            github_username: self.username.filter(|u| !u.is_empty()),
            wakatime_api_key: self.wakatime_key.filter(|k| !k.is_empty()),
            github_api_url: self.github_api_url,
            wakatime_api_url: self.wakatime_api_url,
            commits_per_repo: self.commits,
            style: self.style,
            coding_window,
            target,
            state_file: self.state_file,
        })
    }
}
