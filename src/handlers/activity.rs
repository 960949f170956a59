use crate::config::Config;
use crate::error::ApiError;
use crate::models::activity::{RepoActivity, RunOutcome};
use crate::models::github::{Commit, Repository};
use crate::services::github::GitHubClient;
use crate::services::persister::{LogTarget, append_remote, write_local};
use crate::services::renderer::render_log;
use crate::services::state::WatermarkStore;
use crate::services::wakatime::{FALLBACK_DURATION, WakaTimeClient};
use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};

pub const UNKNOWN_LANGUAGES: &str = "Unknown";

pub struct ActivityLogger {
    config: Config,
    github: GitHubClient,
    wakatime: Option<WakaTimeClient>,
}

impl ActivityLogger {
    pub fn new(config: Config) -> Result<Self> {
        let github = GitHubClient::with_base_url(config.github_token.as_deref(), &config.github_api_url)?;

        let wakatime = match (&config.coding_window, &config.wakatime_api_key) {
            (Some(_), Some(key)) => Some(WakaTimeClient::with_base_url(key, &config.wakatime_api_url)?),
            _ => None,
        };

        Ok(Self {
            config,
            github,
            wakatime,
        })
    }

    pub async fn repositories(&self) -> Vec<Repository> {
        let result = match self.config.repo_scope() {
            Some(scope) => self.github.list_repositories(&scope).await,
            None => Err(ApiError::MissingCredential("GITHUB_TOKEN or GITHUB_USERNAME")),
        };

        match result {
            Ok(repos) => {
                info!("Found {} repositories", repos.len());
                repos
            }
            Err(e) => {
                warn!("Error fetching repositories: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn recent_commits(&self, repo: &Repository, branch: &str) -> Vec<Commit> {
        match self
            .github
            .list_commits(repo.identifier(), branch, self.config.commits_per_repo)
            .await
        {
            Ok(commits) => commits,
            Err(e) => {
                warn!("Error fetching commits for {}: {}", repo.identifier(), e);
                Vec::new()
            }
        }
    }

    pub async fn languages(&self, repo: &Repository) -> String {
        match self.github.get_languages(repo.identifier()).await {
            Ok(languages) if !languages.is_empty() => languages.join(", "),
            Ok(_) => UNKNOWN_LANGUAGES.to_string(),
            Err(e) => {
                warn!("Error fetching languages for {}: {}", repo.identifier(), e);
                UNKNOWN_LANGUAGES.to_string()
            }
        }
    }

    pub async fn coding_time(&self) -> Option<String> {
        let window = self.config.coding_window?;

        let result = match &self.wakatime {
            Some(client) => client.total_coding_time(window).await,
            None => Err(ApiError::MissingCredential("WAKATIME_API_KEY")),
        };

        Some(result.unwrap_or_else(|e| {
            warn!("Error fetching coding time: {}", e);
            FALLBACK_DURATION.to_string()
        }))
    }

    pub async fn collect(&self, watermarks: Option<&WatermarkStore>) -> Vec<RepoActivity> {
        let mut activities = Vec::new();

        for repo in self.repositories().await {
            let branch = repo.branch().to_string();
            info!("Fetching commits for {} ({})...", repo.identifier(), branch);

            let mut commits = self.recent_commits(&repo, &branch).await;
            if let Some(store) = watermarks {
                commits = store.unseen(repo.identifier(), commits);
            }

            if commits.is_empty() {
                info!("Skipping {}: no new commits", repo.identifier());
                continue;
            }

            let languages = self.languages(&repo).await;
            activities.push(RepoActivity {
                repository: repo,
                branch,
                commits,
                languages,
            });
        }

        activities
    }

    pub async fn run(&self, today: NaiveDate) -> Result<RunOutcome> {
        let mut watermarks = match &self.config.state_file {
            Some(path) => match WatermarkStore::new(path) {
                Ok(store) => Some(store),
                Err(e) => {
                    warn!("Ignoring unreadable state file {}: {}", path.display(), e);
                    None
                }
            },
            None => None,
        };

        let activities = self.collect(watermarks.as_ref()).await;
        if activities.is_empty() {
            info!("No new commits found to log.");
            return Ok(RunOutcome::NothingToLog);
        }

        let coding_time = self.coding_time().await;
        let text = render_log(&activities, today, self.config.style, coding_time.as_deref());

        info!("Updating activity log at {}...", self.config.target);
        match &self.config.target {
            LogTarget::Local { path, mode } => write_local(path, *mode, &text)?,
            LogTarget::Remote(target) => {
                append_remote(&self.github, target, &text).await?;
            }
        }

        if let Some(store) = watermarks.as_mut() {
            for activity in &activities {
                if let Some(newest) = activity.commits.first() {
                    store.record(activity.repository.identifier(), &newest.sha);
                }
            }
            if let Err(e) = store.save() {
                warn!("Could not save state file: {}", e);
            }
        }

        Ok(RunOutcome::Written {
            repositories: activities.len(),
            commits: activities.iter().map(|a| a.commits.len()).sum(),
        })
    }
}
