use crate::models::activity::Watermark;
use crate::models::github::Commit;
use anyhow::Result;
use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct WatermarkStore {
    file_path: PathBuf,
    marks: HashMap<String, Watermark>,
}

impl WatermarkStore {
    pub fn new(file_path: &Path) -> Result<Self> {
        let marks = if file_path.exists() {
            let content = fs::read_to_string(file_path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            file_path: file_path.to_path_buf(),
            marks,
        })
    }

    pub fn get(&self, repo: &str) -> Option<&Watermark> {
        self.marks.get(repo)
    }

    /// Commits newer than the watermark. The input is newest-first, so this
    /// stops at the first already-logged sha.
    pub fn unseen(&self, repo: &str, commits: Vec<Commit>) -> Vec<Commit> {
        match self.get(repo) {
            Some(mark) => commits
                .into_iter()
                .take_while(|c| c.sha != mark.last_logged_sha)
                .collect(),
            None => commits,
        }
    }

    pub fn record(&mut self, repo: &str, sha: &str) {
        self.marks.insert(
            repo.to_string(),
            Watermark {
                repo: repo.to_string(),
                last_logged_sha: sha.to_string(),
                logged_at: Utc::now(),
            },
        );
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.marks)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}
