use crate::models::activity::RepoActivity;
use crate::models::github::Commit;
use crate::utils::markdown::sanitize_message;
use chrono::NaiveDate;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogStyle {
    #[default]
    Summary,
    Detailed,
}

pub fn render_log(
    activities: &[RepoActivity],
    today: NaiveDate,
    style: LogStyle,
    coding_time: Option<&str>,
) -> String {
    let active = activities.iter().filter(|a| a.has_commits());

    let mut out = match style {
        LogStyle::Summary => active
            .map(|a| render_summary_block(a, today))
            .collect::<String>(),
        LogStyle::Detailed => {
            let entries = active
                .flat_map(|a| a.commits.iter().map(move |c| render_detailed_entry(a, c)))
                .collect::<Vec<_>>();
            if entries.is_empty() {
                String::new()
            } else {
                let mut joined = entries.join("\n");
                joined.push('\n');
                joined
            }
        }
    };

    if let Some(duration) = coding_time {
        let _ = writeln!(out, "### Total Coding Time: {}", duration);
    }

    out
}

fn render_summary_block(activity: &RepoActivity, today: NaiveDate) -> String {
    let mut block = format!(
        "## {} ({})\n",
        activity.repository.name,
        today.format("%Y-%m-%d")
    );
    for commit in &activity.commits {
        let _ = writeln!(
            block,
            "- {} by {} on {}. Languages: {}",
            sanitize_message(&commit.commit.message),
            commit.author_name(),
            commit.author_date(),
            activity.languages
        );
    }
    block.push('\n');
    block
}

fn render_detailed_entry(activity: &RepoActivity, commit: &Commit) -> String {
    let repo = activity.repository.identifier();
    let author = match commit.author_email() {
        Some(email) => format!("{} ({})", commit.author_name(), email),
        None => commit.author_name().to_string(),
    };

    format!(
        "- **Repository**: [{repo}](https://github.com/{repo})\n\
         \x20 - **Branch**: {branch}\n\
         \x20 - **Commit Message**: {message}\n\
         \x20 - **Author**: {author}\n\
         \x20 - **Date**: {date}\n\
         \x20 - **Commit URL**: {url}\n",
        repo = repo,
        branch = activity.branch,
        message = sanitize_message(&commit.commit.message),
        author = author,
        date = commit.author_date(),
        url = commit.html_url,
    )
}
