use activity_log::cli::Cli;
use activity_log::error::PersistError;
use activity_log::handlers::activity::ActivityLogger;
use activity_log::models::activity::RunOutcome;
use anyhow::Result;
use chrono::Local;
use dotenv::dotenv;
use log::{error, info};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.into_config(env::var("GH_TOKEN").ok())?;
    let logger = ActivityLogger::new(config)?;

    info!("Fetching repositories...");
    match logger.run(Local::now().date_naive()).await {
        Ok(RunOutcome::NothingToLog) => Ok(()),
        Ok(RunOutcome::Written { repositories, commits }) => {
            info!("Logged {} commits from {} repositories", commits, repositories);
            Ok(())
        }
        Err(e) => {
            if e.downcast_ref::<PersistError>().is_some_and(PersistError::is_conflict) {
                error!("Activity log changed concurrently: {}", e);
            } else {
                error!("Activity log update failed: {}", e);
            }
            Err(e)
        }
    }
}
