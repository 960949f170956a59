use crate::error::ApiError;
use crate::models::wakatime::{AllTimeResponse, StatsResponse};
use crate::services::github::check_status;
use base64::{Engine as _, engine::general_purpose};
use log::debug;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

pub const WAKATIME_API_URL: &str = "https://wakatime.com/api/v1";

pub const FALLBACK_DURATION: &str = "0 hours";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CodingWindow {
    #[value(name = "last7-days")]
    Last7Days,
    AllTime,
}

pub struct WakaTimeClient {
    client: reqwest::Client,
    base_url: String,
}

impl WakaTimeClient {
    pub fn new(api_key: &str) -> Result<Self, ApiError> {
        Self::with_base_url(api_key, WAKATIME_API_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, ApiError> {
        let encoded = general_purpose::STANDARD.encode(api_key);

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("activity-log"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", encoded))
                .map_err(|e| ApiError::Decode(format!("invalid api key: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn total_coding_time(&self, window: CodingWindow) -> Result<String, ApiError> {
        match window {
            CodingWindow::Last7Days => {
                let url = format!("{}/users/current/stats/last_7_days", self.base_url);
                debug!("GET {}", url);
                let response = check_status(self.client.get(&url).send().await?).await?;
                let stats: StatsResponse = response.json().await?;
                stats
                    .data
                    .human_readable_total
                    .ok_or_else(|| ApiError::Decode("stats carry no human_readable_total".to_string()))
            }
            CodingWindow::AllTime => {
                let url = format!("{}/users/current/all_time_since_today", self.base_url);
                debug!("GET {}", url);
                let response = check_status(self.client.get(&url).send().await?).await?;
                let stats: AllTimeResponse = response.json().await?;
                stats
                    .data
                    .text
                    .ok_or_else(|| ApiError::Decode("all-time stats carry no text".to_string()))
            }
        }
    }
}
