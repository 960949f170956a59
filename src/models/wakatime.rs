use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub data: StatsData,
}

#[derive(Debug, Deserialize)]
pub struct StatsData {
    #[serde(default)]
    pub human_readable_total: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AllTimeResponse {
    pub data: AllTimeData,
}

#[derive(Debug, Deserialize)]
pub struct AllTimeData {
    #[serde(default)]
    pub text: Option<String>,
}
