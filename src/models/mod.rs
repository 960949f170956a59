pub mod activity;
pub mod github;
pub mod wakatime;
