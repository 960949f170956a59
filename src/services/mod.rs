pub mod github;
pub mod persister;
pub mod renderer;
pub mod state;
pub mod wakatime;
