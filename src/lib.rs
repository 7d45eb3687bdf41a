pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod loader;
pub mod migration;
pub mod models;
pub mod remote;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod time_utils;
pub mod ui;
pub mod validation;

pub use app::router;
pub use config::Config;
pub use loader::{LoadOutcome, LoadSource, load_challenge};
pub use state::AppState;
pub use storage::{FileStore, MemoryStore, Persistence};
pub use store::ChallengeStore;
