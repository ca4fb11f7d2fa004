pub mod app;
pub mod clock;
pub mod config;
pub mod errors;
pub mod grid;
pub mod handlers;
pub mod milestones;
pub mod models;
pub mod pipeline;
pub mod progress;
pub mod range;
pub mod scheduler;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
