pub mod app;
pub mod board;
pub mod charts;
pub mod config;
pub mod errors;
pub mod export;
pub mod filter;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use board::Board;
pub use config::Settings;
pub use lifecycle::{Dashboard, Phase, Timings};
pub use state::AppState;
pub use storage::{load_dataset, resolve_data_path, FileSource};
