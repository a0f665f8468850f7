mod app;
pub use app::{App, RunSummary};

pub mod args;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;

pub use config::Settings;
pub use error::{exit, AppError};
