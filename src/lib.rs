// Library surface shared by the terminal front-end, the headless protocol
// and integration tests. Terminal rendering types stay in main.rs.
pub mod app_dirs;
pub mod assets;
pub mod celebration;
pub mod challenge;
pub mod config;
pub mod error;
pub mod grading;
pub mod insights;
pub mod intensity;
pub mod protocol;
pub mod runtime;
pub mod service;
pub mod session;
pub mod simulation;
pub mod stats;
pub mod store;
pub mod time_series;
pub mod util;
pub mod zone;

pub use error::{Result, ThumpError};
