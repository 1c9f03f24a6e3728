pub mod api;
pub mod app;
pub mod audio;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod global;
pub mod session;
pub mod transcript;

pub use config::Config;
pub use controller::RecordingController;
pub use session::{SessionHandle, SessionPhase, SessionState};
