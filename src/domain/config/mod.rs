//! Configuration domain module

mod app_config;
mod settings;

pub use app_config::*;
pub use settings::{GatewaySettings, LogFormat};
