//! Support code for the `obesity` command-line tool.

pub mod config;
pub mod report;

pub use config::{AppConfig, ConfigError, FormConfig};
pub use report::{render_error, render_inspect, render_prediction, Report};
