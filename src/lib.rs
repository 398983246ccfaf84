//! ReplCalc - menu-driven calculator built on a plugin command dispatcher

pub mod app;
pub mod calculator;
pub mod commands;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod error;
pub mod plugins;

pub use app::App;
pub use config::Config;
pub use error::{CalcError, Result};
