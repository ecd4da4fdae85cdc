pub mod app;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::app::LibraryApp;
pub use crate::core::{ImportResult, LineError, Patron, PatronManager, RejectReason};
pub use utils::error::{PatronError, Result};
