pub mod import;
pub mod manager;

pub use crate::domain::model::{ImportResult, Patron};
pub use import::LineError;
pub use manager::{PatronManager, RejectReason};
