//! `satchel` command-line session: configuration, a loadout backed by a save
//! file, and transfer notifications.

pub mod config;
pub mod session;

pub use config::AppConfig;
pub use session::{Session, SessionError, SessionResult, TransferEnvelope};
