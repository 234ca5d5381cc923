pub mod command;
pub mod config;
pub mod error;
pub mod link;
pub mod transaction;

pub use error::{BridgeError, Result};
pub use link::{LinkDirection, RadioLink};
pub use transaction::{Outcome, Transceiver};
