//! Auth-domain types: the redacted access token, its single-slot holder, the AppTrack user
//! strategy registration, and the host auth subsystem contract.

pub mod strategy;
pub mod subsystem;
pub mod token;

pub use strategy::*;
pub use subsystem::*;
pub use token::*;
