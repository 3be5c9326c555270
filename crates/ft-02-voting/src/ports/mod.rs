//! Ports layer for the Voting subsystem.
//!
//! - Inbound (Driving) ports: API exposed to the transport boundary
//! - Outbound (Driven) ports: vote persistence and request lookup

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
