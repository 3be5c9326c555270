//! Ports layer for the Request Lifecycle subsystem.
//!
//! - Inbound (Driving) ports: API exposed to the transport boundary
//! - Outbound (Driven) ports: request persistence, activity log, vote cascade

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
