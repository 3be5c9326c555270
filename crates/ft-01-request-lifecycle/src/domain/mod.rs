//! # Domain Layer - Request Lifecycle Subsystem
//!
//! ## Components
//!
//! - `entities`: Request, RequestStatus, NewRequest, ActivityEntry, RequestFilter
//! - `errors`: LifecycleError enumeration

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
