//! Domain logic for the ticketdesk service.
//!
//! This crate performs no I/O. It holds the closed ticket enumerations,
//! input validation, the stats computation and the classification outcome
//! types so that the repository, gateway and HTTP layers share one
//! definition of each rule.

pub mod classification;
pub mod error;
pub mod stats;
pub mod ticket;
pub mod types;
