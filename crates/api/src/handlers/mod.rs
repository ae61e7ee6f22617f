pub mod classify;
pub mod tickets;
