//! State Management
//!
//! Session context, dashboard state, and the poll loop that refreshes it.

pub mod dashboard;
pub mod poller;
pub mod session;
