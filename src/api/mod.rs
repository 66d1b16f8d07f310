//! API Client
//!
//! HTTP access to the fraud-detection service.

pub mod client;

pub use client::*;
