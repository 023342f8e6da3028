//! CLI command implementations.
//!
//! - [`classify`] - device classification and texture URLs
//! - [`worker`] - install/activate, request routing and pre-fetch
//! - [`cache`] - store listing and cleanup

pub mod cache;
pub mod classify;
pub mod common;
pub mod worker;
