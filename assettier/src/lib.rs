//! AssetTier - device-aware asset delivery with an offline-first cache.
//!
//! This library classifies the rendering device into a quality tier once per
//! session, answers delivery questions from that tier (texture URL, KTX2
//! use, load concurrency), and runs an asset worker that intercepts requests
//! and serves them from versioned cache stores.
//!
//! # Modules
//!
//! - [`capability`] - device signals and the tier classifier
//! - [`delivery`] - per-tier delivery policy
//! - [`router`] - request classification and cache strategies
//! - [`lifecycle`] - install, activation cleanup and texture pre-fetch
//! - [`worker`] - event dispatcher tying router and lifecycle together
//! - [`cache`] - named response stores (memory or disk)
//! - [`app`] - configuration-driven bootstrap

pub mod app;
pub mod cache;
pub mod capability;
pub mod config;
pub mod delivery;
pub mod fetch;
pub mod lifecycle;
pub mod logging;
pub mod manifest;
pub mod router;
pub mod worker;
