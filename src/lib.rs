//! # legislatie-proxy
//!
//! REST-to-SOAP translation proxy for the legislatie.just.ro free web
//! service: a small JSON HTTP API in front of hand-constructed SOAP calls,
//! with token caching and a single-retry recovery path for stale tokens.
//!
//! Modules:
//! - `config` — environment-driven settings
//! - `cache` — the process-wide token slot
//! - `upstream` — SOAP HTTP transport (GetToken, Search)
//! - `soap` — envelope construction and tolerant tag extraction
//! - `search` — the resilient search pipeline
//! - `model` — query normalization and record mapping
//! - `server` — axum routes and JSON envelopes

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod search;
pub mod server;
pub mod soap;
pub mod tests;
pub mod upstream;
pub mod utils;
