//! Dictionary Service Library
//!
//! A small dictionary lookup and contribution service: users look up definitions,
//! receive prefix suggestions while typing, and contribute new entries.
//!
//! ## Architecture Modules
//! - **`entries`**: The Entry Store. Keyed storage of word entries by normalized word, with a
//!   uniqueness constraint, an ordered prefix index and optional JSON snapshots.
//! - **`lookup`**: The Lookup Service. Validation, conflict/not-found policy, suggestion gating,
//!   and the axum router that exposes it over REST.
//! - **`client`**: A typed HTTP client for the service and a debounced suggestion pipeline.
//! - **`config`**: Server settings from environment and command line.

pub mod client;
pub mod config;
pub mod entries;
pub mod lookup;
