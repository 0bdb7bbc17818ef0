//! Lookup Service Module
//!
//! The externally facing contract of the dictionary. Validates and normalizes requests,
//! enforces the uniqueness policy on top of an `EntryStore`, and maps outcomes to HTTP
//! responses with machine-readable error kinds.
//!
//! ## Submodules
//! - **`service`**: Add / Define / Update / Delete / Suggest over a generic store.
//! - **`error`**: The `LookupError` taxonomy and its HTTP mapping.
//! - **`handlers`**: Axum handlers, generic over the store type.
//! - **`router`**: Route table and middleware layers.
//! - **`types`**: Request and response bodies shared with the client.

pub mod error;
pub mod handlers;
pub mod router;
pub mod service;
pub mod types;
