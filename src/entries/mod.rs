//! Entry Store Module
//!
//! Durable keyed storage for dictionary word entries.
//!
//! ## Core Concepts
//! - **Normalization**: Every word is trimmed and lowercased before it is used as a key,
//!   so `" Cat"`, `"cat"` and `"CAT "` all address the same entry.
//! - **Uniqueness**: At most one entry exists per normalized word. Inserts never overwrite.
//! - **Prefix Index**: An ordered index over the stored keys answers prefix queries with a
//!   range scan instead of case-folding every row.
//! - **Snapshots**: `MemoryEntryStore` can be bound to a JSON file that is rewritten after
//!   every successful mutation and reloaded on startup.

pub mod memory;
pub mod store;
pub mod types;
