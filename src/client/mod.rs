//! Dictionary Client Module
//!
//! Typed HTTP access to a running dictionary server, and the debounced
//! suggestion pipeline used while a user is typing.

pub mod debounce;
pub mod http;

#[cfg(test)]
mod tests;
