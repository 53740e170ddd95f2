//! Account resource payloads exchanged with the upstream accounts API.
//!
//! The proxy never interprets these values. They are decoded so that a
//! malformed upstream response is caught as a contract mismatch, and encoded
//! again unchanged for the caller.

pub mod account;

pub use account::{Account, AccountAttributes, AccountEnvelope};
