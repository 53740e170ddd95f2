//! Account proxy library.
//!
//! A small HTTP service relaying account create/retrieve/delete calls to an
//! upstream accounts REST API and relaying its JSON and status codes back.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod models;
pub mod observability;
pub mod upstream;

pub use config::ServiceConfig;
pub use http::AccountProxy;
pub use lifecycle::Shutdown;
