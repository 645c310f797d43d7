//! rehab-client
//!
//! Async client for the rehabilitation backend, plus the client-side checks
//! that run before a request is allowed to leave.

pub mod backend;
pub mod dashboard;
pub mod error;
pub mod spreadsheet;

pub use backend::{BackendClient, DEFAULT_BACKEND_URL};
pub use error::ClientError;
