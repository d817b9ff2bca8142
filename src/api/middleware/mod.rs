//! Middleware for the REST API.

pub mod tracing;
