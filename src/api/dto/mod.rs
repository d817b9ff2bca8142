//! Request and response DTOs for the REST API.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! derives for inbound validation.

pub mod hackathon;
pub mod health;
pub mod refresh;
pub mod team;
