//! HTTP API layer: route handlers, error mapping and OpenAPI exposure

pub mod error;
pub mod health;
pub mod openapi;
pub mod report;
pub mod translate;
pub mod triage;
