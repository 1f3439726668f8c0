//! Integration tests for the Mat3ra API client.
//!
//! Every test runs the public client against a local `wiremock` server that
//! speaks the platform's `{status, data}` envelope.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With request logs
//! RUST_LOG=mat3ra_api_client=debug cargo test --test integration -- --nocapture
//! ```

mod auth_tests;
mod client_tests;
mod common;
mod workflow_tests;
