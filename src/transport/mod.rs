//! HTTP transport for the platform REST API.
//!
//! [`Connection`] owns the pooled `reqwest` client and turns a [`Request`]
//! into exactly one HTTP round trip. It knows nothing about the response
//! envelope or authentication. Those live in
//! [`endpoints`](crate::endpoints).

mod connection;
mod request;

pub use connection::{Connection, header_map};
pub use request::{Body, Request};
