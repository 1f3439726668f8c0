//! Error types for the API client.
//!
//! Every fallible operation returns [`Result<T>`], whose error carries an
//! [`ErrorKind`] for matching plus a human-readable message.
//!
//! Failures fall into three groups:
//! - **HTTP errors**: the server answered with a non-2xx status. The error
//!   records the status code and its message ends with a remediation hint.
//! - **Envelope errors** ([`ErrorKind::Api`]): the server answered 2xx but the
//!   response envelope reported a failure. The message is the server's own.
//! - **Client-side errors**: missing credentials, invalid configuration or
//!   unsupported operations, raised before any request is sent.
//!
//! ```rust,ignore
//! match client.jobs().get("job-id").await {
//!     Ok(job) => println!("{}", job["name"]),
//!     Err(e) if e.kind() == ErrorKind::Api => eprintln!("server said: {}", e.message()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

mod core;
mod http;
mod kind;

pub use self::core::Error;
pub use http::{StatusHint, status_hint};
pub use kind::ErrorKind;

/// A specialized `Result` type for API client operations.
pub type Result<T> = std::result::Result<T, Error>;
