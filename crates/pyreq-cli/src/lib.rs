//! JSON-over-stdin dispatcher for the pyreq parsers.
//!
//! The binary reads one request envelope from stdin, routes it by an
//! enumerated request kind, and prints the parsed record as a single JSON
//! line on stdout. Any failure is logged to stderr and surfaces as a
//! non-zero exit status; there is no structured error envelope.
//!
//! The routing core ([`dispatch`]) is a pure function over a validated
//! [`Request`], so every boundary behavior is covered by in-process tests.

pub mod dispatch;
pub mod request;

// Re-export commonly used types
pub use dispatch::dispatch;
pub use request::{DispatchError, Envelope, Request, RequestKind};
