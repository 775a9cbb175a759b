//! Transport layer for the Mono SDK.

pub mod http;

pub use http::{to_pretty_text, HttpTransport, Query};
